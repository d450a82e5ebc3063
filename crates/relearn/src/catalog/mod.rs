//! Catalog model and loading for the learning-video platform.
//!
//! A catalog is a static topic → collection → item hierarchy, loaded once
//! from TOML configuration and treated as an immutable snapshot at runtime.
//! Order is significant at every level: it defines the "first uncompleted
//! item" fallback used by [`crate::resolve::resolve_next`].
//!
//! # Examples
//!
//! ```
//! use relearn::catalog::{Catalog, CatalogIndex};
//!
//! let catalog = Catalog::from_toml_str(
//!   r#"
//!   [[sections]]
//!   topic = "programming"
//!
//!   [[sections.collections]]
//!   id = "rust-basics"
//!   title = "Rust Basics"
//!
//!   [[sections.collections.items]]
//!   id = "rust-01"
//!   title = "Getting Started"
//!   duration_seconds = 540
//!   "#,
//! )
//! .unwrap();
//!
//! let index = CatalogIndex::build(&catalog);
//! assert_eq!(index.get("rust-01").unwrap().collection_id, "rust-basics");
//! ```

use super::*;

mod index;

pub use index::{CatalogIndex, IndexEntry};

/// Fixed set of topic tags a collection can belong to.
///
/// Serialized in kebab-case, matching the catalog TOML files and the tab
/// labels the presentation layer renders.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
  /// Programming and software engineering videos
  Programming,
  /// Mathematics videos
  Mathematics,
  /// Natural science videos
  Science,
  /// Design and UX videos
  Design,
  /// Business and entrepreneurship videos
  Business,
  /// Language learning videos
  Language,
}

impl Display for Topic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let tag = match self {
      Topic::Programming => "programming",
      Topic::Mathematics => "mathematics",
      Topic::Science => "science",
      Topic::Design => "design",
      Topic::Business => "business",
      Topic::Language => "language",
    };
    write!(f, "{tag}")
  }
}

impl FromStr for Topic {
  type Err = RelearnError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "programming" => Ok(Topic::Programming),
      "mathematics" => Ok(Topic::Mathematics),
      "science" => Ok(Topic::Science),
      "design" => Ok(Topic::Design),
      "business" => Ok(Topic::Business),
      "language" => Ok(Topic::Language),
      other => Err(RelearnError::InvalidCatalog(format!("unknown topic tag: {other}"))),
    }
  }
}

/// A single watchable unit in the catalog.
///
/// Item ids are opaque strings, unique across the whole catalog (not just
/// within their collection); a progress key therefore identifies exactly
/// one catalog position. The owning collection is the structural parent and
/// is surfaced through [`IndexEntry`] rather than duplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
  /// Opaque identifier, unique across the whole catalog
  pub id:               String,
  /// Display title
  pub title:            String,
  /// Duration in seconds; absent or zero means "unknown duration"
  #[serde(default)]
  pub duration_seconds: Option<u32>,
}

impl ContentItem {
  /// Returns the duration if it is actually known (present and non-zero).
  pub fn known_duration(&self) -> Option<u32> { self.duration_seconds.filter(|&d| d > 0) }
}

/// An ordered sequence of items under one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
  /// Opaque identifier, unique across the catalog
  pub id:    String,
  /// Display title
  pub title: String,
  /// Items in display order; order defines the resume fallback order
  #[serde(default)]
  pub items: Vec<ContentItem>,
}

/// One topic tab with its collections in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSection {
  /// The topic tag this section is rendered under
  pub topic:       Topic,
  /// Collections in display order
  #[serde(default)]
  pub collections: Vec<Collection>,
}

/// The full static topic → collection → item hierarchy.
///
/// Built once from configuration and immutable at runtime. Catalogs are
/// expected to guarantee global item-id uniqueness; this is not validated,
/// and [`CatalogIndex::build`] documents the last-writer-wins behavior when
/// the expectation is violated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
  /// Topic sections in display order
  #[serde(default)]
  pub sections: Vec<TopicSection>,
}

/// One item together with its catalog position, yielded by [`Catalog::walk`].
#[derive(Debug, Clone, Copy)]
pub struct CatalogPosition<'a> {
  /// The topic the item is filed under
  pub topic:      Topic,
  /// The owning collection
  pub collection: &'a Collection,
  /// The item itself
  pub item:       &'a ContentItem,
}

impl Catalog {
  /// Parses a catalog from TOML text.
  pub fn from_toml_str(text: &str) -> Result<Self> {
    let catalog: Catalog = toml::from_str(text)?;
    catalog.validate()?;
    Ok(catalog)
  }

  /// Loads a catalog from a TOML file on disk.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Self::from_toml_str(&text)
  }

  /// Structural checks: ids must be non-empty. Global id uniqueness is
  /// deliberately not checked here.
  fn validate(&self) -> Result<()> {
    for section in &self.sections {
      for collection in &section.collections {
        if collection.id.is_empty() {
          return Err(RelearnError::InvalidCatalog(format!(
            "collection \"{}\" under topic {} has an empty id",
            collection.title, section.topic
          )));
        }
        for item in &collection.items {
          if item.id.is_empty() {
            return Err(RelearnError::InvalidCatalog(format!(
              "item \"{}\" in collection {} has an empty id",
              item.title, collection.id
            )));
          }
        }
      }
    }
    Ok(())
  }

  /// Iterates every item in catalog order: topics, then collections, then
  /// items, exactly the order the resolver's fallback pass uses.
  pub fn walk(&self) -> impl Iterator<Item = CatalogPosition<'_>> {
    self.sections.iter().flat_map(|section| {
      section.collections.iter().flat_map(move |collection| {
        collection
          .items
          .iter()
          .map(move |item| CatalogPosition { topic: section.topic, collection, item })
      })
    })
  }

  /// Total number of items across all sections.
  pub fn item_count(&self) -> usize { self.walk().count() }

  /// Whether the catalog holds no items at all.
  pub fn is_empty(&self) -> bool { self.walk().next().is_none() }
}
