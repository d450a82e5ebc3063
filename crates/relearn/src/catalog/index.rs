//! Flat item-id lookup over a nested catalog.

use super::*;

/// Catalog position for one indexed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  /// The item itself
  pub item:          ContentItem,
  /// Id of the owning collection
  pub collection_id: String,
  /// Topic the item is filed under
  pub topic:         Topic,
}

/// Flat lookup from item id to catalog position.
///
/// Built in a single pass over the catalog in display order. The index is a
/// derived structure: it must be rebuilt whenever the catalog snapshot it
/// was built from is replaced.
///
/// If two items anywhere in the catalog share an id, the one encountered
/// later in iteration order silently overwrites the earlier. Catalogs are
/// expected to guarantee global id uniqueness; the index does not validate
/// this.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
  /// item id → catalog position
  entries: HashMap<String, IndexEntry>,
}

impl CatalogIndex {
  /// Builds the index from a catalog snapshot.
  pub fn build(catalog: &Catalog) -> Self {
    let mut entries = HashMap::with_capacity(catalog.item_count());
    for pos in catalog.walk() {
      entries.insert(pos.item.id.clone(), IndexEntry {
        item:          pos.item.clone(),
        collection_id: pos.collection.id.clone(),
        topic:         pos.topic,
      });
    }
    Self { entries }
  }

  /// Looks up the catalog position of an item.
  pub fn get(&self, item_id: &str) -> Option<&IndexEntry> { self.entries.get(item_id) }

  /// Whether the item id is part of this catalog.
  pub fn contains(&self, item_id: &str) -> bool { self.entries.contains_key(item_id) }

  /// Number of distinct indexed item ids.
  pub fn len(&self) -> usize { self.entries.len() }

  /// Whether the index holds no entries.
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
