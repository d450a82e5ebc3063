//! Watch-progress tracking and resume resolution for learning catalogs.
//!
//! `relearn` is the core of a learning-video platform, providing:
//!
//! - A static catalog model (topics, collections, watchable items)
//! - Per-item watch-progress records for guests and signed-in users
//! - Deterministic merging of guest history into a user's remote history
//! - "Continue learning" resolution across the whole catalog
//! - Watch-time points and completion badges
//!
//! # Features
//!
//! - **Guest fallback**: anonymous progress lives in a local JSON blob and
//!   survives reloads until it is merged into a signed-in user's record
//! - **Deterministic merge**: completion always wins over incompletion,
//!   recency breaks the remaining conflicts, ties keep the remote entry
//! - **Partial remote writes**: only entries that actually changed during a
//!   merge are written back to the document store
//! - **Tolerant storage**: individually malformed stored entries are
//!   skipped and logged, never failing a whole read
//!
//! # Getting Started
//!
//! ```no_run
//! use relearn::{
//!   catalog::{Catalog, CatalogIndex},
//!   prelude::*,
//!   session::{Identity, Session},
//!   store::{GuestStore, MemoryStore, ProgressStore},
//! };
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!   let catalog = Catalog::load("catalog.toml")?;
//!   let index = CatalogIndex::build(&catalog);
//!
//!   let store = ProgressStore::new(MemoryStore::new(), GuestStore::new(GuestStore::default_path()));
//!   let mut session = Session::new(store, Identity::Guest);
//!
//!   // Playback UI reports progress on a periodic cadence.
//!   session.record_tick("intro-01", 42.0, false).await;
//!
//!   // Later, the visitor signs in and their guest history is merged.
//!   session.sign_in("user-123").await;
//!
//!   if let Some(target) = session.resume_target(&catalog, &index).await {
//!     println!("Continue with: {}", target.item.title);
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`catalog`]: catalog model, TOML loading, and the flat item index
//! - [`progress`]: progress records and the merge engine
//! - [`resolve`]: next-item resolution
//! - [`store`]: guest/remote storage adapters
//! - [`session`]: identity state and the sign-in merge sequence
//! - [`awards`]: watch-time points and completion badges
//! - [`prelude`]: common traits and types for ergonomic imports
//!
//! # Design Philosophy
//!
//! The merge engine, index builder, and resolver are pure synchronous
//! functions over plain data; all I/O lives behind the store adapters.
//! Timestamps are normalized to [`chrono::DateTime<Utc>`] at the adapter
//! boundary so the core never sees a raw serialized variant.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, HashMap},
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod awards;
pub mod catalog;
pub mod configuration;
pub mod error;
pub mod progress;
pub mod resolve;
pub mod session;
pub mod store;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// Brings in the pieces nearly every caller touches: the error type, the
/// [`Result`] alias, and the [`DocumentStore`](store::DocumentStore) seam
/// for plugging in a remote backend.
pub mod prelude {
  pub use crate::{
    error::{RelearnError, Result},
    store::DocumentStore,
  };
}
