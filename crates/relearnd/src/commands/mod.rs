//! Command implementations for the CLI, one module per subcommand.

use super::*;

pub mod catalog;
pub mod clean;
pub mod init;
pub mod resume;
pub mod signin;
pub mod signout;
pub mod status;
pub mod tick;

pub use catalog::catalog_tree;
pub use clean::clean;
pub use init::init;
pub use resume::resume;
pub use signin::signin;
pub use signout::signout;
pub use status::status;
pub use tick::tick;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Initialize the data directory, database, and starter catalog
  Init(init::InitOptions),

  /// Show the catalog as a topic → collection → item tree
  Catalog(catalog::CatalogOptions),

  /// Record a playback-progress tick for the active identity
  Tick(tick::TickOptions),

  /// Sign in, merging any guest progress into the user's record
  Signin(signin::SigninOptions),

  /// Return to guest browsing; remote progress stays put
  Signout,

  /// Show the "Continue Learning" target
  Continue,

  /// Show progress, points, and badges for the active identity
  Status,

  /// Remove the database, guest progress, and session state
  Clean,
}
