//! Command line interface for the relearn learning-video platform core.
//!
//! This crate provides a CLI over the `relearn` library. It supports:
//! - Data directory initialization with a starter catalog
//! - Catalog browsing by topic
//! - Playback-progress ticks for guests and signed-in users
//! - Sign-in with guest-history merge, and sign-out
//! - "Continue Learning" resolution and progress/award summaries
//!
//! # Usage
//!
//! ```bash
//! # Set up the database and starter catalog
//! relearn init
//!
//! # Browse the catalog
//! relearn catalog
//!
//! # Record a playback tick while browsing as a guest
//! relearn tick rust-01 42.5
//!
//! # Finish an item
//! relearn tick rust-01 540 --completed
//!
//! # Sign in, merging guest history into the user's record
//! relearn signin alice
//!
//! # What to watch next
//! relearn continue
//!
//! # Points, badges, and per-item progress
//! relearn status
//! ```
//!
//! Identity persists between invocations in a small state file next to the
//! database, so a `signin` applies to every later command until `signout`.
//! Verbosity is controlled with `-v` flags.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use relearn::{
  awards::AwardSummary,
  catalog::{Catalog, CatalogIndex},
  configuration::Config,
  progress::ProgressRecord,
  resolve::ResumeTarget,
  session::{Identity, MergeOutcome, Session},
  store::{GuestStore, ProgressStore, SqliteStore},
};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;
pub mod state;

use crate::{commands::*, error::*, interaction::*, state::CliState};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "CLI for the relearn learning-video platform")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Directory holding the catalog, database, guest blob, and session
  /// state. If not specified, uses the platform-specific default
  /// directories instead.
  #[arg(long, short, global = true)]
  data_dir: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Entry point for the relearn CLI application
///
/// Parses arguments, sets up logging, and executes the requested command.
/// All commands provide styled output; `clean` asks for confirmation
/// before removing anything.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let Some(command) = cli.command.clone() else {
    println!("Please specify a command. Use --help for usage information.");
    std::process::exit(1);
  };

  let config = match &cli.data_dir {
    Some(dir) => Config::under_dir(dir),
    None => Config::default(),
  };

  // Init and clean manage the data directory itself and must run without a
  // loaded catalog or opened store.
  match &command {
    Commands::Init(options) => return init(&cli, &config, options.clone()).await,
    Commands::Clean => return clean(&cli, &config),
    _ => {},
  }

  let catalog = match Catalog::load(&config.catalog_path) {
    Ok(catalog) => catalog,
    Err(err) => {
      eprintln!(
        "{} No catalog at {} ({err}). Run `relearn init` first.",
        style(ERROR_PREFIX).red(),
        config.catalog_path.display(),
      );
      return Err(RelearndError::State("data directory not initialized".into()));
    },
  };
  let index = CatalogIndex::build(&catalog);

  let remote = SqliteStore::open(&config.database_path).await.map_err(RelearndError::from)?;
  let store = ProgressStore::new(remote, GuestStore::new(&config.guest_store_path));

  let state_path = state::state_path(&config);
  let mut state = CliState::load(&state_path);
  let mut session = Session::new(store, state.identity.clone());

  match command {
    Commands::Catalog(options) => catalog_tree(&cli, &catalog, options),
    Commands::Tick(options) => tick(&cli, &session, &index, options).await,
    Commands::Signin(options) => signin(&cli, &mut session, options).await,
    Commands::Signout => signout(&cli, &mut session),
    Commands::Continue => resume(&cli, &session, &catalog, &index).await,
    Commands::Status => status(&cli, &session, &catalog).await,
    // Handled before the store was opened.
    Commands::Init(_) | Commands::Clean => Ok(()),
  }?;

  state.identity = session.identity().clone();
  state.save(&state_path)?;
  Ok(())
}
