use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gamescout_platform::{NativeHost, TracingSink};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// gamescout - inspect where the host keeps game installations
#[derive(Parser)]
#[command(name = "gamescout")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Emit machine-readable JSON instead of text
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List all mounted filesystem roots
  Roots {
    /// Probe each root for a redirect marker
    #[arg(long)]
    redirects: bool,
  },

  /// Probe a single filesystem root for a redirect marker
  Redirect {
    /// The filesystem root to probe
    root: PathBuf,
  },

  /// Read a string value from the host configuration store
  RegGet {
    /// Root key name, e.g. HKEY_LOCAL_MACHINE
    root: String,
    /// Subkey path below the root key
    subkey: String,
    /// Name of the value to read
    value: String,
  },

  /// List the child keys of a host configuration store key
  RegKeys {
    /// Root key name, e.g. HKEY_LOCAL_MACHINE
    root: String,
    /// Subkey path below the root key
    subkey: String,
  },

  /// Compare two filenames the way the host filesystem does
  Compare { lhs: String, rhs: String },

  /// Show the resolved well-known paths
  Paths,
}

fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();
  let host = NativeHost::with_sink(Arc::new(TracingSink));

  match cli.command {
    Commands::Roots { redirects } => cmd::cmd_roots(&host, redirects, cli.json),
    Commands::Redirect { root } => cmd::cmd_redirect(&host, &root, cli.json),
    Commands::RegGet { root, subkey, value } => cmd::cmd_reg_get(&host, &root, &subkey, &value, cli.json),
    Commands::RegKeys { root, subkey } => cmd::cmd_reg_keys(&host, &root, &subkey, cli.json),
    Commands::Compare { lhs, rhs } => cmd::cmd_compare(&host, &lhs, &rhs, cli.json),
    Commands::Paths => cmd::cmd_paths(&host, cli.json),
  }
}
