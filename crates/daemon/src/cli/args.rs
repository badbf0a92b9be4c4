pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "drivefs")]
#[command(about = "An in-memory namespace of drives, folders and files")]
pub struct Args {
    /// Daemon API URL (defaults to localhost on the configured api_port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the drivefs config directory (defaults to ~/.drivefs)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
