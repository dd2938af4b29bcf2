use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Retort item catalog
#[derive(Debug, Parser)]
#[command(name = "retort", about = "Item catalog service rendering results as HTTP responses")]
pub struct Args {
    /// Path to configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "retort.toml", env = "RETORT_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "RETORT_LISTEN")]
    pub listen: Option<SocketAddr>,
}
