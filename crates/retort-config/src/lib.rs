#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod store;
pub mod telemetry;

use serde::Deserialize;

pub use server::*;
pub use store::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Retort configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Item store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
