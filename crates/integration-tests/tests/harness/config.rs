//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use retort_config::{Config, HealthConfig, ServerConfig, StoreConfig, TelemetryConfig};
use secrecy::SecretString;
use url::Url;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                store: StoreConfig::default(),
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Require this key for destructive endpoints
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.server.api_key = Some(SecretString::from(key));
        self
    }

    /// Make `Location` headers absolute
    pub fn with_public_url(mut self, url: &str) -> Self {
        self.config.server.public_url = Some(Url::parse(url).expect("valid URL"));
        self
    }

    /// Limit the item store
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.config.store.max_items = max_items;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
