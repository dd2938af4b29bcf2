use serde::Deserialize;

/// In-memory item store configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Maximum number of items held at once
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_items() -> usize {
    10_000
}
