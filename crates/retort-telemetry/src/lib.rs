//! Logging setup for Retort
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a fmt
//! layer in text or JSON form

use retort_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Guard held for the lifetime of the application
///
/// Logging is unbuffered today; the guard keeps `init` call sites stable
/// should a buffered exporter be added.
#[must_use = "dropping the guard early ends the logging session"]
pub struct TelemetryGuard {
    format: LogFormat,
}

impl TelemetryGuard {
    /// Format the subscriber was installed with
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("telemetry shut down");
    }
}

/// Initialize logging from configuration
///
/// An invalid filter falls back to `info` rather than failing startup.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let filter = build_filter(&config.log_filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(config.format))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(TelemetryGuard { format: config.format })
}

fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("invalid log filter `{directives}`, falling back to `info`: {e}");
        EnvFilter::new("info")
    })
}

fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn valid_filter_is_kept() {
        let filter = build_filter("warn,retort_server=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn invalid_filter_falls_back_to_info() {
        let filter = build_filter("retort_server=notalevel");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig {
            format: LogFormat::Json,
            ..TelemetryConfig::default()
        };
        let first = init(&config).unwrap();
        assert_eq!(first.format(), LogFormat::Json);

        let err = init(&config).err().unwrap();
        assert!(err.to_string().contains("failed to install tracing subscriber"));
    }
}
