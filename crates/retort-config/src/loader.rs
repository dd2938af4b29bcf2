use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `${VAR}` placeholders, then deserializes and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a variable is missing,
    /// TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is missing, TOML parsing fails, or
    /// validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_store()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let server = &self.server;

        if server.health.enabled && !server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if let Some(ref url) = server.public_url {
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("server.public_url must be an http or https URL");
            }
            if url.query().is_some() || url.fragment().is_some() {
                anyhow::bail!("server.public_url must not have a query or fragment");
            }
        }

        if let Some(ref key) = server.api_key
            && key.expose_secret().is_empty()
        {
            anyhow::bail!("server.api_key must not be empty when set");
        }

        Ok(())
    }

    fn validate_store(&self) -> anyhow::Result<()> {
        if self.store.max_items == 0 {
            anyhow::bail!("store.max_items must be greater than 0");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        if self.telemetry.log_filter.trim().is_empty() {
            anyhow::bail!("telemetry.log_filter must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{Config, LogFormat};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.server.health.enabled);
        assert_eq!(config.store.max_items, 10_000);
        assert_eq!(config.telemetry.format, LogFormat::Text);
    }

    #[test]
    fn load_from_file_with_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [server]
            listen_address = "127.0.0.1:${{RETORT_LOADER_PORT}}"

            [store]
            max_items = 3

            [telemetry]
            format = "json"
            "#
        )
        .unwrap();

        temp_env::with_var("RETORT_LOADER_PORT", Some("4100"), || {
            let config = Config::load(file.path()).unwrap();
            assert_eq!(config.server.listen_address.map(|a| a.port()), Some(4100));
            assert_eq!(config.store.max_items, 3);
            assert_eq!(config.telemetry.format, LogFormat::Json);
        });
    }

    #[test]
    fn missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/retort.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn rejects_unknown_section() {
        let err = Config::from_toml("[database]\nurl = \"x\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Config::from_toml("[store]\nmax_items = 0").unwrap_err();
        assert!(err.to_string().contains("store.max_items"));
    }

    #[test]
    fn rejects_relative_health_path() {
        let err = Config::from_toml("[server.health]\npath = \"health\"").unwrap_err();
        assert!(err.to_string().contains("server.health.path"));
    }

    #[test]
    fn rejects_non_http_public_url() {
        let err = Config::from_toml("[server]\npublic_url = \"ftp://example.com\"").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_public_url_with_query() {
        let err = Config::from_toml("[server]\npublic_url = \"https://example.com/?a=1\"").unwrap_err();
        assert!(err.to_string().contains("query or fragment"));
    }

    #[test]
    fn rejects_empty_api_key() {
        let err = Config::from_toml("[server]\napi_key = \"\"").unwrap_err();
        assert!(err.to_string().contains("server.api_key"));
    }

    #[test]
    fn rejects_blank_log_filter() {
        let err = Config::from_toml("[telemetry]\nlog_filter = \"  \"").unwrap_err();
        assert!(err.to_string().contains("log_filter"));
    }

    #[test]
    fn missing_variable_is_reported() {
        temp_env::with_var_unset("RETORT_LOADER_KEY", || {
            let err = Config::from_toml("[server]\napi_key = \"${RETORT_LOADER_KEY}\"").unwrap_err();
            assert!(err.to_string().contains("RETORT_LOADER_KEY"));
        });
    }
}
