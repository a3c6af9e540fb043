//! Configuration loading utilities
//!
//! Provides helper functions for loading configuration from various sources
//! with proper error handling and validation.

use crate::{Result, config::Settings};
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration loader with multiple source support
#[derive(Debug)]
pub struct ConfigLoader {
    /// Default settings
    defaults: Settings,
}

impl ConfigLoader {
    /// Create new configuration loader
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Load configuration with precedence order:
    /// 1. Environment variables (highest priority)
    /// 2. Configuration file
    /// 3. Default values (lowest priority)
    ///
    /// Command line flags are applied by the caller on top of the result.
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        self.load_with_vars(config_file, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`] with an explicit variable lookup
    pub fn load_with_vars<F>(&self, config_file: Option<&Path>, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = self.defaults.clone();

        if let Some(path) = config_file {
            if path.exists() {
                info!("Loading configuration from file: {:?}", path);
                settings = Settings::from_file(path)?;
            } else {
                warn!("Configuration file not found: {:?}, using defaults", path);
            }
        }

        debug!("Applying environment variable overrides");
        settings = settings.merge_with_vars(lookup)?;

        settings.validate()?;

        debug!("Final configuration: {:?}", settings);

        Ok(settings)
    }

    /// Get default configuration
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_defaults() {
        let loader = ConfigLoader::new();
        let settings = loader.load_with_vars(None, no_vars).unwrap();

        assert_eq!(settings.endpoints.site_url, "https://www.pinterest.com");
        assert_eq!(settings.http.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[endpoints]
site_url = "http://localhost:8080"

[account]
login = "alice@example.com"
password = "secret"

[http]
timeout_secs = 12
        "#
        )
        .unwrap();

        let loader = ConfigLoader::new();
        let settings = loader
            .load_with_vars(Some(temp_file.path()), no_vars)
            .unwrap();

        assert_eq!(settings.endpoints.site_url, "http://localhost:8080");
        assert_eq!(settings.endpoints.api_url, "https://api.pinterest.com");
        assert_eq!(settings.account.login.as_deref(), Some("alice@example.com"));
        assert_eq!(settings.http.timeout_secs, 12);
        assert!(settings.http.accept_invalid_certs);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let settings = ConfigLoader::new()
            .load_with_vars(Some(&missing), no_vars)
            .unwrap();
        assert_eq!(settings.http.timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[account]\nlogin = \"from-file\"").unwrap();

        let settings = ConfigLoader::new()
            .load_with_vars(Some(temp_file.path()), |key| {
                (key == "PINNER_LOGIN").then(|| "from-env".to_string())
            })
            .unwrap();
        assert_eq!(settings.account.login.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[http]\ntimeout_secs = \"never\"").unwrap();

        let result = ConfigLoader::new().load_with_vars(Some(temp_file.path()), no_vars);
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
