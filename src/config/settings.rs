//! Configuration settings structure
//!
//! Defines the settings consumed by the session transport and the CLI, plus
//! the environment and file sources they can be loaded from.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Browser-like User-Agent the site expects from its own web client
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML => like Gecko) Iron/31.0.1700.0 Chrome/31.0.1700.0";

/// Accept-Language sent with every request
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Main configuration settings for the pinner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hosts the session talks to
    pub endpoints: EndpointSettings,
    /// HTTP client configuration
    pub http: HttpSettings,
    /// Account credentials
    pub account: AccountSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Site and API base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    /// Main website, serves pages and `/resource/...` endpoints
    pub site_url: String,
    /// Separate API host, serves the public pin listing
    pub api_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// User-Agent header
    pub user_agent: String,
    /// Accept-Language header
    pub accept_language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

/// Account credentials
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// Username or e-mail
    pub login: Option<String>,
    /// Account password
    pub password: Option<String>,
}

impl std::fmt::Debug for AccountSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSettings")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            site_url: "https://www.pinterest.com".to_string(),
            api_url: "https://api.pinterest.com".to_string(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: 30,
            accept_invalid_certs: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            verbose: false,
        }
    }
}

impl HttpSettings {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pinterest-pinner").join("config.toml"))
    }

    /// Load settings from a TOML file, missing keys fall back to defaults
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Invalid config file {:?}: {}", path, e)))
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Apply environment variable overrides on top of these settings
    pub fn merge_with_env(self) -> crate::Result<Self> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_with_vars<F>(mut self, lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(site_url) = lookup("PINNER_SITE_URL") {
            self.endpoints.site_url = site_url;
        }

        if let Some(api_url) = lookup("PINNER_API_URL") {
            self.endpoints.api_url = api_url;
        }

        if let Some(login) = lookup("PINNER_LOGIN") {
            self.account.login = Some(login);
        }

        if let Some(password) = lookup("PINNER_PASSWORD") {
            self.account.password = Some(password);
        }

        if let Some(timeout) = lookup("PINNER_TIMEOUT") {
            self.http.timeout_secs = timeout
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid timeout: {}", e)))?;
        }

        if let Some(flag) = lookup("PINNER_ACCEPT_INVALID_CERTS") {
            self.http.accept_invalid_certs = parse_bool(&flag).ok_or_else(|| {
                crate::Error::Config(format!("Invalid boolean for PINNER_ACCEPT_INVALID_CERTS: {}", flag))
            })?;
        }

        Ok(self)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> crate::Result<()> {
        self.site_url()?;
        self.api_url()?;

        if self.http.timeout_secs == 0 {
            return Err(crate::Error::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Parsed site base URL
    pub fn site_url(&self) -> crate::Result<Url> {
        parse_base_url(&self.endpoints.site_url)
    }

    /// Parsed API base URL
    pub fn api_url(&self) -> crate::Result<Url> {
        parse_base_url(&self.endpoints.api_url)
    }
}

fn parse_base_url(raw: &str) -> crate::Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| crate::Error::Config(format!("Invalid URL {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(crate::Error::Config(format!("Not a base URL: {}", raw)));
    }
    Ok(url)
}

/// Accepts `true`/`false`/`1`/`0`, case-insensitive
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
