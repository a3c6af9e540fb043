//! Error type definitions
//!
//! Every failure is terminal for the operation that raised it. Variants exist so
//! callers can match on a category, but the displayed text is the plain message
//! a user should see.

use thiserror::Error;

/// Main error type for the pinner session
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx response from the site or API host
    #[error("HTTP error ({path}): {status} {reason}")]
    Http {
        path: String,
        status: u16,
        reason: String,
    },

    /// The `P.main.start(...)` blob had no `context.app_version`
    #[error("Error getting App Version from P.main.start() JSON data.")]
    AppVersionNotFound,

    /// No `csrftoken` cookie in the last response
    #[error("Error getting CSRFToken.")]
    CsrfTokenNotFound,

    /// Error string reported by the server inside `resource_response.error`
    #[error("{0}")]
    Rejected(String),

    /// Login response carried neither an error nor any data
    #[error("Unknown error while logging in.")]
    Login,

    /// Pin creation response carried neither an error nor a pin id
    #[error("Unknown error while creating a pin.")]
    PinCreation,

    /// Profile page had no usable embedded user data
    #[error("Unknown error while getting user data.")]
    UserData,

    /// Board listing needs a username from the profile
    #[error("Missing username in user data.")]
    MissingUsername,

    /// Pin listing failed or returned an unexpected shape
    #[error("Unknown error while getting pins list.")]
    Pins,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new HTTP status error
    pub fn http(path: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            path: path.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create an error carrying a server-reported message
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
