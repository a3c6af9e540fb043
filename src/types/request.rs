//! Request type definitions
//!
//! Defines the inputs a session needs before it can log in and create a pin.

use serde::{Deserialize, Serialize};

/// Account credentials used by the login step
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Username or e-mail
    pub login: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create new credentials
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Fields of the pin to be created
///
/// Nothing is validated here; bad or missing values surface later as
/// server-side errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinDraft {
    /// Board the pin is added to
    pub board_id: Option<String>,
    /// Image URL scraped by the site
    pub image_url: Option<String>,
    /// Pin description
    pub description: Option<String>,
    /// Link the pin points at
    pub link: Option<String>,
    /// Share the new pin on the connected Facebook account
    pub share_facebook: bool,
}

impl PinDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target board id
    pub fn with_board_id(mut self, board_id: impl Into<String>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }

    /// Set image URL
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set 'Share on Facebook' flag
    pub fn with_share_facebook(mut self, share: bool) -> Self {
        self.share_facebook = share;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_draft_default() {
        let draft = PinDraft::default();
        assert_eq!(draft.board_id, None);
        assert_eq!(draft.image_url, None);
        assert!(!draft.share_facebook);
    }

    #[test]
    fn test_pin_draft_builder() {
        let draft = PinDraft::new()
            .with_board_id("42")
            .with_image_url("https://example.com/cat.jpg")
            .with_description("A cat")
            .with_link("https://example.com/cats")
            .with_share_facebook(true);

        assert_eq!(draft.board_id.as_deref(), Some("42"));
        assert_eq!(draft.image_url.as_deref(), Some("https://example.com/cat.jpg"));
        assert_eq!(draft.description.as_deref(), Some("A cat"));
        assert_eq!(draft.link.as_deref(), Some("https://example.com/cats"));
        assert!(draft.share_facebook);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("alice", "hunter2");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
