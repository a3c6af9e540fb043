//! Pinterest Pinner
//!
//! Programmatically create a Pinterest pin by driving the website the way a
//! browser does: log in with a username and password, scrape the session's
//! anti-forgery token and app version out of pages and cookies, and call the
//! site's private `/resource/<Name>Resource/<action>/` endpoints.
//!
//! # Architecture
//!
//! - [`session::PinnerGeneric`]: the session state machine, generic over the
//!   [`session::HttpTransport`] it sends requests through
//! - [`session::ReqwestTransport`]: the real transport, one cookie jar shared by
//!   the site and API hosts
//! - [`session::scrape`]: the regex-based extraction the session relies on
//! - [`config`]: settings from defaults, a TOML file and the environment
//!
//! The private API is undocumented and changes without notice; expect this
//! crate to break when the site does.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pinterest_pinner::{Pinner, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut pinner = Pinner::new(&Settings::default())?;
//! pinner.configure_credentials("me@example.com", "secret");
//!
//! for (id, name) in pinner.fetch_boards().await? {
//!     println!("{id}: {name}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use session::{Pinner, PinnerGeneric};
pub use types::{Boards, Credentials, PinDraft, UserData};
