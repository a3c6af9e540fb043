//! Session management for pin creation
//!
//! This module holds the session state machine that logs in, derives the
//! site's anti-forgery token and app version, and calls the private resource
//! endpoints, together with the transport it runs on and the scraping helpers
//! it uses to read values out of pages and cookies.

pub mod pinner;
pub mod scrape;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use pinner::{Pinner, PinnerGeneric};
pub use transport::{Host, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
