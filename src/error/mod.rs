//! Error handling for the pinner session
//!
//! This module defines the error type surfaced by every session operation.

pub mod types;

pub use types::{Error, Result};
