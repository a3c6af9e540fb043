//! Utility functions and helpers
//!
//! This module contains utility functions used throughout the application.

pub mod time;
pub mod version;

pub use time::cache_buster;
pub use version::{VERSION, get_version};
