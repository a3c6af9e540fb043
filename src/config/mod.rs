//! Configuration management for the pinner
//!
//! This module handles loading and managing configuration settings
//! for both the library session and the command-line front end.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;
