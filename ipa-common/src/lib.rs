//! # IPA Lookup Common Library
//!
//! Shared code for the IPA lookup workspace:
//! - Error types
//! - Configuration loading and resolution
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
