//! # newsdesk common library
//!
//! Shared code for the newsdesk services:
//! - Error type used during startup
//! - Bootstrap configuration loading (CLI/env overrides, TOML file, defaults)

pub mod config;
pub mod error;

pub use config::{ApiKey, Settings};
pub use error::{Error, Result};
