//! # Sekai Common Library
//!
//! Shared code for the Sekai catalog tools:
//! - Error type used at every I/O boundary
//! - Configuration file resolution and TOML loading
//! - Atomic file writes for generated artifacts
//! - The HTTP user-agent string

pub mod config;
pub mod error;

pub use error::{Error, Result};
