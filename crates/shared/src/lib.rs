//! Shared errors, configuration, and number formatting for Comparo.
//!
//! This crate provides the pieces used by both the analysis engine and the
//! command-line driver:
//! - Number parsing and display formatting with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::NumberFormat;
