//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for the HTTP API
//! - Operation context for persistence errors
//! - Configuration structures

pub mod config;
pub mod error;
#[cfg(feature = "database")]
pub mod storage;

pub use config::*;
pub use error::{AppError, AppResult, FieldError, OptionExt};
#[cfg(feature = "database")]
pub use storage::{violation, StorageContext, Violation};
