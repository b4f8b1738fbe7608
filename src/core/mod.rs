//! # Core Module
//!
//! Configuration, error taxonomy and shared text utilities for the renote bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with message chunking utilities
//! - 1.0.0: Initial creation with config and errors modules

pub mod config;
pub mod errors;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use errors::{DeliveryError, RemindError, StorageError};
pub use response::{chunk_for_message, chunk_text, MESSAGE_LIMIT};
