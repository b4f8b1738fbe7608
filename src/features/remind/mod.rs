//! # Reminding Feature
//!
//! Picks the least-reviewed note, renders it and records that it was sent.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Minimum-send-count fairness with uniform tie breaking
//! - 1.0.0: Initial note assembly and history recording

pub mod format;
pub mod note;
pub mod selection;
pub mod service;

pub use note::Note;
pub use service::ReminderService;
