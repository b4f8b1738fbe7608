//! # Command System
//!
//! Prefixed text command (`!remind`, ...) handling.
//!
//! Handlers are registered in an explicit name-to-handler registry resolved
//! at startup; the dispatcher guards every dispatch with the allow-list and
//! the rate limiter.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

// Re-export the dispatcher from the application layer
pub use crate::command_handler::CommandHandler;

pub use context::CommandContext;
pub use handler::MessageCommandHandler;
pub use registry::CommandRegistry;
