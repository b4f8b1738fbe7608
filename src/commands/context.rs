//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::sync::Arc;

use crate::core::config::Config;
use crate::database::Database;
use crate::features::remind::ReminderService;

/// Shared state handed to every command handler.
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    pub reminder: Arc<ReminderService>,
    pub config: Arc<Config>,
    /// (command, description) pairs resolved at startup, used by `!help`.
    pub menu: Vec<(&'static str, &'static str)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
