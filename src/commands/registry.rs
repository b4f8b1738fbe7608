//! Command handler registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::MessageCommandHandler;

/// Registry mapping command names to handlers, resolved once at startup.
///
/// Multiple names can map to the same handler (aliases). Registration order
/// is preserved for the help listing.
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn MessageCommandHandler>>,
    ordered: Vec<Arc<dyn MessageCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            ordered: Vec::new(),
        }
    }

    /// Register a handler for all names it declares.
    pub fn register(&mut self, handler: Arc<dyn MessageCommandHandler>) {
        self.ordered.push(Arc::clone(&handler));
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Get the handler for a command name, if any.
    pub fn get(&self, name: &str) -> Option<Arc<dyn MessageCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names (aliases counted separately).
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// (primary name, description) for every handler in registration order.
    pub fn menu(&self) -> Vec<(&'static str, &'static str)> {
        self.ordered
            .iter()
            .filter_map(|handler| {
                handler
                    .command_names()
                    .first()
                    .map(|name| (*name, handler.description()))
            })
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::channel::Message;
    use serenity::prelude::Context;

    struct FakeHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl MessageCommandHandler for FakeHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        fn description(&self) -> &'static str {
            "does fake things"
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _msg: &Message,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.menu().is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(FakeHandler { names: &["remind"] }));

        assert!(registry.contains("remind"));
        assert!(registry.get("remind").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_aliases_share_a_handler() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(FakeHandler {
            names: &["help", "start"],
        }));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("help"));
        assert!(registry.contains("start"));
    }

    #[test]
    fn test_menu_lists_primary_names_in_order() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(FakeHandler {
            names: &["help", "start"],
        }));
        registry.register(Arc::new(FakeHandler { names: &["remind"] }));

        let menu = registry.menu();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].0, "help");
        assert_eq!(menu[1].0, "remind");
    }
}
