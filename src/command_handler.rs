//! Command dispatcher
//!
//! Parses prefixed text commands and dispatches them through the registry.
//! The allow-list guard and the rate limiter run before any handler does.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{debug, warn};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::commands::context::CommandContext;
use crate::commands::handlers::{HelpHandler, RemindHandler, StatsHandler};
use crate::commands::registry::CommandRegistry;
use crate::core::config::Config;
use crate::database::Database;
use crate::features::rate_limiting::RateLimiter;
use crate::features::remind::ReminderService;

pub struct CommandHandler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    rate_limiter: RateLimiter,
}

impl CommandHandler {
    /// Build the registry and shared context. All command-to-handler mapping
    /// is resolved here, once, at startup.
    pub fn new(database: Database, reminder: Arc<ReminderService>, config: Arc<Config>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(HelpHandler));
        registry.register(Arc::new(RemindHandler));
        registry.register(Arc::new(StatsHandler));

        let context = Arc::new(CommandContext {
            menu: registry.menu(),
            database,
            reminder,
            config,
        });

        CommandHandler {
            registry,
            context,
            rate_limiter: RateLimiter::new(10, Duration::from_secs(60)),
        }
    }

    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let Some(command) = parse_command(&self.context.config.command_prefix, &msg.content)
        else {
            return Ok(());
        };

        let Some(handler) = self.registry.get(&command) else {
            debug!("Ignoring unknown command '{command}'");
            return Ok(());
        };

        let user_id = msg.author.id.0;
        if !self.context.config.is_allowed_user(user_id) {
            warn!("Access for user id='{user_id}' declined");
            return Ok(());
        }

        if !self.rate_limiter.check_rate_limit(user_id) {
            warn!("Rate limit exceeded for user id='{user_id}'");
            msg.channel_id
                .say(
                    &ctx.http,
                    "You're sending commands too quickly, please slow down.",
                )
                .await?;
            return Ok(());
        }

        debug!("User id='{user_id}' runs '{command}'");
        handler.handle(Arc::clone(&self.context), ctx, msg).await
    }
}

/// Extract the command word from a message, e.g. "!remind now" -> "remind".
fn parse_command(prefix: &str, content: &str) -> Option<String> {
    let rest = content.trim().strip_prefix(prefix)?;
    let word = rest.split_whitespace().next()?;
    Some(word.to_lowercase())
}
