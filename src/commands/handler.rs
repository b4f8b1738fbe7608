//! Text command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use super::context::CommandContext;

/// Trait for prefixed text command handlers.
///
/// Each handler processes one or more commands; handlers are registered with
/// a [`super::CommandRegistry`](crate::commands::CommandRegistry) and
/// dispatched by command name.
#[async_trait]
pub trait MessageCommandHandler: Send + Sync {
    /// Command name(s) this handler answers to, without the prefix.
    fn command_names(&self) -> &'static [&'static str];

    /// One-line description shown by the help command.
    fn description(&self) -> &'static str;

    /// Handle one invocation.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context with database, reminder service, config
    /// * `serenity_ctx` - Serenity context for Discord API calls
    /// * `msg` - The message that triggered the command
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()>;
}
