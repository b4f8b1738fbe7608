//! Help command handler
//!
//! Handles: help, start

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::commands::context::CommandContext;
use crate::commands::handler::MessageCommandHandler;

pub struct HelpHandler;

#[async_trait]
impl MessageCommandHandler for HelpHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["help", "start"]
    }

    fn description(&self) -> &'static str {
        "Show what I can do"
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        debug!("User id='{}' asked for help", msg.author.id);

        let text = render_menu(&ctx.config.command_prefix, &ctx.menu);
        msg.channel_id.say(&serenity_ctx.http, text).await?;
        Ok(())
    }
}

fn render_menu(prefix: &str, menu: &[(&'static str, &'static str)]) -> String {
    let commands = menu
        .iter()
        .map(|(name, description)| format!("{description}: `{prefix}{name}`"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("This is what I can do:\n\n{commands}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_names() {
        let handler = HelpHandler;
        assert!(handler.command_names().contains(&"help"));
        assert!(handler.command_names().contains(&"start"));
    }

    #[test]
    fn test_render_menu() {
        let menu = [
            ("help", "Show what I can do"),
            ("remind", "Send me a note to review"),
        ];
        let text = render_menu("!", &menu);

        assert!(text.contains("Show what I can do: `!help`"));
        assert!(text.contains("Send me a note to review: `!remind`"));
    }
}
