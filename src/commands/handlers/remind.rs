//! Remind command handler
//!
//! Handles: remind

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::commands::context::CommandContext;
use crate::commands::handler::MessageCommandHandler;
use crate::core::errors::RemindError;
use crate::features::delivery::DiscordNotifier;

pub struct RemindHandler;

#[async_trait]
impl MessageCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remind"]
    }

    fn description(&self) -> &'static str {
        "Send me a note to review"
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        let user_id = msg.author.id.0;
        debug!("User id='{user_id}' reminds a note");

        let notifier = DiscordNotifier::new(serenity_ctx.http.clone());
        match ctx.reminder.remind(user_id, &notifier).await {
            Ok(note_id) => {
                info!("Note '{note_id}' sent to user {user_id}");
                // the note itself went out as a DM; acknowledge in-channel
                if msg.guild_id.is_some() {
                    msg.channel_id
                        .say(&serenity_ctx.http, "📬 Sent you a DM with a note.")
                        .await?;
                }
                Ok(())
            }
            Err(RemindError::EmptyPopulation) => {
                msg.channel_id
                    .say(
                        &serenity_ctx.http,
                        "There are no notes to remind you of yet.",
                    )
                    .await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
