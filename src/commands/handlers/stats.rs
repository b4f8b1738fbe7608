//! Stats command handler
//!
//! Handles: stats

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::commands::context::CommandContext;
use crate::commands::handler::MessageCommandHandler;
use crate::database::NoteId;

pub struct StatsHandler;

#[async_trait]
impl MessageCommandHandler for StatsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["stats"]
    }

    fn description(&self) -> &'static str {
        "Show note review statistics"
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        debug!("User id='{}' asked for statistics", msg.author.id);

        let stats = ctx.database.remind_statistics().await?;
        msg.channel_id
            .say(&serenity_ctx.http, render_stats(&stats))
            .await?;
        Ok(())
    }
}

fn render_stats(stats: &HashMap<NoteId, i64>) -> String {
    let Some(min) = stats.values().copied().min() else {
        return "No notes yet.".to_string();
    };
    // non-empty from here on
    let max = stats.values().copied().max().unwrap_or(min);
    let total_sends: i64 = stats.values().sum();
    let at_min = stats.values().filter(|count| **count == min).count();

    format!(
        "📊 **Note review statistics**\n\
         {} notes in rotation, {} sends overall\n\
         least-reviewed: {} send{} ({} note{} waiting at that level)\n\
         most-reviewed: {} send{}",
        stats.len(),
        total_sends,
        min,
        if min == 1 { "" } else { "s" },
        at_min,
        if at_min == 1 { "" } else { "s" },
        max,
        if max == 1 { "" } else { "s" },
    )
}
