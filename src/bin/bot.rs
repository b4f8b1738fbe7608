use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use renote::command_handler::CommandHandler;
use renote::core::Config;
use renote::database::Database;
use renote::features::remind::ReminderService;
use renote::features::scheduler::RemindScheduler;

struct Handler {
    command_handler: Arc<CommandHandler>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Error handling message: {e}");
            if let Err(why) = msg
                .channel_id
                .say(
                    &ctx.http,
                    "Sorry, I encountered an error processing your command.",
                )
                .await
            {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("🤖 Bot ID: {}", ready.user.id);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Arc::new(Config::from_env()?);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting renote bot...");

    let database = Database::new(&config.database_path).await?;
    if !database.is_alive().await {
        return Err(anyhow::anyhow!(
            "database at '{}' did not answer the health probe",
            config.database_path
        ));
    }
    info!("📚 Database ready at {}", config.database_path);

    let reminder = Arc::new(ReminderService::new(database.clone()));
    let command_handler = CommandHandler::new(database, reminder.clone(), config.clone());
    let handler = Handler {
        command_handler: Arc::new(command_handler),
    };

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| anyhow::anyhow!("Client creation failed: {}", e))?;

    if let Some(interval) = config.remind_interval {
        let scheduler = RemindScheduler::new(reminder, config.owner_user_id, interval);
        let http = client.cache_and_http.http.clone();
        tokio::spawn(async move {
            scheduler.run(http).await;
        });
    } else {
        info!("Scheduler disabled (REMIND_INTERVAL_HOURS=0)");
    }

    info!("Connecting to Discord gateway...");
    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
