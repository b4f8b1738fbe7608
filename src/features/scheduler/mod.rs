//! # Scheduler Feature
//!
//! Periodically sends the owner a note without being asked.
//!
//! The loop must outlive any single failure: an empty note pool or an
//! undeliverable owner is logged and the next tick tries again.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use serenity::http::Http;

use crate::core::errors::RemindError;
use crate::features::delivery::DiscordNotifier;
use crate::features::remind::ReminderService;

pub struct RemindScheduler {
    service: Arc<ReminderService>,
    owner_user_id: u64,
    interval: Duration,
}

impl RemindScheduler {
    pub fn new(service: Arc<ReminderService>, owner_user_id: u64, interval: Duration) -> Self {
        RemindScheduler {
            service,
            owner_user_id,
            interval,
        }
    }

    /// Run forever, reminding the owner once per interval.
    pub async fn run(self, http: Arc<Http>) {
        info!(
            "⏰ Reminder scheduler started: one note every {}h for user {}",
            self.interval.as_secs() / 3600,
            self.owner_user_id
        );

        let notifier = DiscordNotifier::new(http);
        let mut ticker = tokio::time::interval(self.interval);
        // the first tick completes immediately; skip it so we don't send at boot
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match self.service.remind(self.owner_user_id, &notifier).await {
                Ok(note_id) => {
                    info!(
                        "Scheduled reminder sent note '{note_id}' to user {}",
                        self.owner_user_id
                    );
                }
                Err(RemindError::EmptyPopulation) => {
                    warn!("Scheduled reminder skipped: there are no notes yet");
                }
                Err(RemindError::Delivery(err)) if err.is_permanent() => {
                    error!(
                        "Owner {} is unreachable, nothing recorded: {err}",
                        self.owner_user_id
                    );
                }
                Err(err) => {
                    // swallowed on purpose, the loop must survive one bad run
                    error!("Scheduled reminder failed: {err}");
                }
            }
        }
    }
}
