//! # Delivery Feature
//!
//! Sends rendered notes to a user as a direct message.
//!
//! Failures are classified: a recipient that is blocked, deactivated or
//! unknown is permanent; anything else is transient. Discord's own rate
//! limiting is handled inside serenity, so a send may take a while before
//! it returns at all.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use serenity::http::{Http, HttpError};
use serenity::model::id::UserId;

use crate::core::errors::DeliveryError;
use crate::core::response::chunk_for_message;

/// Message transport seam; the orchestrator only knows this trait.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, user_id: u64, text: &str) -> Result<(), DeliveryError>;
}

/// Serenity-backed notifier delivering via DM.
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        DiscordNotifier { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, user_id: u64, text: &str) -> Result<(), DeliveryError> {
        let channel = UserId(user_id)
            .create_dm_channel(&*self.http)
            .await
            .map_err(|e| classify(user_id, e))?;

        for chunk in chunk_for_message(text) {
            channel
                .id
                .say(&self.http, chunk)
                .await
                .map_err(|e| classify(user_id, e))?;
        }

        debug!("[{user_id}]: delivery succeeded");
        Ok(())
    }
}

/// Map a serenity error onto the permanent/transient split.
fn classify(user_id: u64, err: serenity::Error) -> DeliveryError {
    if let serenity::Error::Http(http_err) = &err {
        if let HttpError::UnsuccessfulRequest(response) = &**http_err {
            let status = response.status_code.as_u16();
            // 401/403/404: blocked, deactivated or unknown recipient
            if matches!(status, 401 | 403 | 404) {
                error!(
                    "[{user_id}]: permanent delivery failure ({status}): {}",
                    response.error.message
                );
                return DeliveryError::Permanent {
                    status,
                    message: response.error.message.clone(),
                };
            }
        }
    }

    error!("[{user_id}]: delivery failed: {err}");
    DeliveryError::Transient(err.to_string())
}
