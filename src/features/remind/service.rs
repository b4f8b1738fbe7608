//! Reminder orchestration
//!
//! One invocation is: compute statistics, select the least-repeated note,
//! assemble it, deliver it, and only then record the send. A failed delivery
//! leaves no history row, so an undelivered note stays first in line.

use log::{debug, warn};
use uuid::Uuid;

use crate::core::errors::RemindError;
use crate::database::{Database, NoteId};
use crate::features::delivery::Notifier;

use super::format;
use super::note::Note;
use super::selection;

pub struct ReminderService {
    database: Database,
}

impl ReminderService {
    pub fn new(database: Database) -> Self {
        ReminderService { database }
    }

    /// Send one fairly-chosen note to `user_id` and record the send.
    ///
    /// Returns the id of the note that was sent.
    pub async fn remind(
        &self,
        user_id: u64,
        notifier: &dyn Notifier,
    ) -> Result<NoteId, RemindError> {
        let request_id = Uuid::new_v4();
        debug!("[{request_id}] reminding user id='{user_id}'");

        let note = self.pick_note(request_id).await?;
        let text = format::render_note(&note);

        notifier.send(user_id, &text).await?;

        let repeat_id = self
            .database
            .insert_note_history(&note.note_id, user_id)
            .await?;
        debug!(
            "[{request_id}] note '{}' sent, recorded as repeat '{repeat_id}'",
            note.note_id
        );

        Ok(note.note_id)
    }

    /// Statistics, fair selection and assembly.
    ///
    /// A note that vanishes between selection and assembly is retried once
    /// against a fresh snapshot; a second miss is fatal.
    async fn pick_note(&self, request_id: Uuid) -> Result<Note, RemindError> {
        let mut missing: Option<NoteId> = None;

        for attempt in 0..2 {
            let stats = self.database.remind_statistics().await?;
            let note_id = selection::select_least_repeated(&stats)?;
            debug!("[{request_id}] selected note '{note_id}'");

            match self.assemble(&note_id).await {
                Ok(note) => return Ok(note),
                Err(RemindError::NoteNotFound(id)) => {
                    warn!(
                        "[{request_id}] note '{id}' vanished before assembly, attempt {attempt}"
                    );
                    missing = Some(id);
                }
                Err(err) => return Err(err),
            }
        }

        Err(RemindError::NoteNotFound(missing.unwrap_or_default()))
    }

    /// Load the full denormalized view of one note.
    pub async fn assemble(&self, note_id: &str) -> Result<Note, RemindError> {
        match self.database.note_bundle(note_id).await? {
            Some(bundle) => Ok(Note::from_bundle(bundle)),
            None => Err(RemindError::NoteNotFound(note_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::DeliveryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        fail: bool,
        sent: Mutex<Vec<(u64, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, user_id: u64, text: &str) -> Result<(), DeliveryError> {
            if self.fail {
                return Err(DeliveryError::Permanent {
                    status: 403,
                    message: "blocked".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((user_id, text.to_string()));
            Ok(())
        }
    }

    impl RecordingNotifier {
        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    /// Three notes with send counts {a: 2, b: 0, c: 1}.
    async fn seeded_database() -> Database {
        let db = Database::new(":memory:").await.unwrap();
        db.execute_batch(
            "INSERT INTO materials (material_id, title, authors, pages, added_at) \
             VALUES ('m1', 'Title', 'Author', 100, '2026-01-10T09:00:00+00:00')",
        )
        .await
        .unwrap();
        for note_id in ["a", "b", "c"] {
            db.execute_batch(&format!(
                "INSERT INTO notes (note_id, material_id, content, added_at, chapter, page) \
                 VALUES ('{note_id}', 'm1', 'text', '2026-01-12T10:30:00+00:00', 1, 1)",
            ))
            .await
            .unwrap();
        }
        db.insert_note_history("a", 1).await.unwrap();
        db.insert_note_history("a", 1).await.unwrap();
        db.insert_note_history("c", 1).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_empty_pool_skips_delivery() {
        let db = Database::new(":memory:").await.unwrap();
        let service = ReminderService::new(db);
        let notifier = RecordingNotifier::default();

        let result = service.remind(1, &notifier).await;

        assert!(matches!(result, Err(RemindError::EmptyPopulation)));
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_remind_delivers_least_repeated_and_records() {
        let db = seeded_database().await;
        let service = ReminderService::new(db.clone());
        let notifier = RecordingNotifier::default();

        let sent = service.remind(7, &notifier).await.unwrap();

        assert_eq!(sent, "b");
        assert_eq!(notifier.sent_count(), 1);

        let stats = db.remind_statistics().await.unwrap();
        assert_eq!(stats["b"], 1);
        assert_eq!(stats["a"], 2);
        assert_eq!(stats["c"], 1);
    }

    #[tokio::test]
    async fn test_failed_delivery_leaves_no_history() {
        let db = seeded_database().await;
        let service = ReminderService::new(db.clone());
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };

        let result = service.remind(7, &notifier).await;

        assert!(matches!(result, Err(RemindError::Delivery(_))));
        let stats = db.remind_statistics().await.unwrap();
        assert_eq!(stats["b"], 0, "undelivered note must not be counted");
    }

    #[tokio::test]
    async fn test_assemble_unknown_note_is_not_found() {
        let db = seeded_database().await;
        let service = ReminderService::new(db);

        let result = service.assemble("ghost").await;
        assert!(matches!(result, Err(RemindError::NoteNotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_rendered_message_reaches_notifier() {
        let db = seeded_database().await;
        let service = ReminderService::new(db);
        let notifier = RecordingNotifier::default();

        service.remind(7, &notifier).await.unwrap();

        let sent = notifier.sent.lock().unwrap();
        let (user_id, text) = &sent[0];
        assert_eq!(*user_id, 7);
        assert!(text.contains("Title"));
        assert!(text.contains("notes in rotation"));
    }
}
