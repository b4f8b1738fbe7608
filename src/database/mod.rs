//! # Database Module
//!
//! Sqlite-backed storage for materials, notes and their repeat history.
//!
//! Every read group runs in its own transaction so callers observe a
//! consistent snapshot; the history insert is its own transaction too.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Bundle the note view, last repeat and total count in one snapshot
//! - 1.1.0: Fairness statistics over the note send history
//! - 1.0.0: Initial schema and connection handling

mod schema;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use sqlite::{Connection, State};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::errors::StorageError;

/// Notes are keyed by uuid strings.
pub type NoteId = String;

/// Reading status of a material, derived from its `statuses` row:
/// no row means queued, an open row means reading, a closed row completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialStatus {
    Queue,
    Reading,
    Completed,
}

impl MaterialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialStatus::Queue => "queue",
            MaterialStatus::Reading => "reading",
            MaterialStatus::Completed => "completed",
        }
    }

    fn from_label(label: &str) -> Self {
        match label {
            "reading" => MaterialStatus::Reading,
            "completed" => MaterialStatus::Completed,
            _ => MaterialStatus::Queue,
        }
    }
}

/// One non-deleted note joined with its parent material.
#[derive(Debug, Clone)]
pub struct NoteRow {
    pub note_id: NoteId,
    pub material_id: String,
    pub content: String,
    pub added_at: DateTime<Utc>,
    pub chapter: i64,
    pub page: i64,
    pub material_title: String,
    pub material_authors: String,
    pub material_pages: i64,
    pub material_tags: Option<String>,
    pub material_status: MaterialStatus,
}

/// Most recent whole-material repeat plus how many there were in total.
#[derive(Debug, Clone)]
pub struct LastRepeat {
    pub repeated_at: DateTime<Utc>,
    pub count: i64,
}

/// Consistent snapshot used to assemble an outgoing note.
#[derive(Debug, Clone)]
pub struct NoteBundle {
    pub note: NoteRow,
    pub last_repeat: Option<LastRepeat>,
    pub total_notes: i64,
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema.
    pub async fn new(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute("PRAGMA foreign_keys = ON")?;
        conn.execute(schema::SCHEMA)?;

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lifetime send count for every non-deleted note.
    ///
    /// Notes that were never sent are present with count 0; soft-deleted
    /// notes are absent entirely.
    pub async fn remind_statistics(&self) -> Result<HashMap<NoteId, i64>, StorageError> {
        let conn = self.conn.lock().await;
        with_transaction(&conn, query_statistics)
    }

    /// Fetch everything needed to assemble the outgoing note in a single
    /// transaction: the denormalized note view, the material's most recent
    /// repeat (if any) and the total non-deleted note count.
    ///
    /// Returns `None` when `note_id` does not resolve to a live note.
    pub async fn note_bundle(&self, note_id: &str) -> Result<Option<NoteBundle>, StorageError> {
        let conn = self.conn.lock().await;
        with_transaction(&conn, |conn| {
            let note = match query_note_view(conn, note_id)? {
                Some(note) => note,
                None => return Ok(None),
            };
            let last_repeat = query_last_repeat(conn, &note.material_id)?;
            let total_notes = query_notes_count(conn)?;

            Ok(Some(NoteBundle {
                note,
                last_repeat,
                total_notes,
            }))
        })
    }

    /// Append one "this note was sent to this user" event and return the
    /// generated row id. Fails on constraint violation, e.g. an unknown note.
    pub async fn insert_note_history(
        &self,
        note_id: &str,
        user_id: u64,
    ) -> Result<String, StorageError> {
        debug!("inserting repeat for note_id={note_id}");

        let repeat_id = Uuid::new_v4().to_string();
        let repeated_at = Utc::now().to_rfc3339();

        let conn = self.conn.lock().await;
        let inserted = with_transaction(&conn, |conn| {
            let mut statement = conn.prepare(
                "INSERT INTO note_repeats_history (repeat_id, note_id, user_id, repeated_at) \
                 VALUES (?, ?, ?, ?) \
                 RETURNING repeat_id",
            )?;
            statement.bind((1, repeat_id.as_str()))?;
            statement.bind((2, note_id))?;
            statement.bind((3, user_id as i64))?;
            statement.bind((4, repeated_at.as_str()))?;

            match statement.next()? {
                State::Row => Ok(statement.read::<String, _>("repeat_id")?),
                State::Done => Err(StorageError::Sqlite(sqlite::Error {
                    code: None,
                    message: Some("insert returned no row".to_string()),
                })),
            }
        })?;

        debug!("repeat_id={inserted} for note_id={note_id} inserted");
        Ok(inserted)
    }

    /// Cheap connectivity probe.
    pub async fn is_alive(&self) -> bool {
        debug!("checking if the database is alive");

        let conn = self.conn.lock().await;
        let mut statement = match conn.prepare("SELECT 1 + 1 = 2") {
            Ok(statement) => statement,
            Err(_) => return false,
        };
        matches!(statement.next(), Ok(State::Row))
            && statement.read::<i64, _>(0).map(|v| v == 1).unwrap_or(false)
    }

    /// Raw statement execution for test fixtures.
    #[cfg(test)]
    pub(crate) async fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        conn.execute(sql)?;
        Ok(())
    }
}

/// Run `work` inside BEGIN/COMMIT, rolling back on any error.
fn with_transaction<T>(
    conn: &Connection,
    work: impl FnOnce(&Connection) -> Result<T, StorageError>,
) -> Result<T, StorageError> {
    conn.execute("BEGIN")?;
    match work(conn) {
        Ok(value) => {
            conn.execute("COMMIT")?;
            Ok(value)
        }
        Err(err) => {
            let _ = conn.execute("ROLLBACK");
            Err(err)
        }
    }
}

fn query_statistics(conn: &Connection) -> Result<HashMap<NoteId, i64>, StorageError> {
    let mut statement = conn.prepare(
        "SELECT n.note_id, COUNT(h.repeat_id) AS repeats \
         FROM notes n \
         LEFT JOIN note_repeats_history h ON h.note_id = n.note_id \
         WHERE n.is_deleted = 0 \
         GROUP BY n.note_id",
    )?;

    let mut stats = HashMap::new();
    while let State::Row = statement.next()? {
        let note_id = statement.read::<String, _>("note_id")?;
        let repeats = statement.read::<i64, _>("repeats")?;
        stats.insert(note_id, repeats);
    }
    Ok(stats)
}

fn query_note_view(conn: &Connection, note_id: &str) -> Result<Option<NoteRow>, StorageError> {
    let mut statement = conn.prepare(
        "SELECT n.note_id, n.material_id, n.content, n.added_at, n.chapter, n.page, \
                m.title AS material_title, \
                m.authors AS material_authors, \
                m.pages AS material_pages, \
                m.tags AS material_tags, \
                CASE WHEN s.status_id IS NULL THEN 'queue' \
                     WHEN s.completed_at IS NULL THEN 'reading' \
                     ELSE 'completed' \
                END AS material_status \
         FROM notes n \
         JOIN materials m ON m.material_id = n.material_id \
         LEFT JOIN statuses s ON s.material_id = n.material_id \
         WHERE n.note_id = ? AND n.is_deleted = 0",
    )?;
    statement.bind((1, note_id))?;

    match statement.next()? {
        State::Row => {
            let added_at = parse_timestamp("added_at", statement.read::<String, _>("added_at")?)?;
            let status_label = statement.read::<String, _>("material_status")?;

            Ok(Some(NoteRow {
                note_id: statement.read::<String, _>("note_id")?,
                material_id: statement.read::<String, _>("material_id")?,
                content: statement.read::<String, _>("content")?,
                added_at,
                chapter: statement.read::<i64, _>("chapter")?,
                page: statement.read::<i64, _>("page")?,
                material_title: statement.read::<String, _>("material_title")?,
                material_authors: statement.read::<String, _>("material_authors")?,
                material_pages: statement.read::<i64, _>("material_pages")?,
                material_tags: statement.read::<Option<String>, _>("material_tags")?,
                material_status: MaterialStatus::from_label(&status_label),
            }))
        }
        State::Done => Ok(None),
    }
}

fn query_last_repeat(
    conn: &Connection,
    material_id: &str,
) -> Result<Option<LastRepeat>, StorageError> {
    let mut statement = conn.prepare(
        "SELECT repeated_at, COUNT(*) OVER (PARTITION BY material_id) AS repeats \
         FROM repeats \
         WHERE material_id = ? \
         ORDER BY repeated_at DESC \
         LIMIT 1",
    )?;
    statement.bind((1, material_id))?;

    match statement.next()? {
        State::Row => {
            let repeated_at =
                parse_timestamp("repeated_at", statement.read::<String, _>("repeated_at")?)?;
            Ok(Some(LastRepeat {
                repeated_at,
                count: statement.read::<i64, _>("repeats")?,
            }))
        }
        State::Done => Ok(None),
    }
}

fn query_notes_count(conn: &Connection) -> Result<i64, StorageError> {
    let mut statement = conn.prepare("SELECT COUNT(*) AS total FROM notes WHERE is_deleted = 0")?;
    match statement.next()? {
        State::Row => Ok(statement.read::<i64, _>("total")?),
        State::Done => Ok(0),
    }
}

fn parse_timestamp(column: &'static str, value: String) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StorageError::BadTimestamp { column, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_database() -> Database {
        Database::new(":memory:").await.unwrap()
    }

    async fn seed_material(db: &Database, material_id: &str) {
        db.execute_batch(&format!(
            "INSERT INTO materials \
             (material_id, title, authors, pages, material_type, added_at) \
             VALUES ('{material_id}', 'Title {material_id}', 'Some Author', 320, 'book', \
                     '2026-01-10T09:00:00+00:00')",
        ))
        .await
        .unwrap();
    }

    async fn seed_note(db: &Database, note_id: &str, material_id: &str) {
        db.execute_batch(&format!(
            "INSERT INTO notes (note_id, material_id, content, added_at, chapter, page) \
             VALUES ('{note_id}', '{material_id}', 'content of {note_id}', \
                     '2026-01-12T10:30:00+00:00', 3, 57)",
        ))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_statistics_cover_unsent_notes_with_zero() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;
        seed_note(&db, "n2", "m1").await;

        db.insert_note_history("n1", 42).await.unwrap();

        let stats = db.remind_statistics().await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["n1"], 1);
        assert_eq!(stats["n2"], 0);
    }

    #[tokio::test]
    async fn test_statistics_omit_soft_deleted_notes() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;
        seed_note(&db, "n2", "m1").await;
        db.execute_batch("UPDATE notes SET is_deleted = 1 WHERE note_id = 'n2'")
            .await
            .unwrap();

        let stats = db.remind_statistics().await.unwrap();
        assert_eq!(stats.len(), 1);
        assert!(stats.contains_key("n1"));
    }

    #[tokio::test]
    async fn test_statistics_idempotent_without_inserts() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;
        db.insert_note_history("n1", 42).await.unwrap();

        let first = db.remind_statistics().await.unwrap();
        let second = db.remind_statistics().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_insert_increments_exactly_one_note() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;
        seed_note(&db, "n2", "m1").await;

        let before = db.remind_statistics().await.unwrap();
        db.insert_note_history("n2", 42).await.unwrap();
        let after = db.remind_statistics().await.unwrap();

        assert_eq!(after["n2"], before["n2"] + 1);
        assert_eq!(after["n1"], before["n1"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_note() {
        let db = open_database().await;
        let err = db.insert_note_history("ghost", 42).await;
        assert!(matches!(err, Err(StorageError::Sqlite(_))));
    }

    #[tokio::test]
    async fn test_bundle_status_queue_without_status_row() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;

        let bundle = db.note_bundle("n1").await.unwrap().unwrap();
        assert_eq!(bundle.note.material_status, MaterialStatus::Queue);
    }

    #[tokio::test]
    async fn test_bundle_status_reading_and_completed() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_material(&db, "m2").await;
        seed_note(&db, "n1", "m1").await;
        seed_note(&db, "n2", "m2").await;
        db.execute_batch(
            "INSERT INTO statuses (status_id, material_id, started_at) \
             VALUES ('s1', 'm1', '2026-01-02T00:00:00+00:00')",
        )
        .await
        .unwrap();
        db.execute_batch(
            "INSERT INTO statuses (status_id, material_id, started_at, completed_at) \
             VALUES ('s2', 'm2', '2026-01-02T00:00:00+00:00', '2026-02-01T00:00:00+00:00')",
        )
        .await
        .unwrap();

        let reading = db.note_bundle("n1").await.unwrap().unwrap();
        let completed = db.note_bundle("n2").await.unwrap().unwrap();
        assert_eq!(reading.note.material_status, MaterialStatus::Reading);
        assert_eq!(completed.note.material_status, MaterialStatus::Completed);
    }

    #[tokio::test]
    async fn test_bundle_without_repeats_has_no_last_repeat() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;

        let bundle = db.note_bundle("n1").await.unwrap().unwrap();
        assert!(bundle.last_repeat.is_none());
        assert_eq!(bundle.total_notes, 1);
    }

    #[tokio::test]
    async fn test_bundle_picks_latest_repeat_with_total_count() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;
        db.execute_batch(
            "INSERT INTO repeats (repeat_id, material_id, repeated_at) VALUES \
             ('r1', 'm1', '2026-03-01T08:00:00+00:00'), \
             ('r2', 'm1', '2026-05-20T08:00:00+00:00'), \
             ('r3', 'm1', '2026-04-11T08:00:00+00:00')",
        )
        .await
        .unwrap();

        let bundle = db.note_bundle("n1").await.unwrap().unwrap();
        let last = bundle.last_repeat.unwrap();
        assert_eq!(last.count, 3);
        assert_eq!(last.repeated_at.to_rfc3339(), "2026-05-20T08:00:00+00:00");
    }

    #[tokio::test]
    async fn test_bundle_none_for_missing_or_deleted_note() {
        let db = open_database().await;
        seed_material(&db, "m1").await;
        seed_note(&db, "n1", "m1").await;
        db.execute_batch("UPDATE notes SET is_deleted = 1 WHERE note_id = 'n1'")
            .await
            .unwrap();

        assert!(db.note_bundle("n1").await.unwrap().is_none());
        assert!(db.note_bundle("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_is_alive() {
        let db = open_database().await;
        assert!(db.is_alive().await);
    }
}
