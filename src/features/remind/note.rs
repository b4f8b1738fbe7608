//! The assembled note value object

use chrono::{DateTime, Utc};

use crate::database::{MaterialStatus, NoteBundle, NoteId};

/// Denormalized, immutable view of one note ready to be rendered and sent:
/// the note itself, its parent material, the material's repeat statistics
/// and the size of the whole note pool.
#[derive(Debug, Clone)]
pub struct Note {
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

    /// How many times the whole material was re-read; 0 when never.
    pub material_repeats_count: i64,
    pub material_last_repeated_at: Option<DateTime<Utc>>,

    pub total_notes_count: i64,
}

impl Note {
    /// Merge one storage snapshot into the value object.
    pub fn from_bundle(bundle: NoteBundle) -> Self {
        let NoteBundle {
            note,
            last_repeat,
            total_notes,
        } = bundle;

        let (repeats_count, last_repeated_at) = match last_repeat {
            Some(repeat) => (repeat.count, Some(repeat.repeated_at)),
            None => (0, None),
        };

        Note {
            note_id: note.note_id,
            material_id: note.material_id,
            content: note.content,
            added_at: note.added_at,
            chapter: note.chapter,
            page: note.page,
            material_title: note.material_title,
            material_authors: note.material_authors,
            material_pages: note.material_pages,
            material_tags: note.material_tags,
            material_status: note.material_status,
            material_repeats_count: repeats_count,
            material_last_repeated_at: last_repeated_at,
            total_notes_count: total_notes,
        }
    }
}
