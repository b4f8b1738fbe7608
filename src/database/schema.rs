//! Database schema
//!
//! Materials are the things being read; notes belong to materials and are
//! soft-deleted only. `repeats` logs whole-material re-reads, while
//! `note_repeats_history` logs every note sent to a user and is the basis
//! for the fairness statistics. Repeat counts are always derived from these
//! logs, never stored.

/// Applied on every open; all statements are idempotent.
pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS materials (
    material_id   TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    authors       TEXT NOT NULL,
    pages         INTEGER NOT NULL,
    material_type TEXT NOT NULL DEFAULT 'book',
    tags          TEXT,
    link          TEXT,
    added_at      TEXT NOT NULL,
    is_outlined   INTEGER NOT NULL DEFAULT 0,
    UNIQUE (title, material_type)
);

CREATE TABLE IF NOT EXISTS statuses (
    status_id    TEXT PRIMARY KEY,
    material_id  TEXT NOT NULL UNIQUE
                 REFERENCES materials (material_id)
                 ON UPDATE CASCADE ON DELETE RESTRICT,
    started_at   TEXT NOT NULL,
    completed_at TEXT
);

CREATE TABLE IF NOT EXISTS notes (
    note_id     TEXT PRIMARY KEY,
    material_id TEXT NOT NULL
                REFERENCES materials (material_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
    content     TEXT NOT NULL,
    added_at    TEXT NOT NULL,
    chapter     INTEGER NOT NULL,
    page        INTEGER NOT NULL,
    is_deleted  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS repeats (
    repeat_id   TEXT PRIMARY KEY,
    material_id TEXT NOT NULL
                REFERENCES materials (material_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
    repeated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS note_repeats_history (
    repeat_id   TEXT PRIMARY KEY,
    note_id     TEXT NOT NULL
                REFERENCES notes (note_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
    user_id     INTEGER NOT NULL,
    repeated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_notes_material ON notes (material_id);
CREATE INDEX IF NOT EXISTS ix_repeats_material ON repeats (material_id);
CREATE INDEX IF NOT EXISTS ix_history_note ON note_repeats_history (note_id);
CREATE INDEX IF NOT EXISTS ix_history_user ON note_repeats_history (user_id);
";
