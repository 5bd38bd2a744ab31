//! Database operations for Daynotes.
//!
//! This module provides all data access functionality using SQLite.
//! The schema is versioned through `PRAGMA user_version`; each entry of
//! [`MIGRATIONS`] runs exactly once, in order, inside its own transaction.
//!
//! Timestamps are RFC 3339 strings, so `ORDER BY created_at` sorts
//! chronologically.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

use crate::error::{NotesError, NotesResult};
use crate::models::{now_timestamp, Note, NoteColor, NoteDraft};

/// A single schema step. `version` is the `user_version` after it has run.
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    apply: fn(&Transaction<'_>) -> NotesResult<()>,
}

/// Ordered list of schema steps. Append only; never edit a released step.
pub static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create notes table",
        apply: migrate_create_notes_table,
    },
    Migration {
        version: 2,
        description: "ensure color column and date index",
        apply: migrate_add_color_and_date_index,
    },
];

/// Schema version this build writes.
pub fn latest_schema_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

fn migrate_create_notes_table(tx: &Transaction<'_>) -> NotesResult<()> {
    // Columns stay nullable: databases written by earlier builds of the app
    // have rows with NULL title/content/color.
    tx.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT,
            content TEXT,
            date TEXT,
            reminder_enabled INTEGER,
            reminder_id TEXT,
            color TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )?;
    Ok(())
}

fn migrate_add_color_and_date_index(tx: &Transaction<'_>) -> NotesResult<()> {
    // The very first builds created the table without a color column.
    if !column_exists(tx, "notes", "color")? {
        tx.execute("ALTER TABLE notes ADD COLUMN color TEXT", [])?;
        tracing::info!("Added color column to notes");
    }
    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_notes_date ON notes(date)",
        [],
    )?;
    Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> NotesResult<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.iter().any(|name| name == column))
}

const NOTE_COLUMNS: &str = "id, title, content, date, reminder_enabled, reminder_id, color, created_at, updated_at";

/// Database wrapper for SQLite operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new<P: AsRef<Path>>(db_path: P) -> NotesResult<Self> {
        let conn = Connection::open(db_path.as_ref())?;

        // journal_mode answers with the resulting mode, so it has to be queried
        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        tracing::debug!(path = %db_path.as_ref().display(), journal_mode = %mode, "Opened notes database");

        let mut db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> NotesResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Current schema version of the open database
    pub fn schema_version(&self) -> NotesResult<i64> {
        let version = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    /// Apply every migration newer than the stored schema version.
    ///
    /// Safe to call repeatedly; an up-to-date database is left untouched.
    pub fn run_migrations(&mut self) -> NotesResult<()> {
        let current = self.schema_version()?;
        let latest = latest_schema_version();

        if current > latest {
            return Err(NotesError::migration(format!(
                "database schema version {} is newer than supported version {}",
                current, latest
            )));
        }

        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            let tx = self.conn.transaction()?;
            (migration.apply)(&tx).map_err(|e| {
                NotesError::migration(format!(
                    "step {} ({}) failed: {}",
                    migration.version, migration.description, e
                ))
            })?;
            tx.pragma_update(None, "user_version", migration.version)?;
            tx.commit()?;
            tracing::info!(
                version = migration.version,
                "Applied schema migration: {}",
                migration.description
            );
        }

        Ok(())
    }

    /// Get the underlying connection (for advanced operations)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert a new note and return its generated ID.
    ///
    /// Both timestamps are set to the same instant. The draft is stored as
    /// given; callers that need required fields enforced validate first.
    pub fn add_note(&self, draft: &NoteDraft) -> NotesResult<String> {
        let note_id = Note::new_id();
        let now = now_timestamp();

        self.conn.execute(
            r#"
            INSERT INTO notes
                (id, title, content, date, reminder_enabled, reminder_id, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                note_id,
                draft.title,
                draft.content,
                draft.date,
                draft.reminder_enabled,
                draft.reminder_id,
                draft.color.as_hex(),
                now,
                now,
            ],
        )?;

        tracing::debug!(note_id = %note_id, date = %draft.date, "Inserted note");
        Ok(note_id)
    }

    /// Get all notes, newest first
    pub fn get_all_notes(&self) -> NotesResult<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes ORDER BY created_at DESC, rowid DESC",
            NOTE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    /// Get notes whose date is exactly `date`, newest first
    pub fn get_notes_by_date(&self, date: &str) -> NotesResult<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes WHERE date = ? ORDER BY created_at DESC, rowid DESC",
            NOTE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let notes = stmt
            .query_map([date], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    /// Get a note by ID. Returns None if there is no such note.
    pub fn get_note(&self, note_id: &str) -> NotesResult<Option<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE id = ? LIMIT 1", NOTE_COLUMNS);
        let note = self
            .conn
            .query_row(&sql, [note_id], row_to_note)
            .optional()?;
        Ok(note)
    }

    /// Overwrite the mutable fields of a note and refresh `updated_at`.
    ///
    /// Returns false if no note has this ID.
    pub fn update_note(&self, note_id: &str, draft: &NoteDraft) -> NotesResult<bool> {
        let updated = self.conn.execute(
            r#"
            UPDATE notes
            SET title = ?, content = ?, date = ?, reminder_enabled = ?, reminder_id = ?,
                color = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                draft.title,
                draft.content,
                draft.date,
                draft.reminder_enabled,
                draft.reminder_id,
                draft.color.as_hex(),
                now_timestamp(),
                note_id,
            ],
        )?;

        if updated > 0 {
            tracing::debug!(note_id = %note_id, "Updated note");
        }
        Ok(updated > 0)
    }

    /// Permanently delete a note. Returns false if no note has this ID.
    pub fn delete_note(&self, note_id: &str) -> NotesResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", [note_id])?;

        if deleted > 0 {
            tracing::debug!(note_id = %note_id, "Deleted note");
        }
        Ok(deleted > 0)
    }

    /// Number of stored notes
    pub fn count_notes(&self) -> NotesResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    let reminder_enabled: Option<i64> = row.get(4)?;
    let color: Option<String> = row.get(6)?;

    Ok(Note {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        reminder_enabled: reminder_enabled.unwrap_or(0) != 0,
        reminder_id: row.get(5)?,
        color: NoteColor::from_stored(color.as_deref()),
        created_at: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        updated_at: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn draft(title: &str, date: &str) -> NoteDraft {
        NoteDraft::new(title, date)
    }

    #[test]
    fn test_create_database() {
        let db = Database::new_in_memory().unwrap();
        assert!(db.get_all_notes().unwrap().is_empty());
        assert_eq!(db.schema_version().unwrap(), latest_schema_version());
    }

    #[test]
    fn test_add_and_get_note() {
        let db = Database::new_in_memory().unwrap();
        let input = NoteDraft::new("Buy milk", "2024-05-01").with_color(NoteColor::Blue);
        let note_id = db.add_note(&input).unwrap();

        let note = db.get_note(&note_id).unwrap().unwrap();
        assert_eq!(note.id, note_id);
        assert_eq!(note.title, "Buy milk");
        assert_eq!(note.content, "");
        assert_eq!(note.date, "2024-05-01");
        assert_eq!(note.color, NoteColor::Blue);
        assert!(!note.reminder_enabled);
        assert!(note.reminder_id.is_none());
        assert!(!note.created_at.is_empty());
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.to_draft(), input);
    }

    #[test]
    fn test_get_missing_note_is_none() {
        let db = Database::new_in_memory().unwrap();
        assert!(db.get_note("does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_update_note() {
        let db = Database::new_in_memory().unwrap();
        let note_id = db.add_note(&draft("Original", "2024-01-01")).unwrap();
        let before = db.get_note(&note_id).unwrap().unwrap();

        let changed = NoteDraft::new("Updated", "2024-01-02")
            .with_content("details")
            .with_color(NoteColor::Green);
        assert!(db.update_note(&note_id, &changed).unwrap());

        let after = db.get_note(&note_id).unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.to_draft(), changed);
    }

    #[test]
    fn test_update_missing_note() {
        let db = Database::new_in_memory().unwrap();
        assert!(!db.update_note("nope", &draft("x", "2024-01-01")).unwrap());
        assert_eq!(db.count_notes().unwrap(), 0);
    }

    #[test]
    fn test_delete_note() {
        let db = Database::new_in_memory().unwrap();
        let note_id = db.add_note(&draft("To delete", "2024-01-01")).unwrap();

        assert!(db.delete_note(&note_id).unwrap());
        assert!(db.get_note(&note_id).unwrap().is_none());
        assert!(db.get_all_notes().unwrap().is_empty());

        // Second delete and unknown IDs are no-ops
        assert!(!db.delete_note(&note_id).unwrap());
        assert!(!db.delete_note("unknown").unwrap());
    }

    #[test]
    fn test_get_all_notes_newest_first() {
        let db = Database::new_in_memory().unwrap();
        let first = db.add_note(&draft("first", "2024-01-01")).unwrap();
        let second = db.add_note(&draft("second", "2024-01-02")).unwrap();
        let third = db.add_note(&draft("third", "2024-01-01")).unwrap();

        let ids: Vec<String> = db.get_all_notes().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn test_get_notes_by_date() {
        let db = Database::new_in_memory().unwrap();
        let a = db.add_note(&draft("a", "2024-01-01")).unwrap();
        db.add_note(&draft("b", "2024-01-02")).unwrap();
        let c = db.add_note(&draft("c", "2024-01-01")).unwrap();
        db.add_note(&draft("d", "2024-01-01 ")).unwrap();

        let notes = db.get_notes_by_date("2024-01-01").unwrap();
        assert!(notes.iter().all(|n| n.date == "2024-01-01"));
        let ids: Vec<String> = notes.into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c, a]);

        assert!(db.get_notes_by_date("1999-12-31").unwrap().is_empty());
    }

    #[test]
    fn test_storage_accepts_empty_fields() {
        // Required fields are enforced by the editor, not here
        let db = Database::new_in_memory().unwrap();
        let note_id = db.add_note(&NoteDraft::default()).unwrap();
        let note = db.get_note(&note_id).unwrap().unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.date, "");
        assert_eq!(note.color, NoteColor::Yellow);
    }

    #[test]
    fn test_migrations_are_idempotent_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.db");

        let note_id = {
            let db = Database::new(&path).unwrap();
            db.add_note(&draft("kept", "2024-01-01")).unwrap()
        };

        let mut db = Database::new(&path).unwrap();
        db.run_migrations().unwrap();
        assert_eq!(db.schema_version().unwrap(), latest_schema_version());
        assert_eq!(db.get_note(&note_id).unwrap().unwrap().title, "kept");
    }

    #[test]
    fn test_migrates_legacy_table_without_color() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.db");

        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                r#"
                CREATE TABLE notes (
                    id TEXT PRIMARY KEY NOT NULL,
                    title TEXT,
                    content TEXT,
                    date TEXT,
                    reminder_enabled INTEGER,
                    reminder_id TEXT,
                    created_at TEXT,
                    updated_at TEXT
                );
                INSERT INTO notes VALUES
                    ('legacy-1', 'Old note', NULL, '2023-12-31', 0, NULL,
                     '2023-12-31T08:00:00.000Z', '2023-12-31T08:00:00.000Z');
                "#,
            )
            .unwrap();
        }

        let db = Database::new(&path).unwrap();
        assert!(column_exists(db.connection(), "notes", "color").unwrap());

        let note = db.get_note("legacy-1").unwrap().unwrap();
        assert_eq!(note.title, "Old note");
        assert_eq!(note.content, "");
        assert_eq!(note.color, NoteColor::Yellow);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("future.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", latest_schema_version() + 1)
                .unwrap();
        }

        let result = Database::new(&path);
        assert!(matches!(result, Err(NotesError::Migration(_))));
    }
}
