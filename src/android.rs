//! Mobile bindings for Daynotes.
//!
//! This module provides a simplified, synchronous API for the Android and
//! iOS shells, exposed via UniFFI bindings. Screen logic that needs timing
//! (double tap, scroll guard) stays in the shell's copy of the screen models.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::database::Database;
use crate::models::{format_date, Note, NoteColor, NoteDraft};
use crate::screens::{normalize_note_id, Clock, SystemClock};
use crate::validation::validate_draft;

/// Error type exposed to Kotlin/Swift via UniFFI
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum NotesCoreError {
    #[error("Database error: {msg}")]
    Database { msg: String },
    #[error("Configuration error: {msg}")]
    Config { msg: String },
    #[error("{msg}")]
    Validation { msg: String },
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl From<crate::error::NotesError> for NotesCoreError {
    fn from(err: crate::error::NotesError) -> Self {
        use crate::error::NotesError;
        match err {
            NotesError::Validation { message, .. } => NotesCoreError::Validation { msg: message },
            NotesError::Database(e) => NotesCoreError::Database { msg: e.to_string() },
            NotesError::Migration(msg) => NotesCoreError::Database { msg },
            NotesError::NotReady => NotesCoreError::Database {
                msg: NotesError::NotReady.to_string(),
            },
            NotesError::Config(msg) => NotesCoreError::Config { msg },
            NotesError::Json(e) => NotesCoreError::Config { msg: e.to_string() },
            NotesError::Io(e) => NotesCoreError::Io { msg: e.to_string() },
            NotesError::Other(msg) => NotesCoreError::Database { msg },
        }
    }
}

/// A note from the database
#[derive(Debug, Clone, uniffi::Record)]
pub struct NoteData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub preview: String,
    pub date: String,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Note> for NoteData {
    fn from(note: Note) -> Self {
        Self {
            preview: note.preview(),
            color: note.color.as_hex().to_string(),
            id: note.id,
            title: note.title,
            content: note.content,
            date: note.date,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Editor fields sent from the shell when saving
#[derive(Debug, Clone, uniffi::Record)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub date: String,
    /// Palette hex; anything else saves as the default color
    pub color: String,
}

impl From<NoteInput> for NoteDraft {
    fn from(input: NoteInput) -> Self {
        NoteDraft {
            title: input.title,
            content: input.content,
            date: input.date,
            reminder_enabled: false,
            reminder_id: None,
            color: NoteColor::from_stored(Some(input.color.as_str())),
        }
    }
}

/// Palette hex values in display order
#[uniffi::export]
pub fn palette_colors() -> Vec<String> {
    NoteColor::PALETTE
        .iter()
        .map(|c| c.as_hex().to_string())
        .collect()
}

/// Main client for Daynotes operations on mobile
#[derive(uniffi::Object)]
pub struct NotesClient {
    config: Mutex<Config>,
    db: Arc<Mutex<Database>>,
    data_dir: PathBuf,
}

impl NotesClient {
    fn db(&self) -> Result<MutexGuard<'_, Database>, NotesCoreError> {
        self.db.lock().map_err(|_| NotesCoreError::Database {
            msg: "database lock poisoned".to_string(),
        })
    }
}

#[uniffi::export]
impl NotesClient {
    /// Create a new NotesClient with the given data directory
    #[uniffi::constructor]
    pub fn new(data_dir: String) -> Result<Arc<Self>, NotesCoreError> {
        let data_path = PathBuf::from(&data_dir);

        // Create directory if it doesn't exist
        std::fs::create_dir_all(&data_path).map_err(|e| NotesCoreError::Io {
            msg: format!("Failed to create data directory: {}", e),
        })?;

        let config = Config::new(Some(data_path.clone()))?;
        crate::logging::init_tracing(&data_path, config.log_level())?;
        let db = Database::new(config.database_file())?;

        Ok(Arc::new(Self {
            config: Mutex::new(config),
            db: Arc::new(Mutex::new(db)),
            data_dir: data_path,
        }))
    }

    pub fn data_dir(&self) -> String {
        self.data_dir.to_string_lossy().to_string()
    }

    /// Today's local date as stored on notes
    pub fn today(&self) -> String {
        format_date(SystemClock.today())
    }

    /// Color new notes start with
    pub fn default_color(&self) -> String {
        self.config
            .lock()
            .map(|cfg| cfg.default_color())
            .unwrap_or_default()
            .as_hex()
            .to_string()
    }

    pub fn double_tap_window_ms(&self) -> u64 {
        self.config
            .lock()
            .map(|cfg| cfg.double_tap_window().as_millis() as u64)
            .unwrap_or(300)
    }

    /// Get all notes from the local database, newest first
    pub fn get_all_notes(&self) -> Result<Vec<NoteData>, NotesCoreError> {
        let notes = self.db()?.get_all_notes()?;
        Ok(notes.into_iter().map(NoteData::from).collect())
    }

    /// Notes dated today (local time), newest first
    pub fn get_today_notes(&self) -> Result<Vec<NoteData>, NotesCoreError> {
        self.get_notes_by_date(self.today())
    }

    pub fn get_notes_by_date(&self, date: String) -> Result<Vec<NoteData>, NotesCoreError> {
        let notes = self.db()?.get_notes_by_date(&date)?;
        Ok(notes.into_iter().map(NoteData::from).collect())
    }

    pub fn get_note(&self, note_id: String) -> Result<Option<NoteData>, NotesCoreError> {
        Ok(self.db()?.get_note(&note_id)?.map(NoteData::from))
    }

    /// Validate and save editor fields. Without an ID a new note is created.
    /// Returns the note's ID.
    pub fn save_note(
        &self,
        note_id: Option<String>,
        input: NoteInput,
    ) -> Result<String, NotesCoreError> {
        let draft = NoteDraft::from(input);
        validate_draft(&draft)?;

        let db = self.db()?;
        match normalize_note_id(note_id.as_deref()) {
            Some(id) => {
                if !db.update_note(&id, &draft)? {
                    return Err(NotesCoreError::Database {
                        msg: format!("note {} no longer exists", id),
                    });
                }
                Ok(id)
            }
            None => Ok(db.add_note(&draft)?),
        }
    }

    /// Delete a note. Returns false if it did not exist.
    pub fn delete_note(&self, note_id: String) -> Result<bool, NotesCoreError> {
        Ok(self.db()?.delete_note(&note_id)?)
    }

    /// Get the count of notes in the database
    pub fn get_note_count(&self) -> Result<i64, NotesCoreError> {
        Ok(self.db()?.count_notes()?)
    }
}
