//! Shared, asynchronous access to the notes database.
//!
//! All screens go through one [`NoteStore`], which wraps a single
//! [`Database`] handle. Each call runs on tokio's blocking pool and
//! suspends the caller until SQLite answers; the mutex serializes
//! statements, so there is no further locking.
//!
//! The app bootstrap opens the process-wide store once with
//! [`NoteStore::init_global`]. Until that completes, [`NoteStore::global`]
//! reports [`NotesError::NotReady`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use crate::database::Database;
use crate::error::{NotesError, NotesResult};
use crate::models::{Note, NoteDraft};

static GLOBAL_STORE: OnceCell<NoteStore> = OnceCell::const_new();

/// Async handle to the notes database. Cloning shares the connection.
#[derive(Clone)]
pub struct NoteStore {
    db: Arc<Mutex<Database>>,
}

impl NoteStore {
    /// Open the database file, running migrations before returning
    pub async fn open<P: AsRef<Path>>(db_path: P) -> NotesResult<Self> {
        let path: PathBuf = db_path.as_ref().to_path_buf();
        let db = tokio::task::spawn_blocking(move || Database::new(path))
            .await
            .map_err(|e| NotesError::Other(format!("database open task failed: {}", e)))??;
        Ok(Self::from_database(db))
    }

    /// In-memory store (for testing)
    pub fn in_memory() -> NotesResult<Self> {
        Ok(Self::from_database(Database::new_in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Open the process-wide store. Later calls return the same store and
    /// ignore `db_path`.
    pub async fn init_global<P: AsRef<Path>>(db_path: P) -> NotesResult<&'static NoteStore> {
        let path = db_path.as_ref().to_path_buf();
        let store = GLOBAL_STORE
            .get_or_try_init(|| async move {
                let store = NoteStore::open(&path).await?;
                tracing::info!(path = %path.display(), "Note store ready");
                Ok::<_, NotesError>(store)
            })
            .await?;
        Ok(store)
    }

    /// The process-wide store, once [`NoteStore::init_global`] has completed
    pub fn global() -> NotesResult<&'static NoteStore> {
        GLOBAL_STORE.get().ok_or(NotesError::NotReady)
    }

    pub fn is_global_ready() -> bool {
        GLOBAL_STORE.initialized()
    }

    async fn with_db<T, F>(&self, f: F) -> NotesResult<T>
    where
        F: FnOnce(&Database) -> NotesResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|_| NotesError::Other("database lock poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| NotesError::Other(format!("database task failed: {}", e)))?
    }

    /// Insert a note, returning its new ID
    pub async fn add(&self, draft: NoteDraft) -> NotesResult<String> {
        self.with_db(move |db| db.add_note(&draft)).await
    }

    /// Every note, newest first
    pub async fn fetch_all(&self) -> NotesResult<Vec<Note>> {
        self.with_db(|db| db.get_all_notes()).await
    }

    /// Notes dated exactly `date`, newest first
    pub async fn fetch_by_date(&self, date: &str) -> NotesResult<Vec<Note>> {
        let date = date.to_string();
        self.with_db(move |db| db.get_notes_by_date(&date)).await
    }

    pub async fn fetch_by_id(&self, note_id: &str) -> NotesResult<Option<Note>> {
        let note_id = note_id.to_string();
        self.with_db(move |db| db.get_note(&note_id)).await
    }

    /// Returns false if the note does not exist
    pub async fn update(&self, note_id: &str, draft: NoteDraft) -> NotesResult<bool> {
        let note_id = note_id.to_string();
        self.with_db(move |db| db.update_note(&note_id, &draft)).await
    }

    /// Returns false if the note does not exist
    pub async fn delete(&self, note_id: &str) -> NotesResult<bool> {
        let note_id = note_id.to_string();
        self.with_db(move |db| db.delete_note(&note_id)).await
    }

    pub async fn count(&self) -> NotesResult<i64> {
        self.with_db(|db| db.count_notes()).await
    }
}
