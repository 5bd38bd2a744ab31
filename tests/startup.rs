//! Production startup: config, logging, the process-wide store, then the
//! today list. Kept in its own test binary so the global store starts empty.

use std::fs;

use tempfile::TempDir;

use daynotes::logging::{LOG_DIR_NAME, LOG_FILE_PREFIX};
use daynotes::{ListKind, NoteDraft, NoteStore, NotesApp, NotesError, Screen};

#[tokio::test]
async fn start_opens_global_store_and_today_list() {
    assert!(matches!(NoteStore::global(), Err(NotesError::NotReady)));

    let temp_dir = TempDir::new().unwrap();
    let mut app = NotesApp::start(temp_dir.path().to_path_buf()).await.unwrap();

    // Store is ready and shared with the app
    let global = NoteStore::global().unwrap();
    global
        .add(NoteDraft::new("Through the global store", "1999-01-01"))
        .await
        .unwrap();
    assert_eq!(app.store().count().await.unwrap(), 1);

    // Home screen is the today list
    assert_eq!(app.depth(), 1);
    assert!(matches!(app.current(), Some(Screen::List(_))));
    assert_eq!(app.list().unwrap().kind(), ListKind::Today);

    // Config and a daily log file were written under the data dir
    assert!(temp_dir.path().join("config.json").exists());
    let log_files: Vec<String> = fs::read_dir(temp_dir.path().join(LOG_DIR_NAME))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert!(
        log_files.iter().any(|name| name.starts_with(LOG_FILE_PREFIX)),
        "no log file in {:?}",
        log_files
    );
}
