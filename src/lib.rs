//! Daynotes - core of the Daynotes note-taking app.
//!
//! This library provides the platform-independent parts of the app:
//! - Data model (Note, NoteDraft, NoteColor)
//! - Database operations (SQLite) with versioned schema migrations
//! - A shared async note store
//! - Screen models: the today/all lists and the view/edit note editor
//! - Touch gesture recognizers (double tap, scroll guard)
//! - Configuration and logging setup
//!
//! Platform shells (Android, iOS) render the screens and forward input.
//!
//! # Feature Flags
//!
//! - `desktop`: Resolve a default config directory on desktop platforms.
//! - `uniffi`: Generate UniFFI bindings for mobile platforms (Android, iOS).

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod models;
pub mod screens;
pub mod store;
pub mod validation;

// Mobile bindings module
#[cfg(feature = "uniffi")]
pub mod android;

// UniFFI scaffolding (must be at crate root)
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

// Re-export commonly used types
pub use app::{NotesApp, Screen};
pub use config::Config;
pub use database::Database;
pub use error::{NotesError, NotesResult, ValidationError};
pub use models::{Note, NoteColor, NoteDraft};
pub use screens::{EditorMode, EditorScreen, ListKind, ListScreen, Navigation};
pub use store::NoteStore;

#[cfg(feature = "uniffi")]
pub use android::{palette_colors, NoteData, NoteInput, NotesClient, NotesCoreError};
