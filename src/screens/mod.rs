//! Screen state for the app, independent of the UI toolkit.
//!
//! The platform layer renders these models and forwards user input to
//! them; navigation requests come back as [`Navigation`] values.

use chrono::{Local, NaiveDate};

pub mod editor;
pub mod list;

pub use editor::{DeletePrompt, EditorMode, EditorScreen, SaveOutcome};
pub use list::{ListKind, ListScreen};

/// Where the app should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Open the editor. `None` creates a new note.
    Editor { note_id: Option<String> },
    /// Open the all-notes list
    AllNotes,
    /// Return to the previous screen
    Back,
}

impl Navigation {
    /// Editor route for a raw route parameter; an empty id means create mode.
    pub fn editor(note_id: Option<&str>) -> Self {
        Navigation::Editor {
            note_id: normalize_note_id(note_id),
        }
    }
}

/// Treat a missing or empty route parameter as "no note".
pub fn normalize_note_id(note_id: Option<&str>) -> Option<String> {
    note_id.filter(|id| !id.is_empty()).map(str::to_string)
}

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
