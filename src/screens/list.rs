//! The "today" and "all notes" list screens.
//!
//! Both hold a snapshot of notes that is reloaded on every focus event.
//! Changes made elsewhere are not seen until the next focus.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::NotesResult;
use crate::gesture::{DoubleTap, DEFAULT_DOUBLE_TAP_WINDOW};
use crate::models::{format_date, Note};
use crate::screens::{Clock, Navigation};
use crate::store::NoteStore;

/// Which notes a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Notes dated today (local time)
    Today,
    /// Every note
    All,
}

impl ListKind {
    pub fn heading(self) -> &'static str {
        match self {
            ListKind::Today => "Today's Tasks",
            ListKind::All => "All Notes",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            ListKind::Today => "Nothing planned for today",
            ListKind::All => "No notes found",
        }
    }
}

pub struct ListScreen {
    kind: ListKind,
    clock: Arc<dyn Clock>,
    double_tap_window: Duration,
    notes: Vec<Note>,
    taps: HashMap<String, DoubleTap>,
    loaded_date: Option<String>,
}

impl ListScreen {
    pub fn new(kind: ListKind, clock: Arc<dyn Clock>) -> Self {
        Self {
            kind,
            clock,
            double_tap_window: DEFAULT_DOUBLE_TAP_WINDOW,
            notes: Vec::new(),
            taps: HashMap::new(),
            loaded_date: None,
        }
    }

    pub fn today(clock: Arc<dyn Clock>) -> Self {
        Self::new(ListKind::Today, clock)
    }

    pub fn all(clock: Arc<dyn Clock>) -> Self {
        Self::new(ListKind::All, clock)
    }

    pub fn with_double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    /// Message to show instead of the list, if there is nothing to list
    pub fn empty_message(&self) -> Option<&'static str> {
        self.notes.is_empty().then(|| self.kind.empty_message())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Date the today list was last loaded for
    pub fn loaded_date(&self) -> Option<&str> {
        self.loaded_date.as_deref()
    }

    /// Reload the snapshot. Call whenever the screen gains focus.
    ///
    /// The today list asks the clock for the date at load time, so a list
    /// focused after midnight shows the new day.
    pub async fn on_focus(&mut self, store: &NoteStore) -> NotesResult<()> {
        let notes = match self.kind {
            ListKind::Today => {
                let today = format_date(self.clock.today());
                let notes = store.fetch_by_date(&today).await?;
                self.loaded_date = Some(today);
                notes
            }
            ListKind::All => store.fetch_all().await?,
        };

        // Keep pending taps only for notes that are still listed
        self.taps
            .retain(|id, _| notes.iter().any(|note| &note.id == id));
        tracing::debug!(kind = ?self.kind, count = notes.len(), "List reloaded");
        self.notes = notes;
        Ok(())
    }

    /// Forward a press on a note card. A double tap opens the note.
    pub fn press(&mut self, note_id: &str, now: Instant) -> Option<Navigation> {
        if !self.notes.iter().any(|note| note.id == note_id) {
            return None;
        }
        let window = self.double_tap_window;
        let tap = self
            .taps
            .entry(note_id.to_string())
            .or_insert_with(|| DoubleTap::new(window));

        tap.press(now).then(|| Navigation::Editor {
            note_id: Some(note_id.to_string()),
        })
    }

    /// The "Add New Note" action
    pub fn add_note(&self) -> Navigation {
        Navigation::Editor { note_id: None }
    }

    /// The "All Notes" link, offered by the today list only
    pub fn show_all(&self) -> Option<Navigation> {
        (self.kind == ListKind::Today).then_some(Navigation::AllNotes)
    }
}
