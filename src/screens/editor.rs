//! Single-note editor: a view/edit state machine.
//!
//! A new note starts in [`EditorMode::Editing`]; an existing one opens in
//! [`EditorMode::Viewing`] and switches to editing when its body is tapped,
//! unless that tap is really the end of a scroll. A successful save returns
//! to viewing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::error::{NotesError, NotesResult};
use crate::gesture::{ScrollGuard, DEFAULT_SCROLL_SETTLE};
use crate::models::{format_date, parse_date, NoteColor, NoteDraft};
use crate::screens::{normalize_note_id, Clock, Navigation};
use crate::store::NoteStore;
use crate::validation::validate_draft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing,
}

/// Confirmation shown before a note is deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

pub const DELETE_PROMPT: DeletePrompt = DeletePrompt {
    title: "Delete Note",
    message: "Are you sure you want to delete this note?",
    confirm_label: "Delete",
    cancel_label: "Cancel",
};

/// What a save did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new note was inserted with this ID
    Created(String),
    Updated,
    /// The note was deleted elsewhere; nothing was written
    Missing,
}

pub struct EditorScreen {
    note_id: Option<String>,
    title: String,
    content: String,
    date: String,
    color: NoteColor,
    mode: EditorMode,
    scroll: ScrollGuard,
    date_picker_open: bool,
    delete_pending: bool,
    clock: Arc<dyn Clock>,
}

impl EditorScreen {
    /// Editor for a new note
    pub fn new_note(clock: Arc<dyn Clock>) -> Self {
        Self {
            note_id: None,
            title: String::new(),
            content: String::new(),
            date: String::new(),
            color: NoteColor::default(),
            mode: EditorMode::Editing,
            scroll: ScrollGuard::new(DEFAULT_SCROLL_SETTLE),
            date_picker_open: false,
            delete_pending: false,
            clock,
        }
    }

    /// Open the editor for a route parameter. A missing or empty ID starts
    /// a new note; otherwise the note is loaded and shown in view mode.
    ///
    /// If the note no longer exists the fields stay empty.
    pub async fn open(
        store: &NoteStore,
        note_id: Option<&str>,
        clock: Arc<dyn Clock>,
    ) -> NotesResult<Self> {
        let mut screen = Self::new_note(clock);
        let Some(note_id) = normalize_note_id(note_id) else {
            return Ok(screen);
        };

        match store.fetch_by_id(&note_id).await? {
            Some(note) => {
                screen.title = note.title;
                screen.content = note.content;
                screen.date = note.date;
                screen.color = note.color;
            }
            None => tracing::warn!(note_id = %note_id, "Opened editor for a missing note"),
        }
        screen.note_id = Some(note_id);
        screen.mode = EditorMode::Viewing;
        Ok(screen)
    }

    pub fn with_scroll_settle(mut self, settle: Duration) -> Self {
        self.scroll = ScrollGuard::new(settle);
        self
    }

    /// Color a new note starts with. Existing notes keep their own.
    pub fn with_default_color(mut self, color: NoteColor) -> Self {
        if self.note_id.is_none() {
            self.color = color;
        }
        self
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditorMode::Editing => "Edit Note",
            EditorMode::Viewing => "Note",
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn color(&self) -> NoteColor {
        self.color
    }

    /// Colors offered while editing
    pub fn palette(&self) -> &'static [NoteColor] {
        if self.is_editing() {
            &NoteColor::PALETTE
        } else {
            &[]
        }
    }

    pub fn can_save(&self) -> bool {
        self.is_editing()
    }

    pub fn can_delete(&self) -> bool {
        self.note_id.is_some()
    }

    pub fn is_date_picker_open(&self) -> bool {
        self.date_picker_open
    }

    pub fn is_delete_pending(&self) -> bool {
        self.delete_pending
    }

    // Field edits only apply in edit mode; the inputs are not shown otherwise.

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        self.edit(|s| s.title = title.into())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        self.edit(|s| s.content = content.into())
    }

    /// Free-text date entry
    pub fn set_date(&mut self, date: impl Into<String>) -> bool {
        self.edit(|s| s.date = date.into())
    }

    pub fn select_color(&mut self, color: NoteColor) -> bool {
        self.edit(|s| s.color = color)
    }

    fn edit(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        if !self.is_editing() {
            return false;
        }
        apply(self);
        true
    }

    pub fn begin_scroll(&mut self) {
        self.scroll.begin_drag();
    }

    pub fn end_scroll(&mut self, now: Instant) {
        self.scroll.end_drag(now);
    }

    /// Tap on the note body. Switches to edit mode unless a scroll is still
    /// in effect. Returns true if the mode changed.
    pub fn tap_body(&mut self, now: Instant) -> bool {
        if self.mode != EditorMode::Viewing || self.scroll.is_active(now) {
            return false;
        }
        self.mode = EditorMode::Editing;
        tracing::debug!(note_id = ?self.note_id, "Editor switched to edit mode");
        true
    }

    /// Show the date picker. Returns the date it should start on: the
    /// current date value if it is a valid date, today otherwise.
    pub fn open_date_picker(&mut self) -> Option<NaiveDate> {
        if !self.is_editing() {
            return None;
        }
        self.date_picker_open = true;
        Some(parse_date(&self.date).unwrap_or_else(|| self.clock.today()))
    }

    /// Result of the date picker. `None` means it was dismissed.
    pub fn on_date_picked(&mut self, picked: Option<NaiveDate>) {
        self.date_picker_open = false;
        if let Some(date) = picked {
            self.date = format_date(date);
        }
    }

    /// The note as it would be saved. Reminders are never set from here.
    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            date: self.date.clone(),
            reminder_enabled: false,
            reminder_id: None,
            color: self.color,
        }
    }

    /// Validate and persist the note, then return to view mode.
    ///
    /// A validation failure changes nothing, here or in storage; its
    /// [`NotesError::user_message`] is meant for the user.
    pub async fn save(&mut self, store: &NoteStore) -> NotesResult<SaveOutcome> {
        if !self.is_editing() {
            return Err(NotesError::validation("mode", "Note is not being edited"));
        }
        let draft = self.draft();
        validate_draft(&draft)?;

        let outcome = if let Some(note_id) = self.note_id.clone() {
            if !store.update(&note_id, draft).await? {
                tracing::warn!(note_id = %note_id, "Save skipped: note no longer exists");
                return Ok(SaveOutcome::Missing);
            }
            SaveOutcome::Updated
        } else {
            let note_id = store.add(draft).await?;
            // Further saves update this note instead of adding another
            self.note_id = Some(note_id.clone());
            SaveOutcome::Created(note_id)
        };

        self.mode = EditorMode::Viewing;
        self.date_picker_open = false;
        tracing::info!(note_id = ?self.note_id, "Note saved");
        Ok(outcome)
    }

    /// Ask for confirmation before deleting. None if there is nothing to delete.
    pub fn request_delete(&mut self) -> Option<DeletePrompt> {
        if !self.can_delete() {
            return None;
        }
        self.delete_pending = true;
        Some(DELETE_PROMPT)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_pending = false;
    }

    /// Delete after confirmation and go back. Without a pending request
    /// this does nothing and returns None.
    pub async fn confirm_delete(&mut self, store: &NoteStore) -> NotesResult<Option<Navigation>> {
        if !self.delete_pending {
            return Ok(None);
        }
        let Some(note_id) = self.note_id.clone() else {
            self.delete_pending = false;
            return Ok(None);
        };

        store.delete(&note_id).await?;
        self.delete_pending = false;
        tracing::info!(note_id = %note_id, "Note deleted");
        Ok(Some(Navigation::Back))
    }
}
