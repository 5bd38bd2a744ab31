//! Data models for Daynotes.
//!
//! This module defines the note entity, the draft used to create or update
//! one, and the fixed color palette. Dates are calendar-date strings in
//! `YYYY-MM-DD` form; timestamps are RFC 3339 UTC strings with milliseconds.

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical calendar-date format used for `Note::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of content lines shown on a note card.
pub const PREVIEW_LINES: usize = 3;

/// The fixed palette a note can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NoteColor {
    #[default]
    Yellow,
    Blue,
    Red,
    Green,
    Amber,
}

impl NoteColor {
    /// Palette in display order. The first entry is the default.
    pub const PALETTE: [NoteColor; 5] = [
        NoteColor::Yellow,
        NoteColor::Blue,
        NoteColor::Red,
        NoteColor::Green,
        NoteColor::Amber,
    ];

    pub fn as_hex(self) -> &'static str {
        match self {
            NoteColor::Yellow => "#fef3c7",
            NoteColor::Blue => "#bfdbfe",
            NoteColor::Red => "#fecaca",
            NoteColor::Green => "#bbf7d0",
            NoteColor::Amber => "#fde68a",
        }
    }

    /// Look up a palette entry by hex value (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        Self::PALETTE
            .into_iter()
            .find(|c| c.as_hex().eq_ignore_ascii_case(hex))
    }

    /// Stored values outside the palette (including NULL or empty) read as the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(Self::from_hex).unwrap_or_default()
    }
}

impl std::fmt::Display for NoteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_hex())
    }
}

impl From<NoteColor> for String {
    fn from(color: NoteColor) -> Self {
        color.as_hex().to_string()
    }
}

impl TryFrom<String> for NoteColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NoteColor::from_hex(&value).ok_or_else(|| format!("'{}' is not a palette color", value))
    }
}

/// Represents a note in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Random UUID, hyphenated. Never reused.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Calendar date (`YYYY-MM-DD`) the note belongs to
    pub date: String,
    /// Persisted but not surfaced anywhere
    pub reminder_enabled: bool,
    /// Persisted but not surfaced anywhere
    pub reminder_id: Option<String>,
    pub color: NoteColor,
    /// Set once at insert
    pub created_at: String,
    /// Refreshed on every update
    pub updated_at: String,
}

impl Note {
    /// Generate a fresh note identifier
    pub fn new_id() -> String {
        Uuid::new_v4().hyphenated().to_string()
    }

    /// The mutable part of this note, e.g. to edit and save it back
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            date: self.date.clone(),
            reminder_enabled: self.reminder_enabled,
            reminder_id: self.reminder_id.clone(),
            color: self.color,
        }
    }

    /// First lines of the content, as shown on a note card
    pub fn preview(&self) -> String {
        content_preview(&self.content, PREVIEW_LINES)
    }
}

/// Caller-supplied fields of a note. Everything except identity and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: String,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub reminder_id: Option<String>,
    #[serde(default)]
    pub color: NoteColor,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_color(mut self, color: NoteColor) -> Self {
        self.color = color;
        self
    }
}

/// Current instant as stored in `created_at` / `updated_at`
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a calendar date the way it is stored
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored calendar date. Returns None for anything not `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // chrono accepts unpadded fields; stored dates must compare as strings
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Keep at most `max_lines` lines of `content`
pub fn content_preview(content: &str, max_lines: usize) -> String {
    content.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_hex_values() {
        let hexes: Vec<&str> = NoteColor::PALETTE.iter().map(|c| c.as_hex()).collect();
        assert_eq!(
            hexes,
            vec!["#fef3c7", "#bfdbfe", "#fecaca", "#bbf7d0", "#fde68a"]
        );
        assert_eq!(NoteColor::default(), NoteColor::PALETTE[0]);
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(NoteColor::from_hex("#bfdbfe"), Some(NoteColor::Blue));
        assert_eq!(NoteColor::from_hex("#BFDBFE"), Some(NoteColor::Blue));
        assert_eq!(NoteColor::from_hex("#000000"), None);
    }

    #[test]
    fn test_color_from_stored_falls_back_to_default() {
        assert_eq!(NoteColor::from_stored(None), NoteColor::Yellow);
        assert_eq!(NoteColor::from_stored(Some("")), NoteColor::Yellow);
        assert_eq!(NoteColor::from_stored(Some("red")), NoteColor::Yellow);
        assert_eq!(NoteColor::from_stored(Some("#bbf7d0")), NoteColor::Green);
    }

    #[test]
    fn test_color_serializes_as_hex() {
        let json = serde_json::to_string(&NoteColor::Red).unwrap();
        assert_eq!(json, "\"#fecaca\"");
        let back: NoteColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NoteColor::Red);
        assert!(serde_json::from_str::<NoteColor>("\"#123456\"").is_err());
    }

    #[test]
    fn test_new_id_is_unique_uuid() {
        let a = Note::new_id();
        let b = Note::new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_date("2024-5-1"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("tomorrow"), None);
    }

    #[test]
    fn test_format_date_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-05-01T09:30:00.123Z".len());
    }

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("a\nb\nc\nd", 3), "a\nb\nc");
        assert_eq!(content_preview("single", 3), "single");
        assert_eq!(content_preview("", 3), "");
    }

    #[test]
    fn test_draft_builder() {
        let draft = NoteDraft::new("Buy milk", "2024-05-01").with_color(NoteColor::Blue);
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.content, "");
        assert!(!draft.reminder_enabled);
        assert_eq!(draft.color, NoteColor::Blue);
    }
}
