//! Input validation for Daynotes.
//!
//! The editor validates before saving; the database layer does not, so
//! callers that bypass the editor can still persist empty titles or dates.
//! All validators return NotesError::Validation on failure.

use crate::error::{NotesError, NotesResult};
use crate::models::NoteDraft;

/// Shown when a save is attempted without a title or a date.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Title & Date are required";

/// Validate a note title (required).
pub fn validate_title(title: &str) -> NotesResult<()> {
    if title.is_empty() {
        return Err(NotesError::validation("title", REQUIRED_FIELDS_MESSAGE));
    }
    Ok(())
}

/// Validate a note date (required).
///
/// Dates typed by hand are accepted as free text; only the date picker
/// guarantees the canonical `YYYY-MM-DD` form.
pub fn validate_date(date: &str) -> NotesResult<()> {
    if date.is_empty() {
        return Err(NotesError::validation("date", REQUIRED_FIELDS_MESSAGE));
    }
    Ok(())
}

/// Validate a draft before it is saved from the editor.
pub fn validate_draft(draft: &NoteDraft) -> NotesResult<()> {
    validate_title(&draft.title)?;
    validate_date(&draft.date)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Buy milk").is_ok());
        assert!(validate_title(&"x".repeat(5_000)).is_ok());
        let err = validate_title("").unwrap_err();
        assert_eq!(err.user_message(), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_validate_date_accepts_free_text() {
        assert!(validate_date("2024-05-01").is_ok());
        assert!(validate_date("next friday").is_ok());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_whitespace_counts_as_filled_in() {
        assert!(validate_draft(&NoteDraft::new(" ", " ")).is_ok());
    }

    #[test]
    fn test_validate_draft() {
        assert!(validate_draft(&NoteDraft::new("Title", "2024-01-01")).is_ok());

        let long = NoteDraft::new("Title", "2024-01-01").with_content("x".repeat(200_000));
        assert!(validate_draft(&long).is_ok());

        let err = validate_draft(&NoteDraft::new("", "2024-01-01")).unwrap_err();
        assert!(matches!(err, NotesError::Validation { ref field, .. } if field == "title"));

        let err = validate_draft(&NoteDraft::new("Title", "")).unwrap_err();
        assert!(matches!(err, NotesError::Validation { ref field, .. } if field == "date"));
    }
}
