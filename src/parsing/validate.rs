//! Cheap plausibility check for raw export text.
//!
//! This is a pre-flight check a caller can run before parsing to give a more
//! specific message than "no records". It never replaces the parser's own
//! verdict: text can pass here and still yield zero records.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ChatlensError, Result};

static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}")
        .unwrap_or_else(|e| unreachable!("invalid date pattern: {e}"))
});

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s").unwrap_or_else(|e| unreachable!("invalid separator pattern: {e}")));

/// Checks that `text` looks like a chat export.
///
/// # Errors
///
/// Returns [`ChatlensError::UnrecognizedFormat`] if the text is blank, or if
/// it lacks either a date-time stamp or a `": "` sender separator.
///
/// # Example
///
/// ```
/// use chatlens::parsing::validate::validate_export;
///
/// assert!(validate_export("12/1/23, 10:15 am - Alice: Hi").is_ok());
/// assert!(validate_export("   ").is_err());
/// ```
pub fn validate_export(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ChatlensError::unrecognized("the file is empty", None));
    }

    if !DATE_LIKE.is_match(text) || !SEPARATOR.is_match(text) {
        return Err(ChatlensError::unrecognized(
            "the file doesn't appear to be a WhatsApp chat export",
            None,
        ));
    }

    Ok(())
}
