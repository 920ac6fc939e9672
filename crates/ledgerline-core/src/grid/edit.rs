//! Inline edit controller
//!
//! A small state machine: at most one cell is in edit at any time. Entering
//! edit on another cell first commits the active one (commit-on-blur), so
//! two simultaneous edit cells are impossible by construction. Numeric
//! columns reject keystrokes outside `-?\d*\.?\d*`; choice-backed columns
//! open their list on entry and commit on selection.
//!
//! The asynchronous commit sequence (persist first, merge locally only on
//! success) is orchestrated by the owning view; this module holds the state
//! and the value coercion.

use std::sync::OnceLock;

use regex::Regex;

use crate::transaction::{Field, Value};

fn numeric_mask() -> &'static Regex {
    static MASK: OnceLock<Regex> = OnceLock::new();
    MASK.get_or_init(|| Regex::new(r"^-?\d*\.?\d*$").expect("numeric mask regex"))
}

/// The one cell currently being edited
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEdit {
    /// Row under edit
    pub row_id: String,
    /// Column under edit
    pub field: Field,
    /// Pending input buffer
    pub buffer: String,
    /// Whether the numeric keystroke mask applies
    pub numeric: bool,
    /// Whether a choice list is open for this cell
    pub choice_open: bool,
}

/// Viewing/editing state machine, single active instance
#[derive(Debug, Clone, Default)]
pub struct EditController {
    active: Option<ActiveEdit>,
}

impl EditController {
    /// Not editing
    pub fn new() -> Self {
        Self::default()
    }

    /// The active edit, if any
    pub fn active(&self) -> Option<&ActiveEdit> {
        self.active.as_ref()
    }

    /// Whether a cell is in edit
    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Activate an edit on one cell
    ///
    /// The caller must have committed or cancelled any previous edit; this
    /// replaces the active state unconditionally.
    pub fn activate(
        &mut self,
        row_id: impl Into<String>,
        field: Field,
        initial: String,
        numeric: bool,
        choice_open: bool,
    ) {
        self.active = Some(ActiveEdit {
            row_id: row_id.into(),
            field,
            buffer: initial,
            numeric,
            choice_open,
        });
    }

    /// Replace the pending buffer, applying the numeric keystroke mask.
    /// Returns false (buffer unchanged) when the mask rejects the input.
    pub fn set_buffer(&mut self, text: &str) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.numeric && !numeric_mask().is_match(text) {
            return false;
        }
        active.buffer = text.to_string();
        true
    }

    /// Take the active edit for committing, leaving the controller idle
    pub fn take(&mut self) -> Option<ActiveEdit> {
        self.active.take()
    }

    /// Discard the pending value (Escape)
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Coerce a pending buffer to the column's declared type
///
/// Numeric columns: empty input clears the cell, unparseable input (which
/// the keystroke mask reduces to fragments like "-" or ".") coerces to 0.
/// Text columns: empty input clears the cell. Never fails.
pub fn coerce(buffer: &str, numeric: bool) -> Value {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if numeric {
        Value::Number(trimmed.parse::<f64>().unwrap_or(0.0))
    } else {
        Value::Text(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_mask() {
        let mut edit = EditController::new();
        edit.activate("t-1", Field::CreditAmount, String::new(), true, false);

        assert!(edit.set_buffer("12"));
        assert!(edit.set_buffer("12.5"));
        assert!(edit.set_buffer("-12.5"));
        assert!(!edit.set_buffer("12a"));
        assert!(!edit.set_buffer("1.2.3"));
        assert_eq!(edit.active().map(|a| a.buffer.as_str()), Some("-12.5"));
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("19.99", true), Value::Number(19.99));
        assert_eq!(coerce("-", true), Value::Number(0.0));
        assert_eq!(coerce("", true), Value::Null);
        assert_eq!(coerce("  ", false), Value::Null);
        assert_eq!(coerce("Rent", false), Value::Text("Rent".to_string()));
    }
}
