//! Sort engine
//!
//! Single-column, three-state sort: each header activation advances
//! unsorted -> ascending -> descending -> unsorted. Activating a different
//! column starts that column ascending. The sort itself is stable, so equal
//! keys keep their original relative order and a full cycle restores the
//! caller's ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::transaction::{Field, Transaction, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Active sort of a view; at most one column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(Field, Direction)>,
}

impl SortState {
    /// Unsorted
    pub fn new() -> Self {
        Self::default()
    }

    /// The active column and direction, if any
    pub fn active(&self) -> Option<(Field, Direction)> {
        self.active
    }

    /// Advance the cycle for one column header activation
    pub fn cycle(&mut self, field: Field) {
        self.active = match self.active {
            Some((f, Direction::Ascending)) if f == field => Some((field, Direction::Descending)),
            Some((f, Direction::Descending)) if f == field => None,
            _ => Some((field, Direction::Ascending)),
        };
    }

    /// Drop the active sort
    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Stable in-place sort of row indices per the active sort state
pub fn apply(rows: &[Transaction], indices: &mut [usize], state: &SortState) {
    let Some((field, direction)) = state.active else {
        return;
    };

    indices.sort_by(|&a, &b| {
        let ordering = compare_cells(&rows[a], &rows[b], field);
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
}

/// Compare one column of two rows: numeric columns numerically, everything
/// else as case-sensitive strings; absent values sort before present ones
fn compare_cells(a: &Transaction, b: &Transaction, field: Field) -> Ordering {
    match (a.value(field), b.value(field)) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => x.total_cmp(&y),
        (x, y) => cell_text(x).cmp(&cell_text(y)),
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::Text(s) => s,
        Value::Number(n) => crate::transaction::format_number(n),
        Value::Null => String::new(),
    }
}
