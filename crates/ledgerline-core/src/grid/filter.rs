//! Filter engine
//!
//! Combines a free-text quick filter with discrete field filters. The quick
//! filter is a case-insensitive substring match across every searchable
//! column; numeric cells are matched against both their grouped display form
//! and their raw numeric form, so a query of "55" finds a credit rendered as
//! "1,555". Field filters are exact equality, except the date field which is
//! an inclusive calendar range. All active filters are ANDed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::column::ColumnSpec;
use crate::transaction::Transaction;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Parse a range from ISO date text; unparseable text imposes no bound
    pub fn parse(start: &str, end: &str) -> Self {
        DateRange {
            start: start.trim().parse::<NaiveDate>().ok(),
            end: end.trim().parse::<NaiveDate>().ok(),
        }
    }

    /// Whether either bound is set
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Discrete per-field filters
///
/// A row missing the filtered field is not constrained by that filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldFilters {
    /// Date range on the transaction date
    pub date: DateRange,
    /// Exact accounting category
    pub category: Option<String>,
    /// Exact accounting subcategory
    pub subcategory: Option<String>,
    /// Exact bank name
    pub bank: Option<String>,
    /// Exact client name
    pub client: Option<String>,
}

impl FieldFilters {
    /// No constraints
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether any field filter is set
    pub fn is_active(&self) -> bool {
        self.date.is_active()
            || self.category.is_some()
            || self.subcategory.is_some()
            || self.bank.is_some()
            || self.client.is_some()
    }

    fn matches(&self, row: &Transaction) -> bool {
        if self.date.is_active() {
            if let Some(date) = row.date {
                if !self.date.contains(date) {
                    return false;
                }
            }
        }
        if !equals_if_present(&self.category, &row.category) {
            return false;
        }
        if !equals_if_present(&self.subcategory, &row.subcategory) {
            return false;
        }
        if !equals_if_present(&self.bank, &row.bank) {
            return false;
        }
        if !equals_if_present(&self.client, &row.client) {
            return false;
        }
        true
    }
}

fn equals_if_present(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match (wanted, actual) {
        (Some(w), Some(a)) => w == a,
        _ => true,
    }
}

/// Complete filter state of a view
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    quick: String,
    fields: FieldFilters,
}

impl FilterState {
    /// No filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quick-filter text; empty or whitespace-only text is no filter
    pub fn set_quick(&mut self, text: impl Into<String>) {
        self.quick = text.into();
    }

    /// Current quick-filter text
    pub fn quick(&self) -> &str {
        &self.quick
    }

    /// Replace the field filters
    pub fn set_fields(&mut self, fields: FieldFilters) {
        self.fields = fields;
    }

    /// Current field filters
    pub fn fields(&self) -> &FieldFilters {
        &self.fields
    }

    /// Drop every filter
    pub fn clear(&mut self) {
        self.quick.clear();
        self.fields = FieldFilters::none();
    }

    /// Whether any filter is active
    pub fn is_active(&self) -> bool {
        !self.quick.trim().is_empty() || self.fields.is_active()
    }

    /// Whether one row passes every active filter
    pub fn matches(&self, row: &Transaction, columns: &[ColumnSpec]) -> bool {
        if !self.fields.matches(row) {
            return false;
        }

        let needle = self.quick.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        columns.iter().filter(|c| c.searchable).any(|column| {
            let display = row.display_value(column.field).to_lowercase();
            if display.contains(&needle) {
                return true;
            }
            if column.field.is_numeric() {
                let raw = row.raw_value(column.field);
                if raw.contains(&needle) {
                    return true;
                }
            }
            false
        })
    }
}

/// Indices of the rows that pass every active filter, in original order
pub fn apply(rows: &[Transaction], columns: &[ColumnSpec], state: &FilterState) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| state.matches(row, columns))
        .map(|(index, _)| index)
        .collect()
}
