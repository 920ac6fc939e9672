//! Column model
//!
//! Static column descriptors supplied by the caller, plus the interactive
//! width overlay used for column resizing. Descriptors are immutable for the
//! lifetime of a view; widths are relative percentage weights.

use std::collections::HashMap;

use crate::transaction::Field;

/// Narrowest a column can be resized to, percent of table width
pub const MIN_WIDTH_PCT: f32 = 5.0;
/// Widest a column can be resized to, percent of table width
pub const MAX_WIDTH_PCT: f32 = 50.0;

/// Which catalog feeds a choice-backed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSource {
    /// Accounting categories
    Categories,
    /// Accounting subcategories
    Subcategories,
    /// Known banks
    Banks,
}

/// How a column's cells are edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Never editable
    ReadOnly,
    /// Free text input
    Text,
    /// Text input restricted to numeric keystrokes
    Numeric,
    /// Choice list opened on entering edit, committed on selection
    Choice(ChoiceSource),
}

/// Static descriptor for one column of the grid
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// The record field this column renders
    pub field: Field,
    /// Display header
    pub header: &'static str,
    /// Relative width, percent of table width
    pub width_pct: f32,
    /// Whether header activation cycles a sort on this column
    pub sortable: bool,
    /// Whether the quick filter scans this column
    pub searchable: bool,
    /// Editing behavior
    pub editor: EditorKind,
}

impl ColumnSpec {
    /// Free-text column, sortable and searchable
    pub fn text(field: Field, header: &'static str, width_pct: f32) -> Self {
        ColumnSpec {
            field,
            header,
            width_pct,
            sortable: true,
            searchable: true,
            editor: EditorKind::Text,
        }
    }

    /// Numeric column, sortable and searchable
    pub fn numeric(field: Field, header: &'static str, width_pct: f32) -> Self {
        ColumnSpec {
            editor: EditorKind::Numeric,
            ..Self::text(field, header, width_pct)
        }
    }

    /// Choice-backed column
    pub fn choice(
        field: Field,
        header: &'static str,
        width_pct: f32,
        source: ChoiceSource,
    ) -> Self {
        ColumnSpec {
            editor: EditorKind::Choice(source),
            ..Self::text(field, header, width_pct)
        }
    }

    /// Make the column read-only
    pub fn read_only(mut self) -> Self {
        self.editor = EditorKind::ReadOnly;
        self
    }
}

/// Columns of the statement review table (upload result)
pub fn statement_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::text(Field::Date, "DATE", 8.0),
        ColumnSpec::text(Field::CheckNumber, "CHECK NO.", 5.0),
        ColumnSpec::text(Field::Description, "DETAILS", 36.0),
        ColumnSpec::numeric(Field::CreditAmount, "CREDIT", 10.0),
        ColumnSpec::numeric(Field::DebitAmount, "DEBIT", 7.0),
        ColumnSpec::numeric(Field::Balance, "BALANCE", 7.0),
        ColumnSpec::choice(Field::Category, "ACCOUNT", 12.0, ChoiceSource::Categories),
        ColumnSpec::choice(
            Field::Subcategory,
            "ACCOUNT TYPE",
            12.0,
            ChoiceSource::Subcategories,
        ),
        ColumnSpec::choice(Field::Bank, "BANK", 13.0, ChoiceSource::Banks),
    ]
}

/// Columns of the cross-client search table (read-only, with a client column)
pub fn search_columns() -> Vec<ColumnSpec> {
    let mut columns = vec![ColumnSpec::text(Field::Client, "CLIENT", 8.0).read_only()];
    columns.extend(statement_columns().into_iter().map(ColumnSpec::read_only));
    columns
}

/// Per-column width overrides layered over the static descriptors
#[derive(Debug, Clone, Default)]
pub struct ColumnWidths {
    overrides: HashMap<Field, f32>,
}

impl ColumnWidths {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective width of a column, override or descriptor default
    pub fn width_of(&self, spec: &ColumnSpec) -> f32 {
        self.overrides
            .get(&spec.field)
            .copied()
            .unwrap_or(spec.width_pct)
    }

    /// Apply a drag delta, converting pixels to percent of the table width
    /// and clamping to the allowed range
    pub fn resize(&mut self, spec: &ColumnSpec, delta_px: f32, table_px: f32) {
        if table_px <= 0.0 {
            return;
        }
        let current = self.width_of(spec);
        let next = (current + delta_px / table_px * 100.0).clamp(MIN_WIDTH_PCT, MAX_WIDTH_PCT);
        self.overrides.insert(spec.field, next);
    }

    /// Drop all overrides
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}
