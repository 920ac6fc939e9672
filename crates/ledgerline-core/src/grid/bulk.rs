//! Bulk edit controller
//!
//! Collects the bulk-edit form and turns it into a field-update set. Fields
//! left blank are not applied to any row; a form with nothing filled in is a
//! no-op. The atomic apply (one persistence call, one local merge on
//! success) lives on the owning view.

use crate::transaction::{Field, FieldUpdates, Value};

/// Pending bulk-edit form for the selected rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkEditForm {
    /// Category to assign, empty for "leave unchanged"
    pub category: String,
    /// Subcategory to assign, empty for "leave unchanged"
    pub subcategory: String,
}

impl BulkEditForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field was filled in
    pub fn is_empty(&self) -> bool {
        self.category.trim().is_empty() && self.subcategory.trim().is_empty()
    }

    /// The non-blank fields as an update set
    pub fn updates(&self) -> FieldUpdates {
        let mut updates = FieldUpdates::new();
        if !self.category.trim().is_empty() {
            updates.set(Field::Category, Value::Text(self.category.trim().to_string()));
        }
        if !self.subcategory.trim().is_empty() {
            updates.set(
                Field::Subcategory,
                Value::Text(self.subcategory.trim().to_string()),
            );
        }
        updates
    }
}
