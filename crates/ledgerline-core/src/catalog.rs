//! Choice catalogs and filter options
//!
//! Option lists for the choice-backed columns (category, subcategory, bank)
//! are loaded once by the host and injected as an explicit catalog object.
//! Distinct-value extraction over the current row set feeds the filter
//! dropdowns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::grid::column::ChoiceSource;
use crate::transaction::{Field, Transaction};

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Stored value
    pub value: String,
    /// Display label
    pub label: String,
}

impl ChoiceOption {
    /// Option whose value and label coincide
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        ChoiceOption {
            value: name.clone(),
            label: name,
        }
    }

    /// Option with distinct value and label (banks store ids, display names)
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        ChoiceOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The option lists backing the choice columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceCatalog {
    /// Accounting categories
    pub categories: Vec<ChoiceOption>,
    /// Accounting subcategories
    pub subcategories: Vec<ChoiceOption>,
    /// Known banks
    pub banks: Vec<ChoiceOption>,
}

impl ChoiceCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for one choice source
    pub fn options_for(&self, source: ChoiceSource) -> &[ChoiceOption] {
        match source {
            ChoiceSource::Categories => &self.categories,
            ChoiceSource::Subcategories => &self.subcategories,
            ChoiceSource::Banks => &self.banks,
        }
    }

    /// Display label for a bank value; bank cells store the label, not the id
    pub fn bank_label(&self, value: &str) -> Option<&str> {
        self.banks
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}

/// Distinct non-empty values of one field across the rows, sorted
pub fn distinct_values(rows: &[Transaction], field: Field) -> Vec<String> {
    let mut values: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        let raw = row.raw_value(field);
        if !raw.is_empty() {
            values.insert(raw);
        }
    }
    values.into_iter().collect()
}

/// Whether any row carries a client (the client filter is offered only then)
pub fn has_client_data(rows: &[Transaction]) -> bool {
    rows.iter().any(|row| row.client.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Value;

    #[test]
    fn test_distinct_values_sorted_unique() {
        let mut a = Transaction::new("a");
        a.set_value(Field::Bank, Value::Text("Wells Fargo".to_string()));
        let mut b = Transaction::new("b");
        b.set_value(Field::Bank, Value::Text("Chase".to_string()));
        let mut c = Transaction::new("c");
        c.set_value(Field::Bank, Value::Text("Wells Fargo".to_string()));
        let d = Transaction::new("d");

        let values = distinct_values(&[a, b, c, d], Field::Bank);
        assert_eq!(values, vec!["Chase".to_string(), "Wells Fargo".to_string()]);
    }
}
