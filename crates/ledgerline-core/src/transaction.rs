//! Transaction records
//!
//! Strongly-typed row model for statement transactions. The column set is
//! fixed at configuration time, so records are plain structs rather than
//! open-ended key/value maps; [`Field`] and [`Value`] give the view engines
//! uniform access to individual cells.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Addressable columns of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Transaction date
    Date,
    /// Check number, if the movement was check-backed
    CheckNumber,
    /// Free-text description from the statement
    Description,
    /// Credit amount
    CreditAmount,
    /// Debit amount
    DebitAmount,
    /// Statement balance
    Balance,
    /// Accounting category
    Category,
    /// Accounting subcategory
    Subcategory,
    /// Issuing bank
    Bank,
    /// Client the statement belongs to
    Client,
    /// Source file the row was parsed from
    Source,
}

impl Field {
    /// Storage/wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::CheckNumber => "check_number",
            Field::Description => "description",
            Field::CreditAmount => "credit_amount",
            Field::DebitAmount => "debit_amount",
            Field::Balance => "balance",
            Field::Category => "category",
            Field::Subcategory => "subcategory",
            Field::Bank => "bank",
            Field::Client => "client",
            Field::Source => "source",
        }
    }

    /// Whether the field holds a monetary amount
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::CreditAmount | Field::DebitAmount | Field::Balance
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamic cell value crossing the editing and persistence seams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent cell
    Null,
    /// Numeric cell
    Number(f64),
    /// Textual cell
    Text(String),
}

impl Value {
    /// Get as number, returning None otherwise
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as text, returning None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is absent
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Format a number with thousands separators ("1555.5" -> "1,555.5")
pub fn group_digits(value: f64) -> String {
    let raw = format_number(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (pos, ch) in int_part.chars().enumerate() {
        if pos > 0 && (int_part.len() - pos) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a number without trailing zeros ("1555.50" -> "1555.5")
pub fn format_number(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One statement transaction, as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable unique identifier used for selection, editing and persistence
    pub transaction_id: String,
    /// Transaction date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Check number
    #[serde(default)]
    pub check_number: Option<String>,
    /// Statement description
    #[serde(default)]
    pub description: Option<String>,
    /// Credit amount
    #[serde(default)]
    pub credit_amount: Option<f64>,
    /// Debit amount
    #[serde(default)]
    pub debit_amount: Option<f64>,
    /// Statement balance
    #[serde(default)]
    pub balance: Option<f64>,
    /// Accounting category
    #[serde(default)]
    pub category: Option<String>,
    /// Accounting subcategory
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Issuing bank
    #[serde(default)]
    pub bank: Option<String>,
    /// Client name (present on cross-client search results)
    #[serde(default)]
    pub client: Option<String>,
    /// Source file the row was parsed from
    #[serde(default)]
    pub source: Option<String>,
}

impl Transaction {
    /// Create an empty transaction with the given identifier
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Transaction {
            transaction_id: transaction_id.into(),
            ..Default::default()
        }
    }

    /// Read one cell as a dynamic value
    pub fn value(&self, field: Field) -> Value {
        fn text(v: &Option<String>) -> Value {
            match v {
                Some(s) => Value::Text(s.clone()),
                None => Value::Null,
            }
        }
        fn number(v: &Option<f64>) -> Value {
            match v {
                Some(n) => Value::Number(*n),
                None => Value::Null,
            }
        }

        match field {
            Field::Date => match &self.date {
                Some(d) => Value::Text(d.to_string()),
                None => Value::Null,
            },
            Field::CheckNumber => text(&self.check_number),
            Field::Description => text(&self.description),
            Field::CreditAmount => number(&self.credit_amount),
            Field::DebitAmount => number(&self.debit_amount),
            Field::Balance => number(&self.balance),
            Field::Category => text(&self.category),
            Field::Subcategory => text(&self.subcategory),
            Field::Bank => text(&self.bank),
            Field::Client => text(&self.client),
            Field::Source => text(&self.source),
        }
    }

    /// Write one cell from a dynamic value
    ///
    /// Values are normalized to the field's declared type: numeric fields
    /// parse textual input (unparseable text becomes absent), the date field
    /// parses ISO dates, and everything else stores text. Normalization is
    /// silent; it never fails.
    pub fn set_value(&mut self, field: Field, value: Value) {
        match field {
            Field::Date => {
                self.date = match value {
                    Value::Text(s) => s.parse::<NaiveDate>().ok(),
                    _ => None,
                };
            }
            Field::CheckNumber => self.check_number = coerce_text(value),
            Field::Description => self.description = coerce_text(value),
            Field::CreditAmount => self.credit_amount = coerce_number(value),
            Field::DebitAmount => self.debit_amount = coerce_number(value),
            Field::Balance => self.balance = coerce_number(value),
            Field::Category => self.category = coerce_text(value),
            Field::Subcategory => self.subcategory = coerce_text(value),
            Field::Bank => self.bank = coerce_text(value),
            Field::Client => self.client = coerce_text(value),
            Field::Source => self.source = coerce_text(value),
        }
    }

    /// Apply a set of field updates in one pass
    pub fn merge(&mut self, updates: &FieldUpdates) {
        for (field, value) in updates.iter() {
            self.set_value(*field, value.clone());
        }
    }

    /// Cell rendered for display: grouped numbers, localized date, "" for absent
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Date => match &self.date {
                Some(d) => d.format("%-m/%-d/%Y").to_string(),
                None => String::new(),
            },
            _ => match self.value(field) {
                Value::Null => String::new(),
                Value::Number(n) => group_digits(n),
                Value::Text(s) => s,
            },
        }
    }

    /// Cell in raw storage form: plain numbers, ISO date, "" for absent
    pub fn raw_value(&self, field: Field) -> String {
        match self.value(field) {
            Value::Null => String::new(),
            Value::Number(n) => format_number(n),
            Value::Text(s) => s,
        }
    }
}

fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::Text(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(format_number(n)),
        _ => None,
    }
}

fn coerce_number(value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(n),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        Value::Null => None,
    }
}

/// A set of field updates applied together (bulk edits, local merges)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdates {
    entries: Vec<(Field, Value)>,
}

impl FieldUpdates {
    /// Create an empty update set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one field update
    pub fn set(&mut self, field: Field, value: Value) -> &mut Self {
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
        self
    }

    /// Whether any update is present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of updated fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the updates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(Field, Value)> {
        self.entries.iter()
    }
}
