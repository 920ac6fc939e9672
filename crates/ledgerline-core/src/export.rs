//! CSV export
//!
//! Produces the downloadable transaction sheet for the current row set. The
//! balance column is the running credit-minus-debit sum, computed in one
//! prefix pass rather than per cell. Export is synchronous and touches no
//! network.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::transaction::{format_number, Transaction};

/// Exported columns, in sheet order
pub const EXPORT_COLUMNS: [&str; 9] = [
    "transaction_id",
    "date",
    "description",
    "credit_amount",
    "debit_amount",
    "balance",
    "category",
    "subcategory",
    "source",
];

/// Running credit-minus-debit balance per row, one prefix pass
pub fn running_balances(rows: &[Transaction]) -> Vec<f64> {
    let mut balances = Vec::with_capacity(rows.len());
    let mut total = 0.0;
    for row in rows {
        total += row.credit_amount.unwrap_or(0.0) - row.debit_amount.unwrap_or(0.0);
        balances.push(total);
    }
    balances
}

/// Write the rows as CSV
///
/// Zero amounts render blank, matching the downloadable sheet format. An
/// empty row set writes the header line only.
pub fn write_csv<W: Write>(mut writer: W, rows: &[Transaction]) -> io::Result<()> {
    writeln!(writer, "{}", EXPORT_COLUMNS.join(","))?;

    let balances = running_balances(rows);
    for (row, balance) in rows.iter().zip(balances) {
        let fields = [
            escape_field(&row.transaction_id),
            escape_field(&row.date.map(|d| d.to_string()).unwrap_or_default()),
            escape_field(row.description.as_deref().unwrap_or("")),
            amount_field(row.credit_amount),
            amount_field(row.debit_amount),
            amount_field(Some(balance)),
            escape_field(row.category.as_deref().unwrap_or("")),
            escape_field(row.subcategory.as_deref().unwrap_or("")),
            escape_field(row.source.as_deref().unwrap_or("")),
        ];
        writeln!(writer, "{}", fields.join(","))?;
    }

    writer.flush()
}

/// Render the rows as a CSV string
pub fn to_csv_string(rows: &[Transaction]) -> String {
    let mut buffer = Vec::new();
    // Vec<u8> writes cannot fail
    let _ = write_csv(&mut buffer, rows);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Default download filename for an export made today
pub fn default_filename(today: NaiveDate) -> String {
    format!("transactions_{today}.csv")
}

fn amount_field(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_number(v),
        _ => String::new(),
    }
}

fn escape_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
