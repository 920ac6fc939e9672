//! # Ledgerline Core Library
//!
//! Core functionality for the Ledgerline statement back-office.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The transaction grid engine (filtering, sorting, pagination,
//!   selection, inline and bulk editing)
//! - Persistence contracts for the hosted database collaborator
//! - Upload batch status polling with explicit cancellation
//! - CSV export of the reviewed statement
//!
//! ## Example
//!
//! ```rust,ignore
//! use ledgerline_core::grid::{column, GridOptions, GridView};
//! use ledgerline_core::locale::Messages;
//! use ledgerline_core::transaction::Field;
//!
//! let mut view = GridView::with_options(
//!     column::statement_columns(),
//!     GridOptions::editable(),
//!     Messages::english(),
//! );
//! view.set_rows(rows);
//! view.set_quick_filter("wire");
//! view.cycle_sort(Field::CreditAmount);
//! for row in view.page_rows() {
//!     println!("{}", row.display_value(Field::Description));
//! }
//! ```

pub mod batch;
pub mod catalog;
pub mod config;
pub mod demo;
pub mod export;
pub mod grid;
pub mod locale;
pub mod store;
pub mod transaction;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::{BatchStatus, BatchStatusSource, PollConfig, PollHandle, PollOutcome};
    pub use crate::catalog::{ChoiceCatalog, ChoiceOption};
    pub use crate::config::ViewConfig;
    pub use crate::grid::column::{ColumnSpec, EditorKind};
    pub use crate::grid::filter::{DateRange, FieldFilters};
    pub use crate::grid::selection::HeaderState;
    pub use crate::grid::{GridOptions, GridView, ToolbarMode, UiMode};
    pub use crate::locale::{Locale, Messages};
    pub use crate::store::{MemoryStore, StoreError, TransactionStore};
    pub use crate::transaction::{Field, FieldUpdates, Transaction, Value};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
