//! Tests for bulk editing and row deletion

use pretty_assertions::assert_eq;

use ledgerline_core::grid::bulk::BulkEditForm;
use ledgerline_core::grid::column::statement_columns;
use ledgerline_core::grid::{GridOptions, GridView};
use ledgerline_core::locale::Messages;
use ledgerline_core::store::{MemoryStore, StoreError};
use ledgerline_core::transaction::{FieldUpdates, Transaction};

fn tx(id: &str, category: Option<&str>) -> Transaction {
    let mut tx = Transaction::new(id);
    tx.description = Some("row".to_string());
    tx.category = category.map(|c| c.to_string());
    tx
}

fn fixture() -> (GridView, MemoryStore) {
    let rows = vec![
        tx("t-1", Some("Payroll")),
        tx("t-2", None),
        tx("t-3", Some("Taxes")),
    ];
    let store = MemoryStore::with_records(rows.clone());
    let mut view =
        GridView::with_options(statement_columns(), GridOptions::editable(), Messages::english());
    view.set_rows(rows);
    (view, store)
}

#[tokio::test]
async fn test_bulk_edit_applies_to_all_selected_rows() {
    let (mut view, store) = fixture();
    view.toggle_row_selection("t-1");
    view.toggle_row_selection("t-2");

    let form = BulkEditForm {
        category: "Revenue".to_string(),
        subcategory: String::new(),
    };
    view.apply_bulk(&store, &form.updates()).await.unwrap();

    assert_eq!(
        view.row("t-1").and_then(|r| r.category.clone()),
        Some("Revenue".to_string())
    );
    assert_eq!(
        view.row("t-2").and_then(|r| r.category.clone()),
        Some("Revenue".to_string())
    );
    // Unselected row untouched
    assert_eq!(
        view.row("t-3").and_then(|r| r.category.clone()),
        Some("Taxes".to_string())
    );
    // Blank subcategory was not applied
    assert_eq!(view.row("t-1").and_then(|r| r.subcategory.clone()), None);
    // Backend saw the same merge
    assert_eq!(
        store.record("t-2").and_then(|r| r.category),
        Some("Revenue".to_string())
    );
}

#[tokio::test]
async fn test_bulk_edit_keeps_selection() {
    let (mut view, store) = fixture();
    view.toggle_row_selection("t-1");
    view.toggle_row_selection("t-2");

    let form = BulkEditForm {
        category: "Revenue".to_string(),
        subcategory: String::new(),
    };
    view.apply_bulk(&store, &form.updates()).await.unwrap();

    // Caller may chain another bulk operation on the same set
    assert_eq!(view.selected_count(), 2);
}

#[tokio::test]
async fn test_failed_bulk_edit_changes_zero_rows() {
    let (mut view, store) = fixture();
    view.toggle_row_selection("t-1");
    view.toggle_row_selection("t-2");
    store.fail_next(StoreError::Rejected("constraint violation".to_string()));

    let form = BulkEditForm {
        category: "Revenue".to_string(),
        subcategory: String::new(),
    };
    let result = view.apply_bulk(&store, &form.updates()).await;
    assert!(result.is_err());

    assert_eq!(
        view.row("t-1").and_then(|r| r.category.clone()),
        Some("Payroll".to_string())
    );
    assert_eq!(view.row("t-2").and_then(|r| r.category.clone()), None);
    assert_eq!(view.selected_count(), 2);
}

#[tokio::test]
async fn test_empty_updates_are_a_no_op() {
    let (mut view, store) = fixture();
    view.toggle_row_selection("t-1");

    view.apply_bulk(&store, &FieldUpdates::new()).await.unwrap();
    assert_eq!(
        view.row("t-1").and_then(|r| r.category.clone()),
        Some("Payroll".to_string())
    );
}

#[tokio::test]
async fn test_empty_selection_is_a_no_op() {
    let (mut view, store) = fixture();

    let form = BulkEditForm {
        category: "Revenue".to_string(),
        subcategory: String::new(),
    };
    view.apply_bulk(&store, &form.updates()).await.unwrap();
    assert!(view.rows().iter().all(|r| r.category.as_deref() != Some("Revenue")));
}

#[tokio::test]
async fn test_delete_removes_rows_and_clears_selection() {
    let (mut view, store) = fixture();
    view.toggle_row_selection("t-1");
    view.toggle_row_selection("t-3");

    let deleted = view.delete_selected(&store).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.selected_count(), 0);
    assert!(view.row("t-1").is_none());
    assert!(store.record("t-1").is_none());
    assert!(view.row("t-2").is_some());
}

#[tokio::test]
async fn test_failed_delete_retains_selection_and_rows() {
    let (mut view, store) = fixture();
    view.toggle_row_selection("t-1");
    view.toggle_row_selection("t-2");
    view.toggle_row_selection("t-3");
    store.fail_next(StoreError::Transport("connection reset".to_string()));

    let result = view.delete_selected(&store).await;
    assert!(result.is_err());
    assert_eq!(view.rows().len(), 3);
    assert_eq!(view.selected_count(), 3);

    // Retry succeeds once the backend recovers
    let deleted = view.delete_selected(&store).await.unwrap();
    assert_eq!(deleted, 3);
    assert_eq!(view.rows().len(), 0);
    assert_eq!(view.selected_count(), 0);
}

#[tokio::test]
async fn test_delete_with_empty_selection_is_a_no_op() {
    let (mut view, store) = fixture();
    let deleted = view.delete_selected(&store).await.unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(view.rows().len(), 3);
}
