//! Tests for the inline edit controller

use pretty_assertions::assert_eq;

use ledgerline_core::catalog::{ChoiceCatalog, ChoiceOption};
use ledgerline_core::grid::column::statement_columns;
use ledgerline_core::grid::{GridOptions, GridView, UiMode};
use ledgerline_core::locale::Messages;
use ledgerline_core::store::{MemoryStore, StoreError};
use ledgerline_core::transaction::{Field, Transaction};

fn tx(id: &str, description: &str, credit: Option<f64>) -> Transaction {
    let mut tx = Transaction::new(id);
    tx.description = Some(description.to_string());
    tx.credit_amount = credit;
    tx
}

fn fixture() -> (GridView, MemoryStore) {
    let rows = vec![
        tx("t-1", "WIRE TRANSFER IN", Some(100.0)),
        tx("t-2", "POS PURCHASE", Some(50.0)),
    ];
    let store = MemoryStore::with_records(rows.clone());
    let mut view =
        GridView::with_options(statement_columns(), GridOptions::editable(), Messages::english());
    view.set_rows(rows);
    (view, store)
}

#[tokio::test]
async fn test_single_active_edit() {
    let (mut view, store) = fixture();

    assert!(view
        .begin_edit(&store, "t-1", Field::Description)
        .await
        .unwrap());
    assert!(view.edit_input("UPDATED DETAILS"));
    assert_eq!(view.mode(), UiMode::Editing);

    // Entering edit on another cell commits the first one
    assert!(view
        .begin_edit(&store, "t-2", Field::Description)
        .await
        .unwrap());

    let active = view.active_edit().expect("second cell in edit");
    assert_eq!(active.row_id, "t-2");
    assert_eq!(
        view.row("t-1").and_then(|r| r.description.clone()),
        Some("UPDATED DETAILS".to_string())
    );
    assert_eq!(
        store.record("t-1").and_then(|r| r.description),
        Some("UPDATED DETAILS".to_string())
    );
}

#[tokio::test]
async fn test_numeric_keystroke_mask() {
    let (mut view, store) = fixture();

    view.begin_edit(&store, "t-1", Field::CreditAmount)
        .await
        .unwrap();
    assert!(view.edit_input("125.50"));
    assert!(!view.edit_input("125.50x"));
    assert!(!view.edit_input("1.2.3"));

    view.commit_edit(&store).await.unwrap();
    assert_eq!(view.row("t-1").and_then(|r| r.credit_amount), Some(125.5));
}

#[tokio::test]
async fn test_invalid_numeric_input_coerces_to_zero() {
    let (mut view, store) = fixture();

    view.begin_edit(&store, "t-1", Field::CreditAmount)
        .await
        .unwrap();
    // The mask allows lone fragments; they parse to 0 on commit
    assert!(view.edit_input("-"));
    view.commit_edit(&store).await.unwrap();
    assert_eq!(view.row("t-1").and_then(|r| r.credit_amount), Some(0.0));
}

#[tokio::test]
async fn test_empty_numeric_input_clears_cell() {
    let (mut view, store) = fixture();

    view.begin_edit(&store, "t-1", Field::CreditAmount)
        .await
        .unwrap();
    assert!(view.edit_input(""));
    view.commit_edit(&store).await.unwrap();
    assert_eq!(view.row("t-1").and_then(|r| r.credit_amount), None);
}

#[tokio::test]
async fn test_escape_cancels_without_committing() {
    let (mut view, store) = fixture();

    view.begin_edit(&store, "t-1", Field::Description)
        .await
        .unwrap();
    view.edit_input("DISCARDED");
    view.cancel_edit();

    assert!(view.active_edit().is_none());
    assert_eq!(view.mode(), UiMode::Idle);
    assert_eq!(
        view.row("t-1").and_then(|r| r.description.clone()),
        Some("WIRE TRANSFER IN".to_string())
    );
}

#[tokio::test]
async fn test_rejected_commit_leaves_row_unchanged() {
    let (mut view, store) = fixture();

    view.begin_edit(&store, "t-1", Field::Description)
        .await
        .unwrap();
    view.edit_input("WILL NOT STICK");
    store.fail_next(StoreError::Transport("connection reset".to_string()));

    let result = view.commit_edit(&store).await;
    assert!(result.is_err());

    // Edit state cleared, no optimistic merge survives the failure
    assert!(view.active_edit().is_none());
    assert_eq!(
        view.row("t-1").and_then(|r| r.description.clone()),
        Some("WIRE TRANSFER IN".to_string())
    );
    assert_eq!(
        store.record("t-1").and_then(|r| r.description),
        Some("WIRE TRANSFER IN".to_string())
    );
}

#[tokio::test]
async fn test_choice_column_commits_on_selection() {
    let (mut view, store) = fixture();
    let catalog = ChoiceCatalog {
        categories: vec![ChoiceOption::plain("Revenue"), ChoiceOption::plain("Payroll")],
        ..ChoiceCatalog::new()
    };

    view.begin_edit(&store, "t-1", Field::Category).await.unwrap();
    assert!(view.active_edit().map(|a| a.choice_open).unwrap_or(false));

    view.choose(&store, &catalog, "Revenue").await.unwrap();
    assert!(view.active_edit().is_none());
    assert_eq!(
        view.row("t-1").and_then(|r| r.category.clone()),
        Some("Revenue".to_string())
    );
}

#[tokio::test]
async fn test_bank_choice_stores_label_not_id() {
    let (mut view, store) = fixture();
    let catalog = ChoiceCatalog {
        banks: vec![
            ChoiceOption::new("1", "Wells Fargo"),
            ChoiceOption::new("2", "Chase"),
        ],
        ..ChoiceCatalog::new()
    };

    view.begin_edit(&store, "t-1", Field::Bank).await.unwrap();
    view.choose(&store, &catalog, "2").await.unwrap();
    assert_eq!(
        view.row("t-1").and_then(|r| r.bank.clone()),
        Some("Chase".to_string())
    );
}

#[tokio::test]
async fn test_read_only_view_refuses_edit() {
    let rows = vec![tx("t-1", "WIRE TRANSFER IN", None)];
    let store = MemoryStore::with_records(rows.clone());
    let mut view =
        GridView::with_options(statement_columns(), GridOptions::default(), Messages::english());
    view.set_rows(rows);

    let started = view
        .begin_edit(&store, "t-1", Field::Description)
        .await
        .unwrap();
    assert!(!started);
    assert!(view.active_edit().is_none());
}
