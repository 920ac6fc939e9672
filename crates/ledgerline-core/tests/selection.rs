//! Tests for the selection model

use pretty_assertions::assert_eq;

use ledgerline_core::grid::column::statement_columns;
use ledgerline_core::grid::selection::HeaderState;
use ledgerline_core::grid::{GridOptions, GridView, ToolbarMode};
use ledgerline_core::locale::Messages;
use ledgerline_core::transaction::Transaction;

fn tx(id: &str, description: &str) -> Transaction {
    let mut tx = Transaction::new(id);
    tx.description = Some(description.to_string());
    tx
}

fn view_with(rows: Vec<Transaction>) -> GridView {
    let mut view =
        GridView::with_options(statement_columns(), GridOptions::default(), Messages::english());
    view.set_rows(rows);
    view
}

#[test]
fn test_selection_survives_filtering() {
    let mut view = view_with(vec![
        tx("a", "WIRE TRANSFER IN"),
        tx("b", "POS PURCHASE"),
    ]);

    view.toggle_row_selection("b");
    assert!(view.is_selected("b"));

    // Filter "b" out of view; it stays selected
    view.set_quick_filter("wire");
    assert_eq!(view.filtered_count(), 1);
    assert!(view.is_selected("b"));

    view.clear_filters();
    assert!(view.is_selected("b"));
    assert_eq!(view.selected_count(), 1);
}

#[test]
fn test_header_state_evaluated_against_current_page() {
    let rows: Vec<Transaction> = (0..20)
        .map(|i| tx(&format!("t-{i:02}"), "row"))
        .collect();
    let mut view = view_with(rows);
    view.set_page_size(10);

    // Select everything on page two
    view.set_page(1);
    view.toggle_page_selection();
    assert_eq!(view.header_selection(), HeaderState::Checked);
    assert_eq!(view.selected_count(), 10);

    // Page one has none of them
    view.set_page(0);
    assert_eq!(view.header_selection(), HeaderState::Unchecked);

    view.toggle_row_selection("t-00");
    assert_eq!(view.header_selection(), HeaderState::Indeterminate);
}

#[test]
fn test_toggle_page_clears_when_all_selected() {
    let mut view = view_with(vec![tx("a", "x"), tx("b", "y"), tx("c", "z")]);

    view.toggle_page_selection();
    assert_eq!(view.selected_count(), 3);

    view.toggle_page_selection();
    assert_eq!(view.selected_count(), 0);
}

#[test]
fn test_toolbar_mode_derives_from_selection() {
    let mut view = view_with(vec![tx("a", "x"), tx("b", "y")]);
    assert_eq!(view.toolbar_mode(), ToolbarMode::Search);

    view.toggle_row_selection("a");
    assert_eq!(view.toolbar_mode(), ToolbarMode::SelectionActions);

    view.clear_selection();
    assert_eq!(view.toolbar_mode(), ToolbarMode::Search);
}

#[test]
fn test_replacing_rows_prunes_vanished_ids() {
    let mut view = view_with(vec![tx("a", "x"), tx("b", "y")]);
    view.toggle_row_selection("a");
    view.toggle_row_selection("b");

    view.set_rows(vec![tx("b", "y"), tx("c", "z")]);
    assert!(!view.is_selected("a"));
    assert!(view.is_selected("b"));
    assert_eq!(view.selected_count(), 1);
}

#[test]
fn test_delete_prompt_wording_is_count_aware() {
    let mut view = view_with(vec![tx("a", "x"), tx("b", "y"), tx("c", "z")]);

    view.toggle_row_selection("a");
    assert_eq!(
        view.delete_prompt(),
        "Delete this transaction? This cannot be undone."
    );

    view.toggle_row_selection("b");
    view.toggle_row_selection("c");
    assert_eq!(
        view.delete_prompt(),
        "Delete these 3 transactions? This cannot be undone."
    );
}
