use anyhow::Result;
use ledgerline_core::demo::StatementGenerator;
use ledgerline_core::export;
use ledgerline_core::grid::bulk::BulkEditForm;
use ledgerline_core::grid::column::statement_columns;
use ledgerline_core::grid::{GridOptions, GridView};
use ledgerline_core::locale::Messages;
use ledgerline_core::store::MemoryStore;
use ledgerline_core::transaction::Field;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Simulate an upload result and drive the review grid against an
    // in-memory backend
    let rows = StatementGenerator::seeded(1).generate(40);
    let store = MemoryStore::with_records(rows.clone());

    let mut view = GridView::with_options(
        statement_columns(),
        GridOptions::editable(),
        Messages::english(),
    );
    view.set_rows(rows);
    view.set_page_size(10);

    println!("Loaded {} transactions ({})", view.rows().len(), view.rows_label());

    view.set_quick_filter("wire");
    println!("\nQuick filter \"wire\": {}", view.rows_label());
    for row in view.page_rows() {
        println!(
            "  {}  {:>10}  {}",
            row.display_value(Field::Date),
            row.display_value(Field::CreditAmount),
            row.display_value(Field::Description),
        );
    }

    // Reclassify everything the filter found
    view.toggle_page_selection();
    println!("\nSelected {} rows", view.selected_count());

    let form = BulkEditForm {
        category: "Revenue".to_string(),
        subcategory: "Services".to_string(),
    };
    view.apply_bulk(&store, &form.updates()).await?;
    println!("Bulk-assigned category/subcategory");

    view.clear_selection();
    view.clear_filters();

    // Edit one cell inline
    if let Some(id) = view.page_rows().first().map(|r| r.transaction_id.clone()) {
        view.begin_edit(&store, &id, Field::DebitAmount).await?;
        view.edit_input("123.45");
        view.commit_edit(&store).await?;
        println!(
            "Set debit of {} to {}",
            id,
            view.row(&id)
                .map(|r| r.display_value(Field::DebitAmount))
                .unwrap_or_default()
        );
    }

    println!("\nCSV export:\n{}", export::to_csv_string(view.rows()));
    Ok(())
}
