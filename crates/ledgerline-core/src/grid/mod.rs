//! Tabular view engine
//!
//! Composes the filter, sort, pagination, selection and editing engines over
//! an in-memory set of transactions. The view never owns the data's truth:
//! every mutation (cell commit, bulk commit, delete) goes to the injected
//! [`TransactionStore`](crate::store::TransactionStore) first and merges into
//! local rows only when the call succeeds.

pub mod bulk;
pub mod column;
pub mod edit;
pub mod error;
pub mod filter;
pub mod page;
pub mod selection;
pub mod sort;

use std::collections::HashSet;

use crate::catalog::ChoiceCatalog;
use crate::config::ViewConfig;
use crate::locale::Messages;
use crate::store::TransactionStore;
use crate::transaction::{Field, FieldUpdates, Transaction};

use column::{ChoiceSource, ColumnSpec, ColumnWidths, EditorKind};
use edit::EditController;
use error::GridError;
use filter::{FieldFilters, FilterState};
use page::Pager;
use selection::{HeaderState, SelectionModel};
use sort::SortState;

/// Exclusive interaction mode of the view
///
/// One enumerated variant instead of a set of independent open/closed flags,
/// so overlapping states (an open bulk menu during an edit, say) cannot be
/// represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    /// Nothing open
    #[default]
    Idle,
    /// A cell is being edited
    Editing,
    /// The advanced-filter menu is open
    FilterMenuOpen,
    /// The bulk-edit menu is open
    BulkMenuOpen,
}

/// Which toolbar the host should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarMode {
    /// Search field and filter button
    Search,
    /// Contextual actions for the selected rows
    SelectionActions,
}

/// Per-view feature switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Whether cells can be edited
    pub editable: bool,
    /// Whether the quick filter is offered
    pub searchable: bool,
    /// Whether header activation sorts
    pub sortable: bool,
    /// Whether rows are paged
    pub paginated: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            editable: false,
            searchable: true,
            sortable: true,
            paginated: true,
        }
    }
}

impl GridOptions {
    /// Options for the editable statement review table
    pub fn editable() -> Self {
        GridOptions {
            editable: true,
            ..Default::default()
        }
    }
}

/// In-memory tabular view over a set of transactions
#[derive(Debug)]
pub struct GridView {
    columns: Vec<ColumnSpec>,
    widths: ColumnWidths,
    options: GridOptions,
    messages: Messages,
    rows: Vec<Transaction>,
    filter: FilterState,
    sort: SortState,
    pager: Pager,
    selection: SelectionModel,
    edit: EditController,
    mode: UiMode,
}

impl GridView {
    /// View with default options and English messages
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self::with_options(columns, GridOptions::default(), Messages::english())
    }

    /// View with explicit options and message catalog
    pub fn with_options(columns: Vec<ColumnSpec>, options: GridOptions, messages: Messages) -> Self {
        GridView {
            columns,
            widths: ColumnWidths::new(),
            options,
            messages,
            rows: Vec::new(),
            filter: FilterState::new(),
            sort: SortState::new(),
            pager: Pager::new(),
            selection: SelectionModel::new(),
            edit: EditController::new(),
            mode: UiMode::Idle,
        }
    }

    /// View configured from settings
    pub fn from_config(columns: Vec<ColumnSpec>, options: GridOptions, config: &ViewConfig) -> Self {
        let mut view = Self::with_options(columns, options, Messages::new(config.locale));
        view.pager = Pager::with_page_size(config.default_page_size);
        view
    }

    /// Column descriptors
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Message catalog in use
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Current interaction mode
    pub fn mode(&self) -> UiMode {
        self.mode
    }

    // ----- rows -----

    /// Replace the row set (new upload result, new search result)
    ///
    /// Selection is pruned to surviving ids; any in-flight edit is discarded
    /// and the page index re-clamped.
    pub fn set_rows(&mut self, rows: Vec<Transaction>) {
        self.rows = rows;
        let known: HashSet<&str> = self
            .rows
            .iter()
            .map(|r| r.transaction_id.as_str())
            .collect();
        self.selection.retain_known(&known);
        self.edit.cancel();
        if self.mode == UiMode::Editing {
            self.mode = UiMode::Idle;
        }
        let count = self.filtered_count();
        self.pager.set_page(self.pager.page_index(), count);
    }

    /// All rows, unfiltered
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// One row by id
    pub fn row(&self, id: &str) -> Option<&Transaction> {
        self.rows.iter().find(|r| r.transaction_id == id)
    }

    // ----- view pipeline -----

    fn visible_indices(&self) -> Vec<usize> {
        let mut indices = filter::apply(&self.rows, &self.columns, &self.filter);
        sort::apply(&self.rows, &mut indices, &self.sort);
        indices
    }

    /// Rows passing the active filters
    pub fn filtered_count(&self) -> usize {
        filter::apply(&self.rows, &self.columns, &self.filter).len()
    }

    /// The rows visible on the current page, filtered and sorted
    pub fn page_rows(&self) -> Vec<&Transaction> {
        let indices = self.visible_indices();
        let visible: &[usize] = if self.options.paginated {
            self.pager.slice(&indices)
        } else {
            &indices
        };
        visible.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Ids of the rows on the current page
    pub fn page_row_ids(&self) -> Vec<String> {
        self.page_rows()
            .iter()
            .map(|r| r.transaction_id.clone())
            .collect()
    }

    /// Displayed-rows label over the post-filter count
    pub fn rows_label(&self) -> String {
        self.pager.label(self.filtered_count(), &self.messages)
    }

    /// Number of pages for the current filters
    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.filtered_count())
    }

    /// Text for an empty table body, if the table is empty
    pub fn empty_text(&self) -> Option<&str> {
        if self.filtered_count() > 0 {
            return None;
        }
        if self.filter.quick().trim().is_empty() {
            Some(self.messages.no_data())
        } else {
            Some(self.messages.no_search_results())
        }
    }

    // ----- filters -----

    /// Set the quick-filter text; resets to the first page
    pub fn set_quick_filter(&mut self, text: impl Into<String>) {
        if !self.options.searchable {
            return;
        }
        self.filter.set_quick(text);
        self.pager.reset();
    }

    /// Apply the advanced-filter form; closes the menu, resets to page one
    pub fn apply_field_filters(&mut self, fields: FieldFilters) {
        self.filter.set_fields(fields);
        self.pager.reset();
        if self.mode == UiMode::FilterMenuOpen {
            self.mode = UiMode::Idle;
        }
    }

    /// Drop every filter
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.pager.reset();
    }

    /// Current filter state
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    // ----- sort -----

    /// Advance the sort cycle for one column header activation
    pub fn cycle_sort(&mut self, field: Field) {
        if !self.options.sortable {
            return;
        }
        let sortable = self
            .columns
            .iter()
            .any(|c| c.field == field && c.sortable);
        if sortable {
            self.sort.cycle(field);
        }
    }

    /// Current sort state
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    // ----- pagination -----

    /// Jump to a page
    pub fn set_page(&mut self, index: usize) {
        let count = self.filtered_count();
        self.pager.set_page(index, count);
    }

    /// Change the page size, keeping the first visible row in view
    pub fn set_page_size(&mut self, size: usize) {
        let count = self.filtered_count();
        self.pager.set_page_size(size, count);
    }

    /// Pagination state
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    // ----- selection -----

    /// Flip one row's selection
    pub fn toggle_row_selection(&mut self, id: &str) {
        self.selection.toggle_row(id);
    }

    /// Header-checkbox toggle against the current page
    pub fn toggle_page_selection(&mut self) {
        let ids = self.page_row_ids();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.selection.toggle_page(&refs);
    }

    /// Header-checkbox state against the current page
    pub fn header_selection(&self) -> HeaderState {
        let ids = self.page_row_ids();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.selection.header_state(&refs)
    }

    /// Whether a row is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Number of selected rows
    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Selected ids, sorted
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids()
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Which toolbar the host should render; a pure derivation from the
    /// selection count
    pub fn toolbar_mode(&self) -> ToolbarMode {
        if self.selection.selected_count() > 0 {
            ToolbarMode::SelectionActions
        } else {
            ToolbarMode::Search
        }
    }

    // ----- menus -----

    /// Open the advanced-filter menu; refused while a cell is in edit
    pub fn open_filter_menu(&mut self) -> bool {
        if self.mode == UiMode::Editing {
            return false;
        }
        self.mode = UiMode::FilterMenuOpen;
        true
    }

    /// Open the bulk-edit menu; requires a selection, refused mid-edit
    pub fn open_bulk_menu(&mut self) -> bool {
        if self.mode == UiMode::Editing || self.selection.selected_count() == 0 {
            return false;
        }
        self.mode = UiMode::BulkMenuOpen;
        true
    }

    /// Close any open menu
    pub fn close_menus(&mut self) {
        if matches!(self.mode, UiMode::FilterMenuOpen | UiMode::BulkMenuOpen) {
            self.mode = UiMode::Idle;
        }
    }

    // ----- editing -----

    /// Enter edit on one cell
    ///
    /// Any active edit is committed first (commit-on-blur), so two edit
    /// cells can never coexist. Returns false when the view or column is not
    /// editable, or the row is gone.
    pub async fn begin_edit<S: TransactionStore>(
        &mut self,
        store: &S,
        row_id: &str,
        field: Field,
    ) -> Result<bool, GridError> {
        if !self.options.editable {
            return Ok(false);
        }
        let Some(editor) = self
            .columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.editor)
        else {
            return Ok(false);
        };
        if editor == EditorKind::ReadOnly {
            return Ok(false);
        }

        self.commit_edit(store).await?;

        let Some(row) = self.row(row_id) else {
            return Ok(false);
        };
        let initial = row.raw_value(field);
        self.edit.activate(
            row_id,
            field,
            initial,
            matches!(editor, EditorKind::Numeric),
            matches!(editor, EditorKind::Choice(_)),
        );
        self.mode = UiMode::Editing;
        Ok(true)
    }

    /// The cell currently in edit, if any
    pub fn active_edit(&self) -> Option<&edit::ActiveEdit> {
        self.edit.active()
    }

    /// Replace the pending input buffer; numeric columns apply the
    /// keystroke mask and report rejections with false
    pub fn edit_input(&mut self, text: &str) -> bool {
        self.edit.set_buffer(text)
    }

    /// Discard the pending value (Escape)
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
        if self.mode == UiMode::Editing {
            self.mode = UiMode::Idle;
        }
    }

    /// Commit the active edit (blur or Enter)
    ///
    /// The pending value is coerced to the column type and persisted first;
    /// the local row changes only when the store accepts. On rejection the
    /// edit state is still cleared and the row left untouched. Committing
    /// with no active edit is a no-op.
    pub async fn commit_edit<S: TransactionStore>(&mut self, store: &S) -> Result<(), GridError> {
        let Some(active) = self.edit.take() else {
            return Ok(());
        };
        if self.mode == UiMode::Editing {
            self.mode = UiMode::Idle;
        }

        let Some(pos) = self
            .rows
            .iter()
            .position(|r| r.transaction_id == active.row_id)
        else {
            return Ok(());
        };

        let value = edit::coerce(&active.buffer, active.numeric);
        match store.update(&active.row_id, active.field, value.clone()).await {
            Ok(()) => {
                self.rows[pos].set_value(active.field, value);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(row = %active.row_id, field = %active.field, %error, "cell update rejected");
                Err(GridError::Persistence(error))
            }
        }
    }

    /// Commit a choice selection immediately (choice columns have no blur)
    ///
    /// Bank cells store the option's display label rather than its id.
    pub async fn choose<S: TransactionStore>(
        &mut self,
        store: &S,
        catalog: &ChoiceCatalog,
        value: &str,
    ) -> Result<(), GridError> {
        let Some(active) = self.edit.active() else {
            return Ok(());
        };
        let field = active.field;
        let editor = self
            .columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.editor);

        let text = match editor {
            Some(EditorKind::Choice(ChoiceSource::Banks)) => {
                catalog.bank_label(value).unwrap_or(value).to_string()
            }
            _ => value.to_string(),
        };
        self.edit.set_buffer(&text);
        self.commit_edit(store).await
    }

    // ----- bulk edit -----

    /// Apply one set of field updates to every selected row
    ///
    /// Empty updates and empty selections are no-ops. One bulk persistence
    /// call; on success all selected rows merge in a single transition, on
    /// rejection zero rows change. The selection is kept either way so
    /// further bulk operations can chain.
    pub async fn apply_bulk<S: TransactionStore>(
        &mut self,
        store: &S,
        updates: &FieldUpdates,
    ) -> Result<(), GridError> {
        self.close_menus();
        if updates.is_empty() || self.selection.selected_count() == 0 {
            return Ok(());
        }

        let ids = self.selection.ids();
        match store.update_many(&ids, updates).await {
            Ok(()) => {
                let selection = &self.selection;
                for row in self.rows.iter_mut() {
                    if selection.is_selected(&row.transaction_id) {
                        row.merge(updates);
                    }
                }
                Ok(())
            }
            Err(error) => {
                tracing::warn!(rows = ids.len(), %error, "bulk update rejected");
                Err(GridError::Persistence(error))
            }
        }
    }

    // ----- deletion -----

    /// Confirmation prompt for deleting the current selection
    pub fn delete_prompt(&self) -> String {
        self.messages.delete_confirm(self.selection.selected_count())
    }

    /// Delete every selected row
    ///
    /// On success the rows leave local state and the selection clears; on
    /// rejection nothing changes and the selection is retained for retry.
    /// Returns the number of rows deleted.
    pub async fn delete_selected<S: TransactionStore>(
        &mut self,
        store: &S,
    ) -> Result<usize, GridError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(0);
        }

        match store.delete_many(&ids).await {
            Ok(()) => {
                let selection = &self.selection;
                self.rows
                    .retain(|r| !selection.is_selected(&r.transaction_id));
                let deleted = ids.len();
                self.selection.clear();
                let count = self.filtered_count();
                self.pager.set_page(self.pager.page_index(), count);
                Ok(deleted)
            }
            Err(error) => {
                tracing::warn!(rows = ids.len(), %error, "delete rejected");
                Err(GridError::Persistence(error))
            }
        }
    }

    // ----- column layout -----

    /// Effective width of a column, override or descriptor default
    pub fn column_width(&self, field: Field) -> Option<f32> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| self.widths.width_of(c))
    }

    /// Apply a resize drag to a column
    pub fn resize_column(&mut self, field: Field, delta_px: f32, table_px: f32) {
        if let Some(spec) = self.columns.iter().find(|c| c.field == field) {
            self.widths.resize(spec, delta_px, table_px);
        }
    }
}
