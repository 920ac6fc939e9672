//! Selection model
//!
//! Tracks selected row identifiers independently of filtering, sorting and
//! paging: a row stays selected while hidden by a filter and reappears
//! selected when the filter clears. Only an explicit clear or a deletion
//! removes ids from the set.

use std::collections::HashSet;

/// Tri-state of the select-all header checkbox, evaluated per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// No row on the page is selected
    Unchecked,
    /// Every row on the page is selected
    Checked,
    /// Some but not all rows on the page are selected
    Indeterminate,
}

/// Set of selected transaction ids
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: HashSet<String>,
}

impl SelectionModel {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row's selection
    pub fn toggle_row(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Whether a row is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected rows
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids, sorted for deterministic persistence calls
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Header-checkbox toggle: select every page row, or clear the page's
    /// rows when all of them are already selected
    pub fn toggle_page(&mut self, page_ids: &[&str]) {
        if !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(*id)) {
            for id in page_ids {
                self.selected.remove(*id);
            }
        } else {
            for id in page_ids {
                self.selected.insert((*id).to_string());
            }
        }
    }

    /// Header-checkbox state against the current page
    pub fn header_state(&self, page_ids: &[&str]) -> HeaderState {
        let on_page = page_ids
            .iter()
            .filter(|id| self.selected.contains(**id))
            .count();
        if on_page == 0 {
            HeaderState::Unchecked
        } else if on_page == page_ids.len() {
            HeaderState::Checked
        } else {
            HeaderState::Indeterminate
        }
    }

    /// Remove ids that no longer exist (deleted or replaced rows)
    pub fn retain_known(&mut self, known: &HashSet<&str>) {
        self.selected.retain(|id| known.contains(id.as_str()));
    }

    /// Remove specific ids (after a successful delete)
    pub fn remove_ids(&mut self, ids: &[String]) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Drop the whole selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_page() {
        let mut selection = SelectionModel::new();
        let page = ["a", "b", "c"];

        selection.toggle_page(&page);
        assert_eq!(selection.selected_count(), 3);
        assert_eq!(selection.header_state(&page), HeaderState::Checked);

        selection.toggle_row("b");
        assert_eq!(selection.header_state(&page), HeaderState::Indeterminate);

        selection.toggle_page(&page);
        assert_eq!(selection.selected_count(), 3);

        selection.toggle_page(&page);
        assert_eq!(selection.selected_count(), 0);
        assert_eq!(selection.header_state(&page), HeaderState::Unchecked);
    }
}
