//! User-facing message catalog
//!
//! Count-aware wording for the grid's labels and error notices. The catalog
//! is an explicit object injected into each view rather than a process-wide
//! global, so hosts can switch languages per screen.

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

/// Message catalog for one locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Catalog for a locale
    pub fn new(locale: Locale) -> Self {
        Messages { locale }
    }

    /// English catalog
    pub fn english() -> Self {
        Messages::new(Locale::En)
    }

    /// Spanish catalog
    pub fn spanish() -> Self {
        Messages::new(Locale::Es)
    }

    /// Pagination label over the post-filter count
    pub fn displayed_rows(&self, from: usize, to: usize, count: usize) -> String {
        match self.locale {
            Locale::En => format!("{from}-{to} of {count}"),
            Locale::Es => format!("{from}-{to} de {count}"),
        }
    }

    /// Delete-selected button label
    pub fn delete_rows(&self, count: usize) -> String {
        match (self.locale, count) {
            (Locale::En, 1) => "Delete row".to_string(),
            (Locale::En, n) => format!("Delete {n} rows"),
            (Locale::Es, 1) => "Eliminar fila".to_string(),
            (Locale::Es, n) => format!("Eliminar {n} filas"),
        }
    }

    /// Bulk-edit button label
    pub fn edit_rows(&self, count: usize) -> String {
        match (self.locale, count) {
            (Locale::En, 1) => "Edit row".to_string(),
            (Locale::En, n) => format!("Edit {n} rows"),
            (Locale::Es, 1) => "Editar fila".to_string(),
            (Locale::Es, n) => format!("Editar {n} filas"),
        }
    }

    /// Deletion confirmation prompt
    pub fn delete_confirm(&self, count: usize) -> String {
        match (self.locale, count) {
            (Locale::En, 1) => "Delete this transaction? This cannot be undone.".to_string(),
            (Locale::En, n) => format!("Delete these {n} transactions? This cannot be undone."),
            (Locale::Es, 1) => {
                "¿Eliminar esta transacción? Esta acción no se puede deshacer.".to_string()
            }
            (Locale::Es, n) => {
                format!("¿Eliminar estas {n} transacciones? Esta acción no se puede deshacer.")
            }
        }
    }

    /// Notice shown when a cell or bulk update is rejected
    pub fn update_failed(&self) -> &'static str {
        match self.locale {
            Locale::En => "Could not update the transactions. Please try again.",
            Locale::Es => "Error al actualizar las transacciones. Por favor, intenta de nuevo.",
        }
    }

    /// Notice shown when a deletion is rejected
    pub fn delete_failed(&self) -> &'static str {
        match self.locale {
            Locale::En => "Could not delete the transactions. Please try again.",
            Locale::Es => "Error al eliminar las transacciones. Por favor, intenta de nuevo.",
        }
    }

    /// Empty-table text when a quick filter is active
    pub fn no_search_results(&self) -> &'static str {
        match self.locale {
            Locale::En => "No results match your search",
            Locale::Es => "No hay resultados para tu búsqueda",
        }
    }

    /// Empty-table text with no filter active
    pub fn no_data(&self) -> &'static str {
        match self.locale {
            Locale::En => "No data available",
            Locale::Es => "No hay datos disponibles",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_aware_wording() {
        let messages = Messages::english();
        assert_eq!(messages.delete_rows(1), "Delete row");
        assert_eq!(messages.delete_rows(3), "Delete 3 rows");
        assert_eq!(messages.displayed_rows(1, 50, 120), "1-50 of 120");
    }
}
