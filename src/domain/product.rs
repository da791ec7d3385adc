use serde::{Deserialize, Serialize};

use crate::domain::types::{CalendarDate, ProductId};

/// Financial product as stored by the backend service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Logo URL.
    pub logo: String,
    pub date_release: CalendarDate,
    pub date_revision: CalendarDate,
}

impl Product {
    /// Case-insensitive substring match used by the list search.
    ///
    /// `needle` must already be lower-cased. Dates are matched in their
    /// displayed `DD/MM/YYYY` form.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.date_release.to_display().contains(needle)
            || self.date_revision.to_display().contains(needle)
    }
}
