//! DTOs shaped for the product list and creation templates.

use serde::Serialize;

use crate::domain::notification::Notification;
use crate::domain::product::Product;
use crate::domain::types::ProductField;
use crate::forms::product::{FieldErrors, ProductDraft};
use crate::pagination::Paginated;

/// Query parameters accepted by the list page.
#[derive(Debug, Default, Clone)]
pub struct ProductsQuery {
    /// Optional free-text search entered by the user.
    pub search: Option<String>,
    /// Page number requested by the pagination control.
    pub page: Option<usize>,
    /// Page size requested by the pagination control.
    pub per_page: Option<usize>,
}

impl ProductsQuery {
    /// Search term as typed, empty when absent.
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// Product as shown in the list table, dates in display format.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub date_release: String,
    pub date_revision: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            logo: product.logo.clone(),
            date_release: product.date_release.to_display(),
            date_revision: product.date_revision.to_display(),
        }
    }
}

/// Data required to render the list page.
#[derive(Debug)]
pub struct ProductsPageData {
    /// Current window of the filtered products.
    pub products: Paginated<ProductRow>,
    /// Search query echoed back to the search box when present.
    pub search_query: Option<String>,
    /// Fixed message shown instead of the table when loading failed.
    pub load_error: Option<String>,
    /// Product awaiting delete confirmation.
    pub pending_delete: Option<ProductRow>,
}

/// One input of the creation form, in display order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    /// Empty when the field is valid.
    pub error: String,
}

/// Label shown next to each form input.
pub fn field_label(field: ProductField) -> &'static str {
    match field {
        ProductField::Id => "ID del producto:",
        ProductField::Name => "Nombre del producto:",
        ProductField::Description => "Descripción:",
        ProductField::Logo => "Logo (URL):",
        ProductField::DateRelease => "Fecha de liberación:",
        ProductField::DateRevision => "Fecha de revisión:",
    }
}

impl FormFieldView {
    pub fn new(field: ProductField, draft: &ProductDraft, errors: &FieldErrors) -> Self {
        Self {
            name: field.as_str(),
            label: field_label(field),
            input_type: if field.is_date() { "date" } else { "text" },
            value: draft.get(field).to_string(),
            error: errors.message(field).to_string(),
        }
    }
}

/// Data required to render the creation form.
#[derive(Debug, Serialize)]
pub struct ProductFormPageData {
    pub fields: Vec<FormFieldView>,
    pub draft: ProductDraft,
    pub errors: FieldErrors,
    /// Selects between the "Reiniciar" and "Regresar" secondary button.
    pub dirty: bool,
    pub notification: Option<Notification>,
    /// Seconds until the page returns to the list, set after a successful create.
    pub redirect_after_secs: Option<u64>,
}
