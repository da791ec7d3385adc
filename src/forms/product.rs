//! Product creation form: draft values and required-field validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::Product;
use crate::domain::types::{CalendarDate, ProductField, ProductId, normalize_date_input};
use crate::forms::FormError;

/// In-progress product data held by the creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProductDraft {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub logo: String,
    #[validate(length(min = 1))]
    pub date_release: String,
    #[validate(length(min = 1))]
    pub date_revision: String,
}

impl ProductDraft {
    pub fn get(&self, field: ProductField) -> &str {
        match field {
            ProductField::Id => &self.id,
            ProductField::Name => &self.name,
            ProductField::Description => &self.description,
            ProductField::Logo => &self.logo,
            ProductField::DateRelease => &self.date_release,
            ProductField::DateRevision => &self.date_revision,
        }
    }

    /// Stores a field value. Date fields are re-serialized as `YYYY-MM-DD`.
    pub fn set(&mut self, field: ProductField, value: &str) {
        let value = if field.is_date() {
            normalize_date_input(value)
        } else {
            value.to_string()
        };

        let slot = match field {
            ProductField::Id => &mut self.id,
            ProductField::Name => &mut self.name,
            ProductField::Description => &mut self.description,
            ProductField::Logo => &mut self.logo,
            ProductField::DateRelease => &mut self.date_release,
            ProductField::DateRevision => &mut self.date_revision,
        };
        *slot = value;
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        ProductField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

impl TryFrom<&ProductDraft> for Product {
    type Error = FormError;

    fn try_from(draft: &ProductDraft) -> Result<Self, Self::Error> {
        draft.validate()?;

        let id = ProductId::new(draft.id.as_str()).map_err(|_| FormError::InvalidProductId)?;
        let date_release = CalendarDate::parse(&draft.date_release)
            .map_err(|_| FormError::InvalidDate(draft.date_release.clone()))?;
        let date_revision = CalendarDate::parse(&draft.date_revision)
            .map_err(|_| FormError::InvalidDate(draft.date_revision.clone()))?;

        Ok(Product {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            logo: draft.logo.clone(),
            date_release,
            date_revision,
        })
    }
}

/// Message shown next to a field left empty.
pub fn required_message(field: ProductField) -> String {
    format!("El campo {} es requerido", field.display_name())
}

/// Checks the required-field rule for a single value.
///
/// Returns the error message when the value is empty.
pub fn validate_field(field: ProductField, value: &str) -> Option<String> {
    if value.is_empty() {
        Some(required_message(field))
    } else {
        None
    }
}

/// Per-field error messages. An empty message means the field is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ProductField, String>);

impl Default for FieldErrors {
    fn default() -> Self {
        Self(
            ProductField::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        )
    }
}

impl FieldErrors {
    pub fn message(&self, field: ProductField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn has_error(&self, field: ProductField) -> bool {
        !self.message(field).is_empty()
    }

    pub fn set(&mut self, field: ProductField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Re-validates one field, updating or clearing its message.
    pub fn check(&mut self, field: ProductField, value: &str) -> bool {
        let message = validate_field(field, value);
        let valid = message.is_none();
        self.set(field, message.unwrap_or_default());
        valid
    }

    pub fn is_valid(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fields currently carrying a message.
    pub fn failing(&self) -> impl Iterator<Item = ProductField> + '_ {
        self.0
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, _)| *field)
    }
}

/// Applies the required-field rule to every field of the draft.
pub fn validate_all(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Err(validation) = draft.validate() {
        for name in validation.field_errors().keys() {
            match name.parse::<ProductField>() {
                Ok(field) => errors.set(field, required_message(field)),
                Err(err) => log::warn!("Ignoring validation error: {err}"),
            }
        }
    }

    errors
}
