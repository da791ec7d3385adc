//! Form definitions backing the product pages.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid product id")]
    InvalidProductId,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
}
