//! Creation form controller: draft editing, validation and submission.

use std::time::Duration;

use crate::domain::notification::Notification;
use crate::domain::product::Product;
use crate::domain::types::ProductField;
use crate::dto::products::{FormFieldView, ProductFormPageData};
use crate::forms::FormError;
use crate::forms::product::{FieldErrors, ProductDraft, required_message, validate_all};
use crate::gateway::ProductWriter;
use crate::services::ServiceResult;

pub const CREATE_SUCCESS_MESSAGE: &str = "Producto agregado con éxito";
pub const CREATE_ERROR_MESSAGE: &str = "No se pudo agregar el producto";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    /// The product was created; the view returns to the list after a delay.
    Succeeded,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Some fields are empty; nothing was sent.
    Invalid,
    Created(Product),
    /// The backend rejected the request or could not be reached.
    Failed,
}

#[derive(Debug)]
pub struct ProductFormController {
    draft: ProductDraft,
    errors: FieldErrors,
    phase: FormPhase,
    notification: Option<Notification>,
    redirect_delay: Duration,
}

impl ProductFormController {
    pub fn new(redirect_delay: Duration) -> Self {
        Self {
            draft: ProductDraft::default(),
            errors: FieldErrors::default(),
            phase: FormPhase::Editing,
            notification: None,
            redirect_delay,
        }
    }

    /// Builds a controller by editing every field of `draft` in form order.
    pub fn with_draft(draft: &ProductDraft, redirect_delay: Duration) -> Self {
        let mut controller = Self::new(redirect_delay);
        for field in ProductField::ALL {
            controller.edit_field(field, draft.get(field));
        }
        controller
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Updates one field; a field already showing an error is re-validated,
    /// other fields keep their messages.
    pub fn edit_field(&mut self, field: ProductField, value: &str) {
        self.draft.set(field, value);
        if self.errors.has_error(field) {
            self.errors.check(field, self.draft.get(field));
        }
    }

    pub fn reset(&mut self) {
        self.draft = ProductDraft::default();
        self.errors.clear();
        self.notification = None;
        self.phase = FormPhase::Editing;
    }

    /// True when any field holds a value or any error is displayed.
    pub fn is_dirty_or_invalid(&self) -> bool {
        !self.draft.is_blank() || !self.errors.is_valid()
    }

    /// Delay before returning to the list, once the product was created.
    pub fn redirect_after(&self) -> Option<Duration> {
        (self.phase == FormPhase::Succeeded).then_some(self.redirect_delay)
    }

    /// Validates the draft and, when complete, sends it to the backend.
    pub async fn submit<W>(&mut self, gateway: &W) -> ServiceResult<SubmitOutcome>
    where
        W: ProductWriter + ?Sized,
    {
        self.notification = None;
        self.errors = validate_all(&self.draft);
        if !self.errors.is_valid() {
            self.phase = FormPhase::Editing;
            return Ok(SubmitOutcome::Invalid);
        }

        let product = match Product::try_from(&self.draft) {
            Ok(product) => product,
            Err(FormError::InvalidProductId) => {
                self.errors
                    .set(ProductField::Id, required_message(ProductField::Id));
                self.phase = FormPhase::Editing;
                return Ok(SubmitOutcome::Invalid);
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                return Err(err.into());
            }
        };

        self.phase = FormPhase::Submitting;

        match gateway.create_product(&product).await {
            Ok(created) => {
                log::info!("Created product {}", created.id);
                self.phase = FormPhase::Succeeded;
                self.notification = Some(Notification::success(CREATE_SUCCESS_MESSAGE));
                Ok(SubmitOutcome::Created(created))
            }
            Err(err) => {
                log::error!("Failed to create product {}: {err}", product.id);
                self.phase = FormPhase::Editing;
                self.notification = Some(Notification::error(format!(
                    "{CREATE_ERROR_MESSAGE}: {err}"
                )));
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    pub fn to_page_data(&self) -> ProductFormPageData {
        ProductFormPageData {
            fields: ProductField::ALL
                .into_iter()
                .map(|field| FormFieldView::new(field, &self.draft, &self.errors))
                .collect(),
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            dirty: self.is_dirty_or_invalid(),
            notification: self.notification.clone(),
            redirect_after_secs: self.redirect_after().map(|delay| delay.as_secs()),
        }
    }
}
