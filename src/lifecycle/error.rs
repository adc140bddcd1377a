use std::{error::Error, fmt::Debug};

use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::{store::StoreError, utils::error_fmt_chain};

/// Outcome taxonomy of every lifecycle operation.
///
/// Validation and not-found failures are raised before anything is written;
/// an internal failure aborts the surrounding transaction.
#[derive(Error)]
pub enum LifecycleError{
    #[error("{0}")]
    Validation(String),
    #[error("{0} {1} not found")]
    NotFound(&'static str, Uuid),
    #[error("{0}")]
    Conflict(String),
    #[error("Failed due to internal error")]
    Internal(#[from] StoreError)
}

impl LifecycleError {
    pub fn validation(message: impl Into<String>) -> Self {
        LifecycleError::Validation(message.into())
    }
}

impl From<ValidationErrors> for LifecycleError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        messages.sort();

        LifecycleError::Validation(messages.join(", "))
    }
}

// Nested structs and lists (order comments) report their own field errors
fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                messages.extend(errs.iter().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field)
                }));
            },
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(entries) => {
                for nested in entries.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

impl Debug for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}
