//! Form and query-string definitions backing the finance routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod movements;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde::de::value::Error),

    #[error("invalid movement type")]
    InvalidKind,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid project id")]
    InvalidProjectId,

    #[error("invalid category id")]
    InvalidCategoryId,

    #[error("invalid amount")]
    InvalidAmount,
}
