//! Form definitions backing the marketplace routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod admin;
pub mod feedback;
pub mod hostel;
pub mod owner;
pub mod student;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid image url: {0}")]
    InvalidUrl(String),

    #[error("unknown amenity `{0}`")]
    InvalidAmenity(String),

    #[error("invalid rent tiers: {0}")]
    InvalidRentTiers(String),

    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),

    #[error("malformed form: {0}")]
    Malformed(String),

    #[error("csv error: {0}")]
    Csv(String),
}

/// Trims an optional text field, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
