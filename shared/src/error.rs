//! Engine error types

use thiserror::Error;

/// Errors surfaced by the billing engine
///
/// The calculators themselves compute with whatever figures they are
/// given; these errors come from the validation boundary and from the
/// booking-level aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    #[error("invalid configuration field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("invalid service input field '{field}': {reason}")]
    InvalidServiceInput { field: String, reason: String },

    /// Booking-level sale totals are enabled but no figure was supplied
    /// for one or more currencies present in the booking
    #[error("missing booking sale total for currencies: {}", .currencies.join(", "))]
    MissingBookingSaleTotal { currencies: Vec<String> },
}

impl BillingError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_service_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidServiceInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
