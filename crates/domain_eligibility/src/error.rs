//! Eligibility domain errors
//!
//! Every failure here is a recoverable validation outcome. Callers surface
//! them to the user; nothing in this crate retries or aborts on them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{Money, MoneyError, SupplementaryId, TemporalError};

use crate::product::ProductId;

/// Errors that can occur in the eligibility domain
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityError {
    /// Birth date lies after the reference date
    #[error("Invalid birth date {birth_date}: after reference date {reference_date}")]
    InvalidDate {
        birth_date: NaiveDate,
        reference_date: NaiveDate,
    },

    /// Product key is not in the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Renewal was requested for a product without a renewal ceiling
    #[error("Product {0} is not renewable")]
    NonRenewableProduct(ProductId),

    /// Registry already holds the configured number of supplementary insureds
    #[error("Supplementary insured capacity of {max} reached")]
    CapacityExceeded { max: usize },

    /// Supplementary insured does not exist
    #[error("Supplementary insured not found: {0}")]
    NotFound(SupplementaryId),

    /// Requested amount is negative, fractional, or in the wrong currency
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Requested sum assured is above the product cap
    #[error("Sum assured {requested} exceeds cap {cap}")]
    SumAssuredExceeded { cap: Money, requested: Money },

    /// Rider rules do not allow this rider with the current main product
    #[error("Rider {rider} is not offered with main product {main}")]
    RiderNotPermitted { main: ProductId, rider: ProductId },

    /// Catalog or engine configuration is inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EligibilityError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        EligibilityError::Configuration(message.into())
    }

    /// Creates an invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        EligibilityError::InvalidAmount(message.into())
    }
}

impl From<TemporalError> for EligibilityError {
    fn from(err: TemporalError) -> Self {
        match err {
            TemporalError::BirthDateAfterReference {
                birth_date,
                reference_date,
            } => EligibilityError::InvalidDate {
                birth_date,
                reference_date,
            },
        }
    }
}

impl From<MoneyError> for EligibilityError {
    fn from(err: MoneyError) -> Self {
        EligibilityError::InvalidAmount(err.to_string())
    }
}
