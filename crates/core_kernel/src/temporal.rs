//! Reference dates and age arithmetic
//!
//! Every age in the engine is computed against an explicit [`ReferenceDate`]
//! rather than the system clock, so the same inputs always give the same
//! verdict.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Birth date {birth_date} is after reference date {reference_date}")]
    BirthDateAfterReference {
        birth_date: NaiveDate,
        reference_date: NaiveDate,
    },
}

/// Whole years elapsed from `birth_date` to `reference_date`.
///
/// The year difference is reduced by one while the birthday has not yet
/// occurred in the reference year, comparing (month, day) pairs. A 29 February
/// birthday is therefore reached on 1 March in non-leap years.
///
/// # Errors
///
/// Returns [`TemporalError::BirthDateAfterReference`] if the person is not yet born.
pub fn age_in_years(birth_date: NaiveDate, reference_date: NaiveDate) -> Result<u32, TemporalError> {
    if birth_date > reference_date {
        return Err(TemporalError::BirthDateAfterReference {
            birth_date,
            reference_date,
        });
    }

    let mut age = reference_date.year() - birth_date.year();
    if (reference_date.month(), reference_date.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    // birth_date <= reference_date keeps this non-negative
    Ok(age as u32)
}

/// The fixed "today" of an eligibility session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceDate(NaiveDate);

impl ReferenceDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Age of someone born on `birth_date`, as of this reference date
    pub fn age_of(&self, birth_date: NaiveDate) -> Result<u32, TemporalError> {
        age_in_years(birth_date, self.0)
    }
}

impl From<NaiveDate> for ReferenceDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
