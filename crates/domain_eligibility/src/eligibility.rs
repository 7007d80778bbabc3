//! Age-based eligibility
//!
//! A person is eligible for a product when their age at the reference date is
//! at most the product's ceiling. New enrolments use the entry-age ceiling,
//! renewals use the renewal-age ceiling. Ceilings are inclusive: a person
//! exactly at the ceiling age is still eligible.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::ReferenceDate;

use crate::catalog::{ProductCatalog, ProductRule};
use crate::error::EligibilityError;
use crate::product::ProductId;

/// A person being considered for cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub birth_date: NaiveDate,
}

impl Person {
    pub fn new(birth_date: NaiveDate) -> Self {
        Self { birth_date }
    }

    /// Age at the given reference date
    pub fn age_at(&self, reference_date: ReferenceDate) -> Result<u32, EligibilityError> {
        Ok(reference_date.age_of(self.birth_date)?)
    }
}

/// Why a person was found ineligible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IneligibilityReason {
    EntryAgeExceeded,
    RenewalAgeExceeded,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::EntryAgeExceeded => write!(f, "entry age exceeded"),
            IneligibilityReason::RenewalAgeExceeded => write!(f, "renewal age exceeded"),
        }
    }
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EligibilityVerdict {
    Eligible,
    Ineligible {
        reason: IneligibilityReason,
        limit_age: u32,
        actual_age: u32,
    },
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible)
    }

    /// Compares an age against an inclusive ceiling
    fn against_ceiling(age: u32, ceiling: u32, reason: IneligibilityReason) -> Self {
        if age > ceiling {
            EligibilityVerdict::Ineligible {
                reason,
                limit_age: ceiling,
                actual_age: age,
            }
        } else {
            EligibilityVerdict::Eligible
        }
    }
}

impl fmt::Display for EligibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityVerdict::Eligible => write!(f, "eligible"),
            EligibilityVerdict::Ineligible {
                reason,
                limit_age,
                actual_age,
            } => write!(f, "ineligible: {} (age {} > {})", reason, actual_age, limit_age),
        }
    }
}

/// Evaluates age eligibility against a catalog
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator<'a> {
    catalog: &'a ProductCatalog,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(catalog: &'a ProductCatalog) -> Self {
        Self { catalog }
    }

    /// Evaluates `person` for `product` as of `reference_date`
    ///
    /// # Errors
    ///
    /// - `InvalidDate` if the person is born after the reference date
    /// - `UnknownProduct` if the product is not catalogued
    /// - `NonRenewableProduct` if `is_renewal` is set for a product with no
    ///   renewal ceiling
    pub fn evaluate(
        &self,
        person: &Person,
        product: ProductId,
        reference_date: ReferenceDate,
        is_renewal: bool,
    ) -> Result<EligibilityVerdict, EligibilityError> {
        let age = person.age_at(reference_date)?;
        let rule = self.catalog.rule_for(product)?;
        Self::verdict_for_age(&rule, age, is_renewal)
    }

    /// Applies a rule to an already computed age
    pub fn verdict_for_age(
        rule: &ProductRule,
        age: u32,
        is_renewal: bool,
    ) -> Result<EligibilityVerdict, EligibilityError> {
        if !is_renewal {
            return Ok(EligibilityVerdict::against_ceiling(
                age,
                rule.entry_age_max,
                IneligibilityReason::EntryAgeExceeded,
            ));
        }

        let ceiling = rule
            .renewal_age_max
            .ok_or(EligibilityError::NonRenewableProduct(rule.product_id))?;

        Ok(EligibilityVerdict::against_ceiling(
            age,
            ceiling,
            IneligibilityReason::RenewalAgeExceeded,
        ))
    }
}

/// Evaluates against the standard catalog
pub fn evaluate(
    person: &Person,
    product: ProductId,
    reference_date: ReferenceDate,
    is_renewal: bool,
) -> Result<EligibilityVerdict, EligibilityError> {
    EligibilityEvaluator::new(ProductCatalog::standard()).evaluate(
        person,
        product,
        reference_date,
        is_renewal,
    )
}
