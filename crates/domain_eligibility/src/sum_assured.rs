//! Sum-assured cap validation

use core_kernel::Money;

use crate::catalog::ProductCatalog;
use crate::error::EligibilityError;
use crate::product::ProductId;

/// Checks requested sums assured against product caps
#[derive(Debug, Clone, Copy)]
pub struct SumAssuredValidator<'a> {
    catalog: &'a ProductCatalog,
}

impl<'a> SumAssuredValidator<'a> {
    pub fn new(catalog: &'a ProductCatalog) -> Self {
        Self { catalog }
    }

    /// Validates `requested` for `product`
    ///
    /// Uncapped products accept any valid amount. A request equal to the cap
    /// is accepted.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is negative or not a whole number of
    ///   currency units, or its currency differs from the cap's
    /// - `UnknownProduct` if the product is not catalogued
    /// - `SumAssuredExceeded` if the amount is above the cap
    pub fn validate(&self, product: ProductId, requested: Money) -> Result<(), EligibilityError> {
        if requested.is_negative() {
            return Err(EligibilityError::invalid_amount(format!(
                "sum assured {} is negative",
                requested
            )));
        }
        if !requested.is_whole_units() {
            return Err(EligibilityError::invalid_amount(format!(
                "sum assured {} is not a whole number of currency units",
                requested.amount()
            )));
        }

        let rule = self.catalog.rule_for(product)?;
        let Some(cap) = rule.sum_assured_max else {
            return Ok(());
        };

        if requested.exceeds(&cap)? {
            return Err(EligibilityError::SumAssuredExceeded { cap, requested });
        }

        Ok(())
    }

    /// Returns the cap for a product, if any
    pub fn cap_for(&self, product: ProductId) -> Result<Option<Money>, EligibilityError> {
        Ok(self.catalog.rule_for(product)?.sum_assured_max)
    }
}

/// Validates against the standard catalog
pub fn validate(product: ProductId, requested: Money) -> Result<(), EligibilityError> {
    SumAssuredValidator::new(ProductCatalog::standard()).validate(product, requested)
}
