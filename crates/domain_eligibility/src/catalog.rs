//! Product catalog
//!
//! Read-only tables of age ceilings and sum-assured caps keyed by product.
//! The standard catalog is built once per process and shared; custom catalogs
//! can be assembled from explicit tables at startup.
//!
//! # Tables
//!
//! - **Entry age**: every product has one. The oldest age at which a person may
//!   newly enrol, inclusive.
//! - **Renewal age**: only renewable products. The oldest age up to which an
//!   enrolled product may continue, inclusive. Absence means not renewable.
//! - **Sum-assured cap**: only capped products. Absence means uncapped.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

use crate::error::EligibilityError;
use crate::product::{ProductId, ProductKind};

const ENTRY_AGE_MAX: [(ProductId, u32); 10] = [
    (ProductId::PulTronDoi, 70),
    (ProductId::Pul15Nam, 70),
    (ProductId::Pul5Nam, 70),
    (ProductId::KhoeBinhAn, 65),
    (ProductId::VungTamAn, 65),
    (ProductId::AnBinhUuViet, 65),
    (ProductId::HealthScl, 65),
    (ProductId::Bhn, 70),
    (ProductId::Accident, 64),
    (ProductId::HospitalSupport, 55),
];

const RENEWAL_AGE_MAX: [(ProductId, u32); 4] = [
    (ProductId::HealthScl, 74),
    (ProductId::Bhn, 85),
    (ProductId::Accident, 65),
    (ProductId::HospitalSupport, 59),
];

/// Caps in whole dong
const SUM_ASSURED_MAX: [(ProductId, i64); 3] = [
    (ProductId::Bhn, 5_000_000_000),
    (ProductId::Accident, 8_000_000_000),
    (ProductId::HospitalSupport, 1_000_000),
];

static STANDARD_CATALOG: Lazy<ProductCatalog> = Lazy::new(|| ProductCatalog {
    entry_age_max: ENTRY_AGE_MAX.into_iter().collect(),
    renewal_age_max: RENEWAL_AGE_MAX.into_iter().collect(),
    sum_assured_max: SUM_ASSURED_MAX
        .into_iter()
        .map(|(product, cap)| (product, Money::vnd(cap)))
        .collect(),
});

/// Eligibility limits for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRule {
    pub product_id: ProductId,
    /// Oldest entry age, inclusive
    pub entry_age_max: u32,
    /// Oldest renewal age, inclusive; None when not renewable
    pub renewal_age_max: Option<u32>,
    /// Largest permitted sum assured; None when uncapped
    pub sum_assured_max: Option<Money>,
}

impl ProductRule {
    pub fn is_renewable(&self) -> bool {
        self.renewal_age_max.is_some()
    }

    pub fn is_capped(&self) -> bool {
        self.sum_assured_max.is_some()
    }

    pub fn kind(&self) -> ProductKind {
        self.product_id.kind()
    }
}

/// Immutable product catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    entry_age_max: BTreeMap<ProductId, u32>,
    renewal_age_max: BTreeMap<ProductId, u32>,
    sum_assured_max: BTreeMap<ProductId, Money>,
}

impl ProductCatalog {
    /// Returns the process-wide standard catalog
    pub fn standard() -> &'static ProductCatalog {
        &STANDARD_CATALOG
    }

    /// Builds a catalog from explicit tables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a renewal ceiling or cap is given for a
    /// product with no entry-age ceiling, or if a cap is negative.
    pub fn from_tables(
        entry_age_max: BTreeMap<ProductId, u32>,
        renewal_age_max: BTreeMap<ProductId, u32>,
        sum_assured_max: BTreeMap<ProductId, Money>,
    ) -> Result<Self, EligibilityError> {
        for product in renewal_age_max.keys().chain(sum_assured_max.keys()) {
            if !entry_age_max.contains_key(product) {
                return Err(EligibilityError::configuration(format!(
                    "product {} has limits but no entry age ceiling",
                    product
                )));
            }
        }

        if let Some((product, cap)) = sum_assured_max.iter().find(|(_, cap)| cap.is_negative()) {
            return Err(EligibilityError::configuration(format!(
                "product {} has negative sum assured cap {}",
                product, cap
            )));
        }

        Ok(Self {
            entry_age_max,
            renewal_age_max,
            sum_assured_max,
        })
    }

    /// Looks up the rule for a product
    pub fn rule_for(&self, product: ProductId) -> Result<ProductRule, EligibilityError> {
        let entry_age_max = *self
            .entry_age_max
            .get(&product)
            .ok_or_else(|| EligibilityError::UnknownProduct(product.key().to_string()))?;

        Ok(ProductRule {
            product_id: product,
            entry_age_max,
            renewal_age_max: self.renewal_age_max.get(&product).copied(),
            sum_assured_max: self.sum_assured_max.get(&product).copied(),
        })
    }

    /// Parses an untyped product key and looks up its rule
    pub fn lookup(&self, key: &str) -> Result<ProductRule, EligibilityError> {
        self.rule_for(key.parse()?)
    }

    /// Returns true if the product is catalogued
    pub fn contains(&self, product: ProductId) -> bool {
        self.entry_age_max.contains_key(&product)
    }

    /// Ensures the product is catalogued
    pub fn ensure_known(&self, product: ProductId) -> Result<(), EligibilityError> {
        if self.contains(product) {
            Ok(())
        } else {
            Err(EligibilityError::UnknownProduct(product.key().to_string()))
        }
    }

    /// All rules in product order
    pub fn rules(&self) -> impl Iterator<Item = ProductRule> + '_ {
        self.entry_age_max.iter().map(|(&product_id, &entry_age_max)| ProductRule {
            product_id,
            entry_age_max,
            renewal_age_max: self.renewal_age_max.get(&product_id).copied(),
            sum_assured_max: self.sum_assured_max.get(&product_id).copied(),
        })
    }

    /// Currency the caps are expressed in; None if nothing is capped
    pub fn cap_currency(&self) -> Option<Currency> {
        self.sum_assured_max.values().next().map(Money::currency)
    }

    pub fn len(&self) -> usize {
        self.entry_age_max.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_age_max.is_empty()
    }
}
