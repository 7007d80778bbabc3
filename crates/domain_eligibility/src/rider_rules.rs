//! Rider availability rules
//!
//! Which riders may be attached under a given main product is external
//! configuration. The engine only needs to ask the question; a
//! [`RiderRuleTable`] can be loaded from JSON at startup, and
//! [`PermitAllRiders`] is used when no table is configured.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::EligibilityError;
use crate::product::ProductId;

/// Decides whether a rider may be attached under a main product
pub trait RiderRules {
    fn permits(&self, main: ProductId, rider: ProductId) -> bool;
}

/// Every rider is offered with every main product
#[derive(Debug, Clone, Copy, Default)]
pub struct PermitAllRiders;

impl RiderRules for PermitAllRiders {
    fn permits(&self, _main: ProductId, _rider: ProductId) -> bool {
        true
    }
}

/// Explicit allow-list of riders per main product
///
/// Main products missing from the table offer no riders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiderRuleTable {
    allowed: BTreeMap<ProductId, BTreeSet<ProductId>>,
}

impl RiderRuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `riders` under `main`
    pub fn allow(mut self, main: ProductId, riders: impl IntoIterator<Item = ProductId>) -> Self {
        self.allowed.entry(main).or_default().extend(riders);
        self
    }

    /// Parses a table of the form `{"pul_tron_doi": ["bhn", "accident"]}`
    pub fn from_json(json: &str) -> Result<Self, EligibilityError> {
        serde_json::from_str(json)
            .map_err(|e| EligibilityError::configuration(format!("invalid rider rule table: {}", e)))
    }

    /// Riders offered under `main`
    pub fn riders_for(&self, main: ProductId) -> impl Iterator<Item = ProductId> + '_ {
        self.allowed.get(&main).into_iter().flatten().copied()
    }
}

impl RiderRules for RiderRuleTable {
    fn permits(&self, main: ProductId, rider: ProductId) -> bool {
        self.allowed
            .get(&main)
            .is_some_and(|riders| riders.contains(&rider))
    }
}
