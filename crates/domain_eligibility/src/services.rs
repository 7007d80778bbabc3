//! Eligibility domain service
//!
//! `EligibilityService` is the facade the UI-facing layer talks to for one
//! session. It owns the configuration, the insured registry and the rider
//! rules, and wires the evaluator and sum-assured validator to the configured
//! reference date.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Money, ReferenceDate, SupplementaryId};

use crate::catalog::{ProductCatalog, ProductRule};
use crate::config::EngineConfig;
use crate::eligibility::{EligibilityEvaluator, EligibilityVerdict, Person};
use crate::error::EligibilityError;
use crate::events::RegistryEvent;
use crate::product::ProductId;
use crate::registry::InsuredRegistry;
use crate::rider_rules::{PermitAllRiders, RiderRules};
use crate::sum_assured::SumAssuredValidator;

/// A rider selection dropped because the main product no longer offers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidatedSelection {
    pub id: SupplementaryId,
    pub product: ProductId,
}

/// Verdict for one person and product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAssessment {
    pub product: ProductId,
    pub outcome: Result<EligibilityVerdict, EligibilityError>,
}

impl ProductAssessment {
    pub fn is_eligible(&self) -> bool {
        matches!(self.outcome, Ok(EligibilityVerdict::Eligible))
    }
}

/// Verdicts for one supplementary insured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryAssessment {
    pub id: SupplementaryId,
    pub assessments: Vec<ProductAssessment>,
}

/// Whole-session eligibility review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub reference_date: ReferenceDate,
    /// None until both main product and main person are set
    pub main: Option<ProductAssessment>,
    /// In registry order
    pub supplementary: Vec<SupplementaryAssessment>,
}

impl EligibilityReport {
    /// True when every assessed product is eligible
    pub fn all_eligible(&self) -> bool {
        self.main.iter().all(ProductAssessment::is_eligible)
            && self
                .supplementary
                .iter()
                .flat_map(|s| s.assessments.iter())
                .all(ProductAssessment::is_eligible)
    }

    /// Assessments that are not eligible, with the supplementary id (None for main)
    pub fn failures(&self) -> Vec<(Option<SupplementaryId>, &ProductAssessment)> {
        let main = self
            .main
            .iter()
            .filter(|a| !a.is_eligible())
            .map(|a| (None, a));
        let supplementary = self.supplementary.iter().flat_map(|s| {
            s.assessments
                .iter()
                .filter(|a| !a.is_eligible())
                .map(move |a| (Some(s.id), a))
        });
        main.chain(supplementary).collect()
    }
}

/// Session facade over the eligibility engine
pub struct EligibilityService<'a> {
    config: EngineConfig,
    catalog: &'a ProductCatalog,
    registry: InsuredRegistry<'a>,
    rider_rules: Box<dyn RiderRules + 'a>,
}

impl<'a> EligibilityService<'a> {
    /// Creates a service over `catalog` that offers every rider with every main product
    pub fn new(config: EngineConfig, catalog: &'a ProductCatalog) -> Self {
        let registry = InsuredRegistry::new(catalog, config.max_supplementary_count);
        Self {
            config,
            catalog,
            registry,
            rider_rules: Box::new(PermitAllRiders),
        }
    }

    /// Creates a service over the standard catalog
    pub fn standard(config: EngineConfig) -> EligibilityService<'static> {
        EligibilityService::new(config, ProductCatalog::standard())
    }

    /// Replaces the rider rules
    pub fn with_rider_rules(mut self, rules: impl RiderRules + 'a) -> Self {
        self.rider_rules = Box::new(rules);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference_date(&self) -> ReferenceDate {
        self.config.reference_date()
    }

    /// Read-only catalog access for rendering limits
    pub fn catalog(&self) -> &'a ProductCatalog {
        self.catalog
    }

    pub fn rule_for(&self, product: ProductId) -> Result<ProductRule, EligibilityError> {
        self.catalog.rule_for(product)
    }

    pub fn registry(&self) -> &InsuredRegistry<'a> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut InsuredRegistry<'a> {
        &mut self.registry
    }

    /// Age of `person` at the configured reference date
    pub fn age_of(&self, person: &Person) -> Result<u32, EligibilityError> {
        person.age_at(self.reference_date())
    }

    pub fn evaluate(
        &self,
        person: &Person,
        product: ProductId,
        is_renewal: bool,
    ) -> Result<EligibilityVerdict, EligibilityError> {
        EligibilityEvaluator::new(self.catalog).evaluate(
            person,
            product,
            self.reference_date(),
            is_renewal,
        )
    }

    pub fn validate_sum_assured(&self, product: ProductId, requested: Money) -> Result<(), EligibilityError> {
        SumAssuredValidator::new(self.catalog).validate(product, requested)
    }

    /// Whether the rider rules offer `rider` under the current main product
    ///
    /// Every rider is offered while no main product is chosen.
    pub fn is_rider_offered(&self, rider: ProductId) -> bool {
        self.registry
            .main()
            .product
            .map_or(true, |main| self.rider_rules.permits(main, rider))
    }

    /// Records the main product and drops rider selections it no longer offers
    ///
    /// Registry hooks fire first and see the selections as they were before
    /// the drop. The dropped selections are returned in registry order.
    pub fn set_main_product(
        &mut self,
        product: ProductId,
    ) -> Result<Vec<InvalidatedSelection>, EligibilityError> {
        if self.registry.set_main_product(product)?.is_none() {
            return Ok(Vec::new());
        }

        let rules = &self.rider_rules;
        let invalidated: Vec<InvalidatedSelection> = self
            .registry
            .iter()
            .flat_map(|entry| {
                entry
                    .selected_products
                    .iter()
                    .filter(move |&&rider| !rules.permits(product, rider))
                    .map(move |&rider| InvalidatedSelection {
                        id: entry.id,
                        product: rider,
                    })
            })
            .collect();

        for selection in &invalidated {
            self.registry
                .deselect_product_for(selection.id, selection.product)?;
        }

        if !invalidated.is_empty() {
            debug!(
                session_id = %self.registry.session_id(),
                main = %product,
                dropped = invalidated.len(),
                "rider selections invalidated by main product change"
            );
        }
        Ok(invalidated)
    }

    pub fn set_main_person(&mut self, person: Person) {
        self.registry.set_main_person(person);
    }

    /// Adds a supplementary insured
    pub fn add_supplementary(&mut self, person: Person) -> Result<SupplementaryId, EligibilityError> {
        self.registry.add_supplementary(person)
    }

    /// Selects a rider for a supplementary insured and returns their verdict for it
    ///
    /// The selection is kept even when the person is ineligible so the reason
    /// can be shown next to it.
    pub fn select_rider(
        &mut self,
        id: SupplementaryId,
        product: ProductId,
    ) -> Result<EligibilityVerdict, EligibilityError> {
        if let Some(main) = self.registry.main().product {
            if !self.rider_rules.permits(main, product) {
                return Err(EligibilityError::RiderNotPermitted { main, rider: product });
            }
        }

        let person = self
            .registry
            .get(id)
            .map(|entry| entry.person)
            .ok_or(EligibilityError::NotFound(id))?;
        let verdict = self.evaluate(&person, product, false)?;
        self.registry.select_product_for(id, product)?;

        Ok(verdict)
    }

    /// Drains the registry's event log
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        self.registry.take_events()
    }

    /// Evaluates the main insured and every supplementary selection
    pub fn review(&self, is_renewal: bool) -> EligibilityReport {
        let main_state = self.registry.main();
        let main = match (main_state.product, main_state.person) {
            (Some(product), Some(person)) => Some(ProductAssessment {
                product,
                outcome: self.evaluate(&person, product, is_renewal),
            }),
            _ => None,
        };

        let supplementary = self
            .registry
            .iter()
            .map(|entry| SupplementaryAssessment {
                id: entry.id,
                assessments: entry
                    .selected_products
                    .iter()
                    .map(|&product| ProductAssessment {
                        product,
                        outcome: self.evaluate(&entry.person, product, is_renewal),
                    })
                    .collect(),
            })
            .collect();

        EligibilityReport {
            reference_date: self.reference_date(),
            main,
            supplementary,
        }
    }
}
