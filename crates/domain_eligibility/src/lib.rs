//! Eligibility and Limits Domain
//!
//! This crate decides whether a person may be enrolled on an insurance product
//! and its riders, based on age at a fixed reference date, and enforces caps on
//! sums assured. The UI layer is an external collaborator: it parses form
//! input, calls into this crate, and renders the verdicts it returns.
//!
//! # Components
//!
//! - **Catalog**: entry-age ceilings, renewal-age ceilings and sum-assured caps
//! - **Evaluator**: age eligibility verdicts (ceilings are inclusive)
//! - **Sum-assured validator**: cap checks on requested amounts
//! - **Registry**: main insured plus a bounded, ordered list of supplementary insureds
//! - **Rider rules**: which riders a main product offers
//! - **Service**: session facade wiring the above to the configured reference date
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_eligibility::{EligibilityService, EngineConfig, Person, ProductId};
//!
//! let mut service = EligibilityService::standard(EngineConfig::default());
//! service.set_main_product(ProductId::PulTronDoi)?;
//! let id = service.add_supplementary(Person::new(birth_date))?;
//! let verdict = service.select_rider(id, ProductId::Bhn)?;
//! ```

pub mod product;
pub mod catalog;
pub mod eligibility;
pub mod sum_assured;
pub mod registry;
pub mod rider_rules;
pub mod events;
pub mod config;
pub mod error;
pub mod services;

pub use product::{ProductId, ProductKind};
pub use catalog::{ProductCatalog, ProductRule};
pub use eligibility::{evaluate, EligibilityEvaluator, EligibilityVerdict, IneligibilityReason, Person};
pub use sum_assured::{validate, SumAssuredValidator};
pub use registry::{InsuredRegistry, MainInsuredState, SupplementaryInsured};
pub use rider_rules::{PermitAllRiders, RiderRuleTable, RiderRules};
pub use events::{MainProductChanged, RegistryEvent};
pub use config::EngineConfig;
pub use error::EligibilityError;
pub use services::{
    EligibilityReport, EligibilityService, InvalidatedSelection, ProductAssessment,
    SupplementaryAssessment,
};

pub use core_kernel::{age_in_years, ReferenceDate};
