//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! eligibility engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Reference dates, people at known ages, and amounts
//! - `builders`: Builder patterns for registries and services
//! - `assertions`: Custom assertion helpers for verdicts and errors
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
