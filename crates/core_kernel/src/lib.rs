//! Core Kernel - Foundational types for the eligibility engine
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Money types with precise decimal arithmetic for sums assured
//! - Reference dates and calendar-correct age arithmetic
//! - Session and supplementary-insured identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{ReferenceDate, TemporalError, age_in_years};
pub use identifiers::{SessionId, SupplementaryId};
