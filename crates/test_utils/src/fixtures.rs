//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the eligibility engine. Everything is
//! anchored on a fixed reference date so results are predictable.

use chrono::{Datelike, NaiveDate};
use core_kernel::{Money, ReferenceDate};
use domain_eligibility::{EngineConfig, Person};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard reference date (Aug 9, 2025)
    pub fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()
    }

    pub fn reference() -> ReferenceDate {
        ReferenceDate::new(Self::reference_date())
    }

    /// Shorthand for a calendar date
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Fixture for people at known ages
pub struct PersonFixtures;

impl PersonFixtures {
    pub fn born(year: i32, month: u32, day: u32) -> Person {
        Person::new(TemporalFixtures::date(year, month, day))
    }

    /// A person whose birthday is exactly on `reference`, turning `age` that day
    ///
    /// A 29 February reference falls back to a 28 February birthday.
    pub fn aged_on(age: u32, reference: NaiveDate) -> Person {
        let year = reference.year() - age as i32;
        let birth_date = reference
            .with_year(year)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap());
        Person::new(birth_date)
    }

    /// A person of `age` at the standard reference date
    pub fn aged(age: u32) -> Person {
        Self::aged_on(age, TemporalFixtures::reference_date())
    }

    /// A person born after the standard reference date
    pub fn unborn() -> Person {
        Self::born(2025, 8, 10)
    }
}

/// Fixture for sum assured amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Accident rider cap
    pub fn accident_cap() -> Money {
        Money::vnd(8_000_000_000)
    }

    /// One dong above the accident rider cap
    pub fn over_accident_cap() -> Money {
        Money::vnd(8_000_000_001)
    }

    pub fn typical_sum_assured() -> Money {
        Money::vnd(500_000_000)
    }
}

/// Fixture for engine configuration
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// Standard reference date with room for five supplementary insureds
    pub fn standard() -> EngineConfig {
        EngineConfig::new(TemporalFixtures::reference_date(), 5)
    }
}
