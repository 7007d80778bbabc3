//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that keeps
//! domain invariants (valid calendar dates, catalogued products, whole-unit
//! amounts).

use chrono::{Duration, NaiveDate};
use core_kernel::Money;
use domain_eligibility::{Person, ProductId};
use proptest::prelude::*;
use proptest::sample::select;

/// Strategy for calendar dates between 1900-01-01 and 2099-12-31
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    (0i64..73_049i64).prop_map(move |days| start + Duration::days(days))
}

/// Strategy for a (birth date, reference date) pair with birth <= reference
pub fn birth_and_reference_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..40_000i64).prop_map(|(birth, offset)| {
        let reference = birth + Duration::days(offset);
        (birth, reference)
    })
}

/// Strategy for people born in the twentieth century
pub fn person_strategy() -> impl Strategy<Value = Person> {
    date_strategy()
        .prop_filter("born before 2000", |d| *d < NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
        .prop_map(Person::new)
}

/// Strategy for any catalogued product
pub fn product_strategy() -> impl Strategy<Value = ProductId> {
    select(ProductId::ALL.to_vec())
}

/// Strategy for rider products only
pub fn rider_strategy() -> impl Strategy<Value = ProductId> {
    select(
        ProductId::ALL
            .iter()
            .copied()
            .filter(ProductId::is_rider)
            .collect::<Vec<_>>(),
    )
}

/// Strategy for non-negative whole-dong amounts up to ten billion
pub fn vnd_amount_strategy() -> impl Strategy<Value = Money> {
    (0i64..=10_000_000_000i64).prop_map(Money::vnd)
}
