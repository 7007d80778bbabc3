//! Integration tests for age eligibility
//!
//! Tests cover entry and renewal ceilings, birthday boundaries, unborn
//! persons and properties of the evaluator over the whole catalog.

use domain_eligibility::{
    evaluate, EligibilityError, EligibilityEvaluator, EligibilityVerdict, IneligibilityReason,
    ProductCatalog, ProductId,
};
use test_utils::{assert_eligible, assert_ineligible, PersonFixtures, TemporalFixtures};

mod entry_age {
    use super::*;

    // ========================================================================
    // Critical illness rider, entry ceiling 70, reference 2025-08-09
    // ========================================================================

    #[test]
    fn test_seventieth_birthday_today_is_eligible() {
        let result = evaluate(
            &PersonFixtures::born(1955, 8, 9),
            ProductId::Bhn,
            TemporalFixtures::reference(),
            false,
        );
        assert_eligible(&result);
    }

    #[test]
    fn test_seventieth_birthday_yesterday_is_eligible() {
        let result = evaluate(
            &PersonFixtures::born(1955, 8, 8),
            ProductId::Bhn,
            TemporalFixtures::reference(),
            false,
        );
        assert_eligible(&result);
    }

    #[test]
    fn test_seventieth_birthday_tomorrow_is_eligible() {
        let result = evaluate(
            &PersonFixtures::born(1955, 8, 10),
            ProductId::Bhn,
            TemporalFixtures::reference(),
            false,
        );
        assert_eligible(&result);
    }

    #[test]
    fn test_seventy_first_birthday_tomorrow_is_eligible() {
        let result = evaluate(
            &PersonFixtures::born(1954, 8, 10),
            ProductId::Bhn,
            TemporalFixtures::reference(),
            false,
        );
        assert_eligible(&result);
    }

    #[test]
    fn test_seventy_first_birthday_today_is_ineligible() {
        let result = evaluate(
            &PersonFixtures::born(1954, 8, 9),
            ProductId::Bhn,
            TemporalFixtures::reference(),
            false,
        );
        assert_ineligible(&result, IneligibilityReason::EntryAgeExceeded, 70, 71);
    }

    #[test]
    fn test_newborn_is_eligible_for_every_product() {
        let person = PersonFixtures::born(2025, 8, 9);
        for product in ProductId::ALL {
            assert_eligible(&evaluate(&person, product, TemporalFixtures::reference(), false));
        }
    }

    #[test]
    fn test_main_product_ceilings() {
        let reference = TemporalFixtures::reference();
        assert_eligible(&evaluate(&PersonFixtures::aged(70), ProductId::PulTronDoi, reference, false));
        assert_ineligible(
            &evaluate(&PersonFixtures::aged(66), ProductId::KhoeBinhAn, reference, false),
            IneligibilityReason::EntryAgeExceeded,
            65,
            66,
        );
    }
}

mod renewal_age {
    use super::*;

    #[test]
    fn test_renewal_uses_renewal_ceiling() {
        // Past the entry ceiling of 65, within the renewal ceiling of 74
        let result = evaluate(
            &PersonFixtures::aged(70),
            ProductId::HealthScl,
            TemporalFixtures::reference(),
            true,
        );
        assert_eligible(&result);
    }

    #[test]
    fn test_same_person_fails_entry() {
        let result = evaluate(
            &PersonFixtures::aged(70),
            ProductId::HealthScl,
            TemporalFixtures::reference(),
            false,
        );
        assert_ineligible(&result, IneligibilityReason::EntryAgeExceeded, 65, 70);
    }

    #[test]
    fn test_renewal_ceiling_is_inclusive() {
        let reference = TemporalFixtures::reference();
        assert_eligible(&evaluate(&PersonFixtures::aged(74), ProductId::HealthScl, reference, true));
        assert_ineligible(
            &evaluate(&PersonFixtures::aged(75), ProductId::HealthScl, reference, true),
            IneligibilityReason::RenewalAgeExceeded,
            74,
            75,
        );
    }

    #[test]
    fn test_renewal_of_non_renewable_product_is_error() {
        let result = evaluate(
            &PersonFixtures::aged(40),
            ProductId::PulTronDoi,
            TemporalFixtures::reference(),
            true,
        );
        assert_eq!(result, Err(EligibilityError::NonRenewableProduct(ProductId::PulTronDoi)));
    }
}

mod invalid_input {
    use super::*;

    #[test]
    fn test_unborn_person_is_invalid_date() {
        let result = evaluate(
            &PersonFixtures::unborn(),
            ProductId::Bhn,
            TemporalFixtures::reference(),
            false,
        );
        assert!(matches!(result, Err(EligibilityError::InvalidDate { .. })));
    }

    #[test]
    fn test_product_missing_from_custom_catalog_is_unknown() {
        let catalog = ProductCatalog::from_tables(
            [(ProductId::Bhn, 70)].into_iter().collect(),
            Default::default(),
            Default::default(),
        )
        .unwrap();
        let result = EligibilityEvaluator::new(&catalog).evaluate(
            &PersonFixtures::aged(30),
            ProductId::Accident,
            TemporalFixtures::reference(),
            false,
        );
        assert_eq!(result, Err(EligibilityError::UnknownProduct("accident".to_string())));
    }
}

mod verdict_serialization {
    use super::*;

    #[test]
    fn test_ineligible_json_shape() {
        let verdict = EligibilityVerdict::Ineligible {
            reason: IneligibilityReason::EntryAgeExceeded,
            limit_age: 70,
            actual_age: 71,
        };
        let json = serde_json::to_value(verdict).unwrap();
        assert_eq!(json["status"], "ineligible");
        assert_eq!(json["limit_age"], 70);
        assert_eq!(json["actual_age"], 71);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{birth_and_reference_strategy, product_strategy};

    use domain_eligibility::{age_in_years, Person, ReferenceDate};

    proptest! {
        #[test]
        fn entry_verdict_matches_ceiling(
            (birth, reference) in birth_and_reference_strategy(),
            product in product_strategy()
        ) {
            let catalog = ProductCatalog::standard();
            let ceiling = catalog.rule_for(product).unwrap().entry_age_max;
            let age = age_in_years(birth, reference).unwrap();
            let verdict = evaluate(&Person::new(birth), product, ReferenceDate::new(reference), false).unwrap();
            prop_assert_eq!(verdict.is_eligible(), age <= ceiling);
        }

        #[test]
        fn ineligible_verdict_reports_actual_age(
            (birth, reference) in birth_and_reference_strategy(),
            product in product_strategy()
        ) {
            let verdict = evaluate(&Person::new(birth), product, ReferenceDate::new(reference), false).unwrap();
            if let EligibilityVerdict::Ineligible { limit_age, actual_age, .. } = verdict {
                prop_assert_eq!(actual_age, age_in_years(birth, reference).unwrap());
                prop_assert!(actual_age > limit_age);
            }
        }

        #[test]
        fn eligibility_is_deterministic(
            (birth, reference) in birth_and_reference_strategy(),
            product in product_strategy()
        ) {
            let person = Person::new(birth);
            let first = evaluate(&person, product, ReferenceDate::new(reference), false);
            let second = evaluate(&person, product, ReferenceDate::new(reference), false);
            prop_assert_eq!(first, second);
        }
    }
}
