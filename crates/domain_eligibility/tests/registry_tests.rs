//! Integration tests for the insured registry
//!
//! Tests cover capacity, identifier stability, product selection, the
//! main-product-change hook and the event log.

use std::cell::RefCell;

use core_kernel::SupplementaryId;
use domain_eligibility::{
    EligibilityError, InsuredRegistry, MainProductChanged, ProductCatalog, ProductId, RegistryEvent,
};
use test_utils::{PersonFixtures, TestRegistryBuilder};

mod capacity {
    use super::*;

    #[test]
    fn test_sixth_add_fails_at_capacity_five() {
        let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 5);
        for age in 20..25 {
            registry.add_supplementary(PersonFixtures::aged(age)).unwrap();
        }
        assert!(registry.is_full());

        let result = registry.add_supplementary(PersonFixtures::aged(30));
        assert_eq!(result, Err(EligibilityError::CapacityExceeded { max: 5 }));
        assert_eq!(registry.count(), 5);
    }

    #[test]
    fn test_removal_frees_a_slot() {
        let (mut registry, ids) = TestRegistryBuilder::new()
            .with_max_supplementary_count(2)
            .with_supplementary_aged(30, &[])
            .with_supplementary_aged(31, &[])
            .build();
        assert_eq!(registry.remaining_capacity(), 0);

        registry.remove_supplementary(ids[0]).unwrap();
        assert_eq!(registry.remaining_capacity(), 1);
        assert!(registry.add_supplementary(PersonFixtures::aged(32)).is_ok());
    }

    #[test]
    fn test_zero_capacity_rejects_first_add() {
        let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 0);
        let result = registry.add_supplementary(PersonFixtures::aged(30));
        assert_eq!(result, Err(EligibilityError::CapacityExceeded { max: 0 }));
        assert_eq!(registry.count(), 0);
    }
}

mod identifiers {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let (_, ids) = TestRegistryBuilder::new()
            .with_supplementary_aged(30, &[])
            .with_supplementary_aged(40, &[])
            .with_supplementary_aged(50, &[])
            .build();
        let sequences: Vec<u32> = ids.iter().map(SupplementaryId::sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let (mut registry, ids) = TestRegistryBuilder::new()
            .with_supplementary_aged(30, &[])
            .with_supplementary_aged(40, &[])
            .build();

        registry.remove_supplementary(ids[1]).unwrap();
        let next = registry.add_supplementary(PersonFixtures::aged(50)).unwrap();
        assert_eq!(next, SupplementaryId::new(3));
    }

    #[test]
    fn test_removal_keeps_other_entries_intact() {
        let (mut registry, ids) = TestRegistryBuilder::new()
            .with_supplementary_aged(30, &[ProductId::Bhn])
            .with_supplementary_aged(40, &[ProductId::Accident])
            .with_supplementary_aged(50, &[ProductId::HealthScl, ProductId::Bhn])
            .build();

        let removed = registry.remove_supplementary(ids[1]).unwrap();
        assert!(removed.has_selected(ProductId::Accident));

        let remaining: Vec<SupplementaryId> = registry.iter().map(|s| s.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);
        assert!(registry.get(ids[0]).unwrap().has_selected(ProductId::Bhn));
        let third = registry.get(ids[2]).unwrap();
        assert!(third.has_selected(ProductId::HealthScl));
        assert!(third.has_selected(ProductId::Bhn));
        assert_eq!(third.person, PersonFixtures::aged(50));
    }

    #[test]
    fn test_double_remove_is_not_found() {
        let (mut registry, ids) = TestRegistryBuilder::new().with_supplementary_aged(30, &[]).build();
        registry.remove_supplementary(ids[0]).unwrap();

        let result = registry.remove_supplementary(ids[0]);
        assert_eq!(result, Err(EligibilityError::NotFound(ids[0])));
    }

    #[test]
    fn test_operations_on_unknown_id() {
        let (mut registry, _) = TestRegistryBuilder::new().build();
        let ghost = SupplementaryId::new(99);

        assert_eq!(
            registry.select_product_for(ghost, ProductId::Bhn),
            Err(EligibilityError::NotFound(ghost))
        );
        assert_eq!(
            registry.deselect_product_for(ghost, ProductId::Bhn),
            Err(EligibilityError::NotFound(ghost))
        );
        assert_eq!(
            registry.update_person(ghost, PersonFixtures::aged(30)),
            Err(EligibilityError::NotFound(ghost))
        );
    }
}

mod selection {
    use super::*;

    #[test]
    fn test_select_is_idempotent() {
        let (mut registry, ids) = TestRegistryBuilder::new().with_supplementary_aged(30, &[]).build();
        assert_eq!(registry.select_product_for(ids[0], ProductId::Bhn), Ok(true));
        assert_eq!(registry.select_product_for(ids[0], ProductId::Bhn), Ok(false));
        assert_eq!(registry.get(ids[0]).unwrap().selected_products.len(), 1);
    }

    #[test]
    fn test_deselect() {
        let (mut registry, ids) = TestRegistryBuilder::new()
            .with_supplementary_aged(30, &[ProductId::Bhn])
            .build();
        assert_eq!(registry.deselect_product_for(ids[0], ProductId::Bhn), Ok(true));
        assert_eq!(registry.deselect_product_for(ids[0], ProductId::Bhn), Ok(false));
    }

    #[test]
    fn test_update_person_keeps_selection() {
        let (mut registry, ids) = TestRegistryBuilder::new()
            .with_supplementary_aged(30, &[ProductId::Accident])
            .build();
        registry.update_person(ids[0], PersonFixtures::aged(64)).unwrap();

        let entry = registry.get(ids[0]).unwrap();
        assert_eq!(entry.person, PersonFixtures::aged(64));
        assert!(entry.has_selected(ProductId::Accident));
    }

    #[test]
    fn test_selecting_uncatalogued_product_is_unknown() {
        let catalog = ProductCatalog::from_tables(
            [(ProductId::Bhn, 70)].into_iter().collect(),
            Default::default(),
            Default::default(),
        )
        .unwrap();
        let mut registry = InsuredRegistry::new(&catalog, 3);
        let id = registry.add_supplementary(PersonFixtures::aged(30)).unwrap();

        assert_eq!(
            registry.select_product_for(id, ProductId::Accident),
            Err(EligibilityError::UnknownProduct("accident".to_string()))
        );
        assert_eq!(
            registry.deselect_product_for(id, ProductId::Accident),
            Err(EligibilityError::UnknownProduct("accident".to_string()))
        );
        assert_eq!(
            registry.set_main_product(ProductId::PulTronDoi),
            Err(EligibilityError::UnknownProduct("pul_tron_doi".to_string()))
        );
    }
}

mod main_product {
    use super::*;

    #[test]
    fn test_hook_receives_change_and_snapshot() {
        let seen: RefCell<Vec<(MainProductChanged, usize)>> = RefCell::new(Vec::new());
        {
            let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 5);
            registry.add_supplementary(PersonFixtures::aged(30)).unwrap();
            registry.on_main_product_changed(|change, supplementary| {
                seen.borrow_mut().push((*change, supplementary.len()));
            });

            registry.set_main_product(ProductId::PulTronDoi).unwrap();
            registry.set_main_product(ProductId::Pul5Nam).unwrap();
        }

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0.previous, None);
        assert_eq!(seen[0].0.current, ProductId::PulTronDoi);
        assert_eq!(seen[0].1, 1);
        assert_eq!(seen[1].0.previous, Some(ProductId::PulTronDoi));
        assert_eq!(seen[1].0.current, ProductId::Pul5Nam);
    }

    #[test]
    fn test_same_product_does_not_fire_hook() {
        let fired = RefCell::new(0);
        {
            let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 5);
            registry.on_main_product_changed(|_, _| *fired.borrow_mut() += 1);

            assert!(registry.set_main_product(ProductId::KhoeBinhAn).unwrap().is_some());
            assert!(registry.set_main_product(ProductId::KhoeBinhAn).unwrap().is_none());
        }
        assert_eq!(fired.into_inner(), 1);
    }

    #[test]
    fn test_main_state() {
        let (registry, _) = TestRegistryBuilder::new()
            .with_main_product(ProductId::AnBinhUuViet)
            .with_main_person(PersonFixtures::aged(45))
            .build();
        assert_eq!(registry.main().product, Some(ProductId::AnBinhUuViet));
        assert_eq!(registry.main().person, Some(PersonFixtures::aged(45)));
    }
}

mod events {
    use super::*;

    #[test]
    fn test_mutations_are_recorded_in_order() {
        let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 5);
        let session_id = registry.session_id();

        registry.set_main_product(ProductId::PulTronDoi).unwrap();
        let id = registry.add_supplementary(PersonFixtures::aged(30)).unwrap();
        registry.select_product_for(id, ProductId::Bhn).unwrap();
        registry.remove_supplementary(id).unwrap();

        let events = registry.take_events();
        let types: Vec<&str> = events.iter().map(RegistryEvent::event_type).collect();
        assert_eq!(
            types,
            vec!["MainProductChanged", "SupplementaryAdded", "ProductSelected", "SupplementaryRemoved"]
        );
        assert!(events.iter().all(|e| e.session_id() == session_id));
        assert_eq!(events[0].supplementary_id(), None);
        assert_eq!(events[1].supplementary_id(), Some(id));
    }

    #[test]
    fn test_take_events_drains() {
        let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 5);
        registry.add_supplementary(PersonFixtures::aged(30)).unwrap();
        assert_eq!(registry.take_events().len(), 1);
        assert!(registry.take_events().is_empty());
    }

    #[test]
    fn test_failed_mutations_record_nothing() {
        let mut registry = InsuredRegistry::new(ProductCatalog::standard(), 0);
        let _ = registry.add_supplementary(PersonFixtures::aged(30));
        let _ = registry.remove_supplementary(SupplementaryId::new(1));
        assert!(registry.take_events().is_empty());
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::person_strategy;

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Add), (0usize..10).prop_map(Op::Remove)]
    }

    proptest! {
        #[test]
        fn count_never_exceeds_capacity(
            max in 0usize..8,
            ops in prop::collection::vec(op_strategy(), 0..40),
            person in person_strategy()
        ) {
            let mut registry = InsuredRegistry::new(ProductCatalog::standard(), max);
            let mut issued: Vec<SupplementaryId> = Vec::new();

            for op in ops {
                match op {
                    Op::Add => {
                        let before = registry.count();
                        match registry.add_supplementary(person) {
                            Ok(id) => {
                                prop_assert!(!issued.contains(&id));
                                issued.push(id);
                                prop_assert_eq!(registry.count(), before + 1);
                            }
                            Err(e) => {
                                prop_assert_eq!(e, EligibilityError::CapacityExceeded { max });
                                prop_assert_eq!(registry.count(), before);
                            }
                        }
                    }
                    Op::Remove(index) => {
                        let target = registry.iter().nth(index).map(|s| s.id);
                        if let Some(id) = target {
                            registry.remove_supplementary(id).unwrap();
                        }
                    }
                }
                prop_assert!(registry.count() <= max);
            }
        }
    }
}
