//! Insured registry
//!
//! The registry owns the main insured and the ordered list of supplementary
//! insureds for one session. It enforces the structural rules (capacity,
//! identifier stability, catalogued products) and leaves age rules to the
//! evaluator.
//!
//! # Lifecycle
//!
//! ```text
//! new -> set_main_product / set_main_person
//!     -> add_supplementary -> select_product_for / deselect_product_for
//!     -> remove_supplementary
//! ```
//!
//! There is no terminal state; the registry lives until the session is dropped.
//! Every mutation takes `&mut self`, so a registry has exactly one writer.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{SessionId, SupplementaryId};

use crate::catalog::ProductCatalog;
use crate::eligibility::Person;
use crate::error::EligibilityError;
use crate::events::{MainProductChanged, RegistryEvent};
use crate::product::ProductId;

/// A supplementary insured and the riders chosen for them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryInsured {
    pub id: SupplementaryId,
    pub person: Person,
    pub selected_products: BTreeSet<ProductId>,
}

impl SupplementaryInsured {
    pub fn has_selected(&self, product: ProductId) -> bool {
        self.selected_products.contains(&product)
    }
}

/// Main insured state for a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainInsuredState {
    pub product: Option<ProductId>,
    pub person: Option<Person>,
}

type MainProductHook<'a> = Box<dyn FnMut(&MainProductChanged, &[SupplementaryInsured]) + 'a>;

/// Main and supplementary insureds of one session
pub struct InsuredRegistry<'a> {
    session_id: SessionId,
    catalog: &'a ProductCatalog,
    max_supplementary_count: usize,
    main: MainInsuredState,
    supplementary: Vec<SupplementaryInsured>,
    next_id: SupplementaryId,
    hooks: Vec<MainProductHook<'a>>,
    events: Vec<RegistryEvent>,
}

impl<'a> InsuredRegistry<'a> {
    /// Creates an empty registry allowing up to `max_supplementary_count` supplementary insureds
    pub fn new(catalog: &'a ProductCatalog, max_supplementary_count: usize) -> Self {
        Self::with_session_id(SessionId::new(), catalog, max_supplementary_count)
    }

    pub fn with_session_id(
        session_id: SessionId,
        catalog: &'a ProductCatalog,
        max_supplementary_count: usize,
    ) -> Self {
        Self {
            session_id,
            catalog,
            max_supplementary_count,
            main: MainInsuredState::default(),
            supplementary: Vec::new(),
            next_id: SupplementaryId::new(1),
            hooks: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn catalog(&self) -> &'a ProductCatalog {
        self.catalog
    }

    pub fn main(&self) -> &MainInsuredState {
        &self.main
    }

    pub fn max_supplementary_count(&self) -> usize {
        self.max_supplementary_count
    }

    /// Number of supplementary insureds
    pub fn count(&self) -> usize {
        self.supplementary.len()
    }

    /// True once no further supplementary insured can be added
    pub fn is_full(&self) -> bool {
        self.count() >= self.max_supplementary_count
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_supplementary_count.saturating_sub(self.count())
    }

    pub fn get(&self, id: SupplementaryId) -> Option<&SupplementaryInsured> {
        self.supplementary.iter().find(|s| s.id == id)
    }

    /// Supplementary insureds in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SupplementaryInsured> {
        self.supplementary.iter()
    }

    pub fn supplementary(&self) -> &[SupplementaryInsured] {
        &self.supplementary
    }

    /// Registers a hook run whenever the main product changes
    ///
    /// Hooks receive the change and a snapshot of the supplementary insureds so
    /// the caller can re-validate selections that depend on the main product.
    ///
    /// Hooks run before `EligibilityService::set_main_product` drops riders the
    /// new main product does not offer, so the snapshot still holds those
    /// selections. The matching `ProductDeselected` events follow the
    /// `MainProductChanged` event in the log.
    pub fn on_main_product_changed<F>(&mut self, hook: F)
    where
        F: FnMut(&MainProductChanged, &[SupplementaryInsured]) + 'a,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Records the main product
    ///
    /// Returns the change notification, or `None` when the product is unchanged.
    pub fn set_main_product(
        &mut self,
        product: ProductId,
    ) -> Result<Option<MainProductChanged>, EligibilityError> {
        self.catalog.ensure_known(product)?;

        let previous = self.main.product.replace(product);
        if previous == Some(product) {
            return Ok(None);
        }

        let change = MainProductChanged {
            session_id: self.session_id,
            previous,
            current: product,
        };
        debug!(
            session_id = %self.session_id,
            previous = ?previous,
            current = %product,
            "main product changed"
        );

        for hook in self.hooks.iter_mut() {
            hook(&change, &self.supplementary);
        }
        self.events.push(RegistryEvent::MainProductChanged(change));

        Ok(Some(change))
    }

    pub fn set_main_person(&mut self, person: Person) {
        self.main.person = Some(person);
        self.events.push(RegistryEvent::MainPersonChanged {
            session_id: self.session_id,
            person,
        });
    }

    /// Appends a supplementary insured and returns its identifier
    pub fn add_supplementary(&mut self, person: Person) -> Result<SupplementaryId, EligibilityError> {
        if self.is_full() {
            return Err(EligibilityError::CapacityExceeded {
                max: self.max_supplementary_count,
            });
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.supplementary.push(SupplementaryInsured {
            id,
            person,
            selected_products: BTreeSet::new(),
        });

        debug!(session_id = %self.session_id, id = %id, count = self.count(), "supplementary insured added");
        self.events.push(RegistryEvent::SupplementaryAdded {
            session_id: self.session_id,
            id,
            person,
        });

        Ok(id)
    }

    /// Removes a supplementary insured, keeping the others' identifiers
    pub fn remove_supplementary(
        &mut self,
        id: SupplementaryId,
    ) -> Result<SupplementaryInsured, EligibilityError> {
        let index = self
            .supplementary
            .iter()
            .position(|s| s.id == id)
            .ok_or(EligibilityError::NotFound(id))?;
        let removed = self.supplementary.remove(index);

        debug!(session_id = %self.session_id, id = %id, count = self.count(), "supplementary insured removed");
        self.events.push(RegistryEvent::SupplementaryRemoved {
            session_id: self.session_id,
            id,
        });

        Ok(removed)
    }

    /// Replaces the person of a supplementary insured after a birth date edit
    pub fn update_person(&mut self, id: SupplementaryId, person: Person) -> Result<(), EligibilityError> {
        let entry = self.entry_mut(id)?;
        entry.person = person;

        self.events.push(RegistryEvent::SupplementaryPersonChanged {
            session_id: self.session_id,
            id,
            person,
        });
        Ok(())
    }

    /// Adds a product to a supplementary insured's selection
    ///
    /// Returns false if it was already selected.
    pub fn select_product_for(
        &mut self,
        id: SupplementaryId,
        product: ProductId,
    ) -> Result<bool, EligibilityError> {
        self.catalog.ensure_known(product)?;
        let inserted = self.entry_mut(id)?.selected_products.insert(product);

        if inserted {
            debug!(session_id = %self.session_id, id = %id, product = %product, "product selected");
            self.events.push(RegistryEvent::ProductSelected {
                session_id: self.session_id,
                id,
                product,
            });
        }
        Ok(inserted)
    }

    /// Removes a product from a supplementary insured's selection
    ///
    /// Returns false if it was not selected.
    pub fn deselect_product_for(
        &mut self,
        id: SupplementaryId,
        product: ProductId,
    ) -> Result<bool, EligibilityError> {
        self.catalog.ensure_known(product)?;
        let removed = self.entry_mut(id)?.selected_products.remove(&product);

        if removed {
            debug!(session_id = %self.session_id, id = %id, product = %product, "product deselected");
            self.events.push(RegistryEvent::ProductDeselected {
                session_id: self.session_id,
                id,
                product,
            });
        }
        Ok(removed)
    }

    /// Returns accumulated events and clears them
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    fn entry_mut(&mut self, id: SupplementaryId) -> Result<&mut SupplementaryInsured, EligibilityError> {
        self.supplementary
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(EligibilityError::NotFound(id))
    }
}

impl fmt::Debug for InsuredRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsuredRegistry")
            .field("session_id", &self.session_id)
            .field("max_supplementary_count", &self.max_supplementary_count)
            .field("main", &self.main)
            .field("supplementary", &self.supplementary)
            .field("next_id", &self.next_id)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
