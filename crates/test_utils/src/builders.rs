//! Test Data Builders
//!
//! Builders for registries and services with sensible defaults, so tests
//! only spell out the parts they care about.

use core_kernel::SupplementaryId;
use domain_eligibility::{
    EligibilityService, EngineConfig, InsuredRegistry, Person, ProductCatalog, ProductId,
};

use crate::fixtures::{ConfigFixtures, PersonFixtures};

/// A supplementary insured to add during a build
struct PendingSupplementary {
    person: Person,
    products: Vec<ProductId>,
}

/// Builder for a populated InsuredRegistry over the standard catalog
pub struct TestRegistryBuilder {
    max_supplementary_count: usize,
    main_product: Option<ProductId>,
    main_person: Option<Person>,
    supplementary: Vec<PendingSupplementary>,
}

impl Default for TestRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegistryBuilder {
    /// Creates a new builder with room for five supplementary insureds
    pub fn new() -> Self {
        Self {
            max_supplementary_count: 5,
            main_product: None,
            main_person: None,
            supplementary: Vec::new(),
        }
    }

    pub fn with_max_supplementary_count(mut self, max: usize) -> Self {
        self.max_supplementary_count = max;
        self
    }

    pub fn with_main_product(mut self, product: ProductId) -> Self {
        self.main_product = Some(product);
        self
    }

    pub fn with_main_person(mut self, person: Person) -> Self {
        self.main_person = Some(person);
        self
    }

    /// Adds a supplementary insured of `age` at the standard reference date
    pub fn with_supplementary_aged(self, age: u32, products: &[ProductId]) -> Self {
        self.with_supplementary(PersonFixtures::aged(age), products)
    }

    pub fn with_supplementary(mut self, person: Person, products: &[ProductId]) -> Self {
        self.supplementary.push(PendingSupplementary {
            person,
            products: products.to_vec(),
        });
        self
    }

    /// Builds the registry and returns the assigned identifiers in order
    ///
    /// # Panics
    ///
    /// Panics if more supplementary insureds were requested than the capacity allows
    pub fn build(self) -> (InsuredRegistry<'static>, Vec<SupplementaryId>) {
        let mut registry = InsuredRegistry::new(ProductCatalog::standard(), self.max_supplementary_count);

        if let Some(product) = self.main_product {
            registry.set_main_product(product).expect("catalogued main product");
        }
        if let Some(person) = self.main_person {
            registry.set_main_person(person);
        }

        let mut ids = Vec::with_capacity(self.supplementary.len());
        for pending in self.supplementary {
            let id = registry
                .add_supplementary(pending.person)
                .expect("builder capacity exceeded");
            for product in pending.products {
                registry.select_product_for(id, product).expect("catalogued rider");
            }
            ids.push(id);
        }

        registry.take_events();
        (registry, ids)
    }
}

/// Builder for an EligibilityService over the standard catalog
pub struct TestServiceBuilder {
    config: EngineConfig,
}

impl Default for TestServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestServiceBuilder {
    pub fn new() -> Self {
        Self {
            config: ConfigFixtures::standard(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_supplementary_count(mut self, max: usize) -> Self {
        self.config = self.config.with_max_supplementary_count(max);
        self
    }

    pub fn build(self) -> EligibilityService<'static> {
        EligibilityService::standard(self.config)
    }
}
