//! Domain events for the insured registry
//!
//! Every registry mutation records an event. The UI-facing layer drains them
//! with `take_events` to decide what to re-render.

use serde::{Deserialize, Serialize};

use core_kernel::{SessionId, SupplementaryId};

use crate::eligibility::Person;
use crate::product::ProductId;

/// Payload delivered to main-product-change hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainProductChanged {
    pub session_id: SessionId,
    pub previous: Option<ProductId>,
    pub current: ProductId,
}

/// Events emitted by the InsuredRegistry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    MainProductChanged(MainProductChanged),

    MainPersonChanged {
        session_id: SessionId,
        person: Person,
    },

    SupplementaryAdded {
        session_id: SessionId,
        id: SupplementaryId,
        person: Person,
    },

    SupplementaryRemoved {
        session_id: SessionId,
        id: SupplementaryId,
    },

    SupplementaryPersonChanged {
        session_id: SessionId,
        id: SupplementaryId,
        person: Person,
    },

    ProductSelected {
        session_id: SessionId,
        id: SupplementaryId,
        product: ProductId,
    },

    ProductDeselected {
        session_id: SessionId,
        id: SupplementaryId,
        product: ProductId,
    },
}

impl RegistryEvent {
    /// Returns the session this event belongs to
    pub fn session_id(&self) -> SessionId {
        match self {
            RegistryEvent::MainProductChanged(change) => change.session_id,
            RegistryEvent::MainPersonChanged { session_id, .. }
            | RegistryEvent::SupplementaryAdded { session_id, .. }
            | RegistryEvent::SupplementaryRemoved { session_id, .. }
            | RegistryEvent::SupplementaryPersonChanged { session_id, .. }
            | RegistryEvent::ProductSelected { session_id, .. }
            | RegistryEvent::ProductDeselected { session_id, .. } => *session_id,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            RegistryEvent::MainProductChanged(_) => "MainProductChanged",
            RegistryEvent::MainPersonChanged { .. } => "MainPersonChanged",
            RegistryEvent::SupplementaryAdded { .. } => "SupplementaryAdded",
            RegistryEvent::SupplementaryRemoved { .. } => "SupplementaryRemoved",
            RegistryEvent::SupplementaryPersonChanged { .. } => "SupplementaryPersonChanged",
            RegistryEvent::ProductSelected { .. } => "ProductSelected",
            RegistryEvent::ProductDeselected { .. } => "ProductDeselected",
        }
    }

    /// Returns the supplementary insured the event concerns, if any
    pub fn supplementary_id(&self) -> Option<SupplementaryId> {
        match self {
            RegistryEvent::SupplementaryAdded { id, .. }
            | RegistryEvent::SupplementaryRemoved { id, .. }
            | RegistryEvent::SupplementaryPersonChanged { id, .. }
            | RegistryEvent::ProductSelected { id, .. }
            | RegistryEvent::ProductDeselected { id, .. } => Some(*id),
            RegistryEvent::MainProductChanged(_) | RegistryEvent::MainPersonChanged { .. } => None,
        }
    }
}
