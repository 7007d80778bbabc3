//! Strongly-typed identifiers
//!
//! Session identifiers are UUID newtypes. Supplementary-insured identifiers are
//! sequence numbers handed out by the registry that owns them, so they are
//! stable for display and never reused within a session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new time-ordered identifier (v7)
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(SessionId, "SES");

/// Identifier of a supplementary insured within one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplementaryId(u32);

impl SupplementaryId {
    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number
    pub fn sequence(&self) -> u32 {
        self.0
    }

    /// Returns the identifier following this one
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn prefix() -> &'static str {
        "SUP"
    }
}

impl fmt::Display for SupplementaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SUP-{}", self.0)
    }
}

impl FromStr for SupplementaryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seq = s.strip_prefix("SUP-").unwrap_or(s);
        Ok(Self(seq.parse()?))
    }
}
