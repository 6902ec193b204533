//! Type-safe identifier wrappers.
//!
//! Creatures get a strongly-typed [`Uuid`] wrapper so they cannot be mixed
//! up with other identifiers at compile time. Creature ids use UUID v7
//! (time-ordered) so the creature list sorts by creation order.
//!
//! Owners are identified by their wallet address, carried verbatim as an
//! [`OwnerId`] string.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a creature on the island.
    CreatureId
}

/// Wallet address of a creature or garden owner.
///
/// Compared verbatim; the signature verifier decides what a well-formed
/// address looks like.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OwnerId(pub String);

impl OwnerId {
    /// Wrap a wallet address.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creature_ids_are_unique() {
        let a = CreatureId::new();
        let b = CreatureId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = CreatureId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn owner_id_serializes_as_plain_string() {
        let owner = OwnerId::new("0xabc");
        let json = serde_json::to_string(&owner).ok();
        assert_eq!(json.as_deref(), Some("\"0xabc\""));
    }
}
