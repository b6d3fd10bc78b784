//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around UUIDs keep invoice, order and activity ids
//! from being mixed up. Ids render as `PREFIX-uuid` and parse either form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// Time-ordered identifier, rendered with the
        #[doc = concat!("`", $prefix, "-` prefix")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new time-ordered identifier (v7)
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }

            /// Short reference for receipts and activity messages
            ///
            /// The last 8 hex digits of the UUID; v7 ids share their leading
            /// timestamp bits with every id minted in the same millisecond.
            pub fn short_ref(&self) -> String {
                let simple = self.0.simple().to_string();
                simple[simple.len() - 8..].to_uppercase()
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
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Ordering domain identifiers
define_id!(InvoiceId, "INV");
define_id!(OrderId, "ORD");

// Activity feed identifiers
define_id!(ActivityId, "EVT");
