//! Newtype IDs for type-safe entity references.
//!
//! Products are keyed by opaque strings (the durable catalog stores them as
//! text). In-memory entities that never touch the durable store use random
//! UUIDs created with the `define_uuid_id!` macro.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of a product in the catalog.
///
/// The admin add-flow derives new IDs from the creation timestamp
/// (milliseconds since the Unix epoch); seeded products use short numeric
/// strings. Any string is accepted when reading existing records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an ID from a timestamp, bumping by one millisecond while the
    /// candidate is already taken.
    ///
    /// ```rust
    /// # use chrono::{TimeZone, Utc};
    /// # use handset_core::ProductId;
    /// let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    /// let taken = [ProductId::new("1700000000000")];
    /// let id = ProductId::from_timestamp(now, |id| taken.contains(id));
    /// assert_eq!(id.as_str(), "1700000000001");
    /// ```
    #[must_use]
    pub fn from_timestamp(now: DateTime<Utc>, is_taken: impl Fn(&Self) -> bool) -> Self {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = Self(millis.to_string());
            if !is_taken(&candidate) {
                return candidate;
            }
            millis = millis.saturating_add(1);
        }
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Macro to define a UUID-backed ID wrapper.
///
/// Creates a newtype wrapper around `uuid::Uuid` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `new_random()`, `as_uuid()`, `Display` and `FromStr`
#[macro_export]
macro_rules! define_uuid_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new random (v4) ID.
            #[must_use]
            pub fn new_random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }
    };
}

// In-memory chat transcripts
define_uuid_id!(ConversationId);

// Admin bearer tokens
define_uuid_id!(SessionToken);

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_product_id_from_timestamp_uses_millis() {
        let now = Utc
            .timestamp_millis_opt(1_717_171_717_171)
            .single()
            .expect("valid timestamp");
        let id = ProductId::from_timestamp(now, |_| false);
        assert_eq!(id.as_str(), "1717171717171");
    }

    #[test]
    fn test_product_id_from_timestamp_skips_taken() {
        let now = Utc
            .timestamp_millis_opt(10)
            .single()
            .expect("valid timestamp");
        let taken = [ProductId::new("10"), ProductId::new("11")];
        let id = ProductId::from_timestamp(now, |id| taken.contains(id));
        assert_eq!(id, ProductId::new("12"));
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let json = serde_json::to_string(&ProductId::new("42")).expect("serialize");
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_conversation_id_round_trips_through_display() {
        let id = ConversationId::new_random();
        let parsed: ConversationId = id.to_string().parse().expect("parse");
        assert_eq!(parsed, id);
    }
}
