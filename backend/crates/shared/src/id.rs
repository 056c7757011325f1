//! Common ID Types
//!
//! Type-safe wrappers around the numeric primary keys issued by the database.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::from_raw(7);
/// assert_eq!(id.get(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw database key
    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw database key
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls so that markers don't need to derive anything.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::from_raw)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Campaign IDs
    pub struct Campaign;

    /// Marker for CampaignImage IDs
    pub struct CampaignImage;

    /// Marker for Transaction IDs
    pub struct Transaction;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type CampaignId = Id<markers::Campaign>;
pub type CampaignImageId = Id<markers::CampaignImage>;
pub type TransactionId = Id<markers::Transaction>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let user_id: UserId = Id::from_raw(1);
        let campaign_id: CampaignId = Id::from_raw(1);

        // Same raw value, different types: they cannot be compared directly
        assert_eq!(user_id.get(), campaign_id.get());
    }

    #[test]
    fn test_id_parse() {
        let id: CampaignId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<CampaignId>().is_err());
    }

    #[test]
    fn test_id_serde_is_plain_number() {
        let id = TransactionId::from_raw(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");

        let parsed: TransactionId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, TransactionId::from_raw(12));
    }
}
