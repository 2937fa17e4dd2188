//! User data model.
//!
//! Storage owns user records and assigns their identifiers. The core never
//! derives an identifier itself; it only reads the ones storage hands back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric user identifier assigned by storage.
///
/// `0` is reserved for "absent" and is never a persisted identifier.
///
/// # Examples
/// ```
/// use accounts::domain::UserId;
///
/// assert!(UserId::ABSENT.is_absent());
/// assert!(!UserId::new(7).is_absent());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Identifier of a record that does not exist.
    pub const ABSENT: Self = Self(0);

    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// True for zero and for negative values, neither of which storage hands out.
    #[must_use]
    pub const fn is_absent(self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Persisted user record.
///
/// `User::default()` is the "not found" value returned by lookups; its
/// identifier is [`UserId::ABSENT`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub phone_number: String,
    pub password_hash: String,
    pub full_name: String,
}

impl User {
    /// Whether this record came from storage rather than a miss.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.id.is_absent()
    }
}

/// Insert payload for a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub phone_number: String,
    pub password_hash: String,
    pub full_name: String,
}

/// Partial update of a user's profile.
///
/// Adapters write only the fields that are `Some`; `None` leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub id: UserId,
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
}

impl ProfileUpdate {
    /// True when neither field would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.full_name.is_none()
    }
}
