//! Driven port for user storage and its errors.
//!
//! Lookups report a miss as [`User::default()`] (identifier
//! [`UserId::ABSENT`]) rather than as an error; only infrastructure failures
//! surface as [`UserPersistenceError`].

use async_trait::async_trait;

use crate::domain::{NewUser, ProfileUpdate, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage capability consumed by the account flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user owning `phone_number`, or the default user on a miss.
    async fn find_by_phone(&self, phone_number: &str) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier, or the default user on a miss.
    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError>;

    /// Persist a new user and return the identifier storage assigned.
    async fn insert(&self, user: NewUser) -> Result<UserId, UserPersistenceError>;

    /// Write the supplied profile fields; `None` fields stay untouched.
    async fn update(&self, update: ProfileUpdate) -> Result<(), UserPersistenceError>;

    /// Count one successful login for `id`.
    async fn record_login(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
