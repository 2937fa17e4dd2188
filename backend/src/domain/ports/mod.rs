//! Domain ports for the hexagonal boundary.
//!
//! - [`UserRepository`] is driven: the account flows call it for storage.
//! - [`AccountService`] is driving: inbound adapters call it.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
