//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local user storage for development and tests.
//!
//! Adapters translate between domain types and their storage shape. They
//! contain no business rules.

pub mod memory;

pub use memory::InMemoryUserRepository;
