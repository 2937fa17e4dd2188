//! Domain primitives, policies and services.
//!
//! Purpose: hold the account authentication core. Nothing in here knows about
//! HTTP or the storage engine; adapters reach the core through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, NewUser, ProfileUpdate: the storage-facing data model.
//! - PasswordHasher: bcrypt credential hashing.
//! - TokenService, TokenKeys: RS256 session tokens.
//! - Session, SessionResolver: identity recovered from a token.
//! - AuthService: the registration, login and profile flows.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod session;
pub mod token;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::auth::{
    LoginCredentials, LoginOutcome, Profile, ProfileUpdateRequest, RegistrationRequest,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode};
pub use self::password::{InvalidCost, PasswordHashError, PasswordHasher};
pub use self::session::{Session, SessionError, SessionResolver};
pub use self::token::{SessionClaims, TokenError, TokenKeyError, TokenKeys, TokenService};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, ProfileUpdate, User, UserId};
pub use self::validation::ValidationResult;
