//! Driving port for the account use-cases.
//!
//! Inbound adapters call this port to register, log in and manage profiles
//! without knowing which storage or key material backs it. Handler tests
//! substitute a mock instead of wiring the real service.

use async_trait::async_trait;

use crate::domain::{
    Error, LoginCredentials, LoginOutcome, Profile, ProfileUpdateRequest, RegistrationRequest,
    Session, UserId,
};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Validate and store a new user, returning its identifier.
    async fn register(&self, request: RegistrationRequest) -> Result<UserId, Error>;

    /// Check credentials and issue a session token.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;

    /// Resolve the caller's session from raw authorization data.
    ///
    /// Failures are [`ErrorCode::Forbidden`](crate::domain::ErrorCode::Forbidden)
    /// carrying the session message.
    fn resolve_session(&self, authorization: Option<String>) -> Result<Session, Error>;

    /// Read the caller's stored profile.
    async fn profile(&self, authorization: Option<String>) -> Result<Profile, Error>;

    /// Apply a partial profile update for an already resolved session.
    ///
    /// Callers obtain `session` from [`AccountService::resolve_session`], so
    /// the token is verified once per request.
    async fn update_profile(
        &self,
        session: Session,
        request: ProfileUpdateRequest,
    ) -> Result<(), Error>;
}
