//! Session resolution from the `Authorization` header.
//!
//! A [`Session`] is never stored. Every request rebuilds it from a verified
//! token, and verification is the only way to obtain one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::validation::messages;
use super::{SessionClaims, TokenError, TokenService, UserId};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    phone_number: String,
    issuer: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn from_claims(claims: SessionClaims) -> Result<Self, SessionError> {
        let user_id = UserId::new(claims.user_id);
        if user_id.is_absent() {
            return Err(SessionError::NoSession);
        }
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(SessionError::TokenInvalid)?;
        Ok(Self {
            user_id,
            phone_number: claims.phone_number,
            issuer: claims.iss,
            expires_at,
        })
    }

    /// Session fixture for adapter tests that never see a real token.
    #[cfg(test)]
    pub(crate) fn for_tests(user_id: UserId, phone_number: &str) -> Self {
        Self {
            user_id,
            phone_number: phone_number.to_owned(),
            issuer: super::token::DEFAULT_ISSUER.to_owned(),
            expires_at: DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn phone_number(&self) -> &str {
        self.phone_number.as_str()
    }

    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Reasons a request carries no usable session.
///
/// The display text is the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No token was presented.
    #[error("{}", messages::UNAUTHORIZED)]
    Unauthenticated,
    /// The token's expiry has passed.
    #[error("{}", messages::SESSION_EXPIRED)]
    SessionExpired,
    /// The token failed signature, issuer or structural checks.
    #[error("{}", messages::TOKEN_INVALID)]
    TokenInvalid,
    /// The token verified but names no user.
    #[error("{}", messages::NO_SESSION)]
    NoSession,
}

impl From<TokenError> for SessionError {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Expired => Self::SessionExpired,
            TokenError::Malformed { .. } | TokenError::Signing { .. } => Self::TokenInvalid,
        }
    }
}

/// Turns raw authorization data into a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionResolver {
    tokens: Arc<TokenService>,
}

impl SessionResolver {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve the value of an `Authorization` header.
    ///
    /// A leading `Bearer ` is stripped when present. A missing or empty token
    /// is [`SessionError::Unauthenticated`].
    pub fn resolve(&self, authorization: Option<&str>) -> Result<Session, SessionError> {
        let raw = authorization.unwrap_or_default();
        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);
        if token.is_empty() {
            return Err(SessionError::Unauthenticated);
        }
        let claims = self.tokens.verify(token)?;
        Session::from_claims(claims)
    }
}
