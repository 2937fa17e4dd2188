//! RS256 session tokens.
//!
//! The key pair is parsed once at start-up into [`TokenKeys`] and shared by
//! reference for the life of the process. [`TokenService`] signs claims for a
//! user and verifies tokens presented back to it.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::User;

/// Issuer written into tokens unless configured otherwise.
pub const DEFAULT_ISSUER: &str = "some-issuer";
/// Token lifetime unless configured otherwise.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub exp: i64,
    pub user_id: i64,
    pub phone_number: String,
}

/// Failures raised while issuing or verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token's `exp` claim is in the past.
    #[error("token has expired")]
    Expired,
    /// Bad encoding, bad signature, wrong issuer or missing claims.
    #[error("token is malformed: {message}")]
    Malformed { message: String },
    /// The claims could not be signed.
    #[error("token signing failed: {message}")]
    Signing { message: String },
}

/// Failures raised while parsing PEM key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenKeyError {
    #[error("invalid RSA private key: {message}")]
    Private { message: String },
    #[error("invalid RSA public key: {message}")]
    Public { message: String },
}

/// Parsed RSA key pair used to sign and verify tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Parse a PEM private key (PKCS#1 or PKCS#8) and a PEM public key.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, TokenKeyError> {
        let encoding =
            EncodingKey::from_rsa_pem(private_pem).map_err(|err| TokenKeyError::Private {
                message: err.to_string(),
            })?;
        let decoding =
            DecodingKey::from_rsa_pem(public_pem).map_err(|err| TokenKeyError::Public {
                message: err.to_string(),
            })?;
        Ok(Self { encoding, decoding })
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

/// Signs and verifies session tokens.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use accounts::domain::{TokenKeys, TokenService, User, UserId};
/// use mockable::DefaultClock;
///
/// # fn load() -> (Vec<u8>, Vec<u8>) { unimplemented!() }
/// let (private_pem, public_pem) = load();
/// let keys = TokenKeys::from_pem(&private_pem, &public_pem).expect("keys");
/// let tokens = TokenService::new(Arc::new(keys), Arc::new(DefaultClock));
/// let user = User { id: UserId::new(1), phone_number: "+62821232342".into(), ..User::default() };
/// let token = tokens.issue(&user).expect("sign");
/// assert_eq!(tokens.verify(&token).expect("verify").user_id, 1);
/// ```
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
    issuer: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Build a service with the default issuer and lifetime.
    pub fn new(keys: Arc<TokenKeys>, clock: Arc<dyn Clock>) -> Self {
        Self {
            keys,
            issuer: DEFAULT_ISSUER.to_owned(),
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
            clock,
        }
    }

    /// Override the issuer claim written and required by this service.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Override how long issued tokens stay valid.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issuer this service writes and accepts.
    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    /// Sign a token for `user`, valid for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let claims = SessionClaims {
            iss: self.issuer.clone(),
            exp: (self.clock.utc() + self.ttl).timestamp(),
            user_id: user.id.get(),
            phone_number: user.phone_number.clone(),
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.keys.encoding).map_err(|err| {
            TokenError::Signing {
                message: err.to_string(),
            }
        })
    }

    /// Check the signature, expiry and issuer of `token` and return its claims.
    ///
    /// Expiry is checked with zero leeway.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<SessionClaims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed {
                    message: err.to_string(),
                },
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
