//! Account flows: registration, login and profile management.
//!
//! [`AuthService`] implements the [`AccountService`] driving port on top of
//! the [`UserRepository`] driven port. Storage and crypto failures are logged
//! here with their cause and leave as [`ErrorCode::InternalError`], which
//! adapters redact before replying.
//!
//! [`ErrorCode::InternalError`]: crate::domain::ErrorCode::InternalError

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Span, debug, error, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{AccountService, UserPersistenceError, UserRepository};
use crate::domain::validation::{self, messages};
use crate::domain::{
    Error, LoginCredentials, LoginOutcome, NewUser, PasswordHasher, Profile, ProfileUpdate,
    ProfileUpdateRequest, RegistrationRequest, Session, SessionResolver, TokenService, User,
    UserId,
};

/// Account service implementing the driving port.
#[derive(Clone)]
pub struct AuthService<R> {
    users: Arc<R>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    sessions: SessionResolver,
}

impl<R> AuthService<R> {
    /// Create a service over `users`, hashing with `hasher` and signing with `tokens`.
    pub fn new(users: Arc<R>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        let sessions = SessionResolver::new(Arc::clone(&tokens));
        Self {
            users,
            hasher,
            tokens,
            sessions,
        }
    }
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    fn storage_failure(operation: &'static str, err: UserPersistenceError) -> Error {
        error!(operation, error = %err, "user repository failed");
        Error::internal(format!("{operation} failed: {err}"))
    }

    async fn hash_password(&self, password: Zeroizing<String>) -> Result<String, Error> {
        let hasher = self.hasher;
        let span = Span::current();
        let outcome =
            tokio::task::spawn_blocking(move || span.in_scope(|| hasher.hash(&password))).await;
        match outcome {
            Ok(Ok(hash)) => Ok(hash),
            Ok(Err(err)) => {
                error!(error = %err, "password hashing failed");
                Err(Error::internal(format!("password hashing failed: {err}")))
            }
            Err(err) => {
                error!(error = %err, "password hashing task failed");
                Err(Error::internal(format!("password hashing task failed: {err}")))
            }
        }
    }

    async fn verify_password(
        &self,
        hash: String,
        candidate: Zeroizing<String>,
    ) -> Result<bool, Error> {
        let hasher = self.hasher;
        let span = Span::current();
        tokio::task::spawn_blocking(move || span.in_scope(|| hasher.verify(&hash, &candidate)))
            .await
            .map_err(|err| {
                error!(error = %err, "password verification task failed");
                Error::internal(format!("password verification task failed: {err}"))
            })
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<User, Error> {
        self.users
            .find_by_phone(phone_number)
            .await
            .map_err(|err| Self::storage_failure("find_by_phone", err))
    }
}

#[async_trait]
impl<R> AccountService for AuthService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegistrationRequest) -> Result<UserId, Error> {
        let RegistrationRequest {
            full_name,
            phone_number,
            password,
        } = request;
        debug!(phone_number = %phone_number, "registration requested");

        let violations = validation::validate_registration(&full_name, &phone_number, &password);
        if !violations.is_valid() {
            warn!(
                phone_number = %phone_number,
                violations = violations.messages().len(),
                "registration rejected by validation"
            );
            return Err(Error::validation_messages(violations.into_messages()));
        }

        if self.find_by_phone(&phone_number).await?.exists() {
            warn!(phone_number = %phone_number, "phone number already registered");
            return Err(Error::validation(messages::PHONE_ALREADY_REGISTERED));
        }

        let password_hash = self.hash_password(password).await?;
        let id = self
            .users
            .insert(NewUser {
                phone_number,
                password_hash,
                full_name,
            })
            .await
            .map_err(|err| Self::storage_failure("insert", err))?;

        debug!(user_id = %id, "user registered");
        Ok(id)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let phone_number = credentials.phone_number();
        debug!(phone_number = %phone_number, "login requested");

        let user = self.find_by_phone(phone_number).await?;
        if !user.exists() {
            warn!(phone_number = %phone_number, "login for unknown phone number");
            return Err(Error::validation(messages::PHONE_NOT_FOUND));
        }

        let candidate = Zeroizing::new(credentials.password().to_owned());
        if !self
            .verify_password(user.password_hash.clone(), candidate)
            .await?
        {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(Error::validation(messages::WRONG_PASSWORD));
        }

        let token = self.tokens.issue(&user).map_err(|err| {
            error!(user_id = %user.id, error = %err, "token signing failed");
            Error::internal(format!("token signing failed: {err}"))
        })?;

        self.users
            .record_login(user.id)
            .await
            .map_err(|err| Self::storage_failure("record_login", err))?;

        debug!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome {
            user_id: user.id,
            token,
        })
    }

    fn resolve_session(&self, authorization: Option<String>) -> Result<Session, Error> {
        self.sessions
            .resolve(authorization.as_deref())
            .map_err(|err| {
                warn!(reason = %err, "session rejected");
                Error::forbidden(err.to_string())
            })
    }

    async fn profile(&self, authorization: Option<String>) -> Result<Profile, Error> {
        let session = self.resolve_session(authorization)?;
        debug!(user_id = %session.user_id(), "profile requested");

        let user = self
            .users
            .find_by_id(session.user_id())
            .await
            .map_err(|err| Self::storage_failure("find_by_id", err))?;

        Ok(Profile {
            full_name: user.full_name,
            phone_number: user.phone_number,
        })
    }

    async fn update_profile(
        &self,
        session: Session,
        request: ProfileUpdateRequest,
    ) -> Result<(), Error> {
        let user_id = session.user_id();
        debug!(user_id = %user_id, "profile update requested");

        let mut update = ProfileUpdate {
            id: user_id,
            ..ProfileUpdate::default()
        };

        if let Some(full_name) = request.supplied_full_name() {
            let violations = validation::check_full_name(full_name);
            if !violations.is_valid() {
                warn!(user_id = %user_id, "full name rejected by validation");
                return Err(Error::validation_messages(violations.into_messages()));
            }
            update.full_name = Some(full_name.to_owned());
        }

        if let Some(phone_number) = request.supplied_phone_number() {
            let violations = validation::check_phone_number(phone_number);
            if !violations.is_valid() {
                warn!(user_id = %user_id, "phone number rejected by validation");
                return Err(Error::validation_messages(violations.into_messages()));
            }

            let owner = self.find_by_phone(phone_number).await?;
            if owner.exists() && owner.id != user_id {
                warn!(
                    user_id = %user_id,
                    phone_number = %phone_number,
                    "phone number owned by another user"
                );
                return Err(Error::conflict(messages::PHONE_ALREADY_REGISTERED));
            }
            update.phone_number = Some(phone_number.to_owned());
        }

        if update.is_empty() {
            warn!(user_id = %user_id, "profile update carried no fields");
            return Err(Error::validation(messages::NO_UPDATE));
        }

        self.users
            .update(update)
            .await
            .map_err(|err| Self::storage_failure("update", err))?;

        debug!(user_id = %user_id, "profile updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
