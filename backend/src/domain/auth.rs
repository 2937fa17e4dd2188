//! Request and result values for the account flows.
//!
//! Inbound adapters decode wire payloads and convert them into these types
//! before calling the [`AccountService`](super::ports::AccountService) port.
//! Passwords stay in [`Zeroizing`] buffers for their whole lifetime.

use zeroize::Zeroizing;

use super::UserId;

/// Input for the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub full_name: String,
    pub phone_number: String,
    pub password: Zeroizing<String>,
}

impl RegistrationRequest {
    /// Build a request from borrowed parts.
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// Phone number and password presented at login.
///
/// # Examples
/// ```
/// use accounts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("+62821232342", "SawitPro123$");
/// assert_eq!(creds.phone_number(), "+62821232342");
/// assert_eq!(creds.password(), "SawitPro123$");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    phone_number: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Phone number used for the user lookup.
    pub fn phone_number(&self) -> &str {
        self.phone_number.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Optional profile fields supplied by the caller.
///
/// Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileUpdateRequest {
    /// Full name if present and non-empty.
    pub fn supplied_full_name(&self) -> Option<&str> {
        self.full_name.as_deref().filter(|value| !value.is_empty())
    }

    /// Phone number if present and non-empty.
    pub fn supplied_phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref().filter(|value| !value.is_empty())
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub token: String,
}

/// Profile fields read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub phone_number: String,
}
