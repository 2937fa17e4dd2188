//! Start-up configuration.
//!
//! Service settings load through OrthoConfig (CLI, `ACCOUNTS_*` environment
//! variables, config files). Token key material is read separately through
//! [`mockable::Env`] so the debug/release rules can be tested without
//! touching the process environment.

pub mod fingerprint;
mod keys;
mod settings;

use std::net::AddrParseError;
use std::path::PathBuf;

use crate::domain::{InvalidCost, TokenKeyError};

pub use keys::{
    ALLOW_DEV_KEYS_ENV, LoadedKeys, PRIVATE_KEY_FILE_ENV, PUBLIC_KEY_FILE_ENV, token_keys_from_env,
};
pub use settings::AccountSettings;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to development keys with a warning.
    Debug,
    /// Release builds require explicit key files.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accounts::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating start-up configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading a PEM file failed.
    #[error("failed to read key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A PEM file was read but did not hold a usable RSA key.
    #[error(transparent)]
    KeyParse(#[from] TokenKeyError),
    /// Release builds must not run on the embedded development keys.
    #[error("TOKEN_ALLOW_DEV_KEYS must be 0 in release builds")]
    DevKeysNotAllowed,
    /// The bind address does not parse.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    /// The bcrypt cost is outside bcrypt's range.
    #[error(transparent)]
    BcryptCost(#[from] InvalidCost),
    /// Token lifetime must be positive.
    #[error("token lifetime must be at least one hour, got {hours}")]
    TokenTtl { hours: i64 },
}

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
