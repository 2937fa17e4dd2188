//! Token key material loading.
//!
//! Release builds read both PEM files named by the environment and refuse to
//! run on the development pair. Debug builds fall back to the embedded
//! development pair when no paths are configured.

use std::path::{Path, PathBuf};

use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use super::fingerprint::public_key_fingerprint;
use super::{BOOL_EXPECTED, BuildMode, ConfigError, parse_bool};
use crate::domain::TokenKeys;

/// Path to the PEM-encoded RSA private key.
pub const PRIVATE_KEY_FILE_ENV: &str = "TOKEN_PRIVATE_KEY_FILE";
/// Path to the PEM-encoded RSA public key.
pub const PUBLIC_KEY_FILE_ENV: &str = "TOKEN_PUBLIC_KEY_FILE";
/// Lets debug builds fall back to development keys when configured files
/// cannot be read.
pub const ALLOW_DEV_KEYS_ENV: &str = "TOKEN_ALLOW_DEV_KEYS";

const DEV_PRIVATE_PEM: &str = include_str!("../../keys/dev_private.pem");
const DEV_PUBLIC_PEM: &str = include_str!("../../keys/dev_public.pem");

/// Parsed key pair plus the fingerprint operators see in logs.
#[derive(Debug)]
pub struct LoadedKeys {
    pub keys: TokenKeys,
    /// Truncated SHA-256 of the public key PEM.
    pub fingerprint: String,
    /// Whether the embedded development pair is in use.
    pub development: bool,
}

/// Load the token key pair according to the environment and build mode.
///
/// # Examples
///
/// ```rust
/// use accounts::config::{BuildMode, token_keys_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let loaded = token_keys_from_env(&env, BuildMode::Debug).expect("dev keys");
/// assert!(loaded.development);
/// ```
pub fn token_keys_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<LoadedKeys, ConfigError> {
    let allow_dev = allow_dev_keys_from_env(env, mode)?;
    let private_path = env.string(PRIVATE_KEY_FILE_ENV).map(PathBuf::from);
    let public_path = env.string(PUBLIC_KEY_FILE_ENV).map(PathBuf::from);

    let (private_path, public_path) = match (private_path, public_path) {
        (Some(private_path), Some(public_path)) => (private_path, public_path),
        (private_path, _) => {
            if mode.is_debug() {
                warn!("token key files not configured; using development keys");
                return development_keys();
            }
            let name = if private_path.is_none() {
                PRIVATE_KEY_FILE_ENV
            } else {
                PUBLIC_KEY_FILE_ENV
            };
            return Err(ConfigError::MissingEnv { name });
        }
    };

    match read_key_files(&private_path, &public_path) {
        Ok(loaded) => Ok(loaded),
        Err(error @ ConfigError::KeyRead { .. }) if allow_dev => {
            warn!(
                error = %error,
                "token key files unreadable; using development keys (dev only)"
            );
            development_keys()
        }
        Err(error) => Err(error),
    }
}

fn allow_dev_keys_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, ConfigError> {
    let Some(value) = env.string(ALLOW_DEV_KEYS_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(ConfigError::DevKeysNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_DEV_KEYS; defaulting to disabled");
            Ok(false)
        }
        None => Err(ConfigError::InvalidEnv {
            name: ALLOW_DEV_KEYS_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn read_key_files(private_path: &Path, public_path: &Path) -> Result<LoadedKeys, ConfigError> {
    let mut private_pem = std::fs::read(private_path).map_err(|source| ConfigError::KeyRead {
        path: private_path.to_path_buf(),
        source,
    })?;
    let public_pem = match std::fs::read(public_path) {
        Ok(bytes) => bytes,
        Err(source) => {
            private_pem.zeroize();
            return Err(ConfigError::KeyRead {
                path: public_path.to_path_buf(),
                source,
            });
        }
    };

    let parsed = TokenKeys::from_pem(&private_pem, &public_pem);
    private_pem.zeroize();

    Ok(LoadedKeys {
        keys: parsed?,
        fingerprint: public_key_fingerprint(&public_pem),
        development: false,
    })
}

fn development_keys() -> Result<LoadedKeys, ConfigError> {
    let keys = TokenKeys::from_pem(DEV_PRIVATE_PEM.as_bytes(), DEV_PUBLIC_PEM.as_bytes())?;
    Ok(LoadedKeys {
        keys,
        fingerprint: public_key_fingerprint(DEV_PUBLIC_PEM.as_bytes()),
        development: true,
    })
}
