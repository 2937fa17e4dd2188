//! Service settings loaded via OrthoConfig.

use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::ConfigError;
use crate::domain::PasswordHasher;

/// Settings for the account service.
///
/// Every field has a default, so the service starts without flags,
/// `ACCOUNTS_*` variables or a config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AccountSettings {
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// bcrypt cost factor for new password hashes.
    #[ortho_config(default = 4)]
    pub bcrypt_cost: u32,
    /// Issuer written into and required from session tokens.
    #[ortho_config(default = "some-issuer".to_owned())]
    pub token_issuer: String,
    /// Session token lifetime in hours.
    #[ortho_config(default = 24)]
    pub token_ttl_hours: i64,
}

impl AccountSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Hasher for the configured cost.
    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        Ok(PasswordHasher::new(self.bcrypt_cost)?)
    }

    pub fn token_issuer(&self) -> &str {
        self.token_issuer.as_str()
    }

    /// Configured token lifetime; anything under an hour is rejected.
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        let hours = self.token_ttl_hours;
        if hours < 1 {
            return Err(ConfigError::TokenTtl { hours });
        }
        Ok(Duration::hours(hours))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn defaults() -> AccountSettings {
        AccountSettings {
            bind_addr: "0.0.0.0:8080".to_owned(),
            bcrypt_cost: 4,
            token_issuer: "some-issuer".to_owned(),
            token_ttl_hours: 24,
        }
    }

    fn load_from_empty_args() -> AccountSettings {
        AccountSettings::load_from_iter([OsString::from("accounts")]).expect("config should load")
    }

    #[rstest]
    fn loads_without_any_source() {
        let _guard = lock_env([
            ("ACCOUNTS_BIND_ADDR", None::<String>),
            ("ACCOUNTS_BCRYPT_COST", None::<String>),
            ("ACCOUNTS_TOKEN_ISSUER", None::<String>),
            ("ACCOUNTS_TOKEN_TTL_HOURS", None::<String>),
        ]);

        let loaded = AccountSettings::load_from_iter([OsString::from("accounts")]);
        assert!(loaded.is_ok(), "defaults alone must load: {loaded:?}");
        let settings = loaded.expect("checked above");
        assert_eq!(settings.bind_addr, defaults().bind_addr);
        assert_eq!(settings.bcrypt_cost, defaults().bcrypt_cost);
        assert_eq!(settings.token_issuer, defaults().token_issuer);
        assert_eq!(settings.token_ttl_hours, defaults().token_ttl_hours);
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("ACCOUNTS_BIND_ADDR", None::<String>),
            ("ACCOUNTS_BCRYPT_COST", None::<String>),
            ("ACCOUNTS_TOKEN_ISSUER", None::<String>),
            ("ACCOUNTS_TOKEN_TTL_HOURS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal parses")
        );
        assert_eq!(settings.password_hasher().expect("default cost").cost(), 4);
        assert_eq!(settings.token_issuer(), "some-issuer");
        assert_eq!(settings.token_ttl().expect("default ttl"), Duration::hours(24));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ACCOUNTS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("ACCOUNTS_BCRYPT_COST", Some("10".to_owned())),
            ("ACCOUNTS_TOKEN_ISSUER", Some("accounts.test".to_owned())),
            ("ACCOUNTS_TOKEN_TTL_HOURS", Some("2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal parses")
        );
        assert_eq!(settings.password_hasher().expect("valid cost").cost(), 10);
        assert_eq!(settings.token_issuer(), "accounts.test");
        assert_eq!(settings.token_ttl().expect("valid ttl"), Duration::hours(2));
    }

    #[rstest]
    #[case(3)]
    #[case(32)]
    fn out_of_range_cost_is_rejected(#[case] cost: u32) {
        let settings = AccountSettings {
            bcrypt_cost: cost,
            ..defaults()
        };
        assert!(matches!(
            settings.password_hasher(),
            Err(ConfigError::BcryptCost(_))
        ));
    }

    #[rstest]
    fn zero_ttl_is_rejected() {
        let settings = AccountSettings {
            token_ttl_hours: 0,
            ..defaults()
        };
        assert!(matches!(
            settings.token_ttl(),
            Err(ConfigError::TokenTtl { hours: 0 })
        ));
    }

    #[rstest]
    fn garbage_bind_addr_is_rejected() {
        let settings = AccountSettings {
            bind_addr: "not an address".to_owned(),
            ..defaults()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(ConfigError::BindAddr { .. })
        ));
    }
}
