//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ASO_CART_STORAGE_PATH` - File backing the emulated local storage (default: aso-cart-storage.json)
//! - `ASO_CART_STORAGE_KEY` - Key the cart is stored under (default: cart)
//! - `ASO_CART_NOTIFICATION_DISMISS_SECS` - Seconds before a notification auto-dismisses (default: 5)
//! - `ASO_CART_ID_STRATEGY` - `random` (default) or `uuid`

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Default file backing the emulated local storage.
pub const DEFAULT_STORAGE_PATH: &str = "aso-cart-storage.json";
/// Default storage key, shared with carts saved by the live storefront page.
pub const DEFAULT_STORAGE_KEY: &str = "cart";
/// Default notification lifetime.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

const STORAGE_PATH_VAR: &str = "ASO_CART_STORAGE_PATH";
const STORAGE_KEY_VAR: &str = "ASO_CART_STORAGE_KEY";
const DISMISS_SECS_VAR: &str = "ASO_CART_NOTIFICATION_DISMISS_SECS";
const ID_STRATEGY_VAR: &str = "ASO_CART_ID_STRATEGY";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How new line-item ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Nine random base-36 characters.
    #[default]
    Random,
    /// Random v4 UUIDs.
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "uuid" => Ok(Self::Uuid),
            other => Err(format!("unknown id strategy '{other}' (expected random or uuid)")),
        }
    }
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// File backing the emulated local storage
    pub storage_path: PathBuf,
    /// Key the cart array is stored under
    pub storage_key: String,
    /// How long an "added to cart" notification stays up
    pub notification_dismiss_after: Duration,
    /// Line-item id generation
    pub id_strategy: IdStrategy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_dismiss_after: DEFAULT_DISMISS_AFTER,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_path = lookup(STORAGE_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map_or(defaults.storage_path, PathBuf::from);

        let storage_key = match lookup(STORAGE_KEY_VAR) {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    STORAGE_KEY_VAR.to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let notification_dismiss_after = match lookup(DISMISS_SECS_VAR) {
            Some(raw) => parse_dismiss_secs(&raw)?,
            None => defaults.notification_dismiss_after,
        };

        let id_strategy = match lookup(ID_STRATEGY_VAR) {
            Some(raw) => raw
                .parse::<IdStrategy>()
                .map_err(|e| ConfigError::InvalidEnvVar(ID_STRATEGY_VAR.to_string(), e))?,
            None => defaults.id_strategy,
        };

        Ok(Self {
            storage_path,
            storage_key,
            notification_dismiss_after,
            id_strategy,
        })
    }
}

fn parse_dismiss_secs(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar(DISMISS_SECS_VAR.to_string(), reason);
    let secs = raw.trim().parse::<u64>().map_err(|e| invalid(e.to_string()))?;
    if secs == 0 {
        return Err(invalid("must be at least 1 second".to_string()));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.notification_dismiss_after, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            (STORAGE_PATH_VAR, "/tmp/shop.json"),
            (STORAGE_KEY_VAR, "aso-cart"),
            (DISMISS_SECS_VAR, "12"),
            (ID_STRATEGY_VAR, "UUID"),
        ]))
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/shop.json"));
        assert_eq!(config.storage_key, "aso-cart");
        assert_eq!(config.notification_dismiss_after, Duration::from_secs(12));
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let err = CartConfig::from_lookup(lookup_from(&[(STORAGE_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == STORAGE_KEY_VAR));
    }

    #[test]
    fn test_bad_dismiss_secs_rejected() {
        assert!(CartConfig::from_lookup(lookup_from(&[(DISMISS_SECS_VAR, "soon")])).is_err());
        assert!(CartConfig::from_lookup(lookup_from(&[(DISMISS_SECS_VAR, "0")])).is_err());
    }

    #[test]
    fn test_unknown_id_strategy_rejected() {
        let err =
            CartConfig::from_lookup(lookup_from(&[(ID_STRATEGY_VAR, "sequential")])).unwrap_err();
        assert!(err.to_string().contains("sequential"));
    }
}
