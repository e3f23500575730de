//! Client state configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GLORY_STORAGE_NAMESPACE` - Storage key prefix (default: glory)
//! - `GLORY_STORAGE_DIR` - Directory for file-backed storage (default: .glory)
//! - `GLORY_BASE_URL` - Public storefront URL for checkout redirects
//!   (default: <http://localhost:3000>)
//! - `GLORY_CURRENCY` - ISO 4217 currency code (default: USD)
//! - `GLORY_COMPARISON_LIMIT` - Products compared at once (default: 3)

use std::path::PathBuf;

use glory_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::checkout::CheckoutConfig;
use crate::comparison::DEFAULT_CAPACITY;
use crate::storage::{DEFAULT_NAMESPACE, StorageKeys};

const DEFAULT_STORAGE_DIR: &str = ".glory";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client state configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    /// Prefix for the stores' storage keys
    pub namespace: String,
    /// Directory used by `FileStorage`
    pub storage_dir: PathBuf,
    /// Public storefront URL
    pub base_url: Url,
    /// Currency charged at checkout
    pub currency: CurrencyCode,
    /// Maximum products in the comparison list
    pub comparison_limit: usize,
}

impl StateConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let namespace = get("GLORY_STORAGE_NAMESPACE")
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned());
        validate_namespace(&namespace)?;

        let storage_dir = get("GLORY_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let base_url_raw = get("GLORY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&base_url_raw).map_err(|e| {
            ConfigError::InvalidEnvVar("GLORY_BASE_URL".to_owned(), e.to_string())
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "GLORY_BASE_URL".to_owned(),
                "must be an http(s) URL".to_owned(),
            ));
        }

        let currency = get("GLORY_CURRENCY")
            .map(|v| v.parse::<CurrencyCode>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("GLORY_CURRENCY".to_owned(), e.to_string()))?
            .unwrap_or_default();

        let comparison_limit = get("GLORY_COMPARISON_LIMIT")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GLORY_COMPARISON_LIMIT".to_owned(), e.to_string())
            })?
            .unwrap_or(DEFAULT_CAPACITY);
        if comparison_limit == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "GLORY_COMPARISON_LIMIT".to_owned(),
                "must be at least 1".to_owned(),
            ));
        }

        Ok(Self {
            namespace,
            storage_dir,
            base_url,
            currency,
            comparison_limit,
        })
    }

    /// Storage keys derived from the namespace.
    #[must_use]
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_namespace(&self.namespace)
    }

    /// Checkout settings derived from this configuration.
    #[must_use]
    pub fn checkout(&self) -> CheckoutConfig {
        CheckoutConfig {
            base_url: self.base_url.clone(),
            currency: self.currency,
        }
    }
}

fn validate_namespace(namespace: &str) -> Result<(), ConfigError> {
    let valid = namespace
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "GLORY_STORAGE_NAMESPACE".to_owned(),
            "may only contain letters, digits, '-', '_' and '.'".to_owned(),
        ))
    }
}
