// crates/netcourt-config/src/config.rs
// ============================================================================
// Module: NetCourt Configuration
// Description: Configuration loading and validation for notary clients.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: netcourt-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed before any client is built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use netcourt_core::Enterprise;
use netcourt_core::EnterpriseCertType;
use netcourt_core::Identity;
use netcourt_core::MillisStrategy;
use netcourt_core::Person;
use netcourt_core::RequestSigner;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "netcourt.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "NETCOURT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Maximum transport timeout in seconds.
pub(crate) const MAX_TIMEOUT_SECS: u64 = 600;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Notary client configuration.
///
/// # Invariants
/// - Exactly one of `private_key_pem` and `private_key_path` is set.
/// - `timeout_secs` lies in `1..=600`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotaryConfig {
    /// Account identifier issued by the backend.
    pub account_id: String,
    /// Inline PEM private key.
    #[serde(default)]
    pub private_key_pem: Option<String>,
    /// Path to a PEM private key file.
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,
    /// Backend host override (scheme included).
    #[serde(default)]
    pub host: Option<String>,
    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Millisecond strategy override; each client has its own default.
    #[serde(default)]
    pub millis_strategy: Option<MillisStrategy>,
    /// Optional filer identity.
    #[serde(default)]
    pub entity: Option<EntityConfig>,
}

impl NotaryConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, then [`CONFIG_ENV_VAR`], then
    /// `netcourt.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_id.trim().is_empty() {
            return Err(ConfigError::Invalid("account_id must be set".to_string()));
        }
        match (&self.private_key_pem, &self.private_key_path) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid(
                    "private_key_pem and private_key_path are mutually exclusive".to_string(),
                ));
            }
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "one of private_key_pem or private_key_path must be set".to_string(),
                ));
            }
            (Some(pem), None) if pem.trim().is_empty() => {
                return Err(ConfigError::Invalid("private_key_pem must not be empty".to_string()));
            }
            (None, Some(path)) => validate_path(path)?,
            (Some(_), None) => {}
        }
        if let Some(host) = &self.host {
            let trimmed = host.trim();
            if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                return Err(ConfigError::Invalid(
                    "host must include http:// or https://".to_string(),
                ));
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}"
            )));
        }
        if let Some(entity) = &self.entity {
            entity.to_identity()?;
        }
        Ok(())
    }

    /// Builds the request signer from the configured key source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the key is missing or unreadable.
    pub fn signer(&self) -> Result<RequestSigner, ConfigError> {
        let signer = match (&self.private_key_pem, &self.private_key_path) {
            (Some(pem), _) => RequestSigner::from_pem(pem.as_bytes()),
            (None, Some(path)) => RequestSigner::from_file(path),
            (None, None) => {
                return Err(ConfigError::Invalid("private key is not configured".to_string()));
            }
        };
        signer.map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Returns the configured filer identity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the entity is incomplete.
    pub fn entity_identity(&self) -> Result<Option<Identity>, ConfigError> {
        self.entity.as_ref().map(EntityConfig::to_identity).transpose()
    }

    /// Returns the transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Filer identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityConfig {
    /// Natural-person filer.
    Person(PersonConfig),
    /// Enterprise filer.
    Enterprise(EnterpriseConfig),
}

impl EntityConfig {
    /// Converts the entry into a validated identity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a required field is missing or the
    /// certificate type is unknown.
    pub fn to_identity(&self) -> Result<Identity, ConfigError> {
        let identity = match self {
            Self::Person(person) => Identity::Person(Person {
                cert_name: Some(person.cert_name.clone()),
                cert_no: Some(person.cert_no.clone()),
                mobile_no: person.mobile_no.clone(),
                properties: person.properties.clone(),
            }),
            Self::Enterprise(enterprise) => {
                let cert_type = enterprise
                    .cert_type
                    .parse::<EnterpriseCertType>()
                    .map_err(|err| ConfigError::Invalid(format!("entity.cert_type: {err}")))?;
                Identity::Enterprise(Enterprise {
                    cert_name: Some(enterprise.cert_name.clone()),
                    cert_type: Some(cert_type),
                    cert_no: Some(enterprise.cert_no.clone()),
                    mobile_no: enterprise.mobile_no.clone(),
                    properties: enterprise.properties.clone(),
                    legal_person: Some(enterprise.legal_person.clone()),
                    legal_person_id: Some(enterprise.legal_person_id.clone()),
                    agent: Some(enterprise.agent.clone()),
                    agent_id: Some(enterprise.agent_id.clone()),
                })
            }
        };
        identity.to_payload().map_err(|err| ConfigError::Invalid(format!("entity: {err}")))?;
        Ok(identity)
    }
}

/// Natural-person filer fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonConfig {
    /// Full name.
    pub cert_name: String,
    /// Identity card number.
    pub cert_no: String,
    /// Mobile number.
    #[serde(default)]
    pub mobile_no: Option<String>,
    /// Extension properties.
    #[serde(default)]
    pub properties: Option<String>,
}

/// Enterprise filer fields.
#[derive(Debug, Clone, Deserialize)]
pub struct EnterpriseConfig {
    /// Registered name.
    pub cert_name: String,
    /// Certificate type code.
    pub cert_type: String,
    /// Certificate number.
    pub cert_no: String,
    /// Legal representative name.
    pub legal_person: String,
    /// Legal representative identity number.
    pub legal_person_id: String,
    /// Agent name.
    pub agent: String,
    /// Agent identity number.
    pub agent_id: String,
    /// Contact mobile number.
    #[serde(default)]
    pub mobile_no: Option<String>,
    /// Extension properties.
    #[serde(default)]
    pub properties: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted while loading configuration.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serde default for `timeout_secs`.
const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
