// crates/user-search-config/src/config.rs
// ============================================================================
// Module: User Search Configuration
// Description: Configuration loading and validation for the user search form.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: user-search-core, form-logic, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `USER_SEARCH_CONFIG`, then
//! `user-search.toml` in the working directory. Every section is optional and
//! unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use form_logic::parse_requirement;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use user_search_core::Category;
use user_search_core::EmailFormatValidator;
use user_search_core::FieldCatalog;
use user_search_core::FieldKind;
use user_search_core::FieldName;
use user_search_core::FileEventSink;
use user_search_core::FormEventSink;
use user_search_core::FormStateEngine;
use user_search_core::MaxLengthValidator;
use user_search_core::NoopEventSink;
use user_search_core::PhoneFormatValidator;
use user_search_core::SsnFormatValidator;
use user_search_core::StderrEventSink;
use user_search_core::ValidatorSet;
use user_search_core::fields;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "user-search.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "USER_SEARCH_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum characters per field value.
pub(crate) const DEFAULT_MAX_VALUE_LENGTH: usize = 256;
/// Upper bound for `validation.max_value_length`.
pub(crate) const MAX_MAX_VALUE_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root configuration for the user search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSearchConfig {
    /// Field validator toggles.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Event sink selection.
    #[serde(default)]
    pub events: EventsConfig,
    /// Category requirement overrides.
    #[serde(default)]
    pub catalog: Vec<CatalogOverride>,
}

impl UserSearchConfig {
    /// Loads configuration from disk using the default resolution rules.
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
        self.validation.validate()?;
        self.events.validate()?;
        self.build_catalog().map(|_| ())
    }

    /// Builds the standard catalog with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unknown categories, duplicate
    /// overrides, and requirements that do not parse or name foreign fields.
    pub fn build_catalog(&self) -> Result<FieldCatalog, ConfigError> {
        let mut catalog = FieldCatalog::standard();
        let mut seen = BTreeSet::new();
        for entry in &self.catalog {
            let category = Category::parse(&entry.category)
                .map_err(|err| ConfigError::Invalid(format!("catalog.category: {err}")))?;
            if !seen.insert(category) {
                return Err(ConfigError::Invalid(format!(
                    "catalog override for {} declared twice",
                    category.id()
                )));
            }
            let spec = catalog.category(category).ok_or_else(|| {
                ConfigError::Invalid(format!("catalog.category not offered: {}", category.id()))
            })?;
            let resolver = |name: &str| {
                let field = FieldName::new(name);
                spec.owns(&field).then_some(field)
            };
            let requirement = parse_requirement(&entry.requirement, &resolver).map_err(|err| {
                ConfigError::Invalid(format!("catalog.requirement for {}: {err}", category.id()))
            })?;
            catalog = catalog
                .with_requirement(category, requirement)
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(catalog)
    }

    /// Builds the validator set for `catalog`.
    #[must_use]
    pub fn build_validators(&self, catalog: &FieldCatalog) -> ValidatorSet {
        let mut validators = ValidatorSet::new();
        if self.validation.ssn_format {
            validators = validators.with(FieldName::new(fields::SSN), SsnFormatValidator);
        }
        if self.validation.email_format {
            validators = validators.with(FieldName::new(fields::EMAIL), EmailFormatValidator);
        }
        if self.validation.phone_format {
            validators = validators.with(FieldName::new(fields::PHONE), PhoneFormatValidator);
        }
        let text_fields: BTreeSet<&FieldName> = catalog
            .categories()
            .iter()
            .flat_map(|spec| spec.fields.iter())
            .filter(|field| field.kind == FieldKind::Text)
            .map(|field| &field.name)
            .collect();
        let limit = MaxLengthValidator::new(self.validation.max_value_length);
        for name in text_fields {
            validators = validators.with(name.clone(), limit);
        }
        validators
    }

    /// Opens the configured event sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the event file cannot be opened.
    pub fn build_event_sink(&self) -> Result<Arc<dyn FormEventSink>, ConfigError> {
        match self.events.sink {
            EventSinkKind::None => Ok(Arc::new(NoopEventSink)),
            EventSinkKind::Stderr => Ok(Arc::new(StderrEventSink)),
            EventSinkKind::File => {
                let path = self.events.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("events.path is required for file sink".to_string())
                })?;
                let sink = FileEventSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }

    /// Assembles an engine from the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the catalog or event sink cannot be built.
    pub fn build_engine(&self) -> Result<FormStateEngine, ConfigError> {
        let catalog = self.build_catalog()?;
        let validators = self.build_validators(&catalog);
        let sink = self.build_event_sink()?;
        Ok(FormStateEngine::new(catalog).with_validators(validators).with_event_sink(sink))
    }
}

// ============================================================================
// SECTION: Validation Config
// ============================================================================

/// Field validator toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Require SSN values shaped `NNN-NN-NNNN`.
    #[serde(default = "default_true")]
    pub ssn_format: bool,
    /// Require email values shaped like an address.
    #[serde(default)]
    pub email_format: bool,
    /// Require ten-digit phone values.
    #[serde(default)]
    pub phone_format: bool,
    /// Maximum characters accepted in text fields.
    #[serde(default = "default_max_value_length")]
    pub max_value_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            ssn_format: true,
            email_format: false,
            phone_format: false,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
        }
    }
}

impl ValidationConfig {
    /// Validates validator settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_value_length == 0 || self.max_value_length > MAX_MAX_VALUE_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "validation.max_value_length must be between 1 and {MAX_MAX_VALUE_LENGTH}"
            )));
        }
        Ok(())
    }
}

/// Serde default helper returning `true`.
const fn default_true() -> bool {
    true
}

/// Serde default helper for `validation.max_value_length`.
const fn default_max_value_length() -> usize {
    DEFAULT_MAX_VALUE_LENGTH
}

// ============================================================================
// SECTION: Events Config
// ============================================================================

/// Event sink destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSinkKind {
    /// Drop events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `events.path`.
    File,
}

/// Event sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    /// Sink destination.
    #[serde(default)]
    pub sink: EventSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl EventsConfig {
    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (EventSinkKind::File, Some(path)) => validate_path_string("events.path", path),
            (EventSinkKind::File, None) => {
                Err(ConfigError::Invalid("events.path is required for file sink".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("events.path is only valid for file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Catalog Overrides
// ============================================================================

/// Replacement requirement for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogOverride {
    /// Category label or identifier.
    pub category: String,
    /// Requirement expression over the category's field names.
    pub requirement: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
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

/// Resolves the config path from CLI or environment defaults.
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

/// Validates the resolved path against security limits.
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

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
