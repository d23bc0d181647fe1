// crates/confgate-core/src/config.rs
// ============================================================================
// Module: Validation Configuration
// Description: TOML-backed settings for size limits and audit output.
// Purpose: Load and validate engine settings with bounded file reads.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! [`ValidationConfig`] holds the engine's ambient settings: document size
//! [`ValidationLimits`] and where [`AuditConfig`] sends audit events. It loads
//! from a TOML file named explicitly, by the `CONFGATE_CONFIG` environment
//! variable, or `confgate.toml` in the working directory. Files are size
//! capped and must be UTF-8; unknown fields are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::audit::ValidationAuditSink;
use crate::error::LimitKind;
use crate::error::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "confgate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "CONFGATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum number of sections per document.
const DEFAULT_MAX_SECTIONS: usize = 1024;
/// Default maximum number of values per section.
const DEFAULT_MAX_VALUES_PER_SECTION: usize = 4096;
/// Default maximum byte length of a section name or key.
const DEFAULT_MAX_NAME_BYTES: usize = 1024;
/// Hard ceiling for any configured limit.
const MAX_LIMIT_VALUE: usize = 1 << 20;

// ============================================================================
// SECTION: Config Root
// ============================================================================

/// Engine settings loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Document size limits.
    #[serde(default)]
    pub limits: ValidationLimits,
    /// Audit output settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl ValidationConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ValidationConfigError> {
        let resolved = resolve_path(path)?;
        let bytes = fs::read(&resolved).map_err(|err| ValidationConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ValidationConfigError::Invalid(
                "config file exceeds size limit".to_string(),
            ));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ValidationConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ValidationConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ValidationConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ValidationConfigError> {
        self.limits.validate()?;
        self.audit.validate()
    }
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Document size limits checked before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationLimits {
    /// Maximum number of sections.
    pub max_sections: usize,
    /// Maximum number of values in one section.
    pub max_values_per_section: usize,
    /// Maximum byte length of a section name or value key.
    pub max_name_bytes: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_sections: DEFAULT_MAX_SECTIONS,
            max_values_per_section: DEFAULT_MAX_VALUES_PER_SECTION,
            max_name_bytes: DEFAULT_MAX_NAME_BYTES,
        }
    }
}

impl ValidationLimits {
    /// Validates that every limit is within `1..=2^20`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationConfigError> {
        for (field, value) in [
            ("max_sections", self.max_sections),
            ("max_values_per_section", self.max_values_per_section),
            ("max_name_bytes", self.max_name_bytes),
        ] {
            if value == 0 || value > MAX_LIMIT_VALUE {
                return Err(ValidationConfigError::Invalid(format!(
                    "limits.{field} must be between 1 and {MAX_LIMIT_VALUE}"
                )));
            }
        }
        Ok(())
    }

    /// Checks the section count of a document.
    pub(crate) const fn check_sections(&self, actual: usize) -> Result<(), ValidationError> {
        if actual > self.max_sections {
            return Err(ValidationError::LimitExceeded {
                limit: LimitKind::Sections,
                section: None,
                max: self.max_sections,
                actual,
            });
        }
        Ok(())
    }

    /// Checks the value count of one section.
    pub(crate) fn check_values(&self, section: &str, actual: usize) -> Result<(), ValidationError> {
        if actual > self.max_values_per_section {
            return Err(ValidationError::LimitExceeded {
                limit: LimitKind::ValuesPerSection,
                section: Some(section.to_string()),
                max: self.max_values_per_section,
                actual,
            });
        }
        Ok(())
    }

    /// Checks the byte length of a section name or value key.
    pub(crate) fn check_name(
        &self,
        section: Option<&str>,
        name: &str,
    ) -> Result<(), ValidationError> {
        if name.len() > self.max_name_bytes {
            return Err(ValidationError::LimitExceeded {
                limit: LimitKind::NameBytes,
                section: section.map(str::to_string),
                max: self.max_name_bytes,
                actual: name.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Destination for audit events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Audit output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Whether audit events are emitted.
    pub enabled: bool,
    /// Destination for events.
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates sink settings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationConfigError::Invalid`] when the file sink has no path.
    pub fn validate(&self) -> Result<(), ValidationConfigError> {
        if self.enabled && self.sink == AuditSinkKind::File && self.path.is_none() {
            return Err(ValidationConfigError::Invalid(
                "audit.path is required when audit.sink = \"file\"".to_string(),
            ));
        }
        if let Some(path) = &self.path
            && path.to_string_lossy().len() > MAX_TOTAL_PATH_LENGTH
        {
            return Err(ValidationConfigError::Invalid(
                "audit.path exceeds max length".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the configured sink; disabled audit yields a no-op sink.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationConfigError`] when the log file cannot be opened.
    pub fn build_sink(&self) -> Result<Box<dyn ValidationAuditSink>, ValidationConfigError> {
        if !self.enabled {
            return Ok(Box::new(NoopAuditSink));
        }
        match (self.sink, &self.path) {
            (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrAuditSink)),
            (AuditSinkKind::File, Some(path)) => FileAuditSink::new(path)
                .map(|sink| Box::new(sink) as Box<dyn ValidationAuditSink>)
                .map_err(|err| ValidationConfigError::Io(err.to_string())),
            (AuditSinkKind::File, None) => Err(ValidationConfigError::Invalid(
                "audit.path is required when audit.sink = \"file\"".to_string(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ValidationConfigError {
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

/// Resolves the config path from an explicit path or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ValidationConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ValidationConfigError::Invalid(
                "config path exceeds max length".to_string(),
            ));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}
