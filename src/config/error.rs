//! Configuration Error Types
//!
//! Errors raised while loading, merging and validating the material request
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid TOML syntax in configuration file
    #[error("Invalid TOML syntax in '{file_path}': {error}")]
    InvalidToml { file_path: String, error: String },

    /// Configuration directory does not exist
    #[error("Configuration directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Missing required configuration field
    #[error("Missing required configuration field '{field}' in {context}")]
    MissingRequiredField { field: String, context: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },

    /// Layering files and environment variables failed
    #[error("Failed to build configuration for environment '{environment}': {error}")]
    BuildError { environment: String, error: String },

    /// The merged sources did not match the configuration schema
    #[error("Configuration does not match schema: {error}")]
    DeserializationError { error: String },
}

impl ConfigurationError {
    /// Create an invalid TOML error
    pub fn invalid_toml<P: Into<String>, E: std::fmt::Display>(file_path: P, error: E) -> Self {
        Self::InvalidToml {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }

    /// Create a missing required field error
    pub fn missing_required_field<F: Into<String>, C: Into<String>>(field: F, context: C) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<F: Into<String>, V: Into<String>, C: Into<String>>(
        field: F,
        value: V,
        context: C,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }

    pub fn build_error<E: Into<String>, R: std::fmt::Display>(environment: E, error: R) -> Self {
        Self::BuildError {
            environment: environment.into(),
            error: error.to_string(),
        }
    }

    pub fn deserialization_error<E: std::fmt::Display>(error: E) -> Self {
        Self::DeserializationError {
            error: error.to_string(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;
