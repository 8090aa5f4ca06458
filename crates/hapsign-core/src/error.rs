//! Error types for hapsign

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using HapsignError
pub type Result<T> = std::result::Result<T, HapsignError>;

/// Main error type for hapsign operations
#[derive(Debug, Error)]
pub enum HapsignError {
    /// Tool configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Signing profile errors
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Password decryption errors
    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    /// Script generation errors
    #[error(transparent)]
    Script(#[from] ScriptError),
}

impl HapsignError {
    /// Broad category of the error, used to pick an exit code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Profile(_) => ErrorCategory::Input,
            Self::Decrypt(DecryptError::HelperNotFound { .. }) => ErrorCategory::Configuration,
            Self::Decrypt(_) => ErrorCategory::Subprocess,
            Self::Script(ScriptError::Write { .. }) => ErrorCategory::Output,
            Self::Script(ScriptError::InvalidKeyBaseName { .. }) => ErrorCategory::Input,
        }
    }
}

/// Error categories surfaced to the invoker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Helper missing or invalid tool configuration
    Configuration,
    /// Profile missing, unreadable, malformed or incomplete
    Input,
    /// Decryption helper failed
    Subprocess,
    /// Script could not be written
    Output,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Signing profile errors
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Profile could not be read
    #[error("Failed to read signing profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile is not valid JSON or does not match the expected schema
    #[error("Invalid signing profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `app.signingConfigs` is empty
    #[error("Signing profile {0} has no entries in app.signingConfigs")]
    NoSigningConfigs(PathBuf),

    /// No signing config with the requested name
    #[error("Signing config '{name}' not found in {path} (available: {available})")]
    SigningConfigNotFound {
        name: String,
        path: PathBuf,
        available: String,
    },
}

/// Password decryption errors
#[derive(Debug, Error)]
pub enum DecryptError {
    /// Helper executable is not on PATH
    #[error("Decryption helper not found: {program}. {hint}")]
    HelperNotFound { program: String, hint: String },

    /// Helper could not be started
    #[error("Failed to run decryption helper {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Helper exited with a nonzero status
    #[error("Decryption helper '{program}' failed with exit code {status}: {stderr}")]
    HelperFailed {
        program: String,
        status: i32,
        stderr: String,
    },

    /// Helper output is not valid UTF-8
    #[error("Decryption helper '{program}' printed a password that is not valid UTF-8")]
    InvalidOutput { program: String },
}

/// Script generation errors
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The certificate path does not yield a usable base name
    #[error("Cannot derive key base name from certpath '{certpath}'")]
    InvalidKeyBaseName { certpath: String },

    /// Output file could not be written
    #[error("Failed to write signing script {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
