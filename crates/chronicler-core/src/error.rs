//! Error types for Chronicler

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ChronicleError
pub type Result<T> = std::result::Result<T, ChronicleError>;

/// Main error type for Chronicler operations
#[derive(Debug, Error)]
pub enum ChronicleError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog document I/O errors
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Promotion errors
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Code-hosting API errors
    #[error(transparent)]
    Forge(#[from] ForgeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
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

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog document I/O errors
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document exists but could not be read
    #[error("Failed to read changelog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be written back
    #[error("Failed to write changelog {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Promotion errors
#[derive(Debug, Error)]
pub enum PromotionError {
    /// No Unreleased header to promote
    #[error("Cannot promote {path}: header '{header}' not found")]
    HeaderNotFound { path: PathBuf, header: String },
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// A git CLI invocation failed
    #[error("git {step} failed: {stderr}")]
    CommandFailed { step: String, stderr: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error spawning git
    #[error("Failed to run git: {0}")]
    Io(#[from] std::io::Error),
}

/// Code-hosting API errors
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Repository slug is not of the form owner/name
    #[error("Invalid repository slug '{0}', expected owner/name")]
    InvalidRepository(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Non-success API response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ChronicleError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
