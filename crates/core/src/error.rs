use std::io;
use std::path::PathBuf;

/// Errors that can occur during restgen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Project descriptor error: {0}")]
    DescriptorError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("API specification not found at {}", .0.display())]
    SpecNotFound(PathBuf),

    #[error("API specification rejected: {0}")]
    SpecRejected(String),

    #[error("External generation tool {coordinates} failed: {diagnostic}")]
    ExternalToolFailure {
        coordinates: String,
        diagnostic: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

const STRATEGY_HINT: &str =
    "make sure it is registered or declared in the project's strategies manifest before generation runs";

/// Failures while resolving a pluggable strategy by name
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error(
        "the strategy type ({name}) cannot be resolved: {reason}; {hint}",
        hint = STRATEGY_HINT
    )]
    NotResolvable { name: String, reason: String },

    #[error(
        "the strategy type ({name}) implements {found}, not the required {required} contract; {hint}",
        hint = STRATEGY_HINT
    )]
    NotCompatible {
        name: String,
        required: &'static str,
        found: String,
    },

    #[error(
        "the strategy type ({name}) cannot be constructed: {reason}; {hint}",
        hint = STRATEGY_HINT
    )]
    NotConstructible { name: String, reason: String },
}

impl StrategyError {
    /// Name of the type the failure refers to
    pub fn type_name(&self) -> &str {
        match self {
            StrategyError::NotResolvable { name, .. }
            | StrategyError::NotCompatible { name, .. }
            | StrategyError::NotConstructible { name, .. } => name,
        }
    }
}

/// Result type alias for restgen operations
pub type Result<T> = std::result::Result<T, Error>;
