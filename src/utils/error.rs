use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown stage label: {label}")]
    UnknownStage { label: String },
}

impl MirrorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Short message suitable for stderr, without the variant prefix.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("File system operation failed: {}", e),
            Self::SerializationError(e) => format!("Could not write report: {}", e),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Field '{}' has invalid value '{}': {}", field, value, reason),
            Self::UnknownStage { label } => format!(
                "'{}' is not a stage; expected one of a1, a2, a3, a4, b1, b2, b3, b4",
                label
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
