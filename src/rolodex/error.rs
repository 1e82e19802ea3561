use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Contact already exists: {0}")]
    DuplicateName(String),

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("Storage error for '{label}': {reason}")]
    Codec { label: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Exchange API answered {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RolodexError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RolodexError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn codec(label: impl Into<String>, reason: impl Into<String>) -> Self {
        RolodexError::Codec {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Errors the interactive session reports and then carries on from.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RolodexError::Validation { .. }
                | RolodexError::DuplicateName(_)
                | RolodexError::NotFound(_)
                | RolodexError::Codec { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;
