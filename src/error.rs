//! Error types for bulletin

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the bulletin engine and CLI
#[derive(Debug, Error)]
pub enum BulletinError {
    #[error("Not a bulletin directory: {0}")]
    NotBulletinDirectory(PathBuf),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Malformed store data in '{key}': {reason}")]
    MalformedStoreData { key: String, reason: String },

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid disposition: {0}")]
    InvalidDisposition(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BulletinError {
    /// Shorthand for a malformed document error
    pub fn malformed(key: &str, reason: impl Into<String>) -> Self {
        BulletinError::MalformedStoreData {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BulletinError::NotBulletinDirectory(_) => 2,
            BulletinError::NotFound(_) => 3,
            BulletinError::InvalidMonth(_)
            | BulletinError::InvalidCategory(_)
            | BulletinError::InvalidDisposition(_)
            | BulletinError::InvalidSubmission(_) => 4,
            BulletinError::Unauthorized(_) => 5,
            BulletinError::ConfigurationMissing(_) => 6,
            BulletinError::MalformedStoreData { .. } => 7,
            BulletinError::PersistenceFailure(_) => 8,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BulletinError::NotBulletinDirectory(path) => {
                format!(
                    "Not a bulletin directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'bulletin init' in this directory to create a newsletter store\n\
                    • Navigate to an existing bulletin directory\n\
                    • Set BULLETIN_ROOT environment variable to your newsletter path",
                    path.display()
                )
            }
            BulletinError::InvalidMonth(value) => {
                format!(
                    "Invalid month: '{}'\n\n\
                    Months are written as YYYY-MM (e.g., 2026-03)",
                    value
                )
            }
            BulletinError::InvalidCategory(value) => {
                format!(
                    "Invalid category: '{}'\n\n\
                    Valid categories: regular-activities, local-services, announcements,\n\
                    events, classifieds, lost-and-found, parish-council, committee-news",
                    value
                )
            }
            BulletinError::InvalidDisposition(msg) => {
                format!(
                    "Invalid disposition: {}\n\n\
                    Valid dispositions:\n\
                    • A target issue month: YYYY-MM (e.g., 2026-03)\n\
                    • backlog\n\
                    • archived",
                    msg
                )
            }
            BulletinError::ConfigurationMissing(what) => {
                format!(
                    "Configuration missing: {}\n\n\
                    Suggestions:\n\
                    • Set it with: bulletin config {} <value>",
                    what, what
                )
            }
            BulletinError::Unauthorized(msg) => {
                format!(
                    "Unauthorized: {}\n\n\
                    Suggestions:\n\
                    • Pass the shared secret with --secret\n\
                    • Or set the BULLETIN_SECRET environment variable",
                    msg
                )
            }
            BulletinError::PersistenceFailure(msg) => {
                format!(
                    "Persistence failure: {}\n\n\
                    Nothing was recorded. Try the operation again.",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BulletinError
pub type Result<T> = std::result::Result<T, BulletinError>;
