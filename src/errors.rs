//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP layer
//! maps the variants onto status codes in [`crate::api::error`].

use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The singleton settings document has not been created yet
    #[error("Settings have not been initialized")]
    SettingsNotFound,

    /// The requested name is not one of the settings sections
    #[error("Settings section not found: {name}")]
    SectionNotFound {
        /// Section name as requested
        name: String,
    },

    /// No Anganwadi centre exists with this id
    #[error("Anganwadi center not found: {id}")]
    CenterNotFound {
        /// Centre id as requested
        id: i64,
    },

    /// A value violates its declared type, enum or range
    #[error("Invalid value for {field}: {message}")]
    Validation {
        /// Section or field path that failed
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Application configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Storage-layer failure, passed through unchanged
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored or outgoing document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure (binding sockets, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for the "record or section does not exist" family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SettingsNotFound | Self::SectionNotFound { .. } | Self::CenterNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
