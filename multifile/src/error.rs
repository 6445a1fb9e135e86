//! Error types for upload fields.
//!
//! None of these ever reach the end user; hosts log them at the event boundary.

use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::{error, warn};

use crate::manager::FieldKey;

/// Result type for upload field operations
pub type MultiFileResult<T> = Result<T, MultiFileError>;

/// Errors that can occur while driving an upload field
#[derive(Error, Debug)]
pub enum MultiFileError {
    /// An element required by the markup contract was not found
    #[error("Missing element: {selector}")]
    MissingElement {
        /// Selector or description of the missing element
        selector: String,
    },

    /// The host rejected a DOM operation
    #[error("DOM operation failed: {operation}")]
    Dom {
        /// Operation and host-provided detail
        operation: String,
    },

    /// No controller is registered under this key
    #[error("Unknown upload field: {0}")]
    UnknownField(FieldKey),

    /// No random source available for identifier generation
    #[error("Random source unavailable: {reason}")]
    RandomSource {
        /// Host-provided reason
        reason: String,
    },

    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {setting}")]
    Config {
        /// Offending setting and detail
        setting: String,
    },
}

impl MultiFileError {
    /// Create a missing element error
    pub fn missing_element(selector: impl Into<String>) -> Self {
        let selector = selector.into();
        #[cfg(feature = "tracing")]
        warn!("Missing element: {}", selector);
        Self::MissingElement { selector }
    }

    /// Create a DOM operation error
    pub fn dom(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        #[cfg(feature = "tracing")]
        warn!("DOM operation failed: {}", operation);
        Self::Dom { operation }
    }

    /// Create a random source error
    pub fn random_source(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        error!("Random source unavailable: {}", reason);
        Self::RandomSource { reason }
    }

    /// Create a configuration error
    pub fn config(setting: impl Into<String>) -> Self {
        let setting = setting.into();
        #[cfg(feature = "tracing")]
        warn!("Configuration error: {}", setting);
        Self::Config { setting }
    }
}
