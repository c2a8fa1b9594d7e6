//! Error types for mapping operations.
//!
//! This module defines [`MapperError`] which covers everything that can go wrong
//! while loading the reference dataset or handling a mapping request.

use thiserror::Error;

/// Errors that can occur while loading reference data or serving requests.
#[derive(Error, Debug)]
pub enum MapperError {
    /// The reference dataset could not be constructed.
    #[error("Failed to load industry mapping database: {0}")]
    Load(String),

    /// Mapping rows reference industry labels that are absent from the catalog.
    #[error("Invalid industries in mapping: {}", labels.join(", "))]
    UnknownIndustries {
        /// Offending labels, sorted and deduplicated.
        labels: Vec<String>,
    },

    /// A reference source could not be read or parsed.
    #[error("Error reading {source_name}: {message}")]
    Source {
        /// Name of the source or file that failed.
        source_name: String,
        /// What went wrong.
        message: String,
    },

    /// A request was rejected before any processing took place.
    #[error("{0}")]
    Validation(String),

    /// A tabular export could not be written.
    #[error("Export error: {0}")]
    Export(String),

    /// A DataFrame view could not be built.
    #[error("Frame error: {0}")]
    Frame(String),
}

impl MapperError {
    /// Creates a [`MapperError::Source`] for the named source.
    pub fn source_error(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Source {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Returns true for errors that prevent the reference dataset from becoming ready.
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Load(_) | Self::UnknownIndustries { .. } | Self::Source { .. }
        )
    }

    /// Returns true for request-scoped errors the caller can correct and resubmit.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias using [`MapperError`].
pub type Result<T> = std::result::Result<T, MapperError>;
