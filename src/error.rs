//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that abort a payroll calculation or a
//! configuration load.
//!
//! Degenerate computations (for example a month without workdays) are not
//! errors: they are recovered in place and reported as
//! [`AuditWarning`](crate::models::AuditWarning)s.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedYear {
///     region: "BR-RJ".to_string(),
///     year: 1900,
/// };
/// assert_eq!(error.to_string(), "No holiday data for region BR-RJ in year 1900");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input field was missing, non-numeric or outside its domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The holiday data source has no entries for the requested year.
    #[error("No holiday data for region {region} in year {year}")]
    UnsupportedYear {
        /// The region code of the calendar.
        region: String,
        /// The year that was requested.
        year: i32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is not usable (e.g. unordered brackets).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
