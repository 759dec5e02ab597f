//! # Error Types
//!
//! Structured error types for rc_core. Every failure carries enough context
//! (which field, which section, which strain) for a caller to report it or
//! act on it programmatically.
//!
//! The variants fall into four groups:
//!
//! - **Construction**: [`CalcError::InvalidInput`], [`CalcError::MixedRebar`]
//! - **Domain**: [`CalcError::StrainOutOfRange`]
//! - **Equilibrium**: [`CalcError::EquilibriumNotFound`]
//! - **Persistence**: [`CalcError::FileError`], [`CalcError::SerializationError`],
//!   [`CalcError::VersionMismatch`]
//!
//! A solver that stops at its iteration cap is *not* an error; see
//! [`crate::calculations::solver::SolveStatus`].
//!
//! ## Example
//!
//! ```rust
//! use rc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_breadth(breadth_mm: f64) -> CalcResult<()> {
//!     if breadth_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "breadth".to_string(),
//!             value: breadth_mm.to_string(),
//!             reason: "Breadth must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, inconsistent geometry, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Layers of one reinforcement group use different rebar materials
    #[error("Mixed rebar in one group: expected '{expected}', found '{found}'")]
    MixedRebar { expected: String, found: String },

    /// A strain outside the valid range of a stress-strain model was requested
    #[error("Strain {strain} outside the valid range [{min}, {max}]")]
    StrainOutOfRange { strain: f64, min: f64, max: f64 },

    /// No sign change of the net section force inside the search bracket
    #[error(
        "No equilibrium for section '{section}' between xu = {lower_mm:.3} mm \
         (net {net_lower_n:.3} N) and xu = {upper_mm:.3} mm (net {net_upper_n:.3} N)"
    )]
    EquilibriumNotFound {
        section: String,
        lower_mm: f64,
        upper_mm: f64,
        net_lower_n: f64,
        net_upper_n: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MixedRebar error
    pub fn mixed_rebar(expected: impl Into<String>, found: impl Into<String>) -> Self {
        CalcError::MixedRebar {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a StrainOutOfRange error
    pub fn strain_out_of_range(strain: f64, min: f64, max: f64) -> Self {
        CalcError::StrainOutOfRange { strain, min, max }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised while building inputs, before any analysis ran
    pub fn is_construction_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MixedRebar { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MixedRebar { .. } => "MIXED_REBAR",
            CalcError::StrainOutOfRange { .. } => "STRAIN_OUT_OF_RANGE",
            CalcError::EquilibriumNotFound { .. } => "EQUILIBRIUM_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
