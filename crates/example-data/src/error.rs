//! Error types for the example-data crate.
//!
//! Registry parsing and workforce generation fail with separate `thiserror`
//! enums so callers can tell bad input files from generator limits.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry lists no departments to assign employees to.
    #[error("registry contains no departments")]
    EmptyDepartments,

    /// A department name is blank once trimmed.
    #[error("blank department name at index {index}")]
    BlankDepartment {
        /// Index of the blank entry in the array.
        index: usize,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during workforce generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid employee name after maximum retries.
    #[error("failed to generate valid employee name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The reference date is too close to the calendar limits to offset from.
    #[error("reference date cannot be offset by {days} days")]
    DateOutOfRange {
        /// Offset that could not be applied.
        days: i64,
    },
}
