use std::path::PathBuf;

use crate::profile::ProfileError;

/// Errors that abort parsing of a profile file
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The profile file could not be opened
    #[error("Failed to open profile '{}': {source}", path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading an already opened source
    #[error("Failed to read profile: {0}")]
    Read(#[from] std::io::Error),

    /// The source ended before a required header line
    #[error("Line {line}: missing header, expected {expected}")]
    MissingHeader {
        /// One-based line number
        line: usize,
        /// Description of the expected header
        expected: &'static str,
    },

    /// A header line did not follow the `# <key> = <integer>` / `# <name>` grammar
    #[error("Line {line}: invalid header, expected {expected}, found '{content}'")]
    InvalidHeader {
        /// One-based line number
        line: usize,
        /// Description of the expected header
        expected: &'static str,
        /// The offending line
        content: String,
    },

    /// The declared point count exceeds the parser capacity
    #[error("Profile declares {declared} points, exceeding the capacity of {capacity}")]
    CapacityExceeded {
        /// Point count from the `npts` header
        declared: usize,
        /// Configured maximum
        capacity: usize,
    },

    /// A data row had the wrong number of fields
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        /// One-based line number
        line: usize,
        /// Radius plus declared variables
        expected: usize,
        /// Fields present on the line
        found: usize,
    },

    /// A data field was not a floating-point number
    #[error("Line {line}, field {field}: invalid number '{value}'")]
    InvalidNumber {
        /// One-based line number
        line: usize,
        /// One-based field position
        field: usize,
        /// The offending token
        value: String,
    },

    /// Fewer data rows than declared
    #[error("Profile declares {expected} points but only {found} data rows were found")]
    Truncated {
        /// Point count from the `npts` header
        expected: usize,
        /// Rows actually read
        found: usize,
    },

    /// The parsed rows did not form a valid table
    #[error("Invalid profile: {0}")]
    Profile(#[from] ProfileError),
}
