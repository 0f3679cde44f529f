/*!
 * Error types for the subcleaner library.
 *
 * This module contains custom error types for the different layers of the
 * crate, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when converting a time string to a duration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    /// Fewer than three colon-separated fields were present
    #[error("Time string '{value}' has {found} field(s), expected hours:minutes:seconds")]
    MissingFields {
        /// The normalized input
        value: String,
        /// Number of fields found
        found: usize,
    },

    /// A field did not hold a non-negative number
    #[error("Invalid {field} value '{value}' in time string")]
    InvalidNumber {
        /// Which field failed ("hours", "minutes" or "seconds")
        field: &'static str,
        /// The offending field text
        value: String,
    },

    /// A time range line without a `-->` separator
    #[error("Time range '{0}' has no '-->' separator")]
    MissingSeparator(String),

    /// The combined value does not fit in a duration
    #[error("Time string '{0}' is out of range")]
    OutOfRange(String),
}

/// A single subtitle block could not be parsed.
///
/// Carries the best ordinal that could be recovered for the block; the
/// source file is attached later by [`SubtitleFileError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Parsing error at block {block_index}")]
pub struct ParsingError {
    /// Ordinal of the offending block
    pub block_index: usize,
}

impl ParsingError {
    pub fn new(block_index: usize) -> Self {
        Self { block_index }
    }
}

/// A block parsing error paired with the file it came from
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parsing error at block {block_index} in file {}.", .file.display())]
pub struct SubtitleFileError {
    /// Source subtitle file
    pub file: PathBuf,

    /// Ordinal of the offending block
    pub block_index: usize,

    #[source]
    pub source: ParsingError,
}

impl SubtitleFileError {
    pub fn new(file: impl Into<PathBuf>, source: ParsingError) -> Self {
        Self {
            file: file.into(),
            block_index: source.block_index,
            source,
        }
    }
}
