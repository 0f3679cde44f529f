/*!
 * # subcleaner - subtitle block parsing and cleaning
 *
 * A Rust library for reading the loosely formatted subtitle blocks found in
 * real-world SRT files.
 *
 * ## Features
 *
 * - Parse one subtitle block into an index, a time range and clean content
 * - Recover from missing, zero or non-numeric index lines
 * - Accept comma or period decimal separators and noisy fractions
 * - Render blocks back to canonical `HH:MM:SS,mmm --> HH:MM:SS,mmm` form
 * - Compare captions ignoring whitespace and light punctuation
 * - Split whole files into blocks, renumber them and flag duplicates
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Time-string parsing and formatting
 * - `sub_block`: Header recognition and single block parsing
 * - `subtitle_file`: File splitting, renumbering and duplicate flagging
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod sub_block;
pub mod subtitle_file;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ParsingError, SubtitleFileError, TimeFormatError};
pub use sub_block::{content_equal, is_time_range_header, parse_block, SubBlock};
pub use subtitle_file::SubtitleFile;
pub use timecode::{format_duration, parse_time_range, parse_time_string};
