use std::fmt;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParsingError;
use crate::timecode::{self, RANGE_SEPARATOR};

// @module: Single subtitle block parsing

// @const: Characters ignored when comparing content
static NOISE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s.,:_-]").expect("noise pattern is valid")
});

/// Soft line break marker found in some caption text
const SOFT_BREAK: &str = "</br>";

/// One caption entry: an ordinal, a time range and the caption text.
///
/// Built once from raw block text. Only `current_index` and `hints` change
/// afterwards, and only through outer passes such as renumbering or
/// duplicate detection.
#[derive(Debug, Clone, PartialEq)]
pub struct SubBlock {
    original_index: usize,
    current_index: Option<usize>,
    start_time: Duration,
    end_time: Duration,
    content: String,
    clean_content: String,
    hints: Vec<String>,
}

impl SubBlock {
    /// Parse one raw block.
    ///
    /// `fallback_index` is used when the block has no index line, or its
    /// index is missing, zero or unreadable. An invalid header is reported
    /// with `fallback_index`; bad time values after a valid header are
    /// reported with the recovered index.
    pub fn parse(raw_text: &str, fallback_index: usize) -> Result<Self, ParsingError> {
        let mut lines: Vec<&str> = raw_text.trim().lines().collect();

        // @aligns: Header always at line 1
        if lines.first().is_some_and(|line| is_time_range_header(line)) {
            lines.insert(0, "");
        }

        let header = match lines.get(1) {
            Some(line) if is_time_range_header(line) => *line,
            _ => return Err(ParsingError::new(fallback_index)),
        };

        let original_index = extract_index(lines[0], fallback_index);

        let (start_time, end_time) = timecode::parse_time_range(header)
            .map_err(|_| ParsingError::new(original_index))?;

        let content = lines
            .get(2..)
            .map(|body| body.join("\n"))
            .unwrap_or_default()
            .trim()
            .replace(SOFT_BREAK, "\n");
        let clean_content = clean(&content);

        Ok(SubBlock {
            original_index,
            current_index: None,
            start_time,
            end_time,
            content,
            clean_content,
            hints: Vec::new(),
        })
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Position assigned by the renumbering pass, if it has run
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = Some(index);
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    pub fn end_time(&self) -> Duration {
        self.end_time
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content without whitespace and `. , : _ -`
    pub fn clean_content(&self) -> &str {
        &self.clean_content
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn hints_mut(&mut self) -> &mut Vec<String> {
        &mut self.hints
    }

    pub fn add_hint(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    /// Whether the block starts no later than it ends.
    /// Malformed sources can violate this; parsing does not reject them.
    pub fn has_valid_range(&self) -> bool {
        self.start_time <= self.end_time
    }

    /// Compare captions ignoring whitespace and light punctuation
    pub fn content_equal(&self, other: &SubBlock) -> bool {
        self.clean_content == other.clean_content
    }

    // @returns: Block rendered as "start --> end\ncontent"
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SubBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} {} {}",
            timecode::format_duration(self.start_time),
            RANGE_SEPARATOR,
            timecode::format_duration(self.end_time)
        )?;
        write!(f, "{}", self.content.replace("--", "—"))
    }
}

/// Parse one raw block, see [`SubBlock::parse`]
pub fn parse_block(raw_text: &str, fallback_index: usize) -> Result<SubBlock, ParsingError> {
    SubBlock::parse(raw_text, fallback_index)
}

/// Compare two blocks' normalized content
pub fn content_equal(a: &SubBlock, b: &SubBlock) -> bool {
    a.content_equal(b)
}

/// Whether `line` is a single `start --> end` header line with two valid
/// time strings.
pub fn is_time_range_header(line: &str) -> bool {
    if line.contains('\n') || line.contains('\r') {
        return false;
    }
    timecode::parse_time_range(line).is_ok()
}

/// Remove whitespace and the punctuation set ignored by content comparison
pub fn clean(content: &str) -> String {
    NOISE_REGEX.replace_all(content, "").into_owned()
}

// Leading digits of the index line; zero counts as absent
fn extract_index(line: &str, fallback_index: usize) -> usize {
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<usize>() {
        Ok(0) | Err(_) => fallback_index,
        Ok(index) => index,
    }
}
