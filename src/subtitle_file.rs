/*!
 * Subtitle file handling.
 *
 * Splits the text of an SRT-style file into raw blocks, parses each one into
 * a [`SubBlock`] and keeps track of the blocks that could not be parsed.
 * A failing block never stops the rest of the file from being read unless
 * `fail_fast` is requested.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::errors::SubtitleFileError;
use crate::file_utils::FileManager;
use crate::sub_block::SubBlock;

// @const: Blank line between blocks
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n\s*\n").unwrap()
});

/// Hint attached to a block whose content repeats the previous block
pub const DUPLICATE_HINT: &str = "duplicate_content";

/// A parsed subtitle file
#[derive(Debug, Clone)]
pub struct SubtitleFile {
    /// Source filename
    pub path: PathBuf,

    /// Successfully parsed blocks, in file order
    pub blocks: Vec<SubBlock>,

    /// Blocks that failed to parse
    pub errors: Vec<SubtitleFileError>,
}

impl SubtitleFile {
    /// Parse subtitle text that came from `path`.
    ///
    /// Each block gets its 1-based position as fallback ordinal. With
    /// `fail_fast` the first failing block is returned as the error.
    pub fn parse<P: Into<PathBuf>>(path: P, text: &str, fail_fast: bool) -> Result<Self, SubtitleFileError> {
        let path = path.into();
        let mut blocks = Vec::new();
        let mut errors = Vec::new();

        for (position, raw) in split_blocks(text).into_iter().enumerate() {
            match SubBlock::parse(raw, position + 1) {
                Ok(block) => blocks.push(block),
                Err(e) => {
                    let error = SubtitleFileError::new(&path, e);
                    if fail_fast {
                        return Err(error);
                    }
                    warn!("{}", error);
                    errors.push(error);
                }
            }
        }

        debug!("Parsed {} block(s) from {:?}, {} failed", blocks.len(), path, errors.len());

        Ok(SubtitleFile { path, blocks, errors })
    }

    /// Read and parse a subtitle file
    pub fn load<P: AsRef<Path>>(path: P, fail_fast: bool) -> Result<Self> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        Self::parse(path, &text, fail_fast)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", path))
    }

    /// Assign sequential `current_index` values starting at 1
    pub fn renumber(&mut self) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.set_current_index(i + 1);
        }
    }

    /// Flag blocks whose content matches the block before them.
    ///
    /// Returns `(previous, duplicate)` positions into `blocks`.
    pub fn find_duplicates(&mut self) -> Vec<(usize, usize)> {
        let pairs: Vec<(usize, usize)> = self
            .blocks
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].content_equal(&pair[1]))
            .map(|(i, _)| (i, i + 1))
            .collect();

        for &(previous, duplicate) in &pairs {
            debug!(
                "Block {} repeats the content of block {}",
                self.blocks[duplicate].original_index(),
                self.blocks[previous].original_index()
            );
            self.blocks[duplicate].add_hint(DUPLICATE_HINT);
        }

        pairs
    }

    /// Render all blocks as SRT text.
    ///
    /// Blocks are numbered with their `current_index` when renumbered and
    /// their `original_index` otherwise.
    pub fn to_srt(&self) -> String {
        let mut output = String::new();
        for block in &self.blocks {
            let index = block.current_index().unwrap_or(block.original_index());
            output.push_str(&format!("{}\n{}\n\n", index, block));
        }
        output
    }

    /// Write the rendered blocks to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_srt())
    }
}

/// Split file text into raw, non-empty block strings. A leading BOM is dropped.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLOCK_SEPARATOR
        .split(text.trim_start_matches('\u{feff}').trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}
