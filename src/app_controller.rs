use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_file::SubtitleFile;

// @module: Application controller for subtitle cleaning

/// Outcome of cleaning one subtitle file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Input subtitle file
    pub input: PathBuf,

    /// Written file, `None` when skipped
    pub output: Option<PathBuf>,

    /// Blocks written
    pub blocks: usize,

    /// Blocks that failed to parse
    pub failed_blocks: usize,

    /// Blocks flagged as duplicates of their predecessor
    pub duplicates: usize,
}

/// Main application controller for subtitle cleaning
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clean a single subtitle file into `output_dir`
    pub fn run(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<FileReport> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(input_file, output_dir, &self.config.output_suffix);
        let mut report = FileReport {
            input: input_file.to_path_buf(),
            output: None,
            blocks: 0,
            failed_blocks: 0,
            duplicates: 0,
        };

        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(report);
        }

        info!("Cleaning subtitles: {:?}", input_file);
        let mut subtitles = SubtitleFile::load(input_file, self.config.fail_fast)?;

        if self.config.flag_duplicates {
            report.duplicates = subtitles.find_duplicates().len();
        }
        if self.config.renumber {
            subtitles.renumber();
        }

        subtitles.write_to(&output_path)?;
        debug!("Wrote {} block(s) to {:?}", subtitles.blocks.len(), output_path);

        report.blocks = subtitles.blocks.len();
        report.failed_blocks = subtitles.errors.len();
        report.output = Some(output_path);
        Ok(report)
    }

    /// Clean every `.srt` file below `input_dir`.
    ///
    /// Outputs go next to their inputs unless `output_dir` is given. A file
    /// that fails is logged and does not stop the others.
    pub fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<Vec<FileReport>> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let suffix = format!(".{}.srt", self.config.output_suffix);
        let files: Vec<PathBuf> = FileManager::find_files(input_dir, "srt")?
            .into_iter()
            .filter(|path| !path.to_string_lossy().ends_with(&suffix))
            .collect();

        if files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(Vec::new());
        }

        info!("Found {} subtitle file(s) in {:?}", files.len(), input_dir);

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            let target_dir = match output_dir {
                Some(dir) => dir.to_path_buf(),
                None => file.parent().unwrap_or(Path::new(".")).to_path_buf(),
            };

            match self.run(file, &target_dir, force_overwrite) {
                Ok(report) => reports.push(report),
                Err(e) => error!("Failed to clean {:?}: {:#}", file, e),
            }
        }

        Ok(reports)
    }
}
