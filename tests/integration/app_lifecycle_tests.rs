/*!
 * Tests for the application controller lifecycle
 */

use anyhow::Result;
use std::fs;

use subcleaner::app_config::Config;
use subcleaner::app_controller::Controller;
use crate::common;

#[test]
fn test_controller_withInvalidConfig_shouldRefuseToStart() {
    let config = Config {
        output_suffix: String::new(),
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_controller_run_withSubtitleFile_shouldWriteCleanedCopy() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::MESSY_SRT)?;
    let controller = Controller::with_config(Config::default())?;

    let report = controller.run(&input, temp_dir.path(), false)?;

    let expected_output = temp_dir.path().join("movie.clean.srt");
    assert_eq!(report.output.as_deref(), Some(expected_output.as_path()));
    assert_eq!(report.blocks, 4);
    assert_eq!(report.failed_blocks, 1);
    assert_eq!(report.duplicates, 1);

    let written = fs::read_to_string(&expected_output)?;
    assert!(written.starts_with("1\n00:00:01,500 --> 00:00:03,250\n"));
    assert!(written.contains("4\n00:00:08,000 --> 00:00:09,000\nBye.\n"));
    Ok(())
}

#[test]
fn test_controller_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = Controller::with_config(Config::default())?;

    let first = controller.run(&input, temp_dir.path(), false)?;
    assert!(first.output.is_some());

    let skipped = controller.run(&input, temp_dir.path(), false)?;
    assert!(skipped.output.is_none());
    assert_eq!(skipped.blocks, 0);

    let forced = controller.run(&input, temp_dir.path(), true)?;
    assert!(forced.output.is_some());
    assert_eq!(forced.blocks, 3);
    Ok(())
}

#[test]
fn test_controller_run_withoutRenumbering_shouldKeepOriginalIndexes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text = "10\n00:00:01,000 --> 00:00:02,000\nA\n\n20\n00:00:02,000 --> 00:00:03,000\nB\n";
    let input = common::create_test_file(temp_dir.path(), "gaps.srt", text)?;
    let config = Config {
        renumber: false,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;

    let report = controller.run(&input, temp_dir.path(), false)?;
    let written = fs::read_to_string(report.output.expect("output written"))?;

    assert!(written.starts_with("10\n"));
    assert!(written.contains("\n20\n"));
    Ok(())
}

#[test]
fn test_controller_run_withFailFast_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::MESSY_SRT)?;
    let config = Config {
        fail_fast: true,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;

    assert!(controller.run(&input, temp_dir.path(), false).is_err());
    assert!(!temp_dir.path().join("movie.clean.srt").exists());
    Ok(())
}

#[test]
fn test_controller_run_folder_withNestedFiles_shouldCleanEachOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_file(temp_dir.path(), "season1/b.srt", common::MESSY_SRT)?;
    let controller = Controller::with_config(Config::default())?;

    let reports = controller.run_folder(temp_dir.path(), None, false)?;
    assert_eq!(reports.len(), 2);
    assert!(temp_dir.path().join("a.clean.srt").exists());
    assert!(temp_dir.path().join("season1").join("b.clean.srt").exists());

    // cleaned outputs are not picked up as inputs
    let rerun = controller.run_folder(temp_dir.path(), None, true)?;
    assert_eq!(rerun.len(), 2);
    Ok(())
}

#[test]
fn test_controller_run_folder_withMissingDirectory_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert!(controller.run_folder(std::path::Path::new("/no/such/dir"), None, false).is_err());
    Ok(())
}
