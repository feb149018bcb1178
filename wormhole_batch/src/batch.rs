// batch.rs - Runs every case folder through the checkpoints

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use walkdir::WalkDir;
use wormhole::{CaseFiles, Error, Simulator, bitmap};

use crate::config::Settings;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Sub-folders of `data_dir` whose names start with `prefix`, sorted by name.
pub fn case_dirs(data_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        bail!("could not find data folder at {}", data_dir.display());
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to list {}", data_dir.display()))?;
        if entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with(prefix) {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Simulates one case, writing `<out_dir>/<checkpoint>.png` for each checkpoint.
/// Only the gap between consecutive checkpoints is simulated.
pub fn run_case(files: &CaseFiles, out_dir: &Path, checkpoints: &[u64]) -> wormhole::Result<Vec<PathBuf>> {
    let case = files.load()?;
    fs::create_dir_all(out_dir).map_err(|source| Error::Io { path: out_dir.to_path_buf(), source })?;

    let mut sim = Simulator::new(case.start, case.portals);
    let mut written = Vec::with_capacity(checkpoints.len());
    let mut previous = 0;
    for &checkpoint in checkpoints {
        let grid = sim.simulate(checkpoint - previous);
        previous = checkpoint;

        let path = out_dir.join(format!("{checkpoint}.png"));
        bitmap::save_grid(&grid, &path)?;
        info!(case = %case.name, "saved iteration {checkpoint} at {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Runs every case under `data_dir` starting with `prefix` into `output_dir`.
/// Cases missing an input image are skipped with a warning.
pub fn run_cases(settings: &Settings, prefix: &str, output_dir: &Path) -> Result<RunSummary> {
    settings.validate()?;
    let mut summary = RunSummary::default();

    for dir in case_dirs(&settings.data_dir, prefix)? {
        let files = CaseFiles::in_dir(&dir);
        match run_case(&files, &output_dir.join(&files.name), &settings.checkpoints) {
            Ok(_) => summary.processed.push(files.name),
            Err(err @ Error::MissingCaseFiles { .. }) => {
                warn!("skipping '{}': {err}", files.name);
                summary.skipped.push(files.name);
            }
            Err(err) => return Err(err).with_context(|| format!("case '{}' failed", files.name)),
        }
    }
    Ok(summary)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use wormhole::Grid;
    use wormhole::case::{HORIZONTAL_TUNNEL, STARTING_POSITION, VERTICAL_TUNNEL};

    /// Writes a case with a horizontal blinker and no portals.
    pub(crate) fn write_blinker_case(data_dir: &Path, name: &str) -> PathBuf {
        let dir = data_dir.join(name);
        fs::create_dir_all(&dir).unwrap();
        let mut start = Grid::new(5, 5);
        for col in 1..4 {
            start.set(2, col, true);
        }
        bitmap::save_grid(&start, dir.join(STARTING_POSITION)).unwrap();
        RgbImage::new(5, 5).save(dir.join(HORIZONTAL_TUNNEL)).unwrap();
        RgbImage::new(5, 5).save(dir.join(VERTICAL_TUNNEL)).unwrap();
        dir
    }

    fn settings(root: &Path, checkpoints: Vec<u64>) -> Settings {
        Settings {
            data_dir: root.join("data"),
            output_dir: root.join("output"),
            verify_output_dir: root.join("output_examples"),
            checkpoints,
            ..Settings::default()
        }
    }

    #[test]
    fn test_case_dirs_filters_and_sorts() {
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        for name in ["problem-2", "example-0", "problem-1"] {
            fs::create_dir_all(data.join(name)).unwrap();
        }
        fs::write(data.join("problem-3"), b"not a folder").unwrap();

        let dirs = case_dirs(&data, "problem-").unwrap();
        assert_eq!(dirs, vec![data.join("problem-1"), data.join("problem-2")]);
    }

    #[test]
    fn test_missing_data_dir_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        assert!(case_dirs(&root.path().join("nope"), "problem-").is_err());
    }

    #[test]
    fn test_run_writes_each_checkpoint() {
        let root = tempfile::tempdir().unwrap();
        let settings = settings(root.path(), vec![1, 2, 5]);
        write_blinker_case(&settings.data_dir, "problem-a");

        let summary = run_cases(&settings, "problem-", &settings.output_dir).unwrap();
        assert_eq!(summary.processed, vec!["problem-a".to_owned()]);

        let out = settings.output_dir.join("problem-a");
        let vertical = bitmap::load_grid(out.join("1.png")).unwrap();
        let horizontal = bitmap::load_grid(out.join("2.png")).unwrap();
        assert!(vertical.get(1, 2) && vertical.get(3, 2));
        assert!(horizontal.get(2, 1) && horizontal.get(2, 3));
        assert_eq!(bitmap::load_grid(out.join("5.png")).unwrap(), vertical);
    }

    #[test]
    fn test_incomplete_case_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let settings = settings(root.path(), vec![1]);
        write_blinker_case(&settings.data_dir, "problem-a");
        let broken = write_blinker_case(&settings.data_dir, "problem-b");
        fs::remove_file(broken.join(VERTICAL_TUNNEL)).unwrap();

        let summary = run_cases(&settings, "problem-", &settings.output_dir).unwrap();
        assert_eq!(summary.processed, vec!["problem-a".to_owned()]);
        assert_eq!(summary.skipped, vec!["problem-b".to_owned()]);
        assert!(!settings.output_dir.join("problem-b").exists());
    }

    #[test]
    fn test_portals_change_the_result() {
        let root = tempfile::tempdir().unwrap();
        let settings = settings(root.path(), vec![1]);
        let dir = write_blinker_case(&settings.data_dir, "problem-w");

        // Vertical portal between (3,2), just below the blinker, and the corner (0,0).
        let mut vertical = RgbImage::new(5, 5);
        vertical.put_pixel(2, 3, Rgb([200, 0, 200]));
        vertical.put_pixel(0, 0, Rgb([200, 0, 200]));
        vertical.save(dir.join(VERTICAL_TUNNEL)).unwrap();

        run_cases(&settings, "problem-", &settings.output_dir).unwrap();
        let grid = bitmap::load_grid(settings.output_dir.join("problem-w").join("1.png")).unwrap();

        // (3,2) steps up through the portal and misses the blinker; the corner
        // steps up into it and sees all three cells.
        let mut expected = Grid::new(5, 5);
        for (row, col) in [(0, 0), (1, 2), (2, 2)] {
            expected.set(row, col, true);
        }
        assert_eq!(grid, expected);
    }
}
