// verify.rs - Re-runs example cases and compares them with their expected images

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{error, info, warn};
use wormhole::{CaseFiles, Error, bitmap, compare};

use crate::batch::{case_dirs, run_case};
use crate::config::Settings;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Exact { total: usize },
    Mismatch { mismatched: usize, total: usize, percentage: f64, diff: PathBuf },
    ShapeMismatch { expected: (usize, usize), found: (usize, usize) },
    MissingExpected(PathBuf),
    MissingGenerated(PathBuf),
    Unreadable(String),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Exact { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub name: String,
    /// Set when the case could not be simulated at all.
    pub failure: Option<String>,
    pub checkpoints: Vec<(u64, Outcome)>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none() && self.checkpoints.iter().all(|(_, outcome)| outcome.passed())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    pub cases: Vec<CaseReport>,
}

impl VerifyReport {
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CaseReport> + '_ {
        self.cases.iter().filter(|case| !case.passed())
    }
}

/// Compares `expected-<checkpoint>.png` with `<checkpoint>.png` for one checkpoint,
/// writing `diff-<checkpoint>.png` next to the generated image on mismatch.
pub fn check_checkpoint(case_dir: &Path, out_dir: &Path, checkpoint: u64) -> Outcome {
    let expected_path = case_dir.join(format!("expected-{checkpoint}.png"));
    let generated_path = out_dir.join(format!("{checkpoint}.png"));
    if !expected_path.is_file() {
        return Outcome::MissingExpected(expected_path);
    }
    if !generated_path.is_file() {
        return Outcome::MissingGenerated(generated_path);
    }

    let grids = bitmap::load_grid(&expected_path).and_then(|expected| {
        bitmap::load_grid(&generated_path).map(|generated| (expected, generated))
    });
    let (expected, generated) = match grids {
        Ok(grids) => grids,
        Err(err) => return Outcome::Unreadable(err.to_string()),
    };

    match compare(&expected, &generated) {
        Ok(comparison) if comparison.is_exact() => Outcome::Exact { total: comparison.total },
        Ok(comparison) => {
            let diff = out_dir.join(format!("diff-{checkpoint}.png"));
            if let Err(err) = bitmap::save_grid(&comparison.diff, &diff) {
                warn!("could not write diff: {err}");
            }
            Outcome::Mismatch {
                mismatched: comparison.mismatched,
                total: comparison.total,
                percentage: comparison.percentage(),
                diff,
            }
        }
        Err(Error::ShapeMismatch { expected, found }) => Outcome::ShapeMismatch { expected, found },
        Err(err) => Outcome::Unreadable(err.to_string()),
    }
}

/// Simulates every example case into `verify_output_dir` and checks each checkpoint.
pub fn verify_examples(settings: &Settings) -> Result<VerifyReport> {
    settings.validate()?;
    let dirs = case_dirs(&settings.data_dir, &settings.example_prefix)?;
    if dirs.is_empty() {
        bail!("no {}* folders found under {}", settings.example_prefix, settings.data_dir.display());
    }

    let mut report = VerifyReport::default();
    for dir in dirs {
        let files = CaseFiles::in_dir(&dir);
        let out_dir = settings.verify_output_dir.join(&files.name);
        info!("verifying {}", files.name);

        let mut case = CaseReport { name: files.name.clone(), failure: None, checkpoints: Vec::new() };
        if let Err(err) = run_case(&files, &out_dir, &settings.checkpoints) {
            error!("simulation failed for {}: {err}", files.name);
            case.failure = Some(err.to_string());
            report.cases.push(case);
            continue;
        }

        for &checkpoint in &settings.checkpoints {
            let outcome = check_checkpoint(&dir, &out_dir, checkpoint);
            log_outcome(&files.name, checkpoint, &outcome);
            case.checkpoints.push((checkpoint, outcome));
        }
        report.cases.push(case);
    }
    Ok(report)
}

fn log_outcome(case: &str, checkpoint: u64, outcome: &Outcome) {
    match outcome {
        Outcome::Exact { total } => info!("{case} cp={checkpoint}: exact match (0 / {total} pixels)"),
        Outcome::Mismatch { mismatched, total, percentage, diff } => warn!(
            "{case} cp={checkpoint}: {mismatched} mismatches / {total} ({percentage:.4}%), diff at {}",
            diff.display()
        ),
        Outcome::ShapeMismatch { expected, found } => {
            warn!("{case} cp={checkpoint}: shape mismatch {expected:?} vs {found:?}")
        }
        Outcome::MissingExpected(path) | Outcome::MissingGenerated(path) => {
            warn!("{case} cp={checkpoint}: missing {}", path.display())
        }
        Outcome::Unreadable(message) => warn!("{case} cp={checkpoint}: {message}"),
    }
}
