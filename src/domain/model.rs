use crate::utils::error::{MirrorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A left/center image pair from the mosaic dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairTag {
    pub tag: String,
    pub left: String,
    pub center: String,
}

impl PairTag {
    pub fn new(tag: &str, left: &str, center: &str) -> Self {
        Self {
            tag: tag.to_string(),
            left: left.to_string(),
            center: center.to_string(),
        }
    }
}

/// One image fed to the rectification batch; `source` is relative to the submission root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectEntry {
    pub label: String,
    pub source: String,
}

impl RectEntry {
    pub fn new(label: &str, source: &str) -> Self {
        Self {
            label: label.to_string(),
            source: source.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    A1,
    A2,
    A3,
    A4,
    B1,
    B2,
    B3,
    B4,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::A1,
        Stage::A2,
        Stage::A3,
        Stage::A4,
        Stage::B1,
        Stage::B2,
        Stage::B3,
        Stage::B4,
    ];

    /// Directory name used on both sides, e.g. `a1`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Stage::A1 => "a1",
            Stage::A2 => "a2",
            Stage::A3 => "a3",
            Stage::A4 => "a4",
            Stage::B1 => "b1",
            Stage::B2 => "b2",
            Stage::B3 => "b3",
            Stage::B4 => "b4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::A1 => "A.1",
            Stage::A2 => "A.2",
            Stage::A3 => "A.3",
            Stage::A4 => "A.4",
            Stage::B1 => "B.1",
            Stage::B2 => "B.2",
            Stage::B3 => "B.3",
            Stage::B4 => "B.4",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::A1 => "originals",
            Stage::A2 => "correspondences",
            Stage::A3 => "rectifications",
            Stage::A4 => "manual mosaics",
            Stage::B1 => "Harris + ANMS",
            Stage::B2 => "descriptors",
            Stage::B3 => "matches",
            Stage::B4 => "RANSAC + auto-stitch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '.')
            .collect::<String>()
            .to_ascii_lowercase();

        Stage::ALL
            .into_iter()
            .find(|stage| stage.dir_name() == normalized)
            .ok_or_else(|| MirrorError::UnknownStage {
                label: s.to_string(),
            })
    }
}

/// Parses a comma-separated stage list such as `a1,B.2`.
pub fn parse_stage_list(list: &str) -> Result<Vec<Stage>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Stage::from_str)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied,
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub copied: usize,
    pub skipped: usize,
    pub skipped_paths: Vec<PathBuf>,
}

impl StageReport {
    pub fn record(&mut self, outcome: CopyOutcome, src: PathBuf) {
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::Skipped => {
                self.skipped += 1;
                self.skipped_paths.push(src);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: Stage,
    #[serde(flatten)]
    pub report: StageReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub source_root: PathBuf,
    pub assets_root: PathBuf,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub stages: Vec<StageSummary>,
}

impl RunReport {
    pub fn total_copied(&self) -> usize {
        self.stages.iter().map(|s| s.report.copied).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.stages.iter().map(|s| s.report.skipped).sum()
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| &s.report)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
