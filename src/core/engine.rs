use crate::config::layout::LayoutConfig;
use crate::core::stages::{MirrorPaths, StageRunner};
use crate::domain::model::{RunReport, Stage, StageSummary};
use crate::domain::ports::AssetStore;
use crate::utils::error::Result;
use chrono::Utc;
use std::path::Path;

pub struct MirrorEngine<S: AssetStore> {
    store: S,
    layout: LayoutConfig,
    paths: MirrorPaths,
    dry_run: bool,
}

impl<S: AssetStore> MirrorEngine<S> {
    pub fn new(store: S, layout: LayoutConfig, src_root: &Path, dst_root: &Path) -> Self {
        let paths = MirrorPaths::new(src_root, dst_root, &layout.layout);
        Self {
            store,
            layout,
            paths,
            dry_run: false,
        }
    }

    /// Only marks the report; whether anything is written depends on the store.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn paths(&self) -> &MirrorPaths {
        &self.paths
    }

    /// Runs `stages` in the order given. Missing sources are skipped; any
    /// other filesystem error aborts the run.
    pub fn run(&self, stages: &[Stage]) -> Result<RunReport> {
        let mut report = RunReport {
            source_root: self.paths.submission.clone(),
            assets_root: self.paths.assets.clone(),
            dry_run: self.dry_run,
            started_at: Utc::now(),
            finished_at: None,
            stages: Vec::with_capacity(stages.len()),
        };

        self.store.create_dir_all(&self.paths.assets)?;

        let runner = StageRunner::new(&self.store, &self.paths, &self.layout);
        for &stage in stages {
            tracing::info!("============ {} {} ============", stage.label(), stage.title());
            let stage_report = runner.run(stage)?;
            tracing::debug!(
                "{}: {} copied, {} skipped",
                stage,
                stage_report.copied,
                stage_report.skipped
            );
            report.stages.push(StageSummary {
                stage,
                report: stage_report,
            });
        }

        report.finished_at = Some(Utc::now());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{DryRunStore, LocalStore};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_source_creates_only_assets_root() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("proj");
        let dst = temp.path().join("site");

        let engine = MirrorEngine::new(LocalStore::new(), LayoutConfig::default(), &src, &dst);
        let report = engine.run(&Stage::ALL).unwrap();

        assert!(dst.join("assets").is_dir());
        assert_eq!(fs::read_dir(dst.join("assets")).unwrap().count(), 0);
        assert_eq!(report.total_copied(), 0);
        assert_eq!(report.stages.len(), 8);
        assert!(report.total_skipped() > 0);
        assert!(report.finished_at.is_some());
    }

    #[test]
    fn test_dry_run_store_leaves_destination_empty() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("proj");
        let dst = temp.path().join("site");
        let b3 = src.join("submission/data/out/b3/1491_1492");
        fs::create_dir_all(&b3).unwrap();
        fs::write(b3.join("matches.png"), b"png").unwrap();

        let engine = MirrorEngine::new(DryRunStore::new(), LayoutConfig::default(), &src, &dst)
            .with_dry_run(true);
        let report = engine.run(&[Stage::B3]).unwrap();

        assert!(!dst.exists());
        assert!(report.dry_run);
        assert_eq!(report.total_copied(), 1);
        assert_eq!(engine.store().planned_copies(), 1);
    }
}
