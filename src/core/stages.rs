use crate::config::layout::{LayoutConfig, LayoutPaths};
use crate::core::discovery::{discover_item_dirs, find_file_named};
use crate::core::safe_copy::{copy_if_present, safe_copy};
use crate::domain::model::{CopyOutcome, Stage, StageReport};
use crate::domain::ports::AssetStore;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

const NO_FILES: &[&str] = &[];

const A2_REQUIRED: &[&str] = &["matches.png", "points.json", "H_matrix.txt"];
const A2_OPTIONAL: &[&str] = &["Ab_preview.txt"];
const A3_TIMINGS: &str = "a3_timings.csv";
const A4_REQUIRED: &[&str] = &["mosaic.jpg", "mosaic_vis.png"];
const A4_OPTIONAL: &[&str] = &["used_H.txt", "meta.json", "debug_canvas_bounds.json"];
const B1_ROLES: &[&str] = &["left", "center"];
const B1_REQUIRED: &[&str] = &["harris_overlay.png", "anms_overlay.png"];
const B2_REQUIRED: &[&str] = &["features_grid.png"];
const B2_OPTIONAL: &[&str] = &["keypoints_xy.npy", "descs.npy", "descs_preview.txt"];
const B3_REQUIRED: &[&str] = &["matches.png"];
const B4_OPTIONAL: &[&str] = &["mosaic.jpg", "matches_inliers.png", "H.txt", "inliers_mask.npy"];

/// Absolute roots on both sides of the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPaths {
    /// `<src>/submission`
    pub submission: PathBuf,
    /// `<src>/submission/data`
    pub data: PathBuf,
    /// `<src>/submission/data/out`
    pub out: PathBuf,
    /// `<dst>/assets`
    pub assets: PathBuf,
}

impl MirrorPaths {
    pub fn new(src_root: &Path, dst_root: &Path, layout: &LayoutPaths) -> Self {
        let submission = src_root.join(&layout.submission_dir);
        let data = submission.join("data");
        let out = data.join("out");
        Self {
            submission,
            data,
            out,
            assets: dst_root.join(&layout.assets_dir),
        }
    }

    pub fn stage_out(&self, stage: Stage) -> PathBuf {
        self.out.join(stage.dir_name())
    }

    pub fn stage_assets(&self, stage: Stage) -> PathBuf {
        self.assets.join(stage.dir_name())
    }
}

pub struct StageRunner<'a, S: AssetStore + ?Sized> {
    store: &'a S,
    paths: &'a MirrorPaths,
    layout: &'a LayoutConfig,
}

impl<'a, S: AssetStore + ?Sized> StageRunner<'a, S> {
    pub fn new(store: &'a S, paths: &'a MirrorPaths, layout: &'a LayoutConfig) -> Self {
        Self {
            store,
            paths,
            layout,
        }
    }

    pub fn run(&self, stage: Stage) -> Result<StageReport> {
        match stage {
            Stage::A1 => self.mirror_originals(),
            Stage::A2 => self.mirror_per_pair(stage, A2_REQUIRED, A2_OPTIONAL),
            Stage::A3 => self.mirror_rectifications(),
            Stage::A4 => self.mirror_per_pair(stage, A4_REQUIRED, A4_OPTIONAL),
            Stage::B1 => self.mirror_harris(),
            Stage::B2 => self.mirror_descriptors(),
            Stage::B3 => self.mirror_per_pair(stage, B3_REQUIRED, NO_FILES),
            Stage::B4 => self.mirror_per_pair(stage, NO_FILES, B4_OPTIONAL),
        }
    }

    /// Copies one item directory. An absent source directory yields one skip
    /// per required file and no destination directory; a present one always
    /// gets its destination directory, even if nothing ends up in it.
    fn mirror_item<R, O>(
        &self,
        src_dir: &Path,
        dst_dir: &Path,
        required: &[R],
        optional: &[O],
        report: &mut StageReport,
    ) -> Result<()>
    where
        R: AsRef<str>,
        O: AsRef<str>,
    {
        if !self.store.is_dir(src_dir) {
            for name in required {
                let src = src_dir.join(name.as_ref());
                tracing::info!("[skip] {} (missing)", src.display());
                report.record(CopyOutcome::Skipped, src);
            }
            return Ok(());
        }

        self.store.create_dir_all(dst_dir)?;

        for name in required {
            let src = src_dir.join(name.as_ref());
            let outcome = safe_copy(self.store, &src, &dst_dir.join(name.as_ref()))?;
            report.record(outcome, src);
        }

        for name in optional {
            let src = src_dir.join(name.as_ref());
            if let Some(outcome) = copy_if_present(self.store, &src, &dst_dir.join(name.as_ref()))? {
                report.record(outcome, src);
            }
        }

        Ok(())
    }

    fn mirror_per_pair<R, O>(&self, stage: Stage, required: &[R], optional: &[O]) -> Result<StageReport>
    where
        R: AsRef<str>,
        O: AsRef<str>,
    {
        let mut report = StageReport::default();
        let src_root = self.paths.stage_out(stage);
        let dst_root = self.paths.stage_assets(stage);

        for pair in &self.layout.pairs {
            self.mirror_item(
                &src_root.join(&pair.tag),
                &dst_root.join(&pair.tag),
                required,
                optional,
                &mut report,
            )?;
        }

        Ok(report)
    }

    /// Preferred location first, then a search of the whole data tree.
    fn locate_original(&self, preferred_dir: &Path, name: &str) -> Result<PathBuf> {
        let preferred = preferred_dir.join(name);
        if self.store.exists(&preferred) {
            return Ok(preferred);
        }

        match find_file_named(self.store, &self.paths.data, name)? {
            Some(found) => {
                tracing::debug!("{} found outside {}: {}", name, preferred_dir.display(), found.display());
                Ok(found)
            }
            None => Ok(preferred),
        }
    }

    fn mirror_originals(&self) -> Result<StageReport> {
        let mut report = StageReport::default();
        let dst_dir = self.paths.stage_assets(Stage::A1);

        for pair in &self.layout.pairs {
            let preferred_dir = self
                .paths
                .data
                .join("converted")
                .join(format!("mosaic_{}", pair.tag));

            for (name, role) in [(&pair.left, "left"), (&pair.center, "center")] {
                let src = self.locate_original(&preferred_dir, name)?;
                let dst = dst_dir.join(format!("{}_{}.jpg", pair.tag, role));
                let outcome = safe_copy(self.store, &src, &dst)?;
                report.record(outcome, src);
            }
        }

        Ok(report)
    }

    fn mirror_rectifications(&self) -> Result<StageReport> {
        let mut report = StageReport::default();
        let src_root = self.paths.stage_out(Stage::A3);
        let dst_root = self.paths.stage_assets(Stage::A3);

        for entry in &self.layout.rectification {
            let label = &entry.label;
            let dst_dir = dst_root.join(label);

            let original = self.paths.submission.join(&entry.source);
            let outcome = safe_copy(
                self.store,
                &original,
                &dst_dir.join(format!("{}_original.jpg", label)),
            )?;
            report.record(outcome, original);

            let required = [
                format!("{}_rect_nn.jpg", label),
                format!("{}_rect_bil.jpg", label),
                format!("{}_rectified_comparison.png", label),
                format!("{}_H.txt", label),
                format!("{}_meta.json", label),
            ];
            self.mirror_item(&src_root.join(label), &dst_dir, &required[..], NO_FILES, &mut report)?;
        }

        let timings = src_root.join(A3_TIMINGS);
        let outcome = safe_copy(self.store, &timings, &dst_root.join(A3_TIMINGS))?;
        report.record(outcome, timings);

        Ok(report)
    }

    fn mirror_harris(&self) -> Result<StageReport> {
        let mut report = StageReport::default();
        let src_root = self.paths.stage_out(Stage::B1);
        let dst_root = self.paths.stage_assets(Stage::B1);

        for pair in &self.layout.pairs {
            for role in B1_ROLES {
                let item = format!("{}_{}", pair.tag, role);
                self.mirror_item(
                    &src_root.join(&item),
                    &dst_root.join(&item),
                    B1_REQUIRED,
                    NO_FILES,
                    &mut report,
                )?;
            }
        }

        Ok(report)
    }

    /// Items come from whatever subdirectories the pipeline wrote, not the pair table.
    fn mirror_descriptors(&self) -> Result<StageReport> {
        let mut report = StageReport::default();
        let src_root = self.paths.stage_out(Stage::B2);
        let dst_root = self.paths.stage_assets(Stage::B2);

        let Some(item_dirs) = discover_item_dirs(self.store, &src_root)? else {
            tracing::info!("[skip] {} (missing)", src_root.display());
            report.record(CopyOutcome::Skipped, src_root);
            return Ok(report);
        };

        tracing::debug!("B.2: discovered {} item directories", item_dirs.len());

        for src_dir in item_dirs {
            let Some(item) = src_dir.file_name() else {
                continue;
            };
            let dst_dir = dst_root.join(item);
            self.mirror_item(&src_dir, &dst_dir, B2_REQUIRED, B2_OPTIONAL, &mut report)?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStore;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, contents: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn setup() -> (TempDir, MirrorPaths, LayoutConfig) {
        let temp = TempDir::new().unwrap();
        let layout = LayoutConfig::default();
        let paths = MirrorPaths::new(
            &temp.path().join("proj"),
            &temp.path().join("site"),
            &layout.layout,
        );
        (temp, paths, layout)
    }

    #[test]
    fn test_mirror_paths_follow_layout() {
        let layout = LayoutPaths {
            submission_dir: "hand_in".to_string(),
            assets_dir: "static".to_string(),
        };
        let paths = MirrorPaths::new(Path::new("/p"), Path::new("/w"), &layout);
        assert_eq!(paths.out, PathBuf::from("/p/hand_in/data/out"));
        assert_eq!(paths.stage_out(Stage::B3), PathBuf::from("/p/hand_in/data/out/b3"));
        assert_eq!(paths.stage_assets(Stage::A1), PathBuf::from("/w/static/a1"));
    }

    #[test]
    fn test_a2_copies_required_and_optional_files() {
        let (_temp, paths, layout) = setup();
        let src = paths.stage_out(Stage::A2).join("1491_1492");
        touch(&src.join("matches.png"), b"m");
        touch(&src.join("H_matrix.txt"), b"h");
        touch(&src.join("Ab_preview.txt"), b"ab");

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::A2).unwrap();

        let dst = paths.stage_assets(Stage::A2).join("1491_1492");
        assert!(dst.join("matches.png").exists());
        assert!(dst.join("H_matrix.txt").exists());
        assert!(dst.join("Ab_preview.txt").exists());
        assert!(!dst.join("points.json").exists());
        assert_eq!(report.copied, 3);
        // points.json for this pair plus three files for each of the four absent pairs
        assert_eq!(report.skipped, 1 + 3 * 4);
        assert!(report.skipped_paths.contains(&src.join("points.json")));
    }

    #[test]
    fn test_absent_item_dir_creates_no_destination() {
        let (_temp, paths, layout) = setup();
        fs::create_dir_all(paths.stage_out(Stage::B3).join("1495_1496")).unwrap();

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::B3).unwrap();

        let dst_root = paths.stage_assets(Stage::B3);
        assert!(dst_root.join("1495_1496").is_dir());
        assert!(!dst_root.join("1491_1492").exists());
        assert_eq!(report.copied, 0);
        assert_eq!(report.skipped, 5);
    }

    #[test]
    fn test_a1_falls_back_to_recursive_search() {
        let (_temp, paths, layout) = setup();
        let preferred = paths.data.join("converted/mosaic_1491_1492");
        touch(&preferred.join("IMG_1491.jpg"), b"left");
        touch(&paths.data.join("raw/phone/IMG_1492.jpg"), b"center");

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::A1).unwrap();

        let a1 = paths.stage_assets(Stage::A1);
        assert_eq!(fs::read(a1.join("1491_1492_left.jpg")).unwrap(), b"left");
        assert_eq!(fs::read(a1.join("1491_1492_center.jpg")).unwrap(), b"center");
        assert_eq!(report.copied, 2);
        assert_eq!(report.skipped, 8);
    }

    #[test]
    fn test_a3_copies_original_and_timings() {
        let (_temp, paths, layout) = setup();
        touch(
            &paths.submission.join("data/converted/rect_box/box_bottom.jpg"),
            b"orig",
        );
        let out = paths.stage_out(Stage::A3);
        touch(&out.join("box/box_rect_bil.jpg"), b"bil");
        touch(&out.join("a3_timings.csv"), b"label,ms\n");

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::A3).unwrap();

        let dst = paths.stage_assets(Stage::A3);
        assert_eq!(fs::read(dst.join("box/box_original.jpg")).unwrap(), b"orig");
        assert!(dst.join("box/box_rect_bil.jpg").exists());
        assert!(dst.join("a3_timings.csv").exists());
        assert!(!dst.join("poster").exists());
        assert_eq!(report.copied, 3);
    }

    #[test]
    fn test_b1_mirrors_left_and_center_roles() {
        let (_temp, paths, layout) = setup();
        let out = paths.stage_out(Stage::B1);
        touch(&out.join("1513_1514_left/harris_overlay.png"), b"h");
        touch(&out.join("1513_1514_center/anms_overlay.png"), b"a");

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::B1).unwrap();

        let dst = paths.stage_assets(Stage::B1);
        assert!(dst.join("1513_1514_left/harris_overlay.png").exists());
        assert!(dst.join("1513_1514_center/anms_overlay.png").exists());
        assert_eq!(report.copied, 2);
        assert_eq!(report.skipped, 2 + 8 * 2);
    }

    #[test]
    fn test_b2_missing_root_is_single_skip() {
        let (_temp, paths, layout) = setup();

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::B2).unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.skipped_paths, vec![paths.stage_out(Stage::B2)]);
        assert!(!paths.stage_assets(Stage::B2).exists());
    }

    #[test]
    fn test_b4_only_copies_present_files_silently() {
        let (_temp, paths, layout) = setup();
        let src = paths.stage_out(Stage::B4).join("1497_1498");
        touch(&src.join("H.txt"), b"1 0 0");

        let store = LocalStore::new();
        let report = StageRunner::new(&store, &paths, &layout).run(Stage::B4).unwrap();

        let dst = paths.stage_assets(Stage::B4).join("1497_1498");
        assert!(dst.join("H.txt").exists());
        assert!(!dst.join("mosaic.jpg").exists());
        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped, 0);
    }
}
