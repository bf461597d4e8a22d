use crate::core::stages::MirrorPaths;
use crate::domain::model::{CopyOutcome, PairTag, Stage, StageReport};
use crate::domain::ports::AssetStore;
use crate::utils::error::Result;

/// Suffixes of the files worth publishing from a B.2 directory.
pub const B2_EXTENSIONS: [&str; 3] = [".png", ".npy", ".txt"];

const B2_ROLES: [&str; 2] = ["_left", "_center"];

fn is_publishable(name: &str) -> bool {
    B2_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Copies `<tag>_left` and `<tag>_center` descriptor directories for every
/// pair, keeping only `.png`, `.npy` and `.txt` files. Missing pair
/// directories are reported and skipped.
pub fn export_b2<S: AssetStore + ?Sized>(
    store: &S,
    paths: &MirrorPaths,
    pairs: &[PairTag],
) -> Result<StageReport> {
    let src_b2 = paths.stage_out(Stage::B2);
    let dst_b2 = paths.stage_assets(Stage::B2);
    store.create_dir_all(&dst_b2)?;

    let mut report = StageReport::default();

    for pair in pairs {
        for role in B2_ROLES {
            let item = format!("{}{}", pair.tag, role);
            let src_dir = src_b2.join(&item);
            let dst_dir = dst_b2.join(&item);

            if !store.exists(&src_dir) {
                tracing::info!("[skip] {} not found.", src_dir.display());
                report.record(CopyOutcome::Skipped, src_dir);
                continue;
            }
            store.create_dir_all(&dst_dir)?;

            for src in store.list_files(&src_dir)? {
                let Some(name) = src.file_name() else {
                    continue;
                };
                if !is_publishable(&name.to_string_lossy()) {
                    tracing::debug!("ignoring {}", src.display());
                    continue;
                }
                store.copy_file(&src, &dst_dir.join(name))?;
                report.record(CopyOutcome::Copied, src);
            }

            tracing::info!("[ok] Copied {} → {}", item, dst_dir.display());
        }
    }

    Ok(report)
}
