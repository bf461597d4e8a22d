use crate::domain::model::CopyOutcome;
use crate::domain::ports::AssetStore;
use crate::utils::error::Result;
use std::path::Path;

/// Copies `src` to `dst` when `src` exists, creating missing parents of
/// `dst`. A missing source is logged and reported as skipped, never an error.
pub fn safe_copy<S: AssetStore + ?Sized>(store: &S, src: &Path, dst: &Path) -> Result<CopyOutcome> {
    if !store.exists(src) {
        tracing::info!("[skip] {} (missing)", src.display());
        return Ok(CopyOutcome::Skipped);
    }

    if let Some(parent) = dst.parent() {
        store.create_dir_all(parent)?;
    }
    store.copy_file(src, dst)?;
    tracing::info!("[copy] {} -> {}", src.display(), dst.display());
    Ok(CopyOutcome::Copied)
}

/// Like [`safe_copy`] for files the pipeline only sometimes writes: absence
/// is logged at debug level and yields `None`.
pub fn copy_if_present<S: AssetStore + ?Sized>(
    store: &S,
    src: &Path,
    dst: &Path,
) -> Result<Option<CopyOutcome>> {
    if !store.exists(src) {
        tracing::debug!("optional {} not present", src.display());
        return Ok(None);
    }
    safe_copy(store, src, dst).map(Some)
}
