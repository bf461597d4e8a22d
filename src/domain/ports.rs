use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Filesystem operations the copy stages need. Reads always hit the real
/// source tree; writes may be recorded instead of performed.
pub trait AssetStore {
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    /// Immediate subdirectories of `path`, sorted by name.
    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>>;
    /// Regular files directly inside `path`, sorted by name.
    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;
}
