use crate::domain::ports::AssetStore;
use crate::utils::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Depth-first search under `root` for a file named exactly `name`.
/// Files in a directory are checked before its subdirectories, both in
/// sorted order; the first hit wins. A missing root yields `None`.
pub fn find_file_named<S: AssetStore + ?Sized>(
    store: &S,
    root: &Path,
    name: &str,
) -> Result<Option<PathBuf>> {
    if !store.is_dir(root) {
        return Ok(None);
    }

    let wanted = OsStr::new(name);
    if let Some(hit) = store
        .list_files(root)?
        .into_iter()
        .find(|p| p.file_name() == Some(wanted))
    {
        return Ok(Some(hit));
    }

    for dir in store.list_dirs(root)? {
        if let Some(hit) = find_file_named(store, &dir, name)? {
            return Ok(Some(hit));
        }
    }

    Ok(None)
}

/// Immediate subdirectories of `root`, sorted; `None` when `root` is not a directory.
pub fn discover_item_dirs<S: AssetStore + ?Sized>(
    store: &S,
    root: &Path,
) -> Result<Option<Vec<PathBuf>>> {
    if !store.is_dir(root) {
        return Ok(None);
    }
    store.list_dirs(root).map(Some)
}
