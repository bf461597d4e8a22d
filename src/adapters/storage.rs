use crate::domain::ports::AssetStore;
use crate::utils::error::Result;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

fn sorted_entries(path: &Path, want_dirs: bool) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();
        // follow symlinks, matching how the stages check existence
        let keep = if want_dirs {
            entry_path.is_dir()
        } else {
            entry_path.is_file()
        };
        if keep {
            entries.push(entry_path);
        }
    }
    entries.sort();
    Ok(entries)
}

#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl AssetStore for LocalStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        sorted_entries(path, true)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        sorted_entries(path, false)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        fs::copy(src, dst)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    CreateDir(PathBuf),
    Copy { src: PathBuf, dst: PathBuf },
}

/// Reads the real source tree but only records writes.
#[derive(Debug, Default)]
pub struct DryRunStore {
    planned: RefCell<Vec<PlannedAction>>,
}

impl DryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planned(&self) -> Vec<PlannedAction> {
        self.planned.borrow().clone()
    }

    pub fn planned_copies(&self) -> usize {
        self.planned
            .borrow()
            .iter()
            .filter(|a| matches!(a, PlannedAction::Copy { .. }))
            .count()
    }
}

impl AssetStore for DryRunStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        sorted_entries(path, true)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        sorted_entries(path, false)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut planned = self.planned.borrow_mut();
        let action = PlannedAction::CreateDir(path.to_path_buf());
        if !path.is_dir() && !planned.contains(&action) {
            planned.push(action);
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        self.planned.borrow_mut().push(PlannedAction::Copy {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
        Ok(())
    }
}
