//! Filesystem infrastructure — implements the `LocalFs` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Production filesystem implementation of `LocalFs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl crate::application::ports::LocalFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading file {}", path.display()))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(path)
            .with_context(|| format!("reading directory {}", path.display()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("reading directory {}", path.display()))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn home_dir(&self) -> Result<PathBuf> {
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
    }
}
