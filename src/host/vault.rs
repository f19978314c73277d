//! Directory-backed host collaborators
//!
//! Default implementations of [`FileStore`] and [`SettingsStore`] over a
//! plain notes directory, used by hosts that keep their vault on the
//! filesystem and by integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{FileStore, SettingsStore};
use crate::domain::embed::is_image_file;

/// File store over a notes directory with one active document
#[derive(Clone, Debug)]
pub struct DirVault {
    root: PathBuf,
    /// Path of the active document, relative to the root
    document: PathBuf,
}

impl DirVault {
    pub fn new(root: impl Into<PathBuf>, document: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let document = root.join(document.into());
        Self { root, document }
    }

    fn collect_images(dir: &Path, root: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                Self::collect_images(&path, root, out);
            } else if path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_image_file)
                && let Ok(relative) = path.strip_prefix(root)
            {
                out.push(relative.to_string_lossy().into_owned());
            }
        }
    }
}

impl FileStore for DirVault {
    fn list_images(&self) -> Vec<String> {
        let mut names = Vec::new();
        Self::collect_images(&self.root, &self.root, &mut names);
        names.sort();
        names
    }

    fn read_binary(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.root.join(name)).with_context(|| format!("reading {name}"))
    }

    fn read_document(&self) -> Result<String> {
        fs::read_to_string(&self.document)
            .with_context(|| format!("reading document {}", self.document.display()))
    }

    fn insert_text(&self, position: usize, text: &str) -> Result<()> {
        let mut document = fs::read_to_string(&self.document).unwrap_or_default();
        let mut position = position.min(document.len());
        while position > 0 && !document.is_char_boundary(position) {
            position -= 1;
        }
        document.insert_str(position, text);
        fs::write(&self.document, document)
            .with_context(|| format!("writing document {}", self.document.display()))
    }
}

/// Settings JSON persisted at a fixed path
#[derive(Clone, Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Store under the platform config directory
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self {
            path: dir.join("notecrop").join("config.json"),
        })
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn save(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, payload)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}
