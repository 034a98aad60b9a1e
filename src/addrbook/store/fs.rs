use super::format::BookDocument;
use super::BookStore;
use crate::error::{AddrBookError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores address books as JSON documents on the local filesystem.
#[derive(Debug, Default)]
pub struct FileStore {
    default_dir: Option<PathBuf>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a known default directory (e.g. from the last session).
    pub fn with_default_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_dir = Some(dir.into());
        self
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(AddrBookError::Io)?;
            }
        }
        Ok(())
    }
}

impl BookStore for FileStore {
    fn read_document(&self, path: &Path) -> Result<BookDocument> {
        let content = fs::read_to_string(path).map_err(AddrBookError::Io)?;
        BookDocument::from_json(&content).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "rejected address book file");
        })
    }

    fn write_document(&mut self, path: &Path, doc: &BookDocument) -> Result<()> {
        let content = doc.to_json()?;
        self.ensure_parent(path)?;
        fs::write(path, content).map_err(AddrBookError::Io)?;
        Ok(())
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.ensure_parent(path)?;
        fs::write(path, text).map_err(AddrBookError::Io)?;
        Ok(())
    }

    fn default_directory(&self) -> Option<&Path> {
        self.default_dir.as_deref()
    }

    fn set_default_directory(&mut self, dir: PathBuf) {
        self.default_dir = Some(dir);
    }
}
