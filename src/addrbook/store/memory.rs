use super::format::BookDocument;
use super::BookStore;
use crate::error::{AddrBookError, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: HashMap<PathBuf, String>,
    texts: HashMap<PathBuf, String>,
    read_only: HashSet<PathBuf>,
    default_dir: Option<PathBuf>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write to `path` fail with a permission error.
    pub fn deny_writes(&mut self, path: impl Into<PathBuf>) {
        self.read_only.insert(path.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }

    /// Raw JSON of a stored book.
    pub fn document(&self, path: &Path) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }

    /// Text written by `write_text` (mailing labels).
    pub fn text(&self, path: &Path) -> Option<&str> {
        self.texts.get(path).map(String::as_str)
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.read_only.contains(path) {
            return Err(AddrBookError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            )));
        }
        Ok(())
    }
}

impl BookStore for InMemoryStore {
    fn read_document(&self, path: &Path) -> Result<BookDocument> {
        let content = self.documents.get(path).ok_or_else(|| {
            AddrBookError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })?;
        BookDocument::from_json(content)
    }

    fn write_document(&mut self, path: &Path, doc: &BookDocument) -> Result<()> {
        self.check_writable(path)?;
        self.documents.insert(path.to_path_buf(), doc.to_json()?);
        Ok(())
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.check_writable(path)?;
        self.texts.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn default_directory(&self) -> Option<&Path> {
        self.default_dir.as_deref()
    }

    fn set_default_directory(&mut self, dir: PathBuf) {
        self.default_dir = Some(dir);
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::book::fixtures::sample_book;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Stores the sample book at `path`.
        pub fn with_sample_book(mut self, path: &str) -> Self {
            let mut book = sample_book();
            self.store.save(&mut book, Path::new(path)).unwrap();
            self
        }

        pub fn with_read_only(mut self, path: &str) -> Self {
            self.store.deny_writes(path);
            self
        }
    }
}
