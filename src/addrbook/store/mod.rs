//! # Storage Layer
//!
//! The [`BookStore`] trait is the persistence gateway between the application
//! and wherever address books live.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage. One JSON document per
//!   address book, plus plain-text mailing labels.
//! - [`memory::InMemoryStore`]: Keeps "files" in a map, for tests.
//!
//! Implementations only move bytes. The bookkeeping that surrounds a load or
//! save (attaching the path, clearing the dirty flag, remembering the
//! directory) lives in the provided methods so every backend behaves the same.
//!
//! ## Storage Format
//!
//! See [`format`]. Each load or save touches exactly one file, opened and closed
//! within the call.

use crate::book::AddressBook;
use crate::error::Result;
use format::BookDocument;
use std::path::{Path, PathBuf};

pub mod format;
pub mod fs;
pub mod memory;

pub trait BookStore {
    /// Read and decode the document at `path`.
    fn read_document(&self, path: &Path) -> Result<BookDocument>;

    /// Encode and write `doc` to `path`, replacing any existing file.
    fn write_document(&mut self, path: &Path, doc: &BookDocument) -> Result<()>;

    /// Write plain text to `path`, replacing any existing file.
    fn write_text(&mut self, path: &Path, text: &str) -> Result<()>;

    /// Directory of the last file loaded, saved or printed, if any.
    fn default_directory(&self) -> Option<&Path>;

    fn set_default_directory(&mut self, dir: PathBuf);

    /// Loads a book. The result remembers `path` and is not dirty.
    fn load(&mut self, path: &Path) -> Result<AddressBook> {
        tracing::debug!(path = %path.display(), "loading address book");
        let mut book = self.read_document(path)?.into_book()?;
        book.set_file(path);
        book.mark_saved();
        self.remember_directory(path);
        tracing::info!(path = %path.display(), persons = book.len(), "address book loaded");
        Ok(book)
    }

    /// Saves a book to `path`. On success the book remembers `path` and is
    /// no longer dirty; on failure it is left as it was.
    fn save(&mut self, book: &mut AddressBook, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), persons = book.len(), "saving address book");
        let doc = BookDocument::from_book(book);
        self.write_document(path, &doc)?;
        book.set_file(path);
        book.mark_saved();
        if let Some(saved_at) = doc.saved_at {
            book.set_last_saved(saved_at);
        }
        self.remember_directory(path);
        tracing::info!(path = %path.display(), "address book saved");
        Ok(())
    }

    /// Writes the book's mailing labels to `path`.
    fn write_labels(&mut self, book: &AddressBook, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), persons = book.len(), "writing mailing labels");
        self.write_text(path, &book.mailing_labels())?;
        self.remember_directory(path);
        Ok(())
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.set_default_directory(parent.to_path_buf());
        }
    }
}
