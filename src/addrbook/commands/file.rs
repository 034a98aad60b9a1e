//! New / open / save / save-as.

use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prompt::{FilePurpose, Prompter};
use crate::store::BookStore;
use std::path::Path;

use super::helpers::{offer_save_changes, replace_book, Proceed};

/// Replaces the current book with an empty one, after offering to save.
pub fn new_book<S: BookStore, P: Prompter>(
    book: &mut AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    if offer_save_changes(book, store, prompter) == Proceed::No {
        return Ok(CmdResult::cancelled());
    }
    tracing::debug!("starting a new address book");
    replace_book(book, AddressBook::new());
    Ok(CmdResult::default().with_message(CmdMessage::info("New address book")))
}

/// Offers to save, asks for a file, then loads it in place of the current book.
/// A failed load leaves the current book as it was.
pub fn open<S: BookStore, P: Prompter>(
    book: &mut AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    if offer_save_changes(book, store, prompter) == Proceed::No {
        return Ok(CmdResult::cancelled());
    }
    let start = store.default_directory().map(Path::to_path_buf);
    let Some(path) = prompter.choose_file(FilePurpose::Open, start.as_deref()) else {
        return Ok(CmdResult::cancelled());
    };
    open_path(book, store, &path)
}

/// Loads `path` in place of the current book, without any prompting.
pub fn open_path<S: BookStore>(
    book: &mut AddressBook,
    store: &mut S,
    path: &Path,
) -> Result<CmdResult> {
    let loaded = store.load(path)?;
    let count = loaded.len();
    replace_book(book, loaded);
    Ok(CmdResult::default().with_message(CmdMessage::info(format!(
        "Opened {} ({} {})",
        book.title(),
        count,
        if count == 1 { "person" } else { "people" }
    ))))
}

/// Saves to the book's file, or asks for one if it has none.
/// `cancelled` is set when the user backs out of choosing a file.
pub fn save<S: BookStore, P: Prompter>(
    book: &mut AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    match book.file().map(Path::to_path_buf) {
        Some(path) => save_to(book, store, &path),
        None => save_as(book, store, prompter),
    }
}

pub fn save_as<S: BookStore, P: Prompter>(
    book: &mut AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    let start = store.default_directory().map(Path::to_path_buf);
    let Some(path) = prompter.choose_file(FilePurpose::Save, start.as_deref()) else {
        return Ok(CmdResult::cancelled());
    };
    save_to(book, store, &path)
}

pub fn save_to<S: BookStore>(
    book: &mut AddressBook,
    store: &mut S,
    path: &Path,
) -> Result<CmdResult> {
    store.save(book, path)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Saved {}",
        path.display()
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::fixtures::sample_book;
    use crate::error::AddrBookError;
    use crate::model::ContactInfo;
    use crate::prompt::scripted::ScriptedPrompter;
    use crate::prompt::SaveChoice;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    #[test]
    fn new_on_clean_book_replaces_without_asking() {
        let mut book = sample_book();
        let mut store = InMemoryStore::new();
        let mut prompter = ScriptedPrompter::new();

        new_book(&mut book, &mut store, &mut prompter).unwrap();

        assert!(book.is_empty());
        assert_eq!(book.title(), "Untitled");
        assert!(!book.is_dirty());
    }

    #[test]
    fn new_is_abandoned_when_user_cancels() {
        let mut book = sample_book();
        book.sort_by_name();
        let mut store = InMemoryStore::new();
        let mut prompter = ScriptedPrompter::new().with_save_choice(SaveChoice::Cancel);

        let result = new_book(&mut book, &mut store, &mut prompter).unwrap();

        assert!(result.cancelled);
        assert_eq!(book.len(), 8);
        assert!(book.is_dirty());
    }

    #[test]
    fn open_loads_chosen_file() {
        let mut store = StoreFixture::new().with_sample_book("/books/pets.json").store;
        let mut book = AddressBook::new();
        let mut prompter = ScriptedPrompter::new().with_file(Some("/books/pets.json"));

        open(&mut book, &mut store, &mut prompter).unwrap();

        assert_eq!(book.len(), 8);
        assert_eq!(book.title(), "pets.json");
        assert!(!book.is_dirty());
        // The fixture's save set the default directory the dialog starts in.
        assert_eq!(
            prompter.file_requests,
            vec![(FilePurpose::Open, Some(PathBuf::from("/books")))]
        );
    }

    #[test]
    fn open_offers_to_save_first() {
        let mut store = StoreFixture::new().with_sample_book("/books/pets.json").store;
        let mut book = AddressBook::new();
        book.add_person("Zelda", "Zebra", ContactInfo::default());
        let mut prompter = ScriptedPrompter::new()
            .with_save_choice(SaveChoice::Yes)
            .with_file(Some("/books/mine.json"))
            .with_file(Some("/books/pets.json"));

        open(&mut book, &mut store, &mut prompter).unwrap();

        assert!(store.contains(Path::new("/books/mine.json")));
        assert_eq!(book.title(), "pets.json");
        assert_eq!(prompter.file_requests[0].0, FilePurpose::Save);
        assert_eq!(prompter.file_requests[1].0, FilePurpose::Open);
    }

    #[test]
    fn failed_open_keeps_current_book() {
        let mut store = InMemoryStore::new();
        let mut book = sample_book();
        let mut prompter = ScriptedPrompter::new().with_file(Some("/missing.json"));

        let err = open(&mut book, &mut store, &mut prompter).unwrap_err();

        assert!(matches!(err, AddrBookError::Io(_)));
        assert_eq!(book.len(), 8);
    }

    #[test]
    fn cancelled_open_dialog_is_a_no_op() {
        let mut store = InMemoryStore::new();
        let mut book = sample_book();
        let mut prompter = ScriptedPrompter::new().with_file(None);

        let result = open(&mut book, &mut store, &mut prompter).unwrap();

        assert!(result.cancelled);
        assert_eq!(book.len(), 8);
    }

    #[test]
    fn save_uses_current_file() {
        let mut store = InMemoryStore::new();
        let mut book = sample_book();
        book.set_file("/books/a.json");
        book.sort_by_zip();
        let mut prompter = ScriptedPrompter::new();

        let result = save(&mut book, &mut store, &mut prompter).unwrap();

        assert!(!result.cancelled);
        assert!(store.contains(Path::new("/books/a.json")));
        assert!(prompter.file_requests.is_empty());
        assert!(!book.is_dirty());
    }

    #[test]
    fn save_without_file_falls_back_to_save_as() {
        let mut store = InMemoryStore::new();
        let mut book = sample_book();
        let mut prompter = ScriptedPrompter::new().with_file(Some("/books/new.json"));

        save(&mut book, &mut store, &mut prompter).unwrap();

        assert_eq!(prompter.file_requests, vec![(FilePurpose::Save, None)]);
        assert_eq!(book.file(), Some(Path::new("/books/new.json")));
    }

    #[test]
    fn save_as_cancel_reports_cancelled() {
        let mut store = InMemoryStore::new();
        let mut book = sample_book();
        let mut prompter = ScriptedPrompter::new().with_file(None);

        let result = save_as(&mut book, &mut store, &mut prompter).unwrap();

        assert!(result.cancelled);
        assert!(book.file().is_none());
    }

    #[test]
    fn save_failure_is_an_error() {
        let mut store = StoreFixture::new().with_read_only("/locked.json").store;
        let mut book = sample_book();
        book.mark_dirty();

        let err = save_to(&mut book, &mut store, Path::new("/locked.json")).unwrap_err();

        assert!(err.is_file_error());
        assert!(book.is_dirty());
    }
}
