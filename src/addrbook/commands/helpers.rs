use crate::book::AddressBook;
use crate::error::{AddrBookError, Result};
use crate::prompt::{Prompter, SaveChoice};
use crate::store::BookStore;

use super::file;

pub const UNSAVED_CHANGES: &str = "There are unsaved changes.  Save them?";

/// Whether a new/open/quit may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proceed {
    Yes,
    No,
}

/// Gives the user a chance to save before the current book is discarded.
///
/// A clean book proceeds at once. Otherwise: "no" proceeds without saving,
/// "yes" proceeds only if the save goes through, "cancel" stops. A failed save
/// is reported to the user and stops the pending operation.
pub fn offer_save_changes<S: BookStore, P: Prompter>(
    book: &mut AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Proceed {
    if !book.is_dirty() {
        return Proceed::Yes;
    }

    match prompter.offer_save(UNSAVED_CHANGES) {
        SaveChoice::No => Proceed::Yes,
        SaveChoice::Cancel => Proceed::No,
        SaveChoice::Yes => match file::save(book, store, prompter) {
            Ok(result) if !result.cancelled => Proceed::Yes,
            Ok(_) => Proceed::No,
            Err(e) => {
                tracing::warn!(error = %e, "save before discarding changes failed");
                prompter.report_error(&format!("Problem writing the file: {}", e));
                Proceed::No
            }
        },
    }
}

/// Swaps in `replacement`, carrying change handlers across.
pub fn replace_book(book: &mut AddressBook, mut replacement: AddressBook) {
    std::mem::swap(book, &mut replacement);
    // `replacement` now holds the old book.
    book.adopt_subscribers(&mut replacement);
}

/// The selected full name, or `NoSelection`.
pub fn require_selection(selection: Option<&str>) -> Result<&str> {
    selection
        .filter(|name| !name.is_empty())
        .ok_or(AddrBookError::NoSelection)
}
