use crate::book::AddressBook;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::store::BookStore;

use super::helpers::{offer_save_changes, Proceed};

/// Decides whether the session may end. `cancelled` means stay open.
pub fn run<S: BookStore, P: Prompter>(
    book: &mut AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    match offer_save_changes(book, store, prompter) {
        Proceed::Yes => Ok(CmdResult::default()),
        Proceed::No => {
            tracing::debug!("quit abandoned");
            Ok(CmdResult::cancelled())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::fixtures::sample_book;
    use crate::prompt::scripted::ScriptedPrompter;
    use crate::prompt::SaveChoice;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn clean_book_quits() {
        let mut book = sample_book();
        let result = run(&mut book, &mut InMemoryStore::new(), &mut ScriptedPrompter::new());
        assert!(!result.unwrap().cancelled);
    }

    #[test]
    fn cancel_keeps_session_open() {
        let mut book = sample_book();
        book.sort_by_zip();
        let mut prompter = ScriptedPrompter::new().with_save_choice(SaveChoice::Cancel);
        let result = run(&mut book, &mut InMemoryStore::new(), &mut prompter).unwrap();
        assert!(result.cancelled);
    }

    #[test]
    fn discarding_changes_quits() {
        let mut book = sample_book();
        book.sort_by_zip();
        let mut prompter = ScriptedPrompter::new().with_save_choice(SaveChoice::No);
        let result = run(&mut book, &mut InMemoryStore::new(), &mut prompter).unwrap();
        assert!(!result.cancelled);
    }
}
