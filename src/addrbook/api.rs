//! # API Facade
//!
//! [`AddressBookApi`] is the interaction controller: the single entry point a UI
//! uses to run address-book use cases. It owns the current [`AddressBook`], the
//! store it is persisted through, and the state of the last search.
//!
//! The facade only dispatches. Business rules live in [`crate::commands`], and
//! anything that needs the user goes through the [`Prompter`] passed to each
//! call, so the same API can back a terminal shell, a test script or a GUI.
//!
//! ## Generic Over BookStore
//!
//! - Production: `AddressBookApi<FileStore>`
//! - Testing: `AddressBookApi<InMemoryStore>`

use crate::book::{AddressBook, BookEvent, SortOrder, SubscriptionId};
use crate::commands;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::store::BookStore;
use std::path::Path;

pub struct AddressBookApi<S: BookStore> {
    store: S,
    book: AddressBook,
    search: commands::SearchState,
}

impl<S: BookStore> AddressBookApi<S> {
    /// Starts with an empty, untitled book.
    pub fn new(store: S) -> Self {
        Self::with_book(store, AddressBook::new())
    }

    pub fn with_book(store: S, book: AddressBook) -> Self {
        Self {
            store,
            book,
            search: commands::SearchState::default(),
        }
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn search_state(&self) -> &commands::SearchState {
        &self.search
    }

    /// Registers a change handler. It stays registered across new/open.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&BookEvent) + 'static,
    {
        self.book.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.book.unsubscribe(id)
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.book)
    }

    pub fn view(&self, selection: Option<&str>) -> Result<commands::CmdResult> {
        commands::view::run(&self.book, selection)
    }

    pub fn add<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.book, prompter)
    }

    pub fn edit<P: Prompter>(
        &mut self,
        prompter: &mut P,
        selection: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::edit::run(&mut self.book, prompter, selection)
    }

    pub fn delete<P: Prompter>(
        &mut self,
        prompter: &mut P,
        selection: Option<&str>,
        skip_confirm: bool,
    ) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.book, prompter, selection, skip_confirm)
    }

    pub fn sort(&mut self, order: SortOrder) -> Result<commands::CmdResult> {
        commands::sort::run(&mut self.book, order)
    }

    pub fn sort_by_name(&mut self) -> Result<commands::CmdResult> {
        self.sort(SortOrder::Name)
    }

    pub fn sort_by_zip(&mut self) -> Result<commands::CmdResult> {
        self.sort(SortOrder::Zip)
    }

    pub fn find<P: Prompter>(
        &mut self,
        prompter: &mut P,
        start: usize,
    ) -> Result<commands::CmdResult> {
        commands::find::run(&self.book, &mut self.search, prompter, start)
    }

    pub fn find_again<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        commands::find::again(&self.book, &mut self.search, prompter)
    }

    pub fn find_text<P: Prompter>(
        &mut self,
        prompter: &mut P,
        criterion: &str,
        start: usize,
    ) -> Result<commands::CmdResult> {
        commands::find::with_criterion(&self.book, &mut self.search, prompter, criterion, start)
    }

    pub fn new_book<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        let result = commands::file::new_book(&mut self.book, &mut self.store, prompter)?;
        self.after_replace(&result);
        Ok(result)
    }

    pub fn open<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        let result = commands::file::open(&mut self.book, &mut self.store, prompter)?;
        self.after_replace(&result);
        Ok(result)
    }

    /// Loads `path` without asking anything (startup, one-shot commands).
    pub fn open_path(&mut self, path: &Path) -> Result<commands::CmdResult> {
        let result = commands::file::open_path(&mut self.book, &mut self.store, path)?;
        self.after_replace(&result);
        Ok(result)
    }

    pub fn save<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        commands::file::save(&mut self.book, &mut self.store, prompter)
    }

    pub fn save_as<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        commands::file::save_as(&mut self.book, &mut self.store, prompter)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::file::save_to(&mut self.book, &mut self.store, path)
    }

    pub fn print_labels<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        commands::labels::run(&self.book, &mut self.store, prompter)
    }

    pub fn print_labels_to(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::labels::write_to(&self.book, &mut self.store, path)
    }

    /// `cancelled` in the result means the session should stay open.
    pub fn quit<P: Prompter>(&mut self, prompter: &mut P) -> Result<commands::CmdResult> {
        commands::quit::run(&mut self.book, &mut self.store, prompter)
    }

    fn after_replace(&mut self, result: &commands::CmdResult) {
        if !result.cancelled {
            // Positions from the previous book mean nothing now.
            self.search.reset();
        }
    }
}

pub use crate::commands::{CmdMessage, CmdResult, ListedPerson, MessageLevel, SearchState};
