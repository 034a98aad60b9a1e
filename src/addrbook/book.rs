//! # Address Book
//!
//! [`AddressBook`] is the ordered collection of [`Person`] records that makes up
//! one address book. It owns its records, knows which file it was last read from
//! or written to, and tracks whether it has changed since then.
//!
//! ## Lookup by full name
//!
//! Records are addressed by their full name (`"Last, First"`). The book does not
//! enforce uniqueness: `add_person` happily appends a duplicate, and every
//! name-based operation acts on the first match. Callers that want unique names
//! check with [`AddressBook::person_info`] before adding.
//!
//! ## Change notification
//!
//! Interested parties register a handler with [`AddressBook::subscribe`]. Every
//! successful mutation (add, update, remove, sort) sets the dirty flag and then
//! invokes each handler with a [`BookEvent`]. Failed operations fire nothing.

use crate::error::{AddrBookError, Result};
use crate::model::{ContactInfo, Person};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Title used when the book has never been saved or loaded.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    Zip,
}

/// What just happened to the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    Added { index: usize },
    Updated { index: usize },
    Removed { index: usize },
    Sorted(SortOrder),
    /// The owner swapped in a different book (new/open); handlers moved with it.
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&BookEvent)>;

pub struct AddressBook {
    persons: Vec<Person>,
    file: Option<PathBuf>,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
    handlers: Vec<(SubscriptionId, Handler)>,
    next_subscription: u64,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AddressBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressBook")
            .field("persons", &self.persons)
            .field("file", &self.file)
            .field("dirty", &self.dirty)
            .field("last_saved", &self.last_saved)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl AddressBook {
    pub fn new() -> Self {
        Self {
            persons: Vec::new(),
            file: None,
            dirty: false,
            last_saved: None,
            handlers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Builds a clean (not dirty) book from already-decoded records.
    pub fn from_persons(persons: Vec<Person>) -> Self {
        Self {
            persons,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn get(&self, index: usize) -> Option<&Person> {
        self.persons.get(index)
    }

    /// Full names in current order.
    pub fn names(&self) -> Vec<String> {
        self.persons.iter().map(Person::full_name).collect()
    }

    /// Index of the first person with this full name.
    pub fn position(&self, full_name: &str) -> Option<usize> {
        self.persons.iter().position(|p| p.full_name() == full_name)
    }

    pub fn add_person(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        info: ContactInfo,
    ) {
        self.persons.push(Person::new(first_name, last_name, info));
        let index = self.persons.len() - 1;
        self.changed(BookEvent::Added { index });
    }

    pub fn person_info(&self, full_name: &str) -> Option<ContactInfo> {
        self.position(full_name)
            .map(|index| self.persons[index].info().clone())
    }

    pub fn update_person(&mut self, full_name: &str, info: ContactInfo) -> Result<()> {
        let index = self
            .position(full_name)
            .ok_or_else(|| AddrBookError::PersonNotFound(full_name.to_string()))?;
        self.persons[index].update(info);
        self.changed(BookEvent::Updated { index });
        Ok(())
    }

    pub fn remove_person(&mut self, full_name: &str) -> Result<Person> {
        let index = self
            .position(full_name)
            .ok_or_else(|| AddrBookError::PersonNotFound(full_name.to_string()))?;
        let removed = self.persons.remove(index);
        self.changed(BookEvent::Removed { index });
        Ok(removed)
    }

    /// Stable sort by name. Marks the book dirty even if nothing moved.
    pub fn sort_by_name(&mut self) {
        self.persons.sort_by(Person::cmp_by_name);
        self.changed(BookEvent::Sorted(SortOrder::Name));
    }

    /// Stable sort by zip, then name. Marks the book dirty even if nothing moved.
    pub fn sort_by_zip(&mut self) {
        self.persons.sort_by(Person::cmp_by_zip);
        self.changed(BookEvent::Sorted(SortOrder::Zip));
    }

    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Name => self.sort_by_name(),
            SortOrder::Zip => self.sort_by_zip(),
        }
    }

    /// Index of the first person at or after `start` with a field containing
    /// `criterion`. A `start` past the end finds nothing.
    pub fn search(&self, criterion: &str, start: usize) -> Option<usize> {
        self.persons
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, person)| person.contains(criterion))
            .map(|(index, _)| index)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces the dirty flag on without firing an event.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears the dirty flag after a load or save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn set_file(&mut self, file: impl Into<PathBuf>) {
        self.file = Some(file.into());
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn set_last_saved(&mut self, at: DateTime<Utc>) {
        self.last_saved = Some(at);
    }

    /// The file's base name, or [`UNTITLED`].
    pub fn title(&self) -> String {
        self.file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Writes one label per person: name, address, `city state zip`, blank line.
    pub fn print_mailing_labels<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.mailing_labels().as_bytes())
    }

    pub fn mailing_labels(&self) -> String {
        self.persons
            .iter()
            .map(|person| {
                format!(
                    "{}\n{}\n{} {} {}\n\n",
                    person.full_name(),
                    person.address(),
                    person.city(),
                    person.state(),
                    person.zip()
                )
            })
            .collect()
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&BookEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Moves every handler from `previous` onto this book and tells them about
    /// the swap.
    pub fn adopt_subscribers(&mut self, previous: &mut AddressBook) {
        self.next_subscription = self.next_subscription.max(previous.next_subscription);
        self.handlers.append(&mut previous.handlers);
        self.notify(&BookEvent::Replaced);
    }

    fn changed(&mut self, event: BookEvent) {
        self.dirty = true;
        self.notify(&event);
    }

    fn notify(&mut self, event: &BookEvent) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A clean book with eight people in insertion order:
    /// Aardvark, Zebra, Gopher, Cat (Clarence), Cat (Charlene), Buffalo (Boris),
    /// Buffalo (Bertha), Moose.
    pub fn sample_book() -> AddressBook {
        let rows = [
            ("Anthony", "Aardvark", "10 Skunk Hollow Lane", "Wenham", "MA", "01984", "927-2300"),
            ("Zelda", "Zebra", "5 Zoo Road", "Beverly", "MA", "01915", "927-0001"),
            ("George", "Gopher", "Tunnel 37", "Hamilton", "MA", "01936", "468-5555"),
            ("Clarence", "Cat", "127 Litter Box Ln", "Ipswich", "MA", "01938", "356-9999"),
            ("Charlene", "Cat", "127 Litter Box Ln", "Ipswich", "MA", "01938", "356-9999"),
            ("Boris", "Buffalo", "Town Common", "Hamilton", "MA", "01936", "468-5555"),
            ("Bertha", "Buffalo", "14 Grassy Fields Rd", "Wenham", "MA", "01984", "927-2300"),
            ("Maxwell", "Moose", "12 You Can't Get There From Here Rd", "TAR2", "ME", "None", "None"),
        ];
        let persons = rows
            .iter()
            .map(|(first, last, address, city, state, zip, phone)| {
                Person::new(*first, *last, ContactInfo::new(*address, *city, *state, *zip, *phone))
            })
            .collect();
        AddressBook::from_persons(persons)
    }
}
