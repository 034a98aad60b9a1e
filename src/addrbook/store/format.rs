//! On-disk document for an address book.
//!
//! The file is a small JSON document with an explicit format tag and version.
//! Only record data is stored; the file path and dirty flag belong to the
//! in-memory book and are never written.
//!
//! ```json
//! {
//!   "format": "addrbook",
//!   "version": 1,
//!   "saved_at": "2024-05-01T12:00:00Z",
//!   "persons": [
//!     { "first_name": "George", "last_name": "Gopher", "address": "Tunnel 37",
//!       "city": "Hamilton", "state": "MA", "zip": "01936", "phone": "468-5555" }
//!   ]
//! }
//! ```

use crate::book::AddressBook;
use crate::error::{AddrBookError, Result};
use crate::model::{ContactInfo, Person};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FORMAT_TAG: &str = "addrbook";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub phone: String,
}

impl From<&Person> for PersonRecord {
    fn from(person: &Person) -> Self {
        Self {
            first_name: person.first_name().to_string(),
            last_name: person.last_name().to_string(),
            address: person.address().to_string(),
            city: person.city().to_string(),
            state: person.state().to_string(),
            zip: person.zip().to_string(),
            phone: person.phone().to_string(),
        }
    }
}

impl From<PersonRecord> for Person {
    fn from(record: PersonRecord) -> Self {
        Person::new(
            record.first_name,
            record.last_name,
            ContactInfo::new(
                record.address,
                record.city,
                record.state,
                record.zip,
                record.phone,
            ),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    pub format: String,
    pub version: u32,
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
}

impl BookDocument {
    /// Snapshot of a book's records, stamped with the current time.
    pub fn from_book(book: &AddressBook) -> Self {
        Self {
            format: FORMAT_TAG.to_string(),
            version: FORMAT_VERSION,
            saved_at: Some(Utc::now()),
            persons: book.persons().iter().map(PersonRecord::from).collect(),
        }
    }

    /// Rejects foreign or newer documents, otherwise builds a clean book.
    pub fn into_book(self) -> Result<AddressBook> {
        if self.format != FORMAT_TAG {
            return Err(AddrBookError::UnsupportedFormat(format!(
                "expected format '{}', found '{}'",
                FORMAT_TAG, self.format
            )));
        }
        if self.version != FORMAT_VERSION {
            return Err(AddrBookError::UnsupportedFormat(format!(
                "version {} is not supported (expected {})",
                self.version, FORMAT_VERSION
            )));
        }

        let persons = self.persons.into_iter().map(Person::from).collect();
        let mut book = AddressBook::from_persons(persons);
        if let Some(saved_at) = self.saved_at {
            book.set_last_saved(saved_at);
        }
        Ok(book)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AddrBookError::Serialization)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(AddrBookError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::fixtures::sample_book;

    #[test]
    fn document_keeps_order_and_fields() {
        let book = sample_book();
        let doc = BookDocument::from_book(&book);

        assert_eq!(doc.format, FORMAT_TAG);
        assert_eq!(doc.version, FORMAT_VERSION);
        assert_eq!(doc.persons.len(), 8);
        assert_eq!(doc.persons[2].last_name, "Gopher");
        assert_eq!(doc.persons[2].zip, "01936");
        assert_eq!(doc.persons[2].phone, "468-5555");

        let restored = BookDocument::from_json(&doc.to_json().unwrap())
            .unwrap()
            .into_book()
            .unwrap();
        assert_eq!(restored.persons(), book.persons());
        assert!(!restored.is_dirty());
        assert!(restored.last_saved().is_some());
    }

    #[test]
    fn json_never_carries_file_or_dirty_flag() {
        let mut book = sample_book();
        book.set_file("/tmp/somewhere.json");
        book.mark_dirty();

        let json = BookDocument::from_book(&book).to_json().unwrap();

        assert!(!json.contains("somewhere"));
        assert!(!json.contains("dirty"));
    }

    #[test]
    fn rejects_other_formats() {
        let json = r#"{"format":"rolodex","version":1,"saved_at":null,"persons":[]}"#;
        let err = BookDocument::from_json(json).unwrap().into_book().unwrap_err();
        assert!(matches!(err, AddrBookError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_unknown_versions() {
        let json = r#"{"format":"addrbook","version":7,"saved_at":null,"persons":[]}"#;
        let err = BookDocument::from_json(json).unwrap().into_book().unwrap_err();
        assert!(err.to_string().contains("version 7"));
    }

    #[test]
    fn missing_contact_fields_default_to_empty() {
        let json = r#"{"format":"addrbook","version":1,"saved_at":null,
            "persons":[{"first_name":"Zelda","last_name":"Zebra"}]}"#;
        let book = BookDocument::from_json(json).unwrap().into_book().unwrap();
        assert_eq!(book.names(), vec!["Zebra, Zelda"]);
        assert_eq!(book.get(0).unwrap().zip(), "");
        assert!(book.last_saved().is_none());
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            BookDocument::from_json("not json"),
            Err(AddrBookError::Serialization(_))
        ));
    }
}
