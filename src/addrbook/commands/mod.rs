//! # Use Cases
//!
//! One module per user-facing operation. Each `run` takes the current
//! [`AddressBook`] explicitly, plus the store and [`Prompter`] it needs, and
//! returns a [`CmdResult`] describing what happened. Nothing in here prints;
//! the UI decides how to show messages and errors.
//!
//! Cancelling a prompt is not an error: the operation returns an empty
//! result with `cancelled` set.
//!
//! [`AddressBook`]: crate::book::AddressBook
//! [`Prompter`]: crate::prompt::Prompter

use crate::model::Person;

pub mod add;
pub mod delete;
pub mod edit;
pub mod file;
pub mod find;
pub mod helpers;
pub mod labels;
pub mod list;
pub mod quit;
pub mod sort;
pub mod view;

pub use find::SearchState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A person together with its 0-based position in the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPerson {
    pub index: usize,
    pub person: Person,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Full names of the people added, changed or removed.
    pub affected: Vec<String>,
    pub listed: Vec<ListedPerson>,
    pub search_hit: Option<usize>,
    /// The user backed out of a prompt; nothing happened.
    pub cancelled: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, names: Vec<String>) -> Self {
        self.affected = names;
        self
    }

    pub fn with_listed(mut self, listed: Vec<ListedPerson>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_search_hit(mut self, hit: Option<usize>) -> Self {
        self.search_hit = hit;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
