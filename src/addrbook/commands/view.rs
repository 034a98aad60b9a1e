use crate::book::AddressBook;
use crate::commands::{CmdResult, ListedPerson};
use crate::error::{AddrBookError, Result};

use super::helpers::require_selection;

/// Shows one person in full.
pub fn run(book: &AddressBook, selection: Option<&str>) -> Result<CmdResult> {
    let name = require_selection(selection)?;
    let index = book
        .position(name)
        .ok_or_else(|| AddrBookError::PersonNotFound(name.to_string()))?;
    let person = book.persons()[index].clone();
    Ok(CmdResult::default().with_listed(vec![ListedPerson { index, person }]))
}
