use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AddrBookError, Result};
use crate::model::{ContactInfo, CONTACT_FIELDS};
use crate::prompt::Prompter;

use super::helpers::require_selection;

pub fn run<P: Prompter>(
    book: &mut AddressBook,
    prompter: &mut P,
    selection: Option<&str>,
) -> Result<CmdResult> {
    let name = require_selection(selection)?;
    let current = book
        .person_info(name)
        .ok_or_else(|| AddrBookError::PersonNotFound(name.to_string()))?;

    let initial = current.to_values();
    let title = format!("Editing {}", name);
    let Some(values) = prompter.multi_input(&title, &CONTACT_FIELDS, Some(&initial)) else {
        return Ok(CmdResult::cancelled());
    };

    tracing::debug!(name = %name, "updating person");
    book.update_person(name, ContactInfo::from_values(&values))?;

    Ok(CmdResult::default()
        .with_affected(vec![name.to_string()])
        .with_message(CmdMessage::success(format!("Updated {}", name))))
}
