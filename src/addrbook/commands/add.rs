use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{AddrBookError, Result};
use crate::model::{full_name, ContactInfo, PERSON_FIELDS};
use crate::prompt::Prompter;

pub fn run<P: Prompter>(book: &mut AddressBook, prompter: &mut P) -> Result<CmdResult> {
    let Some(values) = prompter.multi_input("Enter new Person", &PERSON_FIELDS, None) else {
        return Ok(CmdResult::cancelled());
    };

    let first = values.first().cloned().unwrap_or_default();
    let last = values.get(1).cloned().unwrap_or_default();
    let name = full_name(&first, &last);

    if book.person_info(&name).is_some() {
        return Err(AddrBookError::DuplicatePerson(name));
    }

    let info = ContactInfo::from_values(values.get(2..).unwrap_or_default());
    tracing::debug!(name = %name, "adding person");
    book.add_person(first, last, info);

    Ok(CmdResult::default()
        .with_affected(vec![name.clone()])
        .with_message(CmdMessage::success(format!("Added {}", name))))
}
