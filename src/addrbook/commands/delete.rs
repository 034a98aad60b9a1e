use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prompt::Prompter;

use super::helpers::require_selection;

/// Removes the selected person after confirmation (unless `skip_confirm`).
pub fn run<P: Prompter>(
    book: &mut AddressBook,
    prompter: &mut P,
    selection: Option<&str>,
    skip_confirm: bool,
) -> Result<CmdResult> {
    let name = require_selection(selection)?;

    if !skip_confirm {
        let question = format!("Are you sure you want to delete {}?", name);
        if !prompter.confirm("Confirm delete", &question) {
            return Ok(CmdResult::cancelled());
        }
    }

    tracing::debug!(name = %name, "removing person");
    book.remove_person(name)?;

    Ok(CmdResult::default()
        .with_affected(vec![name.to_string()])
        .with_message(CmdMessage::success(format!("Deleted {}", name))))
}
