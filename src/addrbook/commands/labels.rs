use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prompt::{FilePurpose, Prompter};
use crate::store::BookStore;
use std::path::Path;

/// Asks where to print, then writes mailing labels there.
pub fn run<S: BookStore, P: Prompter>(
    book: &AddressBook,
    store: &mut S,
    prompter: &mut P,
) -> Result<CmdResult> {
    let start = store.default_directory().map(Path::to_path_buf);
    let Some(path) = prompter.choose_file(FilePurpose::PrintLabels, start.as_deref()) else {
        return Ok(CmdResult::cancelled());
    };
    write_to(book, store, &path)
}

pub fn write_to<S: BookStore>(
    book: &AddressBook,
    store: &mut S,
    path: &Path,
) -> Result<CmdResult> {
    store.write_labels(book, path)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Printed {} mailing labels to {}",
        book.len(),
        path.display()
    ))))
}
