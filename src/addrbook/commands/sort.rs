use crate::book::{AddressBook, SortOrder};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(book: &mut AddressBook, order: SortOrder) -> Result<CmdResult> {
    tracing::debug!(?order, "sorting address book");
    book.sort(order);
    let label = match order {
        SortOrder::Name => "name",
        SortOrder::Zip => "ZIP",
    };
    Ok(CmdResult::default().with_message(CmdMessage::info(format!("Sorted by {}", label))))
}
