use crate::book::AddressBook;
use crate::commands::{CmdResult, ListedPerson};
use crate::error::Result;

pub fn run(book: &AddressBook) -> Result<CmdResult> {
    let listed = book
        .persons()
        .iter()
        .enumerate()
        .map(|(index, person)| ListedPerson {
            index,
            person: person.clone(),
        })
        .collect();
    Ok(CmdResult::default().with_listed(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::fixtures::sample_book;

    #[test]
    fn lists_in_current_order() {
        let mut book = sample_book();
        book.sort_by_name();
        let result = run(&book).unwrap();
        assert_eq!(result.listed.len(), 8);
        assert_eq!(result.listed[0].index, 0);
        assert_eq!(result.listed[0].person.full_name(), "Aardvark, Anthony");
        assert_eq!(result.listed[7].person.full_name(), "Zebra, Zelda");
    }
}
