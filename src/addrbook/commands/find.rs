use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prompt::Prompter;

/// Criterion and position of the last search, for "find again".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub criterion: Option<String>,
    pub last_hit: Option<usize>,
}

impl SearchState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Asks for a criterion and searches forward from `start`.
pub fn run<P: Prompter>(
    book: &AddressBook,
    state: &mut SearchState,
    prompter: &mut P,
    start: usize,
) -> Result<CmdResult> {
    let Some(criterion) = prompter.ask_text("Search for?") else {
        return Ok(CmdResult::cancelled());
    };
    Ok(search(book, state, prompter, criterion, start))
}

/// Repeats the last search from just past its hit. Without a previous hit
/// this is a fresh find from the top.
pub fn again<P: Prompter>(
    book: &AddressBook,
    state: &mut SearchState,
    prompter: &mut P,
) -> Result<CmdResult> {
    match (state.criterion.clone(), state.last_hit) {
        (Some(criterion), Some(hit)) => Ok(search(book, state, prompter, criterion, hit + 1)),
        _ => run(book, state, prompter, 0),
    }
}

/// Searches for a criterion supplied up front (no prompt).
pub fn with_criterion<P: Prompter>(
    book: &AddressBook,
    state: &mut SearchState,
    prompter: &mut P,
    criterion: &str,
    start: usize,
) -> Result<CmdResult> {
    Ok(search(book, state, prompter, criterion.to_string(), start))
}

fn search<P: Prompter>(
    book: &AddressBook,
    state: &mut SearchState,
    prompter: &mut P,
    criterion: String,
    start: usize,
) -> CmdResult {
    let hit = book.search(&criterion, start);
    tracing::debug!(criterion = %criterion, start, ?hit, "search");
    prompter.search_found(hit);

    let message = match hit {
        Some(index) => CmdMessage::info(format!(
            "Found '{}' at {}",
            criterion,
            book.get(index).map(|p| p.full_name()).unwrap_or_default()
        )),
        None => CmdMessage::warning("No match found"),
    };

    state.criterion = Some(criterion);
    state.last_hit = hit;
    CmdResult::default().with_search_hit(hit).with_message(message)
}
