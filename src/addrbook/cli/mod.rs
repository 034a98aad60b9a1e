//! Terminal front end for the address book.
//!
//! - `setup`: clap argument definitions
//! - `commands`: one-shot dispatch and the shared `AppContext`
//! - `shell`: the interactive session
//! - `prompt`: stdin/stdout implementation of the library's `Prompter`
//! - `render`: list, detail and status formatting

mod commands;
mod prompt;
mod render;
mod setup;
mod shell;

pub use commands::run;
