//! # addrbook Architecture
//!
//! addrbook is a **UI-agnostic address-book library** with a terminal client.
//! The library never prints, never exits and never assumes a terminal; all of
//! that belongs to the client in `cli/`.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, implements Prompter over the terminal  │
//! │  - One-shot subcommands and the interactive shell           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the current AddressBook, store and search state     │
//! │  - Dispatches to use cases                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One use case per module (add, edit, find, open, ...)     │
//! │  - Talks to the user only through the Prompter trait        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain + Storage (model.rs, book.rs, store/)               │
//! │  - Person, AddressBook, change notification                 │
//! │  - BookStore trait: FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Domain** (`model.rs`, `book.rs`): ordering, search, dirty flag and
//!    notification rules.
//! 2. **Commands**: each use case against `InMemoryStore` and a scripted
//!    prompter, including the cancel and failure paths.
//! 3. **Store**: the file format and real files in a temp dir.
//! 4. **CLI**: argument parsing and rendering in unit tests, the binary end to
//!    end in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per use case
//! - [`book`]: The record collection
//! - [`model`]: `Person` and `ContactInfo`
//! - [`store`]: Persistence gateway and file format
//! - [`prompt`]: What the use cases need from a UI
//! - [`config`]: Configuration management
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod store;
