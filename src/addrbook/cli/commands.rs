//! # CLI Layer
//!
//! This is one client of the address book library. It is the only place that
//! parses arguments, touches stdin/stdout or decides exit codes. Everything
//! else goes through [`AddressBookApi`].
//!
//! One-shot commands load the book file, run a single use case, and write the
//! file back when the book changed. `addrbook shell` keeps the book open
//! across many commands instead (see [`super::shell`]).

use super::prompt::TerminalPrompter;
use super::render::{
    print_messages, render_person, render_person_list, render_status, render_text_list,
};
use super::setup::{Cli, Commands, ContactArgs, SortKey};
use super::shell;
use addrbook::api::{AddressBookApi, CmdMessage, CmdResult, ListedPerson};
use addrbook::book::{AddressBook, SortOrder};
use addrbook::config::{config_dir, AddrBookConfig};
use addrbook::error::{AddrBookError, Result};
use addrbook::logging::{init_logging, Verbosity};
use addrbook::model::Person;
use addrbook::store::fs::FileStore;
use clap::Parser;
use std::io::{StdinLock, Stdout};
use std::path::PathBuf;

pub(super) struct AppContext {
    pub api: AddressBookApi<FileStore>,
    pub book_path: PathBuf,
    pub config: AddrBookConfig,
    pub config_dir: PathBuf,
    pub assume_yes: bool,
}

impl AppContext {
    pub fn prompter(&self) -> TerminalPrompter<StdinLock<'static>, Stdout> {
        TerminalPrompter::stdio().assume_yes(self.assume_yes)
    }

    /// Deletes skip the question when `--yes` is given or the config says so.
    pub fn skip_delete_confirm(&self) -> bool {
        self.assume_yes || !self.config.confirm_delete
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let mut ctx = init_context(&cli)?;
    let command = cli.command.unwrap_or(Commands::List);

    if needs_book(&command) {
        load_book(&mut ctx)?;
    }

    match command {
        Commands::List => handle_list(&mut ctx),
        Commands::Show { person } => handle_show(&mut ctx, &person),
        Commands::Add {
            first,
            last,
            contact,
        } => handle_add(&mut ctx, first, last, contact),
        Commands::Edit { person, contact } => handle_edit(&mut ctx, &person, contact),
        Commands::Delete { person } => handle_delete(&mut ctx, &person),
        Commands::Sort { by } => handle_sort(&mut ctx, by),
        Commands::Find { term, from } => handle_find(&mut ctx, &term, from),
        Commands::Labels { output } => handle_labels(&mut ctx, output),
        Commands::Status => handle_status(&ctx),
        Commands::Init => handle_init(&mut ctx),
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
        Commands::Shell => shell::run(&mut ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = AddrBookConfig::load(&config_dir)?;
    let book_path = cli
        .book
        .clone()
        .unwrap_or_else(|| config.book_path(&config_dir));

    let start_dir = book_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| config_dir.clone());
    let mut api = AddressBookApi::new(FileStore::new().with_default_directory(start_dir));
    api.subscribe(|event| tracing::debug!(?event, "address book changed"));

    Ok(AppContext {
        api,
        book_path,
        config,
        config_dir,
        assume_yes: cli.yes,
    })
}

/// Settings and init must work even when the book file is unreadable.
fn needs_book(command: &Commands) -> bool {
    !matches!(command, Commands::Config { .. } | Commands::Init)
}

/// Opens the book file if there is one yet.
fn load_book(ctx: &mut AppContext) -> Result<()> {
    let path = ctx.book_path.clone();
    if path.exists() {
        ctx.api.open_path(&path)?;
    } else {
        tracing::debug!(path = %path.display(), "book file does not exist yet");
    }
    Ok(())
}

/// A 1-based list position or a full `"Last, First"` name.
pub(super) fn resolve_person(book: &AddressBook, reference: &str) -> Result<String> {
    let reference = reference.trim();
    match reference.parse::<usize>() {
        Ok(position) => position
            .checked_sub(1)
            .and_then(|i| book.get(i))
            .map(Person::full_name)
            .ok_or_else(|| AddrBookError::PersonNotFound(reference.to_string())),
        Err(_) => Ok(reference.to_string()),
    }
}

/// Writes the book back to its file if the command changed it.
fn save_changes(ctx: &mut AppContext, result: &CmdResult) -> Result<()> {
    if result.cancelled || !ctx.api.book().is_dirty() {
        return Ok(());
    }
    let path = ctx.book_path.clone();
    let saved = ctx.api.save_to(&path)?;
    tracing::info!(path = %path.display(), "book saved");
    print_messages(&saved.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print!("{}", render_person_list(&result.listed, None));
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, reference: &str) -> Result<()> {
    let name = resolve_person(ctx.api.book(), reference)?;
    let result = ctx.api.view(Some(&name))?;
    for lp in &result.listed {
        print!("{}", render_person(lp));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    first: String,
    last: String,
    contact: ContactArgs,
) -> Result<()> {
    let mut prompter = ctx.prompter();
    let mut fields = vec![("First Name", first), ("Last Name", last)];
    fields.extend(contact.labelled());
    prompter.preset_fields(fields);

    let result = ctx.api.add(&mut prompter)?;
    print_messages(&result.messages);
    save_changes(ctx, &result)
}

fn handle_edit(ctx: &mut AppContext, reference: &str, contact: ContactArgs) -> Result<()> {
    let name = resolve_person(ctx.api.book(), reference)?;
    let mut prompter = ctx.prompter();
    if !contact.is_empty() {
        prompter.preset_fields(contact.labelled());
    }

    let result = ctx.api.edit(&mut prompter, Some(&name))?;
    print_messages(&result.messages);
    save_changes(ctx, &result)
}

fn handle_delete(ctx: &mut AppContext, reference: &str) -> Result<()> {
    let name = resolve_person(ctx.api.book(), reference)?;
    let skip_confirm = ctx.skip_delete_confirm();
    let mut prompter = ctx.prompter();

    let result = ctx.api.delete(&mut prompter, Some(&name), skip_confirm)?;
    if result.cancelled {
        print_messages(&[CmdMessage::info("Nothing deleted")]);
    }
    print_messages(&result.messages);
    save_changes(ctx, &result)
}

fn handle_sort(ctx: &mut AppContext, by: SortKey) -> Result<()> {
    let order = match by {
        SortKey::Name => SortOrder::Name,
        SortKey::Zip => SortOrder::Zip,
    };
    let result = ctx.api.sort(order)?;
    print!("{}", render_person_list(&ctx.api.list()?.listed, None));
    print_messages(&result.messages);
    save_changes(ctx, &result)
}

fn handle_find(ctx: &mut AppContext, term: &str, from: usize) -> Result<()> {
    let mut prompter = ctx.prompter();
    let result = ctx.api.find_text(&mut prompter, term, from.saturating_sub(1))?;

    if let Some(index) = result.search_hit {
        if let Some(person) = ctx.api.book().get(index) {
            let hit = ListedPerson {
                index,
                person: person.clone(),
            };
            print!("{}", render_person_list(&[hit], None));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_labels(ctx: &mut AppContext, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let result = ctx.api.print_labels_to(&path)?;
            print_messages(&result.messages);
        }
        None => print!("{}", ctx.api.book().mailing_labels()),
    }
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    print!("{}", render_status(ctx.api.book()));
    Ok(())
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let path = ctx.book_path.clone();
    if path.exists() {
        print_messages(&[CmdMessage::warning(format!(
            "{} already exists",
            path.display()
        ))]);
        return Ok(());
    }
    let result = ctx.api.save_to(&path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            let lines: Vec<String> = ctx
                .config
                .list_all()
                .into_iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect();
            print!("{}", render_text_list(&lines, "No configuration values."));
        }
        (Some(key), None) => println!("{}", ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.config_dir)?;
            print_messages(&[CmdMessage::success(format!(
                "{} = {}",
                key,
                ctx.config.get(&key)?
            ))]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrbook::model::ContactInfo;

    fn book() -> AddressBook {
        AddressBook::from_persons(vec![
            Person::new("Anthony", "Aardvark", ContactInfo::default()),
            Person::new("Zelda", "Zebra", ContactInfo::default()),
        ])
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(resolve_person(&book(), "1").unwrap(), "Aardvark, Anthony");
        assert_eq!(resolve_person(&book(), " 2 ").unwrap(), "Zebra, Zelda");
    }

    #[test]
    fn out_of_range_position_is_not_found() {
        assert!(matches!(
            resolve_person(&book(), "0"),
            Err(AddrBookError::PersonNotFound(_))
        ));
        assert!(matches!(
            resolve_person(&book(), "3"),
            Err(AddrBookError::PersonNotFound(_))
        ));
    }

    #[test]
    fn settings_and_init_do_not_load_the_book() {
        let config = Commands::Config {
            key: Some("default-book".into()),
            value: Some("other.json".into()),
        };
        assert!(!needs_book(&config));
        assert!(!needs_book(&Commands::Init));
        assert!(needs_book(&Commands::List));
        assert!(needs_book(&Commands::Shell));
    }

    #[test]
    fn names_pass_through() {
        assert_eq!(
            resolve_person(&book(), "Gopher, George").unwrap(),
            "Gopher, George"
        );
    }
}
