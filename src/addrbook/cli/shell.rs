//! Interactive session: the book stays open across commands.
//!
//! The shell keeps a current selection (shown and typed 1-based) and redraws
//! the list whenever the book reports a change. Switching books and quitting go
//! through the offer-to-save questions.

use super::commands::{resolve_person, AppContext};
use super::prompt::TerminalPrompter;
use super::render::{render_messages, render_person, render_person_list, render_status};
use addrbook::api::{AddressBookApi, ListedPerson};
use addrbook::book::BookEvent;
use addrbook::error::{AddrBookError, Result};
use addrbook::prompt::Prompter;
use addrbook::store::BookStore;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

const HELP: &str = "\
Commands (PERSON is a list position or \"Last, First\"):
  list                 show everyone
  select PERSON        make PERSON the current selection
  show [PERSON]        show all fields
  add                  add a person
  edit [PERSON]        change contact details
  delete [PERSON]      delete a person
  sort name|zip        sort the book
  find [TEXT]          search forward from the selection
  again                repeat the last search
  new | open           start a new book or open another file
  save | saveas        write the book to disk
  labels               write mailing labels to a file
  status               file and save state
  help                 this text
  quit                 leave the shell
";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    selection: Option<usize>,
    events: Rc<RefCell<Vec<BookEvent>>>,
    skip_delete_confirm: bool,
}

pub(super) fn run(ctx: &mut AppContext) -> Result<()> {
    let mut prompter = ctx.prompter();
    let skip_confirm = ctx.skip_delete_confirm();
    session(&mut ctx.api, &mut prompter, skip_confirm)
}

fn session<S, R, W>(
    api: &mut AddressBookApi<S>,
    prompter: &mut TerminalPrompter<R, W>,
    skip_delete_confirm: bool,
) -> Result<()>
where
    S: BookStore,
    R: BufRead,
    W: Write,
{
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = api.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut session = Session {
        selection: None,
        events,
        skip_delete_confirm,
    };
    tracing::debug!("shell started");
    session.show_list(api, prompter)?;

    loop {
        let book = api.book();
        let marker = if book.is_dirty() { "*" } else { "" };
        let Some(line) = prompter.read_line(&format!("{}{}> ", book.title(), marker)) else {
            // End of input: nobody is left to answer questions.
            if api.book().is_dirty() {
                prompter.say("Leaving with unsaved changes.");
            }
            break;
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (word, arg) = line
            .split_once(char::is_whitespace)
            .map(|(w, a)| (w, a.trim()))
            .unwrap_or((line, ""));

        match session.dispatch(api, prompter, word, arg) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::debug!(error = %e, command = word, "command failed");
                prompter.report_error(&e.to_string());
            }
        }
        session.apply_events(api, prompter)?;
    }

    api.unsubscribe(subscription);
    tracing::debug!("shell finished");
    Ok(())
}

impl Session {
    fn dispatch<S, R, W>(
        &mut self,
        api: &mut AddressBookApi<S>,
        prompter: &mut TerminalPrompter<R, W>,
        word: &str,
        arg: &str,
    ) -> Result<Flow>
    where
        S: BookStore,
        R: BufRead,
        W: Write,
    {
        let result = match word {
            "list" | "ls" => {
                self.show_list(api, prompter)?;
                return Ok(Flow::Continue);
            }
            "select" | "sel" => {
                let name = resolve_person(api.book(), arg)?;
                let index = api
                    .book()
                    .position(&name)
                    .ok_or(AddrBookError::PersonNotFound(name))?;
                self.selection = Some(index);
                self.show_list(api, prompter)?;
                return Ok(Flow::Continue);
            }
            "show" | "view" => {
                let name = self.target(api, arg)?;
                let result = api.view(name.as_deref())?;
                for lp in &result.listed {
                    prompter.write_raw(&render_person(lp));
                }
                result
            }
            "add" | "a" => api.add(prompter)?,
            "edit" | "e" => {
                let name = self.target(api, arg)?;
                api.edit(prompter, name.as_deref())?
            }
            "delete" | "rm" => {
                let name = self.target(api, arg)?;
                api.delete(prompter, name.as_deref(), self.skip_delete_confirm)?
            }
            "sort" => match arg {
                "name" | "" => api.sort_by_name()?,
                "zip" => api.sort_by_zip()?,
                other => {
                    prompter.report_error(&format!("Unknown sort key: {}", other));
                    return Ok(Flow::Continue);
                }
            },
            "find" | "f" => {
                let start = self.selection.map_or(0, |i| i + 1);
                let result = if arg.is_empty() {
                    api.find(prompter, start)?
                } else {
                    api.find_text(prompter, arg, start)?
                };
                self.follow_search(api, prompter);
                result
            }
            "again" | "n" => {
                let result = api.find_again(prompter)?;
                self.follow_search(api, prompter);
                result
            }
            "new" => api.new_book(prompter)?,
            "open" => api.open(prompter)?,
            "save" => api.save(prompter)?,
            "saveas" => api.save_as(prompter)?,
            "labels" | "print" => api.print_labels(prompter)?,
            "status" => {
                prompter.write_raw(&render_status(api.book()));
                return Ok(Flow::Continue);
            }
            "help" | "?" => {
                prompter.write_raw(HELP);
                return Ok(Flow::Continue);
            }
            "quit" | "exit" | "q" => {
                let result = api.quit(prompter)?;
                if !result.cancelled {
                    return Ok(Flow::Quit);
                }
                result
            }
            other => {
                prompter.report_error(&format!("Unknown command: {} (try 'help')", other));
                return Ok(Flow::Continue);
            }
        };

        prompter.write_raw(&render_messages(&result.messages));
        Ok(Flow::Continue)
    }

    /// Full name for a command's PERSON argument, or the current selection.
    fn target<S: BookStore>(&self, api: &AddressBookApi<S>, arg: &str) -> Result<Option<String>> {
        if !arg.is_empty() {
            return resolve_person(api.book(), arg).map(Some);
        }
        Ok(self
            .selection
            .and_then(|i| api.book().get(i))
            .map(|p| p.full_name()))
    }

    /// A hit becomes the selection.
    fn follow_search<S, R, W>(
        &mut self,
        api: &AddressBookApi<S>,
        prompter: &mut TerminalPrompter<R, W>,
    ) where
        S: BookStore,
        R: BufRead,
        W: Write,
    {
        let Some(index) = prompter.take_search_result().flatten() else {
            return;
        };
        self.selection = Some(index);
        if let Some(person) = api.book().get(index) {
            let hit = ListedPerson {
                index,
                person: person.clone(),
            };
            prompter.write_raw(&render_person_list(&[hit], self.selection));
        }
    }

    /// Reacts to change notifications from the book: adjusts the selection
    /// and redraws the list once per command.
    fn apply_events<S, R, W>(
        &mut self,
        api: &AddressBookApi<S>,
        prompter: &mut TerminalPrompter<R, W>,
    ) -> Result<()>
    where
        S: BookStore,
        R: BufRead,
        W: Write,
    {
        let events: Vec<BookEvent> = self.events.borrow_mut().drain(..).collect();
        if events.is_empty() {
            return Ok(());
        }

        for event in &events {
            match event {
                BookEvent::Added { index } | BookEvent::Updated { index } => {
                    self.selection = Some(*index)
                }
                BookEvent::Removed { .. } | BookEvent::Sorted(_) | BookEvent::Replaced => {
                    self.selection = None
                }
            }
        }
        self.show_list(api, prompter)
    }

    fn show_list<S, R, W>(
        &self,
        api: &AddressBookApi<S>,
        prompter: &mut TerminalPrompter<R, W>,
    ) -> Result<()>
    where
        S: BookStore,
        R: BufRead,
        W: Write,
    {
        let result = api.list()?;
        prompter.write_raw(&render_person_list(&result.listed, self.selection));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrbook::book::AddressBook;
    use addrbook::model::{ContactInfo, Person};
    use addrbook::store::memory::InMemoryStore;
    use std::io::Cursor;
    use std::path::Path;

    type TestPrompter = TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>>;

    fn api() -> AddressBookApi<InMemoryStore> {
        let book = AddressBook::from_persons(vec![
            Person::new(
                "Anthony",
                "Aardvark",
                ContactInfo::new("10 Skunk Hollow Lane", "Wenham", "MA", "01984", "927-2300"),
            ),
            Person::new(
                "Zelda",
                "Zebra",
                ContactInfo::new("5 Zoo Road", "Beverly", "MA", "01915", "927-0001"),
            ),
            Person::new(
                "George",
                "Gopher",
                ContactInfo::new("Tunnel 37", "Hamilton", "MA", "01936", "468-5555"),
            ),
        ]);
        AddressBookApi::with_book(InMemoryStore::new(), book)
    }

    fn run_script(api: &mut AddressBookApi<InMemoryStore>, script: &str) -> String {
        colored::control::set_override(false);
        let mut prompter: TestPrompter =
            TerminalPrompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        session(api, &mut prompter, false).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn quit_on_clean_book_ends_session() {
        let mut api = api();
        let out = run_script(&mut api, "quit\nlist\n");
        // The list is drawn once on start and never again.
        assert_eq!(out.matches("Gopher, George").count(), 1);
        assert_eq!(api.book().subscriber_count(), 0);
    }

    #[test]
    fn sort_redraws_list_in_new_order() {
        let mut api = api();
        let out = run_script(&mut api, "sort zip\n");
        assert_eq!(
            api.book().names(),
            vec!["Zebra, Zelda", "Gopher, George", "Aardvark, Anthony"]
        );
        let redraw = out.rsplit("> ").nth(1).unwrap();
        assert!(redraw.find("Zebra").unwrap() < redraw.find("Aardvark").unwrap());
    }

    #[test]
    fn find_starts_after_selection_and_selects_hit() {
        let mut api = api();
        // "MA" matches everyone, so each search lands one past the last hit.
        let out = run_script(&mut api, "select 1\nfind MA\nagain\nagain\n");
        assert!(out.contains("Found 'MA' at Zebra, Zelda"));
        assert!(out.contains("Found 'MA' at Gopher, George"));
        assert!(out.contains("No match found"));
        assert_eq!(api.search_state().last_hit, None);
    }

    #[test]
    fn find_without_selection_starts_at_the_top() {
        let mut api = api();
        let out = run_script(&mut api, "find Aardvark\n");
        assert!(out.contains("Found 'Aardvark' at Aardvark, Anthony"));
        assert_eq!(api.search_state().last_hit, Some(0));
    }

    #[test]
    fn blank_search_matches_first_person() {
        let mut api = api();
        let out = run_script(&mut api, "find\n\n");
        assert!(out.contains("Search for? "));
        assert!(out.contains("Found '' at Aardvark, Anthony"));
        assert_eq!(api.search_state().criterion.as_deref(), Some(""));
    }

    #[test]
    fn delete_uses_selection_and_confirmation() {
        let mut api = api();
        let out = run_script(&mut api, "select 3\ndelete\ny\n");
        assert!(out.contains("Are you sure you want to delete Gopher, George?"));
        assert!(out.contains("Deleted Gopher, George"));
        assert_eq!(api.book().len(), 2);
        assert!(api.book().is_dirty());
    }

    #[test]
    fn edit_without_selection_reports_error() {
        let mut api = api();
        let out = run_script(&mut api, "edit\n");
        assert!(out.contains("You must select a person in the list"));
    }

    #[test]
    fn add_walks_the_form() {
        let mut api = api();
        let script = "add\nBoris\nBuffalo\nTown Common\nHamilton\nMA\n01936\n468-5555\n";
        let out = run_script(&mut api, script);
        assert!(out.contains("Added Buffalo, Boris"));
        assert_eq!(api.book().position("Buffalo, Boris"), Some(3));
    }

    #[test]
    fn quit_with_changes_offers_to_save() {
        let mut api = api();
        let script = "sort name\nquit\nc\nsaveas\n/books/a.json\nquit\n";
        let out = run_script(&mut api, script);
        assert!(out.contains("unsaved changes"));
        assert!(api.store().contains(Path::new("/books/a.json")));
        assert!(!api.book().is_dirty());
        assert_eq!(api.book().title(), "a.json");
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut api = api();
        let out = run_script(&mut api, "frobnicate\n");
        assert!(out.contains("Unknown command: frobnicate"));
    }
}
