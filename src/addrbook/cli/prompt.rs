//! [`Prompter`] over a line-oriented terminal.
//!
//! Forms are asked one field per line. Pressing Enter keeps the value shown in
//! brackets; end of input cancels. One-shot commands preload answers with
//! [`TerminalPrompter::preset_fields`] and `--yes` so nothing is asked.

use addrbook::prompt::{FilePurpose, Prompter, SaveChoice};
use colored::Colorize;
use std::collections::HashMap;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::{Path, PathBuf};

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
    preset_fields: Option<HashMap<String, String>>,
    last_search: Option<Option<usize>>,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_yes: false,
            preset_fields: None,
            last_search: None,
        }
    }

    /// Confirmations answer themselves with "yes".
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Answers the next form without asking: labelled values replace the
    /// form's initial values, everything else keeps them.
    pub fn preset_fields<I, K, V>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.preset_fields = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
    }

    /// What the last search reported, if one ran since the last call.
    pub fn take_search_result(&mut self) -> Option<Option<usize>> {
        self.last_search.take()
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                None
            }
        }
    }

    /// Writes a line of output.
    pub fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    /// Writes already formatted output as is.
    pub fn write_raw(&mut self, text: &str) {
        let _ = write!(self.output, "{}", text);
    }

    #[cfg(test)]
    pub(super) fn into_output(self) -> W {
        self.output
    }
}

fn purpose_label(purpose: FilePurpose) -> &'static str {
    match purpose {
        FilePurpose::Open => "Open file",
        FilePurpose::Save => "Save as",
        FilePurpose::PrintLabels => "Print labels to",
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn multi_input(
        &mut self,
        title: &str,
        labels: &[&str],
        initial: Option<&[String]>,
    ) -> Option<Vec<String>> {
        let initial_value = |i: usize| {
            initial
                .and_then(|values| values.get(i))
                .cloned()
                .unwrap_or_default()
        };

        if let Some(mut preset) = self.preset_fields.take() {
            return Some(
                labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| preset.remove(*label).unwrap_or_else(|| initial_value(i)))
                    .collect(),
            );
        }

        self.say(&title.bold().to_string());
        let mut values = Vec::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            let current = initial_value(i);
            let prompt = if current.is_empty() {
                format!("  {}: ", label)
            } else {
                format!("  {} [{}]: ", label, current)
            };
            let answer = self.read_line(&prompt)?;
            values.push(if answer.is_empty() { current } else { answer });
        }
        Some(values)
    }

    /// A blank answer is an empty string; only end of input cancels.
    fn ask_text(&mut self, prompt: &str) -> Option<String> {
        self.read_line(&format!("{} ", prompt))
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(title, "confirmed by --yes");
            return true;
        }
        self.read_line(&format!("{} [y/N] ", message))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn offer_save(&mut self, message: &str) -> SaveChoice {
        loop {
            let Some(answer) = self.read_line(&format!("{} [y]es/[n]o/[c]ancel ", message)) else {
                return SaveChoice::Cancel;
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return SaveChoice::Yes,
                "n" | "no" => return SaveChoice::No,
                "c" | "cancel" => return SaveChoice::Cancel,
                _ => continue,
            }
        }
    }

    fn choose_file(&mut self, purpose: FilePurpose, start_dir: Option<&Path>) -> Option<PathBuf> {
        let prompt = match start_dir {
            Some(dir) => format!("{} (in {}): ", purpose_label(purpose), dir.display()),
            None => format!("{}: ", purpose_label(purpose)),
        };
        let answer = self.read_line(&prompt)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }

        let path = PathBuf::from(answer);
        match start_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path),
        }
    }

    fn report_error(&mut self, message: &str) {
        self.say(&message.red().to_string());
    }

    fn search_found(&mut self, index: Option<usize>) {
        self.last_search = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn form_reads_one_line_per_field() {
        let mut p = prompter("George\nGopher\n");
        let values = p.multi_input("Enter new Person", &["First Name", "Last Name"], None);
        assert_eq!(values, Some(vec!["George".to_string(), "Gopher".to_string()]));

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Enter new Person"));
        assert!(out.contains("First Name: "));
    }

    #[test]
    fn blank_answer_keeps_initial_value() {
        let mut p = prompter("\nBeverly\n");
        let initial = vec!["Tunnel 37".to_string(), "Hamilton".to_string()];
        let values = p.multi_input("Editing", &["Address", "City"], Some(&initial));
        assert_eq!(values, Some(vec!["Tunnel 37".to_string(), "Beverly".to_string()]));
    }

    #[test]
    fn end_of_input_cancels_form() {
        let mut p = prompter("George\n");
        assert_eq!(p.multi_input("t", &["First Name", "Last Name"], None), None);
    }

    #[test]
    fn preset_fields_answer_the_next_form_only() {
        let mut p = prompter("");
        p.preset_fields([("City", "Beverly")]);
        let initial = vec!["Tunnel 37".to_string(), "Hamilton".to_string()];

        let values = p.multi_input("Editing", &["Address", "City"], Some(&initial));
        assert_eq!(values, Some(vec!["Tunnel 37".to_string(), "Beverly".to_string()]));
        // Preset consumed; the next form reads input, which is empty.
        assert_eq!(p.multi_input("Editing", &["Address"], None), None);
    }

    #[test]
    fn confirm_defaults_to_no() {
        assert!(prompter("y\n").confirm("Confirm delete", "Sure?"));
        assert!(prompter("YES\n").confirm("Confirm delete", "Sure?"));
        assert!(!prompter("\n").confirm("Confirm delete", "Sure?"));
        assert!(!prompter("").confirm("Confirm delete", "Sure?"));
        assert!(prompter("").assume_yes(true).confirm("Confirm delete", "Sure?"));
    }

    #[test]
    fn offer_save_repeats_until_understood() {
        assert_eq!(prompter("maybe\nn\n").offer_save("Save?"), SaveChoice::No);
        assert_eq!(prompter("yes\n").offer_save("Save?"), SaveChoice::Yes);
        assert_eq!(prompter("").offer_save("Save?"), SaveChoice::Cancel);
    }

    #[test]
    fn blank_text_is_kept_and_end_of_input_cancels() {
        assert_eq!(prompter("\n").ask_text("Search for?").as_deref(), Some(""));
        assert_eq!(prompter("Cat\n").ask_text("Search for?").as_deref(), Some("Cat"));
        assert_eq!(prompter("").ask_text("Search for?"), None);
    }

    #[test]
    fn relative_file_choice_joins_start_dir() {
        let mut p = prompter("friends.json\n");
        let chosen = p.choose_file(FilePurpose::Open, Some(Path::new("/books")));
        assert_eq!(chosen, Some(PathBuf::from("/books/friends.json")));

        let mut p = prompter("/tmp/x.json\n");
        let chosen = p.choose_file(FilePurpose::Save, Some(Path::new("/books")));
        assert_eq!(chosen, Some(PathBuf::from("/tmp/x.json")));

        assert_eq!(prompter("\n").choose_file(FilePurpose::Save, None), None);
    }

    #[test]
    fn search_result_is_kept_until_taken() {
        let mut p = prompter("");
        assert_eq!(p.take_search_result(), None);
        p.search_found(Some(3));
        assert_eq!(p.take_search_result(), Some(Some(3)));
        assert_eq!(p.take_search_result(), None);
    }

    #[test]
    fn errors_are_written_out() {
        let mut p = prompter("");
        p.report_error("No match found");
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out, "No match found\n");
    }
}
