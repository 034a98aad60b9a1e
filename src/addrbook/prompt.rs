//! # Presentation Contract
//!
//! The use cases in [`crate::commands`] need a few things from whatever UI is
//! driving them: filled-in forms, yes/no answers, file choices, and a place to
//! report errors and search results. [`Prompter`] is that seam. The terminal
//! client implements it over stdin/stdout; tests use [`scripted::ScriptedPrompter`].
//!
//! Every "ask" method returns `None` (or `false`) when the user backs out.
//! Backing out is never an error.

use std::path::{Path, PathBuf};

/// Answer to "There are unsaved changes. Save them?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Yes,
    No,
    Cancel,
}

/// Why a file is being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePurpose {
    Open,
    Save,
    PrintLabels,
}

pub trait Prompter {
    /// Ask for several fields at once. `initial`, when given, has one value per
    /// label. Returns one value per label, or `None` if cancelled.
    fn multi_input(
        &mut self,
        title: &str,
        labels: &[&str],
        initial: Option<&[String]>,
    ) -> Option<Vec<String>>;

    /// Ask for a single line of text.
    fn ask_text(&mut self, prompt: &str) -> Option<String>;

    fn confirm(&mut self, title: &str, message: &str) -> bool;

    fn offer_save(&mut self, message: &str) -> SaveChoice;

    fn choose_file(&mut self, purpose: FilePurpose, start_dir: Option<&Path>)
        -> Option<PathBuf>;

    fn report_error(&mut self, message: &str);

    /// Result of a find: the matching index, or `None` for no match.
    fn search_found(&mut self, index: Option<usize>);
}

#[cfg(any(test, feature = "test_utils"))]
pub mod scripted {
    use super::*;
    use std::collections::VecDeque;

    /// A [`Prompter`] that replays queued answers and records what it was told.
    ///
    /// Running out of queued answers behaves like the user cancelling.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        pub inputs: VecDeque<Option<Vec<String>>>,
        pub texts: VecDeque<Option<String>>,
        pub confirms: VecDeque<bool>,
        pub save_choices: VecDeque<SaveChoice>,
        pub files: VecDeque<Option<PathBuf>>,
        pub errors: Vec<String>,
        pub search_results: Vec<Option<usize>>,
        pub file_requests: Vec<(FilePurpose, Option<PathBuf>)>,
        pub form_requests: Vec<(String, Option<Vec<String>>)>,
    }

    impl ScriptedPrompter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_input<S: AsRef<str>>(mut self, values: &[S]) -> Self {
            self.inputs
                .push_back(Some(values.iter().map(|v| v.as_ref().to_string()).collect()));
            self
        }

        pub fn with_cancelled_input(mut self) -> Self {
            self.inputs.push_back(None);
            self
        }

        pub fn with_text(mut self, text: Option<&str>) -> Self {
            self.texts.push_back(text.map(str::to_string));
            self
        }

        pub fn with_confirm(mut self, answer: bool) -> Self {
            self.confirms.push_back(answer);
            self
        }

        pub fn with_save_choice(mut self, choice: SaveChoice) -> Self {
            self.save_choices.push_back(choice);
            self
        }

        pub fn with_file(mut self, path: Option<&str>) -> Self {
            self.files.push_back(path.map(PathBuf::from));
            self
        }
    }

    impl Prompter for ScriptedPrompter {
        fn multi_input(
            &mut self,
            title: &str,
            _labels: &[&str],
            initial: Option<&[String]>,
        ) -> Option<Vec<String>> {
            self.form_requests
                .push((title.to_string(), initial.map(<[String]>::to_vec)));
            self.inputs.pop_front().flatten()
        }

        fn ask_text(&mut self, _prompt: &str) -> Option<String> {
            self.texts.pop_front().flatten()
        }

        fn confirm(&mut self, _title: &str, _message: &str) -> bool {
            self.confirms.pop_front().unwrap_or(false)
        }

        fn offer_save(&mut self, _message: &str) -> SaveChoice {
            self.save_choices.pop_front().unwrap_or(SaveChoice::Cancel)
        }

        fn choose_file(
            &mut self,
            purpose: FilePurpose,
            start_dir: Option<&Path>,
        ) -> Option<PathBuf> {
            self.file_requests
                .push((purpose, start_dir.map(Path::to_path_buf)));
            self.files.pop_front().flatten()
        }

        fn report_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn search_found(&mut self, index: Option<usize>) {
            self.search_results.push(index);
        }
    }
}
