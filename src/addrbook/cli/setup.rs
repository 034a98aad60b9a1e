use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "addrbook", bin_name = "addrbook", version)]
#[command(about = "Keep an address book from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Address book file (defaults to the `default-book` setting)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub book: Option<PathBuf>,

    /// Answer "yes" to confirmations
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Zip,
}

/// Contact fields; anything left out keeps its current value.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactArgs {
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub zip: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl ContactArgs {
    pub fn is_empty(&self) -> bool {
        self == &ContactArgs::default()
    }

    /// (form label, value) pairs for the fields that were given.
    pub fn labelled(&self) -> Vec<(&'static str, String)> {
        [
            ("Address", &self.address),
            ("City", &self.city),
            ("State", &self.state),
            ("ZIP", &self.zip),
            ("Phone", &self.phone),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.clone().map(|v| (label, v)))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List everyone in the book (default)
    #[command(alias = "ls")]
    List,

    /// Show one person in full
    #[command(alias = "v")]
    Show {
        /// Full name ("Last, First") or list position
        person: String,
    },

    /// Add a person
    #[command(alias = "a")]
    Add {
        #[arg(long)]
        first: String,

        #[arg(long)]
        last: String,

        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Change a person's contact details (prompts when no field is given)
    #[command(alias = "e")]
    Edit {
        /// Full name ("Last, First") or list position
        person: String,

        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Delete a person
    #[command(alias = "rm")]
    Delete {
        /// Full name ("Last, First") or list position
        person: String,
    },

    /// Sort the book and save the new order
    Sort {
        #[arg(value_enum)]
        by: SortKey,
    },

    /// Find the first person with a field containing TERM (case-sensitive)
    #[command(alias = "f")]
    Find {
        term: String,

        /// List position to start searching from
        #[arg(long, default_value_t = 1)]
        from: usize,
    },

    /// Print mailing labels
    Labels {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show the book's file, size and save state
    Status,

    /// Create an empty address book file
    Init,

    /// Get or set configuration
    Config {
        /// Configuration key (default-book, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive session
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["addrbook"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.yes);
    }

    #[test]
    fn add_takes_named_fields() {
        let cli = Cli::try_parse_from([
            "addrbook", "--book", "b.json", "add", "--first", "George", "--last", "Gopher",
            "--zip", "01936",
        ])
        .unwrap();
        assert_eq!(cli.book, Some(PathBuf::from("b.json")));
        match cli.command {
            Some(Commands::Add {
                first,
                last,
                contact,
            }) => {
                assert_eq!(first, "George");
                assert_eq!(last, "Gopher");
                assert_eq!(contact.zip.as_deref(), Some("01936"));
                assert_eq!(contact.labelled(), vec![("ZIP", "01936".to_string())]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn edit_without_fields_is_empty() {
        let cli = Cli::try_parse_from(["addrbook", "edit", "Gopher, George"]).unwrap();
        match cli.command {
            Some(Commands::Edit { person, contact }) => {
                assert_eq!(person, "Gopher, George");
                assert!(contact.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn sort_key_and_find_defaults() {
        let cli = Cli::try_parse_from(["addrbook", "sort", "zip"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Sort { by: SortKey::Zip })));

        let cli = Cli::try_parse_from(["addrbook", "find", "Gopher"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Find { from: 1, .. })));
    }

    #[test]
    fn verbosity_flags_count() {
        let cli = Cli::try_parse_from(["addrbook", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
