use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddrBookError {
    #[error("No such person: {0}")]
    PersonNotFound(String),

    #[error("A person of that name is already in the list: {0}")]
    DuplicatePerson(String),

    #[error("You must select a person in the list")]
    NoSelection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported address book file: {0}")]
    UnsupportedFormat(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl AddrBookError {
    /// True for failures reading or writing a file (load, save, labels).
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            AddrBookError::Io(_)
                | AddrBookError::Serialization(_)
                | AddrBookError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AddrBookError>;
