use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextoError {
    /// Transport failure while downloading the word list.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The dictionary server answered with a non-success status.
    #[error("dictionary download failed with HTTP status {0}")]
    HttpStatus(u16),

    /// Raw word list produced no usable words or is otherwise unusable.
    #[error("dictionary error: {0}")]
    Dictionary(String),

    /// Embedding model failed to load or encode.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Words and vectors do not line up.
    #[error("vector store error: {0}")]
    Store(String),

    /// Cache file is unreadable, stale or corrupt.
    #[error("cache error: {0}")]
    Cache(String),

    /// A word the caller asked for is not in the dictionary.
    #[error("word '{0}' is not in the dictionary")]
    UnknownWord(String),

    /// None of the candidate words exists in the dictionary.
    #[error("no candidate word exists in the dictionary")]
    NoCandidates,

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContextoError>;
