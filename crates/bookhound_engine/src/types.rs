use serde::Deserialize;
use thiserror::Error;

/// Debounce keys understood by the refresh coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKey {
    Books,
    Dogs,
    Both,
    Empty,
}

/// One book as delivered by the book endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRecord {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub published: String,
    pub description: String,
    #[serde(default)]
    pub isbn: Option<String>,
}

/// Result of the combined books-then-dog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BooksAndDog {
    pub books: Vec<BookRecord>,
    pub dog_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A debounced action left its window and is executing.
    ActionStarted(ActionKey),
    InitialLoadCompleted(Result<BooksAndDog, GatewayError>),
    BooksRefreshed(Result<Vec<BookRecord>, GatewayError>),
    DogRefreshed(Result<Option<String>, GatewayError>),
    BothRefreshed(Result<BooksAndDog, GatewayError>),
    AllEmptied,
    ImageProbed { url: String, resolved: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// Reasons the engine thread could not be started.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Gateway(#[from] GatewayError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(String),
}
