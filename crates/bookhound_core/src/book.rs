use std::fmt;

pub type BookId = u64;

/// One record of the book collection, immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub published: String,
    pub description: String,
    pub isbn: Option<String>,
}

/// URL of a dog picture. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DogImageRef(String);

impl DogImageRef {
    /// Returns `None` for a blank URL, which the dog endpoint uses to mean "no image".
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            None
        } else {
            Some(Self(url))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DogImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four user intents routed through the refresh coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKey {
    Books,
    Dogs,
    Both,
    Empty,
}

impl ActionKey {
    pub const ALL: [ActionKey; 4] = [
        ActionKey::Books,
        ActionKey::Dogs,
        ActionKey::Both,
        ActionKey::Empty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionKey::Books => "books",
            ActionKey::Dogs => "dogs",
            ActionKey::Both => "both",
            ActionKey::Empty => "empty",
        }
    }
}

/// A load that reached the caller as a failure rather than an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadFailed;
