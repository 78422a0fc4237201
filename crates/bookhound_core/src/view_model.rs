use crate::{ActionKey, Book, BookId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub books: BookSectionView,
    pub dog: DogSectionView,
    /// Actions currently executing, in key order.
    pub busy: Vec<ActionKey>,
    pub should_quit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSectionView {
    Loading,
    Error { message: String },
    Empty,
    Refreshing,
    Populated { rows: Vec<BookRowView> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRowView {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Present only while the row is expanded.
    pub details: Option<Book>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DogSectionView {
    Loading,
    Error { message: String },
    ImageFailed { url: String },
    Populated { url: String },
    Fallback,
}
