use std::time::Duration;

use crate::{ActionKey, Book, BookId, DogImageRef, LoadFailed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The screen is up; start the initial load.
    Mounted,
    /// User pressed Refresh Books.
    RefreshBooksClicked,
    /// User pressed Refresh Dogs.
    RefreshDogsClicked,
    /// User pressed Refresh Both.
    RefreshBothClicked,
    /// User pressed Empty All.
    EmptyAllClicked,
    /// User asked to leave the app.
    QuitRequested,
    /// UI/render tick; advances transient transitions.
    Tick { elapsed: Duration },
    /// Move the book cursor down one row.
    SelectNextBook,
    /// Move the book cursor up one row.
    SelectPreviousBook,
    /// Toggle details of the book under the cursor.
    ToggleSelectedBook,
    /// Toggle details of a specific book.
    BookToggled(BookId),
    /// A debounced action left its window and began executing.
    ActionStarted(ActionKey),
    /// Initial load finished (books then dog).
    InitialLoadDone(Result<(Vec<Book>, Option<DogImageRef>), LoadFailed>),
    /// Refresh-books execution finished.
    BooksRefreshed(Result<Vec<Book>, LoadFailed>),
    /// Refresh-dogs execution finished.
    DogRefreshed(Result<Option<DogImageRef>, LoadFailed>),
    /// Refresh-both execution finished.
    BothRefreshed(Result<(Vec<Book>, Option<DogImageRef>), LoadFailed>),
    /// Empty-all execution finished.
    AllEmptied,
    /// Result of resolving a dog image.
    DogImageProbed { image: DogImageRef, resolved: bool },
    /// Fallback for placeholder wiring.
    NoOp,
}
