//! Bookhound core: pure state machine, section derivation and view-model helpers.
mod book;
mod effect;
mod msg;
mod section;
mod state;
mod update;
mod view_model;

pub use book::{ActionKey, Book, BookId, DogImageRef, LoadFailed};
pub use effect::Effect;
pub use msg::Msg;
pub use section::{book_phase, dog_phase, is_refresh, BookPhase, DogPhase, REFRESH_TRANSITION};
pub use state::{AppState, BOOKS_ERROR_MESSAGE, DOG_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, BookRowView, BookSectionView, DogSectionView};
