use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::section::{book_phase, dog_phase, is_refresh, BookPhase, DogPhase, REFRESH_TRANSITION};
use crate::view_model::{AppViewModel, BookRowView, BookSectionView, DogSectionView};
use crate::{ActionKey, Book, BookId, DogImageRef};

pub const BOOKS_ERROR_MESSAGE: &str = "Failed to catch the books:(";
pub const DOG_ERROR_MESSAGE: &str = "Failed to catch the dog:(";

/// Single source of truth for both sections. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    books: BookSection,
    dog: DogSection,
    mounted: bool,
    quitting: bool,
    in_flight: BTreeMap<ActionKey, usize>,
    dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct BookSection {
    items: Vec<Book>,
    error: Option<String>,
    loaded: bool,
    expanded: BTreeSet<BookId>,
    cursor: usize,
    refreshing: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct DogSection {
    image: Option<DogImageRef>,
    error: Option<String>,
    received: bool,
    image_failed: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            books: self.book_section_view(),
            dog: self.dog_section_view(),
            busy: self.in_flight.keys().copied().collect(),
            should_quit: self.quitting,
        }
    }

    pub fn book_phase(&self) -> BookPhase {
        book_phase(
            self.books.error.as_deref(),
            self.books.loaded,
            self.books.items.len(),
            self.books.refreshing,
        )
    }

    pub fn dog_phase(&self) -> DogPhase {
        dog_phase(
            self.dog.error.as_deref(),
            self.dog.received,
            self.dog.image.as_ref(),
            self.dog.image_failed,
        )
    }

    pub fn books(&self) -> &[Book] {
        &self.books.items
    }

    pub fn dog_image(&self) -> Option<&DogImageRef> {
        self.dog.image.as_ref()
    }

    pub fn books_error(&self) -> Option<&str> {
        self.books.error.as_deref()
    }

    pub fn dog_error(&self) -> Option<&str> {
        self.dog.error.as_deref()
    }

    pub fn is_expanded(&self, id: BookId) -> bool {
        self.books.expanded.contains(&id)
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(crate) fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    pub(crate) fn quit(&mut self) {
        self.quitting = true;
        self.mark_dirty();
    }

    pub(crate) fn begin_action(&mut self, key: ActionKey) {
        *self.in_flight.entry(key).or_insert(0) += 1;
        match key {
            ActionKey::Books => self.books.error = None,
            ActionKey::Dogs => self.dog.error = None,
            ActionKey::Both => {
                self.books.error = None;
                self.dog.error = None;
            }
            ActionKey::Empty => {}
        }
        self.mark_dirty();
    }

    pub(crate) fn finish_action(&mut self, key: ActionKey) {
        if let Some(count) = self.in_flight.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(&key);
            }
        }
    }

    /// Replaces the whole collection. Expansion flags and the cursor reset
    /// because ids from the new collection carry no relation to the old one.
    pub(crate) fn replace_books(&mut self, books: Vec<Book>) {
        let previous = std::mem::replace(&mut self.books.items, books);
        // A running transition keeps counting down when the new collection
        // is not itself a refresh.
        if is_refresh(&previous, &self.books.items) {
            self.books.refreshing = REFRESH_TRANSITION;
        } else if self.books.items.is_empty() {
            self.books.refreshing = Duration::ZERO;
        }
        self.books.expanded.clear();
        self.books.cursor = 0;
        self.books.loaded = true;
        self.mark_dirty();
    }

    /// The prior collection is kept; the error takes precedence when rendering.
    pub(crate) fn fail_books(&mut self) {
        self.books.error = Some(BOOKS_ERROR_MESSAGE.to_string());
        self.books.refreshing = Duration::ZERO;
        self.mark_dirty();
    }

    pub(crate) fn replace_dog(&mut self, image: Option<DogImageRef>) {
        if image.is_some() {
            self.dog.received = true;
        }
        self.dog.image = image;
        self.dog.image_failed = false;
        self.mark_dirty();
    }

    pub(crate) fn fail_dog(&mut self) {
        self.dog.error = Some(DOG_ERROR_MESSAGE.to_string());
        self.mark_dirty();
    }

    pub(crate) fn empty_all(&mut self) {
        self.books.items.clear();
        self.books.expanded.clear();
        self.books.cursor = 0;
        self.books.refreshing = Duration::ZERO;
        self.books.loaded = true;
        self.books.error = None;
        self.dog.image = None;
        self.dog.image_failed = false;
        self.dog.received = true;
        self.dog.error = None;
        self.mark_dirty();
    }

    /// Applies a probe result only if it is about the image currently shown.
    pub(crate) fn apply_probe(&mut self, image: &DogImageRef, resolved: bool) {
        if self.dog.image.as_ref() != Some(image) {
            return;
        }
        let failed = !resolved;
        if self.dog.image_failed != failed {
            self.dog.image_failed = failed;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_book(&mut self, id: BookId) {
        if !self.books.expanded.remove(&id) {
            self.books.expanded.insert(id);
        }
        self.mark_dirty();
    }

    pub(crate) fn selected_book_id(&self) -> Option<BookId> {
        self.books.items.get(self.books.cursor).map(|book| book.id)
    }

    pub(crate) fn move_cursor(&mut self, forward: bool) {
        let len = self.books.items.len();
        if len == 0 {
            return;
        }
        let next = if forward {
            (self.books.cursor + 1).min(len - 1)
        } else {
            self.books.cursor.saturating_sub(1)
        };
        if next != self.books.cursor {
            self.books.cursor = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn advance_time(&mut self, elapsed: Duration) {
        if self.books.refreshing.is_zero() {
            return;
        }
        self.books.refreshing = self.books.refreshing.saturating_sub(elapsed);
        if self.books.refreshing.is_zero() {
            self.mark_dirty();
        }
    }

    fn book_section_view(&self) -> BookSectionView {
        match self.book_phase() {
            BookPhase::Error => BookSectionView::Error {
                message: self.books.error.clone().unwrap_or_default(),
            },
            BookPhase::Loading => BookSectionView::Loading,
            BookPhase::Empty => BookSectionView::Empty,
            BookPhase::Refreshing => BookSectionView::Refreshing,
            BookPhase::Populated => BookSectionView::Populated {
                rows: self
                    .books
                    .items
                    .iter()
                    .enumerate()
                    .map(|(index, book)| BookRowView {
                        id: book.id,
                        title: book.title.clone(),
                        author: book.author.clone(),
                        details: self.is_expanded(book.id).then(|| book.clone()),
                        selected: index == self.books.cursor,
                    })
                    .collect(),
            },
        }
    }

    fn dog_section_view(&self) -> DogSectionView {
        let url = || {
            self.dog
                .image
                .as_ref()
                .map(|image| image.as_str().to_string())
                .unwrap_or_default()
        };
        match self.dog_phase() {
            DogPhase::Loading => DogSectionView::Loading,
            DogPhase::Error => DogSectionView::Error {
                message: self.dog.error.clone().unwrap_or_default(),
            },
            DogPhase::ImageFailed => DogSectionView::ImageFailed { url: url() },
            DogPhase::Populated => DogSectionView::Populated { url: url() },
            DogPhase::Fallback => DogSectionView::Fallback,
        }
    }
}
