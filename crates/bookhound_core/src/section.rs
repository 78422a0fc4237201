//! Pure derivation of what each section displays.
//!
//! Both sections are small state machines whose variant is computed from the
//! current data plus a few locally tracked flags. Nothing here depends on the
//! order in which messages arrived, only on the values passed in.
use std::time::Duration;

use crate::{Book, DogImageRef};

/// How long the book section shows its refreshing transition after a
/// populated collection is replaced by a different one.
pub const REFRESH_TRANSITION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookPhase {
    Error,
    Loading,
    Empty,
    Refreshing,
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogPhase {
    Loading,
    Error,
    ImageFailed,
    Populated,
    Fallback,
}

/// Precedence: error, loading, empty, then populated (or refreshing while the
/// transition is still running).
pub fn book_phase(
    error: Option<&str>,
    loaded: bool,
    book_count: usize,
    refreshing: Duration,
) -> BookPhase {
    if error.is_some() {
        return BookPhase::Error;
    }
    if !loaded {
        return BookPhase::Loading;
    }
    if book_count == 0 {
        return BookPhase::Empty;
    }
    if !refreshing.is_zero() {
        return BookPhase::Refreshing;
    }
    BookPhase::Populated
}

/// A refresh is a populated collection replaced by a different populated one.
/// Going from empty to filled, or to empty, is not a refresh.
pub fn is_refresh(previous: &[Book], next: &[Book]) -> bool {
    !previous.is_empty() && !next.is_empty() && previous != next
}

/// Precedence: loading, error, image failed, populated, fallback.
///
/// `received` is true once any image arrived (or the section was cleared on
/// purpose); until then the section is still waiting for its first picture.
pub fn dog_phase(
    error: Option<&str>,
    received: bool,
    image: Option<&DogImageRef>,
    image_failed: bool,
) -> DogPhase {
    if !received && error.is_none() {
        return DogPhase::Loading;
    }
    if error.is_some() {
        return DogPhase::Error;
    }
    match image {
        Some(_) if image_failed => DogPhase::ImageFailed,
        Some(_) => DogPhase::Populated,
        None => DogPhase::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: u64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Anon".to_string(),
            genre: "Drama".to_string(),
            publisher: "Press".to_string(),
            published: "2001-01-01".to_string(),
            description: String::new(),
            isbn: None,
        }
    }

    #[test]
    fn error_wins_over_every_other_book_state() {
        let refreshing = REFRESH_TRANSITION;
        assert_eq!(book_phase(Some("x"), false, 0, Duration::ZERO), BookPhase::Error);
        assert_eq!(book_phase(Some("x"), true, 4, refreshing), BookPhase::Error);
    }

    #[test]
    fn book_phase_walks_loading_empty_populated() {
        assert_eq!(book_phase(None, false, 0, Duration::ZERO), BookPhase::Loading);
        assert_eq!(book_phase(None, true, 0, Duration::ZERO), BookPhase::Empty);
        assert_eq!(book_phase(None, true, 3, Duration::ZERO), BookPhase::Populated);
        assert_eq!(
            book_phase(None, true, 3, Duration::from_millis(1)),
            BookPhase::Refreshing
        );
    }

    #[test]
    fn refresh_requires_two_different_populated_collections() {
        let a = vec![book(1, "A")];
        let b = vec![book(1, "B")];
        assert!(is_refresh(&a, &b));
        assert!(!is_refresh(&a, &a.clone()));
        assert!(!is_refresh(&[], &b));
        assert!(!is_refresh(&a, &[]));
    }

    #[test]
    fn dog_loading_only_before_first_image_without_error() {
        let image = DogImageRef::new("https://images.dog.ceo/a.jpg");
        assert_eq!(dog_phase(None, false, None, false), DogPhase::Loading);
        assert_eq!(dog_phase(Some("x"), false, None, false), DogPhase::Error);
        assert_eq!(dog_phase(None, true, image.as_ref(), false), DogPhase::Populated);
        assert_eq!(dog_phase(None, true, image.as_ref(), true), DogPhase::ImageFailed);
        assert_eq!(dog_phase(None, true, None, false), DogPhase::Fallback);
    }
}
