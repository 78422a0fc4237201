mod common;

use std::time::Duration;

use bookhound_core::{
    update, AppState, BookPhase, BookSectionView, DogPhase, DogSectionView, Msg,
    REFRESH_TRANSITION,
};
use common::{book, dog, four_books, init_logging};

fn populated() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::InitialLoadDone(Ok((four_books("First"), Some(dog("hound/a"))))),
    );
    state
}

fn tick(state: AppState, millis: u64) -> AppState {
    update(
        state,
        Msg::Tick {
            elapsed: Duration::from_millis(millis),
        },
    )
    .0
}

#[test]
fn first_population_does_not_animate_a_refresh() {
    init_logging();
    assert_eq!(populated().book_phase(), BookPhase::Populated);
}

#[test]
fn different_collection_shows_refreshing_for_the_transition_window() {
    init_logging();
    let (state, _) = update(populated(), Msg::BooksRefreshed(Ok(four_books("Second"))));

    // The data is already replaced; only the presentation lags.
    assert_eq!(state.books()[0].title, "Second 1");
    assert_eq!(state.view().books, BookSectionView::Refreshing);

    let state = tick(state, 300);
    assert_eq!(state.book_phase(), BookPhase::Refreshing);

    let mut state = tick(state, 300);
    assert!(state.consume_dirty());
    assert_eq!(state.book_phase(), BookPhase::Populated);
    assert_eq!(REFRESH_TRANSITION, Duration::from_millis(600));
}

#[test]
fn identical_collection_is_not_a_refresh() {
    init_logging();
    let (state, _) = update(populated(), Msg::BooksRefreshed(Ok(four_books("First"))));
    assert_eq!(state.book_phase(), BookPhase::Populated);
}

#[test]
fn repeating_the_same_collection_keeps_the_running_transition() {
    init_logging();
    let (state, _) = update(populated(), Msg::BooksRefreshed(Ok(four_books("Second"))));
    let state = tick(state, 100);
    assert_eq!(state.book_phase(), BookPhase::Refreshing);

    let (state, _) = update(state, Msg::BooksRefreshed(Ok(four_books("Second"))));
    assert_eq!(state.view().books, BookSectionView::Refreshing);

    // 100 + 400 ms: still inside the 600 ms window.
    let state = tick(state, 400);
    assert_eq!(state.book_phase(), BookPhase::Refreshing);
    let state = tick(state, 100);
    assert_eq!(state.book_phase(), BookPhase::Populated);
}

#[test]
fn emptied_collection_drops_the_running_transition() {
    init_logging();
    let (state, _) = update(populated(), Msg::BooksRefreshed(Ok(four_books("Second"))));
    let (state, _) = update(state, Msg::BooksRefreshed(Ok(Vec::new())));
    assert_eq!(state.book_phase(), BookPhase::Empty);

    let (state, _) = update(state, Msg::BooksRefreshed(Ok(four_books("Third"))));
    assert_eq!(state.book_phase(), BookPhase::Populated);
}

#[test]
fn error_preempts_a_running_refresh_transition() {
    init_logging();
    let (state, _) = update(populated(), Msg::BooksRefreshed(Ok(four_books("Second"))));
    let (state, _) = update(state, Msg::BooksRefreshed(Err(bookhound_core::LoadFailed)));
    assert_eq!(state.book_phase(), BookPhase::Error);
}

#[test]
fn toggling_twice_restores_expansion() {
    init_logging();
    let state = populated();
    assert!(!state.is_expanded(3));

    let (state, _) = update(state, Msg::BookToggled(3));
    assert!(state.is_expanded(3));
    match state.view().books {
        BookSectionView::Populated { rows } => {
            let expanded = rows.iter().find(|row| row.id == 3).unwrap();
            let details = expanded.details.as_ref().expect("details visible");
            assert_eq!(details.genre, "Fantasy");
            assert_eq!(details.publisher, "Tor");
            assert!(rows.iter().filter(|row| row.id != 3).all(|row| row.details.is_none()));
        }
        other => panic!("expected populated books, got {other:?}"),
    }

    let (state, _) = update(state, Msg::BookToggled(3));
    assert!(!state.is_expanded(3));
}

#[test]
fn replacing_the_collection_collapses_every_book() {
    init_logging();
    let (state, _) = update(populated(), Msg::BookToggled(1));
    let (state, _) = update(state, Msg::BooksRefreshed(Ok(vec![book(1, "Reissue")])));

    assert!(!state.is_expanded(1));
}

#[test]
fn cursor_moves_within_bounds_and_toggles_selected_row() {
    init_logging();
    let state = populated();
    let (state, _) = update(state, Msg::SelectPreviousBook);
    let (state, _) = update(state, Msg::SelectNextBook);
    let (state, _) = update(state, Msg::SelectNextBook);
    let (state, _) = update(state, Msg::ToggleSelectedBook);
    assert!(state.is_expanded(3));

    let state = (0..10).fold(state, |state, _| update(state, Msg::SelectNextBook).0);
    let (state, _) = update(state, Msg::ToggleSelectedBook);
    assert!(state.is_expanded(4));
}

#[test]
fn toggle_on_empty_collection_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AllEmptied);
    let (next, effects) = update(state.clone(), Msg::ToggleSelectedBook);
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn failed_probe_marks_image_failed_until_next_image() {
    init_logging();
    let state = populated();
    let (state, _) = update(
        state,
        Msg::DogImageProbed {
            image: dog("hound/a"),
            resolved: false,
        },
    );
    assert_eq!(
        state.view().dog,
        DogSectionView::ImageFailed {
            url: dog("hound/a").to_string()
        }
    );

    let (state, _) = update(state, Msg::DogRefreshed(Ok(Some(dog("hound/b")))));
    assert_eq!(state.dog_phase(), DogPhase::Populated);
}

#[test]
fn probe_for_a_replaced_image_is_discarded() {
    init_logging();
    let (state, _) = update(populated(), Msg::DogRefreshed(Ok(Some(dog("hound/b")))));
    let (state, _) = update(
        state,
        Msg::DogImageProbed {
            image: dog("hound/a"),
            resolved: false,
        },
    );

    assert_eq!(state.dog_phase(), DogPhase::Populated);
}

#[test]
fn dog_stays_loading_until_a_first_image_arrives() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::InitialLoadDone(Ok((four_books("First"), None))),
    );

    assert!(effects.is_empty());
    assert_eq!(state.book_phase(), BookPhase::Populated);
    assert_eq!(state.dog_phase(), DogPhase::Loading);
    assert_eq!(state.view().dog, DogSectionView::Loading);
}
