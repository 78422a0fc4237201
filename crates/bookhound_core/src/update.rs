use crate::{ActionKey, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // Once quitting, late engine results must not touch the state.
    if state.should_quit() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                Vec::new()
            } else {
                state.mount();
                vec![Effect::StartInitialLoad]
            }
        }
        Msg::RefreshBooksClicked => vec![Effect::Trigger(ActionKey::Books)],
        Msg::RefreshDogsClicked => vec![Effect::Trigger(ActionKey::Dogs)],
        Msg::RefreshBothClicked => vec![Effect::Trigger(ActionKey::Both)],
        Msg::EmptyAllClicked => vec![Effect::Trigger(ActionKey::Empty)],
        Msg::QuitRequested => {
            state.quit();
            vec![Effect::Shutdown]
        }
        Msg::Tick { elapsed } => {
            state.advance_time(elapsed);
            Vec::new()
        }
        Msg::SelectNextBook => {
            state.move_cursor(true);
            Vec::new()
        }
        Msg::SelectPreviousBook => {
            state.move_cursor(false);
            Vec::new()
        }
        Msg::ToggleSelectedBook => {
            if let Some(id) = state.selected_book_id() {
                state.toggle_book(id);
            }
            Vec::new()
        }
        Msg::BookToggled(id) => {
            state.toggle_book(id);
            Vec::new()
        }
        Msg::ActionStarted(key) => {
            state.begin_action(key);
            Vec::new()
        }
        Msg::InitialLoadDone(result) => match result {
            Ok((books, image)) => {
                state.replace_books(books);
                state.replace_dog(image.clone());
                image.map(Effect::ProbeImage).into_iter().collect()
            }
            Err(_) => {
                state.fail_books();
                state.fail_dog();
                Vec::new()
            }
        },
        Msg::BooksRefreshed(result) => {
            state.finish_action(ActionKey::Books);
            match result {
                Ok(books) => state.replace_books(books),
                Err(_) => state.fail_books(),
            }
            Vec::new()
        }
        Msg::DogRefreshed(result) => {
            state.finish_action(ActionKey::Dogs);
            match result {
                Ok(image) => {
                    state.replace_dog(image.clone());
                    image.map(Effect::ProbeImage).into_iter().collect()
                }
                Err(_) => {
                    state.fail_dog();
                    Vec::new()
                }
            }
        }
        Msg::BothRefreshed(result) => {
            state.finish_action(ActionKey::Both);
            match result {
                Ok((books, image)) => {
                    state.replace_books(books);
                    state.replace_dog(image.clone());
                    image.map(Effect::ProbeImage).into_iter().collect()
                }
                Err(_) => {
                    state.fail_books();
                    state.fail_dog();
                    Vec::new()
                }
            }
        }
        Msg::AllEmptied => {
            state.finish_action(ActionKey::Empty);
            state.empty_all();
            Vec::new()
        }
        Msg::DogImageProbed { image, resolved } => {
            state.apply_probe(&image, resolved);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
