use bookhound_core::Msg;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::constants::*;

/// Maps a key press to a message. Key releases map to nothing.
pub fn map_key(key: KeyEvent) -> Option<Msg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Msg::QuitRequested);
    }

    match key.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            KEY_REFRESH_BOOKS => Some(Msg::RefreshBooksClicked),
            KEY_REFRESH_DOGS => Some(Msg::RefreshDogsClicked),
            KEY_REFRESH_BOTH => Some(Msg::RefreshBothClicked),
            KEY_EMPTY_ALL => Some(Msg::EmptyAllClicked),
            KEY_QUIT => Some(Msg::QuitRequested),
            ' ' => Some(Msg::ToggleSelectedBook),
            'j' => Some(Msg::SelectNextBook),
            'k' => Some(Msg::SelectPreviousBook),
            _ => None,
        },
        KeyCode::Enter => Some(Msg::ToggleSelectedBook),
        KeyCode::Down => Some(Msg::SelectNextBook),
        KeyCode::Up => Some(Msg::SelectPreviousBook),
        KeyCode::Esc => Some(Msg::QuitRequested),
        _ => None,
    }
}
