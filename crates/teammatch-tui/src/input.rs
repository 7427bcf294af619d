// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into edits of the roster draft held in
// ViewState, or into UserCommand messages sent to the app orchestrator
// (submit, quit).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use teammatch_app::protocol::UserCommand;
use teammatch_core::roster::ROSTER_SIZE;

use crate::ViewState;

/// Lines moved by PageUp/PageDown in the results panel.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (Submit, Quit). Returns `None` when the key press was
/// handled locally by mutating `ViewState` (editing, focus, scrolling).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports both Press and Release on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if ctrl && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('s') if ctrl => submit(view_state),
        KeyCode::Char('u') if ctrl => {
            view_state.draft.clear_slot(view_state.focused);
            None
        }
        KeyCode::Char(c) if !ctrl && !key_event.modifiers.contains(KeyModifiers::ALT) => {
            view_state.draft.push_char(view_state.focused, c);
            None
        }
        KeyCode::Backspace => {
            view_state.draft.pop_char(view_state.focused);
            None
        }

        // Focus movement
        KeyCode::Up | KeyCode::BackTab => {
            focus_prev(view_state);
            None
        }
        KeyCode::Down | KeyCode::Tab => {
            focus_next(view_state);
            None
        }
        KeyCode::Enter => {
            if view_state.is_last_slot_focused() {
                submit(view_state)
            } else {
                focus_next(view_state);
                None
            }
        }

        KeyCode::F(5) => submit(view_state),

        // Results scrolling
        KeyCode::PageUp => {
            view_state.scroll_offset = view_state.scroll_offset.saturating_sub(PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            view_state.scroll_offset = view_state.scroll_offset.saturating_add(PAGE_SIZE);
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Insert pasted text into the focused slot. Line breaks are dropped.
pub fn handle_paste(text: &str, view_state: &mut ViewState) {
    if view_state.confirm_quit {
        return;
    }
    for c in text.chars().filter(|c| !c.is_control()) {
        view_state.draft.push_char(view_state.focused, c);
    }
}

/// In quit confirmation mode `y`/`q` confirm, `n`/Esc cancel, all else is
/// swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Snapshot the draft for submission, unless a request is outstanding.
fn submit(view_state: &ViewState) -> Option<UserCommand> {
    if view_state.is_loading() {
        return None;
    }
    Some(UserCommand::Submit(view_state.draft.clone()))
}

fn focus_next(view_state: &mut ViewState) {
    view_state.focused = (view_state.focused + 1) % ROSTER_SIZE;
}

fn focus_prev(view_state: &mut ViewState) {
    view_state.focused = (view_state.focused + ROSTER_SIZE - 1) % ROSTER_SIZE;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
