use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app_state::AppState;

/// Dispatch a key event. Returns true when the app should exit.
///
/// While a request is in flight the form is disabled: Enter and editing keys
/// are ignored until the settlement clears the loading flag.
pub fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) => return true,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,

        // Scroll the exchange panel
        (KeyCode::PageUp, _) => app.scroll_up(5),
        (KeyCode::PageDown, _) => app.scroll_down(5),

        // Focus switching between the two fields
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => app.next_field(),
        (KeyCode::Up, KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            app.next_field()
        }

        // Submit
        (KeyCode::Enter, _) => {
            if !app.loading {
                app.submit();
            }
        }

        // Everything else edits the focused field
        _ => {
            if !app.loading {
                app.focused_input_mut().input(Event::Key(key));
            }
        }
    }
    false
}
