//! Key event handling.
//!
//! Key presses are named the way `keymap.toml` writes them and resolved
//! through the [`Keymap`]. Only `Ctrl+c` and the breadcrumb editor keys
//! are hardcoded.

use colfm_core::{Action, Command, Keymap};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppMode;

/// What the event loop should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Forward a command to the coordinator.
    Command(Command),
    Quit,
    /// Focus the breadcrumb editor.
    EditPath,
    /// Append a character to the breadcrumb text.
    EditInsert(char),
    EditBackspace,
    /// Commit the breadcrumb text.
    EditSubmit,
    /// Leave the editor and restore the location text.
    EditCancel,
    None,
}

/// The keymap name of a key press, e.g. `"j"`, `"Ctrl+i"`, `"F5"`.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        _ => return None,
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        Some(format!("Ctrl+{base}"))
    } else {
        Some(base)
    }
}

/// Maps a key event to an [`InputAction`] for the current mode.
pub fn handle_key(key: KeyEvent, mode: AppMode, keymap: &Keymap) -> InputAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }
    match mode {
        AppMode::Normal => handle_normal_key(&key, keymap),
        AppMode::EditPath => handle_edit_key(&key),
    }
}

fn handle_normal_key(key: &KeyEvent, keymap: &Keymap) -> InputAction {
    let Some(name) = key_name(key) else {
        return InputAction::None;
    };
    match keymap.action_for_key(&name) {
        Some(action) => action_to_input_action(action),
        None => InputAction::None,
    }
}

fn handle_edit_key(key: &KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Enter => InputAction::EditSubmit,
        KeyCode::Esc => InputAction::EditCancel,
        KeyCode::Backspace => InputAction::EditBackspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::EditInsert(c)
        }
        _ => InputAction::None,
    }
}

/// Resolves an [`Action`] picked outside the keyboard, e.g. a toolbar click.
pub fn resolve_action(action: Action) -> InputAction {
    action_to_input_action(action)
}

fn action_to_input_action(action: Action) -> InputAction {
    match action {
        Action::Quit => InputAction::Quit,
        Action::EditPath => InputAction::EditPath,
        Action::ClosePopup => InputAction::Command(Command::ClosePopup),
        other => InputAction::Command(Command::Action(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        key_with_mod(code, KeyModifiers::NONE)
    }

    fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn normal(code: KeyCode) -> InputAction {
        handle_key(key(code), AppMode::Normal, &Keymap::default())
    }

    fn action(a: Action) -> InputAction {
        InputAction::Command(Command::Action(a))
    }

    #[test]
    fn key_names_match_keymap_spelling() {
        assert_eq!(key_name(&key(KeyCode::Char(' '))).as_deref(), Some("Space"));
        assert_eq!(key_name(&key(KeyCode::F(5))).as_deref(), Some("F5"));
        assert_eq!(key_name(&key(KeyCode::Char('G'))).as_deref(), Some("G"));
        assert_eq!(
            key_name(&key_with_mod(KeyCode::Char('i'), KeyModifiers::CONTROL)).as_deref(),
            Some("Ctrl+i")
        );
        assert_eq!(key_name(&key(KeyCode::Insert)), None);
    }

    #[test]
    fn shift_does_not_prefix_name() {
        let k = key_with_mod(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_name(&k).as_deref(), Some("G"));
    }

    #[test]
    fn info_shortcuts() {
        assert_eq!(normal(KeyCode::Char(' ')), action(Action::Info));
        assert_eq!(normal(KeyCode::Tab), action(Action::Info));
        let ctrl_i = key_with_mod(KeyCode::Char('i'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key(ctrl_i, AppMode::Normal, &Keymap::default()),
            action(Action::Info)
        );
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(normal(KeyCode::Backspace), action(Action::GoUp));
        assert_eq!(normal(KeyCode::Enter), action(Action::Open));
        assert_eq!(normal(KeyCode::F(5)), action(Action::Refresh));
        assert_eq!(normal(KeyCode::Char('j')), action(Action::CursorDown));
        assert_eq!(normal(KeyCode::Char('.')), action(Action::ToggleHidden));
        assert_eq!(normal(KeyCode::Char('2')), action(Action::ViewColumn));
    }

    #[test]
    fn frontend_actions() {
        assert_eq!(normal(KeyCode::Char('q')), InputAction::Quit);
        assert_eq!(normal(KeyCode::Esc), InputAction::Command(Command::ClosePopup));
        let ctrl_l = key_with_mod(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key(ctrl_l, AppMode::Normal, &Keymap::default()),
            InputAction::EditPath
        );
    }

    #[test]
    fn unbound_key_is_none() {
        assert_eq!(normal(KeyCode::Char('z')), InputAction::None);
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let k = key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key(k, AppMode::EditPath, &Keymap::default()),
            InputAction::Quit
        );
        assert_eq!(handle_key(k, AppMode::Normal, &Keymap::default()), InputAction::Quit);
    }

    #[test]
    fn edit_mode_keys() {
        let km = Keymap::default();
        let edit = |code| handle_key(key(code), AppMode::EditPath, &km);

        assert_eq!(edit(KeyCode::Char('q')), InputAction::EditInsert('q'));
        assert_eq!(edit(KeyCode::Char(' ')), InputAction::EditInsert(' '));
        assert_eq!(edit(KeyCode::Backspace), InputAction::EditBackspace);
        assert_eq!(edit(KeyCode::Enter), InputAction::EditSubmit);
        assert_eq!(edit(KeyCode::Esc), InputAction::EditCancel);
        assert_eq!(edit(KeyCode::F(5)), InputAction::None);
    }
}
