//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"Space"`, `"Ctrl+i"`, `"F5"`) to
//! [`Action`] values. Modified keys are written `Ctrl+<key>`.
//!
//! TOML files use string action identifiers (e.g. `"go_up"`); these are
//! resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation, deserialized first, then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for toolbar hints).
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Info. Most terminals deliver Ctrl+I as Tab.
        bindings.insert("Ctrl+i".to_string(), Action::Info);
        bindings.insert("Tab".to_string(), Action::Info);
        bindings.insert("Space".to_string(), Action::Info);

        // Navigation
        bindings.insert("Backspace".to_string(), Action::GoUp);
        bindings.insert("Left".to_string(), Action::GoUp);
        bindings.insert("Enter".to_string(), Action::Open);
        bindings.insert("Right".to_string(), Action::Open);
        bindings.insert("F5".to_string(), Action::Refresh);
        bindings.insert("t".to_string(), Action::OpenTrash);
        bindings.insert("Up".to_string(), Action::CursorUp);
        bindings.insert("k".to_string(), Action::CursorUp);
        bindings.insert("Down".to_string(), Action::CursorDown);
        bindings.insert("j".to_string(), Action::CursorDown);
        bindings.insert("Home".to_string(), Action::CursorTop);
        bindings.insert("g".to_string(), Action::CursorTop);
        bindings.insert("End".to_string(), Action::CursorBottom);
        bindings.insert("G".to_string(), Action::CursorBottom);

        // View
        bindings.insert(".".to_string(), Action::ToggleHidden);
        bindings.insert("1".to_string(), Action::ViewTree);
        bindings.insert("2".to_string(), Action::ViewColumn);
        bindings.insert("3".to_string(), Action::ViewIcon);

        // File stubs
        bindings.insert("Delete".to_string(), Action::MoveToTrash);
        bindings.insert("r".to_string(), Action::Rename);
        bindings.insert("m".to_string(), Action::Move);
        bindings.insert("y".to_string(), Action::Duplicate);
        bindings.insert("s".to_string(), Action::Softlink);
        bindings.insert("w".to_string(), Action::Close);

        // Frontend
        bindings.insert("Ctrl+l".to_string(), Action::EditPath);
        bindings.insert("Esc".to_string(), Action::ClosePopup);
        bindings.insert("q".to_string(), Action::Quit);

        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// Unknown action strings are silently ignored.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::Unreadable`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::Unreadable(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let bindings: HashMap<String, Action> = raw
            .bindings
            .into_iter()
            .filter_map(|(key, action_id)| match registry.find_by_id(&action_id) {
                Some(action) => Some((key, action)),
                None => {
                    tracing::warn!("keymap: unknown action '{action_id}' for key '{key}'");
                    None
                }
            })
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// The shortest key bound to `action`, for compact toolbar hints.
    pub fn hint_for(&self, action: Action) -> Option<&str> {
        self.keys_for_action(action)?
            .iter()
            .min_by_key(|k| k.len())
            .map(String::as_str)
    }

    /// Returns all bindings.
    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}
