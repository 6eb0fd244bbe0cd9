//! Two-way sync between the breadcrumb path editor and navigation state.

use crate::error::CoreResult;
use crate::nav::location::Location;
use crate::nav::state::NavigationState;

/// The breadcrumb editor's text.
///
/// Keystrokes only change the text; navigation happens on [`commit`].
///
/// [`commit`]: BreadcrumbBridge::commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbBridge {
    text: String,
}

impl BreadcrumbBridge {
    pub fn new(location: &Location) -> Self {
        Self {
            text: location.display_text(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the editor text without navigating.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Shows `location` in the editor, discarding any pending edit.
    pub fn sync(&mut self, location: &Location) {
        self.text = location.display_text();
    }

    /// Navigates to the editor text.
    ///
    /// On success the text becomes the normalised path of the new location.
    /// On failure the text is left exactly as typed.
    pub fn commit(&mut self, state: &NavigationState) -> CoreResult<NavigationState> {
        let location = state.normalizer().directory(&self.text)?;
        let next = state.enter_location(location)?;
        self.sync(next.location());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::view::ViewMode;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, NavigationState) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a").join("b")).unwrap();
        let state = NavigationState::open(tmp.path(), false, ViewMode::Tree).unwrap();
        (tmp, state)
    }

    #[test]
    fn new_shows_location() {
        let (tmp, state) = setup();
        let bridge = BreadcrumbBridge::new(state.location());
        assert_eq!(bridge.text(), tmp.path().to_string_lossy());
    }

    #[test]
    fn commit_shows_normalized_text() {
        let (tmp, state) = setup();
        let mut bridge = BreadcrumbBridge::new(state.location());
        let raw = format!("{}/a/./b/..//", tmp.path().display());
        bridge.edit(raw);

        let next = bridge.commit(&state).unwrap();
        assert_eq!(next.location().path(), tmp.path().join("a"));
        assert_eq!(bridge.text(), tmp.path().join("a").to_string_lossy());
    }

    #[test]
    fn commit_relative_resolves_against_location() {
        let (tmp, state) = setup();
        let mut bridge = BreadcrumbBridge::new(state.location());
        bridge.edit("a/b");

        let next = bridge.commit(&state).unwrap();
        assert_eq!(next.location().path(), tmp.path().join("a").join("b"));
    }

    #[test]
    fn failed_commit_preserves_raw_text() {
        let (tmp, state) = setup();
        let mut bridge = BreadcrumbBridge::new(state.location());
        let raw = format!("{}/missing/../x", tmp.path().display());
        bridge.edit(raw.clone());

        let result = bridge.commit(&state);
        assert!(matches!(result, Err(CoreError::InvalidPath(_))));
        assert_eq!(bridge.text(), raw);
    }

    #[test]
    fn sync_discards_pending_edit() {
        let (_tmp, state) = setup();
        let mut bridge = BreadcrumbBridge::new(state.location());
        bridge.edit("half-typed");
        bridge.sync(state.location());
        assert_eq!(bridge.text(), state.location().display_text());
    }
}
