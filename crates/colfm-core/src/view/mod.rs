//! View representations and their shared capability interface.
//!
//! Every view mode renders the same [`Location`] and entry snapshot; they
//! differ only in layout. The [`coordinator`] is the one place that builds,
//! attaches and routes activations for them.

pub mod coordinator;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fs::entry::FileEntry;
use crate::nav::location::Location;

/// The three interchangeable representations of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Tree,
    Column,
    Icon,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Tree, ViewMode::Column, ViewMode::Icon];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Tree => "Tree",
            ViewMode::Column => "Column",
            ViewMode::Icon => "Icon",
        }
    }

    /// Whether previews go to the inline pane rather than the popup.
    pub fn has_inline_preview(self) -> bool {
        matches!(self, ViewMode::Column)
    }
}

/// The single current entry within the active view, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Entry(PathBuf),
}

impl Selection {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Selection::Empty => None,
            Selection::Entry(path) => Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Selection of `entries[index]`, empty when out of range or `None`.
    pub fn from_index(entries: &[FileEntry], index: Option<usize>) -> Self {
        index
            .and_then(|i| entries.get(i))
            .map(|e| Selection::Entry(e.path().to_path_buf()))
            .unwrap_or_default()
    }

    /// Position of the selected entry in `entries`.
    pub fn index_in(&self, entries: &[FileEntry]) -> Option<usize> {
        let path = self.path()?;
        entries.iter().position(|e| e.path() == path)
    }
}

/// Capability interface shared by every view widget.
///
/// Widgets only render and track pointer state. Activation is not handled
/// here: the frontend turns it into a command so every mode navigates
/// through the same transition.
pub trait ViewWidget {
    fn mode(&self) -> ViewMode;

    /// Roots the widget at `location` showing `entries`, with `selection`
    /// as the initial current entry.
    fn attach(&mut self, location: &Location, entries: &[FileEntry], selection: Selection);

    fn current_selection(&self) -> Selection;

    /// Moves the current entry to `entries[index]`, or clears it.
    fn select(&mut self, index: Option<usize>);

    /// Records the entry under the pointer.
    fn hover(&mut self, index: Option<usize>);

    /// The entry under the pointer, if any.
    fn hovered(&self) -> Selection;

    /// Whether [`attach`](Self::attach) honours a non-empty selection.
    fn supports_selection_restore(&self) -> bool {
        true
    }
}

/// Builds a fresh widget for a view mode.
pub trait ViewFactory {
    fn build(&self, mode: ViewMode) -> Box<dyn ViewWidget>;
}
