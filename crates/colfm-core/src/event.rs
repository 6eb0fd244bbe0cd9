//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which the coordinator
//! processes and responds to with [`Event`]s. This decoupling allows any
//! frontend to drive the same core logic.

use std::path::PathBuf;

use crate::action::Action;
use crate::view::ViewMode;

/// A request from the UI.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
/// Indices refer to the current entry snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a toolbar or keyboard action.
    Action(Action),
    /// Commit the given breadcrumb text.
    SubmitBreadcrumb(String),
    /// Replace the breadcrumb text without navigating.
    EditBreadcrumb(String),
    /// Set the current entry of the active view.
    Select(Option<usize>),
    /// Set the entry under the pointer.
    Hover(Option<usize>),
    /// Double-activation (double click, Enter) on an entry.
    Activate(usize),
    /// Single click on an entry.
    Click(usize),
    /// Dismiss the info popup.
    ClosePopup,
}

/// Where a preview was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSurface {
    /// The inline pane of the column view.
    Pane,
    /// The singleton info popup.
    Popup,
}

/// A notification the core sends back to the UI.
///
/// Events flow **Core → UI**. The UI uses these to update its display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The current location changed.
    LocationChanged(PathBuf),
    /// A view widget was (re)attached to the current location.
    ViewAttached(ViewMode),
    /// A preview of `path` was written to `surface`.
    PreviewUpdated {
        path: PathBuf,
        surface: PreviewSurface,
    },
    /// The info popup was closed.
    PopupClosed,
    /// Transient, informational status text.
    Status(String),
    /// A recovered failure, as status text.
    OperationFailed(String),
}

impl Event {
    /// Status-line text carried by this event, if any.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Event::Status(text) | Event::OperationFailed(text) => Some(text),
            _ => None,
        }
    }
}
