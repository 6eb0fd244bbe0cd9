//! Unified action system for colfm.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, toolbar label, tooltip,
//! category) in toolbar order, and resolves the ids used in `keymap.toml`.

/// Every user-triggerable action in colfm.
///
/// Variants carry no parameters; the subject (current selection, location)
/// is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // File
    MoveToTrash,
    Open,
    Close,
    Info,
    Rename,
    Move,
    Duplicate,
    Softlink,
    // Navigation
    Refresh,
    OpenTrash,
    GoUp,
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    // View
    ViewTree,
    ViewColumn,
    ViewIcon,
    ToggleHidden,
    // Frontend
    EditPath,
    ClosePopup,
    Quit,
}

impl Action {
    /// File-mutation actions that exist on the toolbar but do nothing yet.
    pub fn is_stub(self) -> bool {
        matches!(
            self,
            Action::MoveToTrash
                | Action::Close
                | Action::Rename
                | Action::Move
                | Action::Duplicate
                | Action::Softlink
        )
    }
}

/// Broad category for grouping actions on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    File,
    Navigation,
    View,
    Frontend,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Navigation => "Navigation",
            Self::View => "View",
            Self::Frontend => "Frontend",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"go_up"`).
    pub id: &'static str,
    /// Toolbar label (e.g. `"Go Up a Level"`).
    pub name: &'static str,
    pub tooltip: &'static str,
    pub category: ActionCategory,
    /// Whether the action has a toolbar button.
    pub on_toolbar: bool,
}

const fn toolbar(
    action: Action,
    id: &'static str,
    name: &'static str,
    tooltip: &'static str,
    category: ActionCategory,
) -> ActionDescriptor {
    ActionDescriptor {
        action,
        id,
        name,
        tooltip,
        category,
        on_toolbar: true,
    }
}

const fn keyboard(
    action: Action,
    id: &'static str,
    name: &'static str,
    tooltip: &'static str,
    category: ActionCategory,
) -> ActionDescriptor {
    ActionDescriptor {
        action,
        id,
        name,
        tooltip,
        category,
        on_toolbar: false,
    }
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry; toolbar actions come first, in toolbar order.
    pub fn new() -> Self {
        use Action as A;
        use ActionCategory as C;

        let descriptors = vec![
            toolbar(A::MoveToTrash, "move_to_trash", "Move to Trash", "Move selected items to Trash", C::File),
            toolbar(A::Refresh, "refresh", "Refresh Folder", "Reload current folder", C::Navigation),
            toolbar(A::OpenTrash, "open_trash", "Open Trash", "Open the Trash folder", C::Navigation),
            toolbar(A::GoUp, "go_up", "Go Up a Level", "Go to parent folder", C::Navigation),
            toolbar(A::Open, "open", "Open", "Open selected item", C::File),
            toolbar(A::Close, "close", "Close", "Close selection", C::File),
            toolbar(A::Info, "info", "File Info & Preview", "Show file information and preview", C::File),
            toolbar(A::Rename, "rename", "Rename", "Rename selected item", C::File),
            toolbar(A::Move, "move", "Move", "Move selected item", C::File),
            toolbar(A::Duplicate, "duplicate", "Copy / Duplicate", "Copy or duplicate selected item", C::File),
            toolbar(A::Softlink, "softlink", "Create Softlink", "Create a symbolic link to selected item", C::File),
            toolbar(A::ViewTree, "view_tree", "Tree/List View", "Switch to Tree/List view", C::View),
            toolbar(A::ViewColumn, "view_column", "Column View", "Switch to Column view", C::View),
            toolbar(A::ViewIcon, "view_icon", "Icon View", "Switch to Icon view", C::View),
            toolbar(A::ToggleHidden, "toggle_hidden", "Show/Hide Invisibles", "Toggle hidden files", C::View),
            keyboard(A::CursorUp, "cursor_up", "Cursor Up", "Move cursor up one entry", C::Navigation),
            keyboard(A::CursorDown, "cursor_down", "Cursor Down", "Move cursor down one entry", C::Navigation),
            keyboard(A::CursorTop, "cursor_top", "Cursor Top", "Jump to first entry", C::Navigation),
            keyboard(A::CursorBottom, "cursor_bottom", "Cursor Bottom", "Jump to last entry", C::Navigation),
            keyboard(A::EditPath, "edit_path", "Edit Path", "Focus the path editor", C::Frontend),
            keyboard(A::ClosePopup, "close_popup", "Close Info", "Close the info window", C::Frontend),
            keyboard(A::Quit, "quit", "Quit", "Exit colfm", C::Frontend),
        ];
        Self { descriptors }
    }

    /// Returns all registered action descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Toolbar actions in toolbar order.
    pub fn toolbar(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.descriptors.iter().filter(|d| d.on_toolbar)
    }

    /// Looks up an action by its snake-case id.
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for `action`.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }

    /// Toolbar label of `action`, or its debug name if unregistered.
    pub fn label(&self, action: Action) -> &'static str {
        self.descriptor_for(action).map_or("Action", |d| d.name)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
