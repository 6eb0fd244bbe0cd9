//! Single dispatcher for every user command.
//!
//! [`Coordinator`] owns the navigation state, the active view widget, the
//! breadcrumb editor and both preview surfaces. Every transition ends with
//! the widget and breadcrumb re-synchronised to the current location, so
//! views never disagree about where the user is.
//!
//! `dispatch` takes `&mut self`, so a transition always completes before the
//! next one can start.

use std::path::{Path, PathBuf};

use crate::action::{Action, ActionRegistry};
use crate::config::settings::Config;
use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event, PreviewSurface};
use crate::fs::launch::{Launcher, SystemLauncher};
use crate::fs::mime::MimeClassifier;
use crate::fs::preview::{ImageCrateDecoder, PreviewContent, PreviewPipeline, PreviewReport};
use crate::fs::stat::stat;
use crate::nav::breadcrumb::BreadcrumbBridge;
use crate::nav::state::{trash_dir_convention, NavigationState};
use crate::view::{Selection, ViewFactory, ViewMode, ViewWidget};

static NOTHING: PreviewContent = PreviewContent::None;

/// The persistent preview area of the column view.
#[derive(Debug, Clone, Default)]
pub struct PreviewPane {
    report: Option<PreviewReport>,
}

impl PreviewPane {
    pub fn report(&self) -> Option<&PreviewReport> {
        self.report.as_ref()
    }

    /// The current payload; [`PreviewContent::None`] before the first preview.
    pub fn content(&self) -> &PreviewContent {
        self.report.as_ref().map_or(&NOTHING, |r| &r.content)
    }

    fn show(&mut self, report: PreviewReport) {
        self.report = Some(report);
    }

    fn clear(&mut self) {
        self.report = None;
    }
}

/// The singleton info popup. Re-showing replaces its content in place.
#[derive(Debug, Clone)]
pub struct InfoPopup {
    report: PreviewReport,
    shown: usize,
}

impl InfoPopup {
    fn new(report: PreviewReport) -> Self {
        Self { report, shown: 1 }
    }

    fn show(&mut self, report: PreviewReport) {
        self.report = report;
        self.shown += 1;
    }

    pub fn title(&self) -> String {
        self.report.title()
    }

    pub fn report(&self) -> &PreviewReport {
        &self.report
    }

    /// How many previews this popup has displayed since it opened.
    pub fn times_shown(&self) -> usize {
        self.shown
    }
}

/// Routes commands to navigation and preview operations.
pub struct Coordinator {
    state: NavigationState,
    widget: Box<dyn ViewWidget>,
    factory: Box<dyn ViewFactory>,
    breadcrumb: BreadcrumbBridge,
    pane: Option<PreviewPane>,
    popup: Option<InfoPopup>,
    pipeline: PreviewPipeline,
    launcher: Box<dyn Launcher>,
    trash_dir: Option<PathBuf>,
    registry: ActionRegistry,
}

impl Coordinator {
    /// Attaches a widget for the state's view mode, rooted at its location.
    pub fn new(state: NavigationState, factory: Box<dyn ViewFactory>) -> Self {
        let mode = state.view_mode();
        let mut widget = factory.build(mode);
        widget.attach(state.location(), state.entries(), Selection::Empty);
        let breadcrumb = BreadcrumbBridge::new(state.location());
        tracing::info!("view: start in {} mode", mode.label());

        Self {
            state,
            widget,
            factory,
            breadcrumb,
            pane: mode.has_inline_preview().then(PreviewPane::default),
            popup: None,
            pipeline: PreviewPipeline::default(),
            launcher: Box::new(SystemLauncher),
            trash_dir: trash_dir_convention(),
            registry: ActionRegistry::new(),
        }
    }

    /// Opens `start` with the settings, limits and trash path of `config`.
    pub fn from_config(
        start: &Path,
        config: &Config,
        factory: Box<dyn ViewFactory>,
    ) -> CoreResult<Self> {
        let state = NavigationState::open(
            start,
            config.general.show_hidden,
            config.general.start_view,
        )?;
        let pipeline = PreviewPipeline::new(MimeClassifier::default(), Box::new(ImageCrateDecoder))
            .with_limits(config.preview.limits())
            .with_date_format(config.preview.date_format.clone());
        Ok(Self::new(state, factory)
            .with_pipeline(pipeline)
            .with_trash_dir(config.trash_dir()))
    }

    pub fn with_pipeline(self, pipeline: PreviewPipeline) -> Self {
        Self { pipeline, ..self }
    }

    pub fn with_launcher(self, launcher: Box<dyn Launcher>) -> Self {
        Self { launcher, ..self }
    }

    pub fn with_trash_dir(self, trash_dir: Option<PathBuf>) -> Self {
        Self { trash_dir, ..self }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode()
    }

    pub fn widget(&self) -> &dyn ViewWidget {
        self.widget.as_ref()
    }

    pub fn breadcrumb(&self) -> &BreadcrumbBridge {
        &self.breadcrumb
    }

    /// The inline pane; present only in column mode.
    pub fn pane(&self) -> Option<&PreviewPane> {
        self.pane.as_ref()
    }

    pub fn popup(&self) -> Option<&InfoPopup> {
        self.popup.as_ref()
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Handles one command and reports what changed.
    pub fn dispatch(&mut self, command: Command) -> Vec<Event> {
        tracing::debug!("dispatch: {command:?}");
        match command {
            Command::Action(action) => self.run_action(action),
            Command::SubmitBreadcrumb(text) => self.submit_breadcrumb(text),
            Command::EditBreadcrumb(text) => {
                self.breadcrumb.edit(text);
                Vec::new()
            }
            Command::Select(index) => {
                self.widget.select(index);
                Vec::new()
            }
            Command::Hover(index) => {
                self.widget.hover(index);
                Vec::new()
            }
            Command::Activate(index) => self.activate(index),
            Command::Click(index) => self.click(index),
            Command::ClosePopup => self.close_popup(),
        }
    }

    fn run_action(&mut self, action: Action) -> Vec<Event> {
        match action {
            Action::Refresh => self.refresh(),
            Action::OpenTrash => self.open_trash(),
            Action::GoUp => self.go_up(),
            Action::Open => self.open_selection(),
            Action::Info => self.info(),
            Action::ViewTree => self.set_view_mode(ViewMode::Tree),
            Action::ViewColumn => self.set_view_mode(ViewMode::Column),
            Action::ViewIcon => self.set_view_mode(ViewMode::Icon),
            Action::ToggleHidden => self.toggle_hidden(),
            Action::CursorUp => self.move_cursor(CursorMove::Up),
            Action::CursorDown => self.move_cursor(CursorMove::Down),
            Action::CursorTop => self.move_cursor(CursorMove::Top),
            Action::CursorBottom => self.move_cursor(CursorMove::Bottom),
            Action::ClosePopup => self.close_popup(),
            Action::EditPath | Action::Quit => {
                tracing::debug!("dispatch: {action:?} is handled by the frontend");
                Vec::new()
            }
            Action::MoveToTrash
            | Action::Close
            | Action::Rename
            | Action::Move
            | Action::Duplicate
            | Action::Softlink => failure(CoreError::NotImplemented(self.registry.label(action))),
        }
    }

    /// Attaches the widget for `mode` at the current location.
    ///
    /// The selection carries over when the new widget can restore it and
    /// the entry is still listed. The breadcrumb is re-synced even when
    /// `mode` is already active. Entering a mode with an inline pane
    /// closes the popup.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Vec<Event> {
        let previous = self.widget.current_selection();
        if mode != self.widget.mode() {
            tracing::info!("view: {} -> {}", self.widget.mode().label(), mode.label());
            self.widget = self.factory.build(mode);
        }
        self.state = self.state.with_view_mode(mode);

        let mut events = Vec::new();
        if mode.has_inline_preview() {
            self.pane.get_or_insert_with(PreviewPane::default);
            if self.popup.take().is_some() {
                events.push(Event::PopupClosed);
            }
        } else {
            self.pane = None;
        }

        let restored = if self.widget.supports_selection_restore()
            && previous.index_in(self.state.entries()).is_some()
        {
            previous
        } else {
            Selection::Empty
        };
        self.widget
            .attach(self.state.location(), self.state.entries(), restored);
        self.breadcrumb.sync(self.state.location());
        events.push(Event::ViewAttached(mode));
        events
    }

    /// Commits `text` from the breadcrumb editor.
    pub fn submit_breadcrumb(&mut self, text: String) -> Vec<Event> {
        self.breadcrumb.edit(text);
        let result = self.breadcrumb.commit(&self.state);
        self.apply_navigation(result)
    }

    /// Enters `target`, resolved against the current location.
    pub fn enter_directory(&mut self, target: &Path) -> Vec<Event> {
        let result = self.state.enter_directory(target);
        self.apply_navigation(result)
    }

    /// Moves to the parent and selects the directory just left.
    pub fn go_up(&mut self) -> Vec<Event> {
        let from = self.state.location().path().to_path_buf();
        match self.state.go_up() {
            Ok(Some(next)) => {
                let events = self.apply_navigation(Ok(next));
                let index = self.state.entries().iter().position(|e| e.path() == from);
                self.widget.select(index);
                events
            }
            Ok(None) => Vec::new(),
            Err(e) => failure(e),
        }
    }

    pub fn refresh(&mut self) -> Vec<Event> {
        match self.state.refresh() {
            Ok(next) => {
                self.state = next;
                let mut events = self.set_view_mode(self.state.view_mode());
                events.push(Event::Status("Folder refreshed".to_string()));
                events
            }
            Err(e) => failure(e),
        }
    }

    pub fn toggle_hidden(&mut self) -> Vec<Event> {
        match self.state.toggle_hidden() {
            Ok(next) => {
                self.state = next;
                let mut events = self.set_view_mode(self.state.view_mode());
                let text = if self.state.show_hidden() {
                    "Showing hidden files"
                } else {
                    "Hiding hidden files"
                };
                events.push(Event::Status(text.to_string()));
                events
            }
            Err(e) => failure(e),
        }
    }

    pub fn open_trash(&mut self) -> Vec<Event> {
        let result = match &self.trash_dir {
            Some(dir) => self.state.open_trash(dir),
            None => Err(CoreError::TrashNotFound(PathBuf::from(
                "~/.local/share/Trash/files",
            ))),
        };
        self.apply_navigation(result)
    }

    /// Double-activation: directories are entered, files opened.
    pub fn activate(&mut self, index: usize) -> Vec<Event> {
        let Some(path) = self.state.entry(index).map(|e| e.path().to_path_buf()) else {
            tracing::debug!("activate: index {index} out of range");
            return Vec::new();
        };
        self.open_path(&path)
    }

    /// Single click: selects the entry; in column mode also previews a
    /// non-directory into the pane.
    pub fn click(&mut self, index: usize) -> Vec<Event> {
        let Some(entry) = self.state.entry(index) else {
            return Vec::new();
        };
        let preview = self.state.view_mode().has_inline_preview() && !entry.is_dir();
        let path = entry.path().to_path_buf();
        self.widget.select(Some(index));
        if preview {
            self.show_preview(path)
        } else {
            Vec::new()
        }
    }

    /// Opens the current selection.
    pub fn open_selection(&mut self) -> Vec<Event> {
        match self.widget.current_selection() {
            Selection::Entry(path) => self.open_path(&path),
            Selection::Empty => vec![Event::Status("No item selected".to_string())],
        }
    }

    /// Previews the selection, else the hovered entry, else the location.
    pub fn info(&mut self) -> Vec<Event> {
        let subject = match (self.widget.current_selection(), self.widget.hovered()) {
            (Selection::Entry(path), _) | (Selection::Empty, Selection::Entry(path)) => path,
            (Selection::Empty, Selection::Empty) => self.state.location().path().to_path_buf(),
        };
        self.show_preview(subject)
    }

    pub fn close_popup(&mut self) -> Vec<Event> {
        match self.popup.take() {
            Some(_) => vec![Event::PopupClosed],
            None => Vec::new(),
        }
    }

    fn open_path(&mut self, path: &Path) -> Vec<Event> {
        let entry = match stat(path) {
            Ok(s) => s,
            Err(e) => return failure(e),
        };
        if entry.is_dir {
            return self.enter_directory(path);
        }

        let result = if entry.is_executable {
            self.launcher.launch_executable(path)
        } else {
            self.launcher.open_default(path)
        };
        match result {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                vec![Event::Status(format!("Opened {name}"))]
            }
            Err(e) => failure(e),
        }
    }

    fn show_preview(&mut self, path: PathBuf) -> Vec<Event> {
        let report = self.pipeline.preview(&path);
        let surface = if self.state.view_mode().has_inline_preview() {
            self.pane
                .get_or_insert_with(PreviewPane::default)
                .show(report);
            PreviewSurface::Pane
        } else {
            match &mut self.popup {
                Some(popup) => popup.show(report),
                None => self.popup = Some(InfoPopup::new(report)),
            }
            PreviewSurface::Popup
        };
        vec![Event::PreviewUpdated { path, surface }]
    }

    fn move_cursor(&mut self, movement: CursorMove) -> Vec<Event> {
        let len = self.state.entries().len();
        if len == 0 {
            return Vec::new();
        }
        let current = self.widget.current_selection().index_in(self.state.entries());
        let last = len - 1;
        let next = match (movement, current) {
            (CursorMove::Top, _) | (CursorMove::Down, None) => 0,
            (CursorMove::Bottom, _) | (CursorMove::Up, None) => last,
            (CursorMove::Up, Some(i)) => i.saturating_sub(1),
            (CursorMove::Down, Some(i)) => (i + 1).min(last),
        };
        self.click(next)
    }

    fn apply_navigation(&mut self, result: CoreResult<NavigationState>) -> Vec<Event> {
        match result {
            Ok(next) => {
                self.state = next;
                let location = self.state.location();
                self.widget
                    .attach(location, self.state.entries(), Selection::Empty);
                self.breadcrumb.sync(location);
                if let Some(pane) = &mut self.pane {
                    pane.clear();
                }
                vec![
                    Event::LocationChanged(location.path().to_path_buf()),
                    Event::ViewAttached(self.state.view_mode()),
                ]
            }
            Err(e) => failure(e),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CursorMove {
    Up,
    Down,
    Top,
    Bottom,
}

fn failure(err: CoreError) -> Vec<Event> {
    tracing::warn!("{err}");
    vec![Event::OperationFailed(err.status_text())]
}
