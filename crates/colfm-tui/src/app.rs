use std::path::Path;
use std::time::{Duration, Instant};

use colfm_core::config::settings::UiConfig;
use colfm_core::{Action, Command, Config, Coordinator, Event, Keymap};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::input::{resolve_action, InputAction};
use crate::render::AppLayout;
use crate::ui::popup::popup_area;
use crate::ui::toolbar;
use crate::views::{hit_test, TerminalViewFactory, ViewGeometry};

/// Two clicks on the same entry within this window activate it.
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Application mode; determines how key presses are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    /// The breadcrumb editor has focus.
    EditPath,
}

/// A transient message on the status row.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

/// Frontend state around the core [`Coordinator`].
pub struct App {
    coordinator: Coordinator,
    keymap: Keymap,
    mode: AppMode,
    status: Option<StatusLine>,
    status_ttl: Duration,
    icon_cell_width: u16,
    last_click: Option<(usize, Instant)>,
    /// Bumped on every new preview so cached image encodings are refreshed.
    preview_generation: u64,
    should_quit: bool,
}

impl App {
    /// Opens `start_dir` with the terminal view widgets.
    pub fn new(start_dir: &Path, config: &Config, keymap: Keymap) -> anyhow::Result<Self> {
        let coordinator =
            Coordinator::from_config(start_dir, config, Box::new(TerminalViewFactory))?;
        Ok(Self::with_coordinator(coordinator, keymap, &config.ui))
    }

    pub fn with_coordinator(coordinator: Coordinator, keymap: Keymap, ui: &UiConfig) -> Self {
        Self {
            coordinator,
            keymap,
            mode: AppMode::Normal,
            status: None,
            status_ttl: Duration::from_secs(ui.show_status_seconds),
            icon_cell_width: ui.icon_cell_width.max(1),
            last_click: None,
            preview_generation: 0,
            should_quit: false,
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn icon_cell_width(&self) -> u16 {
        self.icon_cell_width
    }

    pub fn preview_generation(&self) -> u64 {
        self.preview_generation
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Index of the active view's current entry.
    pub fn selected_index(&self) -> Option<usize> {
        let entries = self.coordinator.state().entries();
        self.coordinator.widget().current_selection().index_in(entries)
    }

    /// Index of the entry under the pointer.
    pub fn hovered_index(&self) -> Option<usize> {
        let entries = self.coordinator.state().entries();
        self.coordinator.widget().hovered().index_in(entries)
    }

    /// Drops the status message once it has been visible long enough.
    pub fn expire_status(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now.duration_since(status.shown_at) >= self.status_ttl {
                self.status = None;
            }
        }
    }

    pub fn handle_input(&mut self, action: InputAction) {
        if self.coordinator.popup().is_some() && !Self::reaches_popup(&action) {
            tracing::debug!("app: {action:?} ignored while the info popup is open");
            return;
        }
        match action {
            InputAction::Command(command) => self.dispatch(command),
            InputAction::Quit => self.should_quit = true,
            InputAction::EditPath => self.mode = AppMode::EditPath,
            InputAction::EditInsert(c) => {
                let mut text = self.coordinator.breadcrumb().text().to_string();
                text.push(c);
                self.dispatch(Command::EditBreadcrumb(text));
            }
            InputAction::EditBackspace => {
                let mut text = self.coordinator.breadcrumb().text().to_string();
                text.pop();
                self.dispatch(Command::EditBreadcrumb(text));
            }
            InputAction::EditSubmit => {
                let text = self.coordinator.breadcrumb().text().to_string();
                let events = self.coordinator.dispatch(Command::SubmitBreadcrumb(text));
                if !events.iter().any(|e| matches!(e, Event::OperationFailed(_))) {
                    self.mode = AppMode::Normal;
                }
                self.apply_events(events);
            }
            InputAction::EditCancel => {
                let text = self.coordinator.state().location().display_text();
                self.dispatch(Command::EditBreadcrumb(text));
                self.mode = AppMode::Normal;
            }
            InputAction::None => {}
        }
    }

    /// Input still honoured while the info popup is open.
    fn reaches_popup(action: &InputAction) -> bool {
        matches!(
            action,
            InputAction::Quit
                | InputAction::None
                | InputAction::Command(Command::ClosePopup)
                | InputAction::Command(Command::Action(Action::ClosePopup | Action::Info))
        )
    }

    /// Routes a mouse event; `screen` is the full terminal area.
    ///
    /// While the info popup is open the view underneath gets nothing; a
    /// click outside the popup closes it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, screen: Rect) {
        if self.coordinator.popup().is_some() {
            self.last_click = None;
            if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                && !popup_area(screen).contains(Position::new(mouse.column, mouse.row))
            {
                self.dispatch(Command::ClosePopup);
            }
            return;
        }

        let layout = AppLayout::new(screen, self.coordinator.view_mode());
        let hit = hit_test(&self.geometry(layout.view), mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => self.dispatch(Command::Hover(hit)),
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row == layout.toolbar.y {
                    if let Some(action) = toolbar::hit_test(self, layout.toolbar, mouse.column) {
                        self.handle_input(resolve_action(action));
                    }
                    return;
                }
                if mouse.row == layout.breadcrumb.y {
                    self.mode = AppMode::EditPath;
                    return;
                }
                self.click(hit, Instant::now());
            }
            MouseEventKind::ScrollDown => self.dispatch(Command::Action(Action::CursorDown)),
            MouseEventKind::ScrollUp => self.dispatch(Command::Action(Action::CursorUp)),
            _ => {}
        }
    }

    /// Geometry of the active view drawn in `area`.
    pub fn geometry(&self, area: Rect) -> ViewGeometry {
        ViewGeometry {
            area,
            mode: self.coordinator.view_mode(),
            total: self.coordinator.state().entries().len(),
            selected: self.selected_index(),
            icon_cell_width: self.icon_cell_width,
        }
    }

    fn click(&mut self, hit: Option<usize>, now: Instant) {
        let Some(index) = hit else {
            self.last_click = None;
            self.dispatch(Command::Select(None));
            return;
        };
        let double = matches!(
            self.last_click,
            Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK
        );
        if double {
            self.last_click = None;
            self.dispatch(Command::Activate(index));
        } else {
            self.last_click = Some((index, now));
            self.dispatch(Command::Click(index));
        }
    }

    fn dispatch(&mut self, command: Command) {
        let events = self.coordinator.dispatch(command);
        self.apply_events(events);
    }

    fn apply_events(&mut self, events: Vec<Event>) {
        for event in events {
            match &event {
                Event::Status(text) => self.set_status(text.clone(), false),
                Event::OperationFailed(text) => self.set_status(text.clone(), true),
                Event::LocationChanged(path) => {
                    self.last_click = None;
                    tracing::debug!("app: location {}", path.display());
                }
                Event::PreviewUpdated { .. } => {
                    self.preview_generation = self.preview_generation.wrapping_add(1);
                }
                Event::ViewAttached(_) | Event::PopupClosed => {}
            }
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusLine {
            text,
            is_error,
            shown_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colfm_core::ViewMode;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::TempDir;

    fn app_in(tmp: &TempDir) -> App {
        let mut config = Config::default();
        config.general.trash_dir = Some(tmp.path().join("no-trash"));
        App::new(tmp.path(), &config, Keymap::default()).unwrap()
    }

    fn fixture() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "hello").unwrap();
        let app = app_in(&tmp);
        (tmp, app)
    }

    fn location(app: &App) -> std::path::PathBuf {
        app.coordinator().state().location().path().to_path_buf()
    }

    #[test]
    fn starts_in_normal_mode_without_status() {
        let (_tmp, app) = fixture();
        assert_eq!(app.mode(), AppMode::Normal);
        assert!(app.status().is_none());
        assert_eq!(app.coordinator().view_mode(), ViewMode::Tree);
    }

    #[test]
    fn quit_sets_flag() {
        let (_tmp, mut app) = fixture();
        app.handle_input(InputAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn stub_action_shows_error_status() {
        let (_tmp, mut app) = fixture();
        app.handle_input(InputAction::Command(Command::Action(Action::Rename)));

        let status = app.status().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("Rename"));
    }

    #[test]
    fn missing_trash_shows_status() {
        let (_tmp, mut app) = fixture();
        app.handle_input(InputAction::Command(Command::Action(Action::OpenTrash)));
        assert_eq!(app.status().unwrap().text, "Trash folder not found");
    }

    #[test]
    fn breadcrumb_edit_and_submit() {
        let (tmp, mut app) = fixture();
        app.handle_input(InputAction::EditPath);
        assert_eq!(app.mode(), AppMode::EditPath);

        for c in "/docs".chars() {
            app.handle_input(InputAction::EditInsert(c));
        }
        app.handle_input(InputAction::EditSubmit);

        assert_eq!(app.mode(), AppMode::Normal);
        assert_eq!(location(&app), tmp.path().join("docs"));
    }

    #[test]
    fn failed_submit_stays_in_editor() {
        let (tmp, mut app) = fixture();
        app.handle_input(InputAction::EditPath);
        for c in "/missing".chars() {
            app.handle_input(InputAction::EditInsert(c));
        }
        app.handle_input(InputAction::EditSubmit);

        assert_eq!(app.mode(), AppMode::EditPath);
        assert!(app.status().unwrap().is_error);
        assert_eq!(location(&app), tmp.path());
        assert!(app.coordinator().breadcrumb().text().ends_with("/missing"));
    }

    #[test]
    fn cancel_restores_location_text() {
        let (_tmp, mut app) = fixture();
        let original = app.coordinator().breadcrumb().text().to_string();
        app.handle_input(InputAction::EditPath);
        app.handle_input(InputAction::EditBackspace);
        app.handle_input(InputAction::EditInsert('x'));
        app.handle_input(InputAction::EditCancel);

        assert_eq!(app.mode(), AppMode::Normal);
        assert_eq!(app.coordinator().breadcrumb().text(), original);
    }

    #[test]
    fn double_click_enters_directory() {
        let (tmp, mut app) = fixture();
        let now = Instant::now();

        app.click(Some(0), now);
        assert_eq!(app.selected_index(), Some(0));
        assert_eq!(location(&app), tmp.path());

        app.click(Some(0), now + Duration::from_millis(100));
        assert_eq!(location(&app), tmp.path().join("docs"));
    }

    #[test]
    fn slow_second_click_only_selects() {
        let (tmp, mut app) = fixture();
        let now = Instant::now();

        app.click(Some(0), now);
        app.click(Some(0), now + Duration::from_secs(2));
        assert_eq!(location(&app), tmp.path());
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let (_tmp, mut app) = fixture();
        app.click(Some(1), Instant::now());
        app.click(None, Instant::now());
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn status_expires_after_ttl() {
        let (_tmp, mut app) = fixture();
        app.handle_input(InputAction::Command(Command::Action(Action::Refresh)));
        let shown = app.status().unwrap().shown_at;

        app.expire_status(shown + Duration::from_secs(1));
        assert!(app.status().is_some());
        app.expire_status(shown + Duration::from_secs(2));
        assert!(app.status().is_none());
    }

    fn popup_fixture() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        for name in ["a", "b", "c", "d", "e", "f"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        let mut app = app_in(&tmp);
        app.handle_input(InputAction::Command(Command::Action(Action::Info)));
        assert!(app.coordinator().popup().is_some());
        (tmp, app)
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    const SCREEN: Rect = Rect::new(0, 0, 80, 24);

    #[test]
    fn clicks_inside_popup_do_not_reach_view() {
        let (tmp, mut app) = popup_fixture();
        app.handle_mouse(left_click(30, 6), SCREEN);
        app.handle_mouse(left_click(30, 6), SCREEN);

        assert!(app.coordinator().popup().is_some());
        assert_eq!(location(&app), tmp.path());
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn click_outside_popup_closes_it() {
        let (tmp, mut app) = popup_fixture();
        app.handle_mouse(left_click(1, 4), SCREEN);

        assert!(app.coordinator().popup().is_none());
        assert_eq!(location(&app), tmp.path());
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn hover_is_ignored_under_popup() {
        let (_tmp, mut app) = popup_fixture();
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..left_click(30, 6)
        };
        app.handle_mouse(moved, SCREEN);
        assert_eq!(app.hovered_index(), None);
    }

    #[test]
    fn keys_are_limited_while_popup_is_open() {
        let (tmp, mut app) = popup_fixture();
        app.handle_input(InputAction::Command(Command::Action(Action::CursorDown)));
        app.handle_input(InputAction::Command(Command::Activate(0)));
        app.handle_input(InputAction::EditPath);

        assert_eq!(app.selected_index(), None);
        assert_eq!(location(&app), tmp.path());
        assert_eq!(app.mode(), AppMode::Normal);

        app.handle_input(InputAction::Command(Command::ClosePopup));
        assert!(app.coordinator().popup().is_none());
        app.handle_input(InputAction::Command(Command::Action(Action::CursorDown)));
        assert_eq!(app.selected_index(), Some(0));
    }

    #[test]
    fn quit_works_while_popup_is_open() {
        let (_tmp, mut app) = popup_fixture();
        app.handle_input(InputAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn new_preview_bumps_generation() {
        let (_tmp, mut app) = fixture();
        assert_eq!(app.preview_generation(), 0);
        app.handle_input(InputAction::Command(Command::Action(Action::Info)));
        app.handle_input(InputAction::Command(Command::Action(Action::Info)));
        assert_eq!(app.preview_generation(), 2);
    }

    #[test]
    fn hover_updates_hovered_index() {
        let (_tmp, mut app) = fixture();
        app.handle_input(InputAction::Command(Command::Hover(Some(1))));
        assert_eq!(app.hovered_index(), Some(1));
    }
}
