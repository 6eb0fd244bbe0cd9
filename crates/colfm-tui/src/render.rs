use colfm_core::ViewMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, AppMode};
use crate::image_preview::ImagePreviewState;
use crate::ui::breadcrumb::render_breadcrumb;
use crate::ui::icon_grid::render_icon_grid;
use crate::ui::panel::{render_column_list, render_tree_list};
use crate::ui::popup::render_info_popup;
use crate::ui::preview::{render_preview_pane, ImageSlot};
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::toolbar::render_toolbar;

/// Computes the visible window `(start, end)` for a list of `total` items
/// so that `selected` is always in view within `max_visible` lines.
pub fn visible_window(selected: usize, total: usize, max_visible: usize) -> (usize, usize) {
    if total <= max_visible {
        return (0, total);
    }
    let half = max_visible / 2;
    let start = if selected <= half {
        0
    } else if selected + half >= total {
        total.saturating_sub(max_visible)
    } else {
        selected - half
    };
    let end = (start + max_visible).min(total);
    (start, end)
}

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub toolbar: Rect,
    pub breadcrumb: Rect,
    pub view: Rect,
    /// The inline preview pane, column mode only.
    pub pane: Option<Rect>,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, mode: ViewMode) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let (view, pane) = if mode.has_inline_preview() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
                .split(rows[2]);
            (columns[0], Some(columns[1]))
        } else {
            (rows[2], None)
        };

        Self {
            toolbar: rows[0],
            breadcrumb: rows[1],
            view,
            pane,
            status: rows[3],
        }
    }
}

/// Composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App, images: &mut ImagePreviewState) {
    let coordinator = app.coordinator();
    let state = coordinator.state();
    let mode = coordinator.view_mode();
    let layout = AppLayout::new(f.area(), mode);

    let entries = state.entries();
    let selected = app.selected_index();
    let hovered = app.hovered_index();
    let title = format!(" {} ", state.location().name());

    render_toolbar(f, layout.toolbar, app);
    render_breadcrumb(
        f,
        layout.breadcrumb,
        coordinator.breadcrumb().text(),
        app.mode() == AppMode::EditPath,
    );

    match mode {
        ViewMode::Tree => render_tree_list(f, layout.view, entries, selected, hovered, &title),
        ViewMode::Column => render_column_list(f, layout.view, entries, selected, hovered, &title),
        ViewMode::Icon => render_icon_grid(
            f,
            layout.view,
            entries,
            selected,
            hovered,
            app.icon_cell_width(),
            &title,
        ),
    }

    if let (Some(area), Some(pane)) = (layout.pane, coordinator.pane()) {
        let slot = ImageSlot {
            images: &mut *images,
            generation: app.preview_generation(),
        };
        render_preview_pane(f, area, pane.report(), slot);
    }

    render_statusbar(
        f,
        layout.status,
        &StatusBarProps {
            entry_count: entries.len(),
            selected_index: selected,
            selected_entry: selected.and_then(|i| entries.get(i)),
            show_hidden: state.show_hidden(),
            view_mode: mode,
            status: app.status(),
        },
    );

    if let Some(popup) = coordinator.popup() {
        let slot = ImageSlot {
            images,
            generation: app.preview_generation(),
        };
        render_info_popup(f, popup, slot);
    }
}
