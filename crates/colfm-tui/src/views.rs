//! Terminal view widgets.
//!
//! The tree, column and icon layouts share one pointer model; they differ
//! only in how `render` lays the entries out and how a mouse position maps
//! back to an entry index (see [`hit_test`]).

use std::path::PathBuf;

use colfm_core::{FileEntry, Location, Selection, ViewFactory, ViewMode, ViewWidget};
use ratatui::layout::Rect;

use crate::render::visible_window;

/// Pointer state of one terminal view.
#[derive(Debug, Clone)]
pub struct TerminalView {
    mode: ViewMode,
    paths: Vec<PathBuf>,
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl TerminalView {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            paths: Vec::new(),
            selected: None,
            hovered: None,
        }
    }

    fn selection_at(&self, index: Option<usize>) -> Selection {
        index
            .and_then(|i| self.paths.get(i))
            .map(|p| Selection::Entry(p.clone()))
            .unwrap_or_default()
    }

    fn clamp(&self, index: Option<usize>) -> Option<usize> {
        index.filter(|&i| i < self.paths.len())
    }
}

impl ViewWidget for TerminalView {
    fn mode(&self) -> ViewMode {
        self.mode
    }

    fn attach(&mut self, location: &Location, entries: &[FileEntry], selection: Selection) {
        self.paths = entries.iter().map(|e| e.path().to_path_buf()).collect();
        self.selected = selection.index_in(entries);
        self.hovered = None;
        tracing::debug!(
            "view: {} attached at {} ({} entries)",
            self.mode.label(),
            location.display_text(),
            self.paths.len()
        );
    }

    fn current_selection(&self) -> Selection {
        self.selection_at(self.selected)
    }

    fn select(&mut self, index: Option<usize>) {
        self.selected = self.clamp(index);
    }

    fn hover(&mut self, index: Option<usize>) {
        self.hovered = self.clamp(index);
    }

    fn hovered(&self) -> Selection {
        self.selection_at(self.hovered)
    }
}

/// Builds a [`TerminalView`] for each mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalViewFactory;

impl ViewFactory for TerminalViewFactory {
    fn build(&self, mode: ViewMode) -> Box<dyn ViewWidget> {
        Box::new(TerminalView::new(mode))
    }
}

/// Geometry needed to map a screen cell back to an entry.
#[derive(Debug, Clone, Copy)]
pub struct ViewGeometry {
    /// The view area, including its border.
    pub area: Rect,
    pub mode: ViewMode,
    pub total: usize,
    pub selected: Option<usize>,
    pub icon_cell_width: u16,
}

/// Height of one icon-grid cell: glyph row plus name row.
pub const ICON_CELL_HEIGHT: u16 = 2;

/// Entries per row of the icon grid for an inner width.
pub fn icon_columns(inner_width: u16, cell_width: u16) -> usize {
    usize::from((inner_width / cell_width.max(1)).max(1))
}

/// Maps the cell at (`column`, `row`) to the entry drawn there.
pub fn hit_test(geometry: &ViewGeometry, column: u16, row: u16) -> Option<usize> {
    let inner = inner(geometry.area);
    if column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    let dx = column - inner.x;
    let dy = row - inner.y;
    let selected = geometry.selected.unwrap_or(0);

    let index = match geometry.mode {
        ViewMode::Tree | ViewMode::Column => {
            let (start, end) =
                visible_window(selected, geometry.total, usize::from(inner.height));
            let index = start + usize::from(dy);
            (index < end).then_some(index)?
        }
        ViewMode::Icon => {
            let columns = icon_columns(inner.width, geometry.icon_cell_width);
            let rows = usize::from((inner.height / ICON_CELL_HEIGHT).max(1));
            let total_rows = geometry.total.div_ceil(columns);
            let (first_row, _) = visible_window(selected / columns, total_rows, rows);
            let col = usize::from(dx / geometry.icon_cell_width.max(1));
            if col >= columns {
                return None;
            }
            (first_row + usize::from(dy / ICON_CELL_HEIGHT)) * columns + col
        }
    };
    (index < geometry.total).then_some(index)
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
