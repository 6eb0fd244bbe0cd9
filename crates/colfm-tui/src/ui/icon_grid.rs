use colfm_core::FileEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::icons::IconKind;
use crate::render::visible_window;
use crate::ui::panel::entry_style;
use crate::views::{icon_columns, ICON_CELL_HEIGHT};

/// Renders the icon view: a grid of fixed-width cells, glyph above name.
pub fn render_icon_grid(
    f: &mut Frame,
    area: Rect,
    entries: &[FileEntry],
    selected: Option<usize>,
    hovered: Option<usize>,
    cell_width: u16,
    title: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_owned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cell_width = cell_width.max(1);
    let columns = icon_columns(inner.width, cell_width);
    let rows = usize::from((inner.height / ICON_CELL_HEIGHT).max(1));
    let total_rows = entries.len().div_ceil(columns);
    let (first_row, last_row) = visible_window(selected.unwrap_or(0) / columns, total_rows, rows);

    let buf = f.buffer_mut();
    for row in first_row..last_row {
        for col in 0..columns {
            let index = row * columns + col;
            let Some(entry) = entries.get(index) else {
                break;
            };
            let cell = Rect {
                x: inner.x + col as u16 * cell_width,
                y: inner.y + (row - first_row) as u16 * ICON_CELL_HEIGHT,
                width: cell_width.min(inner.width),
                height: ICON_CELL_HEIGHT,
            };
            let mut style = entry_style(entry);
            if selected == Some(index) {
                style = style.add_modifier(Modifier::REVERSED);
            } else if hovered == Some(index) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            draw_cell(buf, cell, entry, style);
        }
    }
}

fn draw_cell(buf: &mut Buffer, cell: Rect, entry: &FileEntry, style: Style) {
    let kind = IconKind::of(entry);
    let width = usize::from(cell.width);
    let glyph = center(kind.glyph(), width);
    buf.set_string(cell.x, cell.y, glyph, Style::default().fg(kind.color()));
    let name = center(&fit_name(entry.name(), width.saturating_sub(1)), width);
    buf.set_string(cell.x, cell.y + 1, name, style);
}

/// Truncates `name` to `width` characters, marking the cut with `…`.
fn fit_name(name: &str, width: usize) -> String {
    let count = name.chars().count();
    if count <= width {
        return name.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let kept: String = name.chars().take(width - 1).collect();
    format!("{kept}…")
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_name_keeps_short_names() {
        assert_eq!(fit_name("notes.txt", 15), "notes.txt");
    }

    #[test]
    fn fit_name_truncates_with_ellipsis() {
        assert_eq!(fit_name("a-very-long-file-name.txt", 8), "a-very-…");
        assert_eq!(fit_name("abc", 0), "");
    }

    #[test]
    fn fit_name_counts_chars_not_bytes() {
        assert_eq!(fit_name("한글파일", 4), "한글파일");
    }

    #[test]
    fn center_pads_both_sides() {
        assert_eq!(center("ab", 6), "  ab  ");
    }
}
