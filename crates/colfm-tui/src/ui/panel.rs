//! List renderings of the current location: the tree view and the column
//! view's entry list.
//!
//! Both slice the entries with [`visible_window`] themselves so the rows
//! on screen match what [`crate::views::hit_test`] assumes.

use colfm_core::{human_size, FileEntry};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::icons::icon_for_entry;
use crate::render::visible_window;

/// Renders the tree view: one row per entry with branch glyphs and sizes.
pub fn render_tree_list(
    f: &mut Frame,
    area: Rect,
    entries: &[FileEntry],
    selected: Option<usize>,
    hovered: Option<usize>,
    title: &str,
) {
    let last = entries.len().saturating_sub(1);
    render_rows(f, area, entries, selected, hovered, title, |i, entry| {
        tree_row(entry, i == last)
    });
}

/// Renders the column view's entry list; directories carry a `›` marker.
pub fn render_column_list(
    f: &mut Frame,
    area: Rect,
    entries: &[FileEntry],
    selected: Option<usize>,
    hovered: Option<usize>,
    title: &str,
) {
    render_rows(f, area, entries, selected, hovered, title, |_, entry| {
        column_row(entry)
    });
}

fn render_rows<'a>(
    f: &mut Frame,
    area: Rect,
    entries: &'a [FileEntry],
    selected: Option<usize>,
    hovered: Option<usize>,
    title: &str,
    row: impl Fn(usize, &'a FileEntry) -> Line<'a>,
) {
    let visible = usize::from(area.height.saturating_sub(2));
    let (start, end) = visible_window(selected.unwrap_or(0), entries.len(), visible);

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let index = start + offset;
            let mut line = row(index, entry);
            if hovered == Some(index) {
                line = line.patch_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_owned())
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(Color::Yellow),
        );

    let mut state = ListState::default();
    state.select(selected.filter(|&s| s >= start && s < end).map(|s| s - start));

    f.render_stateful_widget(list, area, &mut state);
}

fn tree_row(entry: &FileEntry, is_last: bool) -> Line<'_> {
    let branch = if is_last { "└─ " } else { "├─ " };
    let mut spans = vec![
        Span::styled(branch, Style::default().fg(Color::DarkGray)),
        Span::raw(icon_for_entry(entry)),
        Span::styled(entry.name(), entry_style(entry)),
    ];
    if !entry.is_dir() {
        spans.push(Span::styled(
            format!("  {}", human_size(entry.size())),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn column_row(entry: &FileEntry) -> Line<'_> {
    let mut spans = vec![
        Span::raw(icon_for_entry(entry)),
        Span::styled(entry.name(), entry_style(entry)),
    ];
    if entry.is_dir() {
        spans.push(Span::styled(" ›", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

pub(crate) fn entry_style(entry: &FileEntry) -> Style {
    if entry.is_dir() {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if entry.is_symlink() {
        Style::default().fg(Color::Cyan)
    } else if entry.is_hidden() {
        Style::default().fg(Color::DarkGray)
    } else if entry.is_executable() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}
