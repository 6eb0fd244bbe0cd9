//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, selected entry info, hidden-file indicator,
//! the active view mode, and the transient status message.

use colfm_core::{human_size, FileEntry, ViewMode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::StatusLine;

const BG: Color = Color::Black;

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub selected_index: Option<usize>,
    pub selected_entry: Option<&'a FileEntry>,
    pub show_hidden: bool,
    pub view_mode: ViewMode,
    pub status: Option<&'a StatusLine>,
}

pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let line = Line::from(vec![
        Span::styled(
            position_text(props.selected_index, props.entry_count),
            Style::default()
                .fg(Color::White)
                .bg(BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            entry_text(props.selected_entry),
            Style::default().fg(Color::White).bg(BG),
        ),
        Span::styled(
            if props.show_hidden { " [H]" } else { "" },
            Style::default()
                .fg(Color::Yellow)
                .bg(BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [{}]", props.view_mode.label()),
            Style::default().fg(Color::Cyan).bg(BG),
        ),
        status_span(props.status),
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(BG));
    f.render_widget(bar, area);
}

fn position_text(selected: Option<usize>, count: usize) -> String {
    match selected {
        Some(i) if count > 0 => format!(" {}/{count}", i + 1),
        _ => format!(" -/{count}"),
    }
}

fn entry_text(entry: Option<&FileEntry>) -> String {
    entry
        .map(|e| {
            if e.is_dir() {
                format!("  [DIR] {}", e.name())
            } else {
                format!("  {} ({})", e.name(), human_size(e.size()))
            }
        })
        .unwrap_or_default()
}

fn status_span(status: Option<&StatusLine>) -> Span<'static> {
    let Some(status) = status else {
        return Span::raw("");
    };
    let fg = if status.is_error {
        Color::Red
    } else {
        Color::Green
    };
    Span::styled(
        format!("  {}", status.text),
        Style::default()
            .fg(fg)
            .bg(BG)
            .add_modifier(Modifier::ITALIC),
    )
}
