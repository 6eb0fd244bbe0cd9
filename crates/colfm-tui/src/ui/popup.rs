use colfm_core::InfoPopup;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::preview::{render_report, ImageSlot};

/// Renders the info popup as a centered overlay.
pub fn render_info_popup(f: &mut Frame, popup: &InfoPopup, slot: ImageSlot<'_>) {
    let area = popup_area(f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", popup.title()))
        .title_bottom(Line::from(" Esc to close ").right_aligned())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    render_report(f, inner, popup.report(), slot);
}

/// Screen region of the info popup within `screen`.
pub fn popup_area(screen: Rect) -> Rect {
    centered_rect(70, 70, screen)
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
