use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PROMPT: &str = " \u{f07c} ";

/// Renders the path editor row.
///
/// The text is shown exactly as the breadcrumb holds it, so a rejected
/// path stays visible for correction. While `editing`, the terminal cursor
/// sits after the last character.
pub fn render_breadcrumb(f: &mut Frame, area: Rect, text: &str, editing: bool) {
    let text_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let line = Line::from(vec![
        Span::styled(
            PROMPT,
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(colfm_core::nfc_string(text), text_style),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if editing {
        f.set_cursor_position(cursor_position(area, text));
    }
}

fn cursor_position(area: Rect, text: &str) -> Position {
    let offset = PROMPT.chars().count() + text.chars().count();
    let max = area.width.saturating_sub(1);
    let x = area.x + u16::try_from(offset).unwrap_or(max).min(max);
    Position::new(x, area.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_text() {
        let area = Rect::new(0, 1, 80, 1);
        assert_eq!(cursor_position(area, "/tmp"), Position::new(7, 1));
    }

    #[test]
    fn cursor_clamped_to_row() {
        let area = Rect::new(2, 1, 10, 1);
        let long = "/a/very/long/path/indeed";
        assert_eq!(cursor_position(area, long), Position::new(11, 1));
    }
}
