//! The toolbar row: every toolbar action with its shortest key binding.
//!
//! Unimplemented file operations are drawn dimmed but stay clickable; the
//! core answers them with a status message.

use colfm_core::{Action, ActionRegistry, Keymap};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

const SEPARATOR: &str = "│";

/// One toolbar button as laid out on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    action: Action,
    text: String,
}

fn segments(registry: &ActionRegistry, keymap: &Keymap) -> Vec<Segment> {
    registry
        .toolbar()
        .map(|d| {
            let text = match keymap.hint_for(d.action) {
                Some(key) => format!(" {key} {} ", d.name),
                None => format!(" {} ", d.name),
            };
            Segment {
                action: d.action,
                text,
            }
        })
        .collect()
}

/// The action whose button covers `offset` columns from the left edge.
fn action_at(segments: &[Segment], offset: usize) -> Option<Action> {
    let mut start = 0;
    for segment in segments {
        let end = start + segment.text.chars().count();
        if offset >= start && offset < end {
            return Some(segment.action);
        }
        start = end + SEPARATOR.chars().count();
    }
    None
}

pub fn render_toolbar(f: &mut Frame, area: Rect, app: &App) {
    let coordinator = app.coordinator();
    let mut spans = Vec::new();
    for (i, segment) in segments(coordinator.registry(), app.keymap())
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
        }
        let style = if segment.action.is_stub() {
            Style::default().fg(Color::DarkGray)
        } else if is_active_view(segment.action, app) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(segment.text, style));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    f.render_widget(bar, area);
}

fn is_active_view(action: Action, app: &App) -> bool {
    use colfm_core::ViewMode;

    let mode = app.coordinator().view_mode();
    matches!(
        (action, mode),
        (Action::ViewTree, ViewMode::Tree)
            | (Action::ViewColumn, ViewMode::Column)
            | (Action::ViewIcon, ViewMode::Icon)
    )
}

/// Maps a click at `column` on the toolbar row to its action.
pub fn hit_test(app: &App, area: Rect, column: u16) -> Option<Action> {
    let offset = usize::from(column.checked_sub(area.x)?);
    let segments = segments(app.coordinator().registry(), app.keymap());
    action_at(&segments, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_segments() -> Vec<Segment> {
        segments(&ActionRegistry::new(), &Keymap::default())
    }

    #[test]
    fn segments_follow_toolbar_order() {
        let segs = default_segments();
        assert_eq!(segs.len(), 15);
        assert_eq!(segs[0].action, Action::MoveToTrash);
        assert_eq!(segs[14].action, Action::ToggleHidden);
    }

    #[test]
    fn segments_show_key_hints() {
        let segs = default_segments();
        let refresh = segs.iter().find(|s| s.action == Action::Refresh).unwrap();
        assert_eq!(refresh.text, " F5 Refresh Folder ");
    }

    #[test]
    fn unbound_action_has_plain_label() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        std::fs::write(&path, "[bindings]\n").unwrap();
        let keymap = Keymap::load(&path).unwrap();
        let segs = segments(&ActionRegistry::new(), &keymap);
        assert_eq!(segs[1].text, " Refresh Folder ");
    }

    #[test]
    fn action_at_maps_offsets() {
        let segs = vec![
            Segment {
                action: Action::GoUp,
                text: " up ".to_string(),
            },
            Segment {
                action: Action::Open,
                text: " open ".to_string(),
            },
        ];
        assert_eq!(action_at(&segs, 0), Some(Action::GoUp));
        assert_eq!(action_at(&segs, 3), Some(Action::GoUp));
        // separator
        assert_eq!(action_at(&segs, 4), None);
        assert_eq!(action_at(&segs, 5), Some(Action::Open));
        assert_eq!(action_at(&segs, 11), None);
    }
}
