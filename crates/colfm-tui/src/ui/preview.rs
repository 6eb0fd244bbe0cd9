//! Preview rendering shared by the column view's pane and the info popup.
//!
//! A report is drawn as an optional image followed by the info table in
//! its fixed field order. Excerpts arrive markup-escaped from the
//! core and are unescaped for the terminal.

use colfm_core::fs::preview::unescape_markup;
use colfm_core::{PreviewContent, PreviewReport};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::image_preview::ImagePreviewState;

/// Width of the label column of the info table.
const LABEL_WIDTH: usize = 12;

/// Below this many rows an image is not drawn.
const MIN_IMAGE_ROWS: u16 = 3;

/// The bitmap on screen and the preview it came from.
pub struct ImageSlot<'a> {
    pub images: &'a mut ImagePreviewState,
    pub generation: u64,
}

/// Renders the inline preview pane; empty until something is previewed.
pub fn render_preview_pane(
    f: &mut Frame,
    area: Rect,
    report: Option<&PreviewReport>,
    slot: ImageSlot<'_>,
) {
    let title = report
        .map(|r| format!(" {} ", r.summary.name))
        .unwrap_or_else(|| " Preview ".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match report {
        Some(report) => render_report(f, inner, report, slot),
        None => {
            let hint = Paragraph::new(Line::styled(
                "Select a file to preview it",
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(hint, inner);
        }
    }
}

/// Draws `report` into `area`, which has no border of its own.
pub fn render_report(f: &mut Frame, area: Rect, report: &PreviewReport, slot: ImageSlot<'_>) {
    let mut table_area = area;

    if let PreviewContent::Image { bitmap, .. } = &report.content {
        let image_rows = area.height / 2;
        if image_rows >= MIN_IMAGE_ROWS {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(image_rows), Constraint::Min(0)])
                .split(area);
            if let Some(protocol) = slot.images.get_or_encode(
                bitmap,
                slot.generation,
                chunks[0].width,
                chunks[0].height,
            ) {
                let widget = ratatui_image::StatefulImage::default();
                f.render_stateful_widget(widget, chunks[0], protocol);
                table_area = chunks[1];
            }
        }
    } else {
        slot.images.invalidate();
    }

    let table = Paragraph::new(report_lines(report)).wrap(Wrap { trim: false });
    f.render_widget(table, table_area);
}

/// The info table as terminal lines.
fn report_lines(report: &PreviewReport) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for (label, value) in report.rows() {
        if label == "Preview" {
            lines.push(Line::from(""));
            lines.push(Line::styled(format!("{label}:"), label_style));
            lines.extend(excerpt_lines(&report.content, value));
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
            Span::raw(value.to_string()),
        ]));
    }
    lines
}

fn excerpt_lines(content: &PreviewContent, value: &str) -> Vec<Line<'static>> {
    match content {
        PreviewContent::TextExcerpt { truncated, .. } => {
            let mut lines: Vec<Line<'static>> = unescape_markup(value)
                .lines()
                .map(|l| Line::raw(l.to_string()))
                .collect();
            if *truncated {
                lines.push(Line::styled("…", Style::default().fg(Color::DarkGray)));
            }
            lines
        }
        _ => vec![Line::styled(
            value.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colfm_core::{Bitmap, MetadataSummary, PreviewPipeline};
    use image::Rgba;
    use ratatui::{backend::TestBackend, Terminal};
    use ratatui_image::picker::Picker;
    use std::fs;
    use tempfile::TempDir;

    use crate::image_preview::FALLBACK_FONT_SIZE;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn report_for(name: &str, content: &[u8]) -> (TempDir, PreviewReport) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(name);
        fs::write(&path, content).unwrap();
        let report = PreviewPipeline::default().preview(&path);
        (tmp, report)
    }

    fn summary() -> MetadataSummary {
        MetadataSummary {
            name: "a.bin".to_string(),
            kind: "application/octet-stream".to_string(),
            size: "3 B".to_string(),
            modified: "-".to_string(),
            permissions: "rw-r--r--".to_string(),
            owner: "me".to_string(),
            group: "staff".to_string(),
            path: "/tmp/a.bin".to_string(),
        }
    }

    #[test]
    fn table_lists_fields_in_order() {
        let report = PreviewReport {
            content: PreviewContent::MetadataOnly { note: None },
            summary: summary(),
        };
        let lines: Vec<String> = report_lines(&report).iter().map(text).collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[0].ends_with("a.bin"));
        assert!(lines[7].starts_with("Path"));
    }

    #[test]
    fn excerpt_is_unescaped() {
        let (_tmp, report) = report_for("page.txt", b"<b>bold & plain</b>\nsecond");
        let lines: Vec<String> = report_lines(&report).iter().map(text).collect();

        assert!(lines.contains(&"Preview:".to_string()));
        assert!(lines.contains(&"<b>bold & plain</b>".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("second"));
    }

    #[test]
    fn truncated_excerpt_ends_with_marker() {
        let report = PreviewReport {
            content: PreviewContent::TextExcerpt {
                text: "abc".to_string(),
                truncated: true,
            },
            summary: summary(),
        };
        let lines: Vec<String> = report_lines(&report).iter().map(text).collect();
        assert_eq!(lines.last().map(String::as_str), Some("…"));
    }

    #[test]
    fn note_is_shown_under_preview() {
        let report = PreviewReport {
            content: PreviewContent::MetadataOnly {
                note: Some("(no preview)"),
            },
            summary: summary(),
        };
        let lines: Vec<String> = report_lines(&report).iter().map(text).collect();
        assert_eq!(lines.last().map(String::as_str), Some("(no preview)"));
    }

    fn image_report() -> PreviewReport {
        PreviewReport {
            content: PreviewContent::Image {
                bitmap: Bitmap::from_pixel(16, 16, Rgba([0, 120, 255, 255])),
                width: 16,
                height: 16,
            },
            summary: summary(),
        }
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn image_report_puts_table_below_picture() {
        let mut images = ImagePreviewState::new(Picker::from_fontsize(FALLBACK_FONT_SIZE));
        let report = image_report();
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();

        terminal
            .draw(|f| {
                let slot = ImageSlot {
                    images: &mut images,
                    generation: 1,
                };
                render_report(f, f.area(), &report, slot);
            })
            .unwrap();

        assert!(row_text(&terminal, 10).starts_with("Name"));
        assert!(!row_text(&terminal, 0).starts_with("Name"));
    }

    #[test]
    fn short_area_shows_table_only() {
        let mut images = ImagePreviewState::new(Picker::from_fontsize(FALLBACK_FONT_SIZE));
        let report = image_report();
        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();

        terminal
            .draw(|f| {
                let slot = ImageSlot {
                    images: &mut images,
                    generation: 1,
                };
                render_report(f, f.area(), &report, slot);
            })
            .unwrap();

        assert!(row_text(&terminal, 0).starts_with("Name"));
    }
}
