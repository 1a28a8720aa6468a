//! Pane rendering for llama.
//!
//! [draw_grid] renders the visible rows of the entry grid, [draw_preview] the
//! right-hand preview pane. Both only read the [AppState].

use crate::app::AppState;
use crate::core::{Cursor, PreviewContent, strip_control};
use crate::ui::widgets::draw_warning_box;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Shown instead of the grid for a directory without (visible) entries.
pub const EMPTY_DIR_MESSAGE: &str = "No files";

/// Draws the grid rows starting at the scroll offset.
pub(crate) fn draw_grid(frame: &mut Frame, area: Rect, app: &AppState) {
    let theme = app.config().theme();
    let grid = app.grid();

    if grid.is_empty() {
        draw_warning_box(frame, area, EMPTY_DIR_MESSAGE, theme.warning_style());
        return;
    }

    let cursor = app.cursor();
    let cursor_style = theme.cursor_style();
    let match_style = cursor_style.patch(theme.match_style());
    let dir_style = theme.directory_style();
    let matched: &[usize] = if app.search().is_active() {
        app.search().matched()
    } else {
        &[]
    };
    let separator = " ".repeat(grid.separator_width());

    let lines: Vec<Line> = (app.offset()..grid.rows())
        .take(area.height as usize)
        .map(|row| {
            let mut spans = Vec::with_capacity(grid.columns() * 3);
            for column in 0..grid.columns() {
                let here = Cursor::new(column, row);
                let (Some(idx), Some(name)) = (grid.index_of(here), grid.cell(column, row)) else {
                    // only the tail of the last column is empty
                    break;
                };
                if column > 0 {
                    spans.push(Span::raw(separator.clone()));
                }

                let is_dir = app.entries().get(idx).is_some_and(|e| e.is_dir());
                if here == cursor {
                    spans.extend(highlighted(name.text(), matched, cursor_style, match_style));
                } else if is_dir {
                    spans.push(Span::styled(sanitize(name.text()), dir_style));
                } else {
                    spans.push(Span::raw(sanitize(name.text())));
                }

                let col_width = grid.column_widths().get(column).copied().unwrap_or(0);
                let pad = col_width.saturating_sub(name.width());
                if pad > 0 {
                    spans.push(Span::raw(" ".repeat(pad)));
                }
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Draws the preview of the selected entry, left padded.
///
/// Nothing is drawn until the first load for the selection arrives.
pub(crate) fn draw_preview(frame: &mut Frame, area: Rect, app: &AppState) {
    let theme = app.config().theme();
    let padding = app.config().display().preview_padding().min(area.width);
    let inner = Rect {
        x: area.x + padding,
        width: area.width - padding,
        ..area
    };

    let Some(content) = app.preview().content() else {
        return;
    };

    if let Some(text) = content.placeholder() {
        draw_warning_box(frame, inner, &text, theme.warning_style());
        return;
    }

    let Some(lines) = content.lines() else {
        return;
    };
    let dir_style = theme.directory_style();
    let is_listing = matches!(content, PreviewContent::Listing(_));

    let lines: Vec<Line> = lines
        .into_iter()
        .take(inner.height as usize)
        .map(|line| {
            let text = strip_control(line);
            if is_listing && text.ends_with('/') {
                Line::styled(text, dir_style)
            } else {
                Line::raw(text)
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Splits a cell into runs of matched and unmatched characters.
///
/// `matched` holds character positions, as reported by the fuzzy matcher.
fn highlighted(text: &str, matched: &[usize], base: Style, hit: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_is_hit = false;

    for (i, c) in text.chars().enumerate() {
        let is_hit = matched.contains(&i);
        if is_hit != run_is_hit && !run.is_empty() {
            let style = if run_is_hit { hit } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_is_hit = is_hit;
        run.push(if c.is_control() { '?' } else { c });
    }
    if !run.is_empty() {
        let style = if run_is_hit { hit } else { base };
        spans.push(Span::styled(run, style));
    }
    spans
}

/// Replaces control characters so a file name cannot emit escape sequences.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn highlighted_groups_runs() {
        let base = Style::default();
        let hit = Style::default().fg(Color::Yellow);
        let spans = highlighted("Cargo.toml", &[0, 1, 2], base, hit);

        let parts: Vec<(&str, Style)> = spans.iter().map(|s| (s.content.as_ref(), s.style)).collect();
        assert_eq!(parts, vec![("Car", hit), ("go.toml", base)]);
    }

    #[test]
    fn sanitize_replaces_control_chars() {
        assert_eq!(sanitize("a\x1bb\n"), "a?b?");
        assert_eq!(highlighted("\x07", &[], Style::default(), Style::default())[0].content, "?");
    }
}
