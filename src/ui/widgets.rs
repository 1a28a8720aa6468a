//! Small widgets shared by the llama panes.

use crate::app::AppState;
use crate::core::{strip_control, truncate_left};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Draws the location bar: current directory, the search filter while
/// searching and the current notification.
///
/// The location gives way first: it is cut from the left so the end of the
/// path and the filter stay visible.
pub(crate) fn draw_bar(frame: &mut Frame, area: Rect, app: &AppState) {
    let theme = app.config().theme();

    let location = strip_control(&shorten_home_path(app.current_dir()));
    let filter = app
        .search()
        .is_active()
        .then(|| format!("/{}", app.search().query()));
    let notice = app.notification().map(|n| format!(" {}", n.text()));

    let reserved = filter.as_deref().map_or(0, UnicodeWidthStr::width)
        + notice.as_deref().map_or(0, UnicodeWidthStr::width);
    let available = (area.width as usize).saturating_sub(reserved);

    let mut spans = vec![Span::styled(
        truncate_left(&location, available).to_string(),
        theme.bar_style(),
    )];
    if let Some(filter) = filter {
        spans.push(Span::styled(filter, theme.search_style()));
    }
    if let Some(notice) = notice {
        spans.push(Span::styled(notice, theme.warning_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws `text` in a rounded box at the top left of `area`.
pub(crate) fn draw_warning_box(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    // two border columns plus one column of padding on each side
    let width = (text.width() as u16).saturating_add(4).min(area.width);
    let height = 3.min(area.height);
    let rect = Rect::new(area.x, area.y, width, height);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(style)
        .padding(Padding::horizontal(1));

    frame.render_widget(
        Paragraph::new(Line::styled(text.to_string(), style)).block(block),
        rect,
    );
}
