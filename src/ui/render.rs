//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop. It
//! splits the screen into the location bar, the grid and, in preview mode, the
//! preview pane. Widths here must agree with [AppState::list_area], which the
//! grid was laid out for.

use crate::app::AppState;
use crate::ui::{panes, widgets};

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

/// Renders the whole llama screen for one frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let [bar_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    widgets::draw_bar(frame, bar_area, app);

    if app.preview().is_enabled() {
        let list_width = u16::try_from(app.list_area().0).unwrap_or(u16::MAX);
        let [list, preview] =
            Layout::horizontal([Constraint::Length(list_width), Constraint::Min(0)]).areas(body);
        panes::draw_grid(frame, list, app);
        panes::draw_preview(frame, preview, app);
    } else {
        panes::draw_grid(frame, body, app);
    }
}
