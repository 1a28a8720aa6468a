//! Terminal rendering and event loop for llama.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws, and
//! dispatches events (keypress, resize) to the app state. Everything is drawn on
//! stderr; stdout only ever receives the final directory.

use crate::app::{AppState, KeypressResult};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Poll interval of the event loop.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Normal quit: the directory to report to the shell.
    Cd(PathBuf),
    /// Forced quit: report nothing.
    Abort,
}

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. The terminal is restored before an error from the loop
/// is returned.
pub fn run_terminal(app: &mut AppState) -> io::Result<Outcome> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    if let Err(e) = execute!(stderr, EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let result = Terminal::new(CrosstermBackend::new(io::stderr()))
        .and_then(|mut terminal| event_loop(&mut terminal, app));

    let restored = disable_raw_mode()
        .and_then(|()| execute!(io::stderr(), LeaveAlternateScreen, Show));
    let outcome = result?;
    restored?;
    Ok(outcome)
}

/// Main event loop of llama: draws UI, polls for events and dispatches them to the app.
/// Returns on quit
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<Outcome>
where
    io::Error: From<<B as Backend>::Error>,
{
    let size = terminal.size()?;
    app.set_size(size.width, size.height);
    let mut dirty = true;

    loop {
        dirty |= app.tick();

        if dirty {
            app.sync_layout();
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_keypress(key)? {
                    KeypressResult::Quit => {
                        return Ok(Outcome::Cd(app.current_dir().to_path_buf()));
                    }
                    KeypressResult::ForceQuit => return Ok(Outcome::Abort),
                    KeypressResult::OpenedEditor => {
                        // the editor drew over the alternate screen
                        terminal.clear()?;
                    }
                    KeypressResult::Consumed | KeypressResult::Continue => {}
                }
                dirty = true;
            }
            Event::Resize(width, height) => {
                app.handle_resize(width, height);
                dirty = true;
            }
            _ => {}
        }
    }
}
