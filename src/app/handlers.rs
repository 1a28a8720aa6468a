//! Input action handler methods for llama.
//!
//! This module implements the [AppState] methods that turn key events into
//! navigation, search and preview changes. Browsing and search share one
//! keymap; search mode only intercepts what it needs and lets every other key
//! fall through to the browse handlers.

use crate::app::keymap::{Action, FileAction, NavAction, SystemAction};
use crate::app::state::{AppState, KeypressResult};
use crate::core::proc::open_in_editor;
use crate::core::{Direction, best_match};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use std::fs;
use std::io;

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Central key handler.
    ///
    /// Listing and stat failures while changing directory are returned as errors
    /// and end the session.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> io::Result<KeypressResult> {
        let action = self.keymap.lookup(key);

        if self.search.is_active()
            && let Some(result) = self.handle_search_key(key, action)
        {
            return Ok(result);
        }

        let Some(action) = action else {
            return Ok(KeypressResult::Continue);
        };

        let result = match action {
            Action::Nav(nav) => self.handle_nav_action(nav)?,
            Action::File(file) => self.handle_file_action(file)?,
            Action::System(sys) => self.handle_system_action(sys),
        };

        match result {
            KeypressResult::Consumed => self.after_cursor_change(),
            KeypressResult::OpenedEditor => self.after_editor(),
            _ => {}
        }
        Ok(result)
    }

    /// Handles keys that mean something else in search mode.
    ///
    /// Returns `None` when the key should be processed as in browse mode.
    fn handle_search_key(&mut self, key: KeyEvent, action: Option<Action>) -> Option<KeypressResult> {
        match action {
            Some(Action::System(SystemAction::Search)) => {
                self.search.deactivate();
                return Some(KeypressResult::Consumed);
            }
            Some(Action::System(SystemAction::TogglePreview)) => return None,
            Some(Action::Nav(NavAction::GoParent)) => {
                let session = self.search.pop()?;
                self.rematch();
                self.schedule_search_clear(session);
                self.after_cursor_change();
                return Some(KeypressResult::Consumed);
            }
            _ => {}
        }

        if let KeyCode::Char(c) = key.code
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            let session = self.search.push(c);
            self.rematch();
            self.schedule_search_clear(session);
            self.after_cursor_change();
            return Some(KeypressResult::Consumed);
        }
        None
    }

    /// Moves the cursor to the best match for the current query.
    ///
    /// With an empty query or no match the cursor stays where it is.
    fn rematch(&mut self) {
        let case = self.config.general().search_case();
        match best_match(self.search.query(), &self.names, case) {
            Some(found) => {
                if let Some(cursor) = self.grid.cursor_of(found.index()) {
                    self.cursor = cursor;
                }
                self.search.set_matched(found.into_positions());
            }
            None => self.search.clear_matched(),
        }
    }

    /// Handles navigation actions (cursor moves, parent directory).
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> io::Result<KeypressResult> {
        match action {
            NavAction::Move(direction) => self.move_cursor(direction),
            NavAction::GoParent => {
                self.search.deactivate();
                self.search.clear_matched();
                self.go_parent()?;
            }
        }
        Ok(KeypressResult::Consumed)
    }

    /// Handles file actions on the selected entry.
    pub(super) fn handle_file_action(&mut self, action: FileAction) -> io::Result<KeypressResult> {
        match action {
            FileAction::Open => self.handle_open(),
        }
    }

    /// Handles mode switches and exits.
    pub(super) fn handle_system_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Search => {
                self.search.activate();
                KeypressResult::Consumed
            }
            SystemAction::TogglePreview => {
                self.toggle_preview();
                KeypressResult::Consumed
            }
            SystemAction::Quit => KeypressResult::Quit,
            SystemAction::ForceQuit => KeypressResult::ForceQuit,
        }
    }

    // Action functions

    fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.cursor.moved(direction, self.grid.shape());
    }

    /// Enters the selected directory or opens the selected file.
    ///
    /// Search mode ends first. A missing or failing editor only shows a notice.
    fn handle_open(&mut self) -> io::Result<KeypressResult> {
        self.search.deactivate();
        self.search.clear_matched();

        let Some(path) = self.selected_path() else {
            return Ok(KeypressResult::Consumed);
        };

        if fs::metadata(&path)?.is_dir() {
            self.save_position();
            self.enter_dir(path)?;
            return Ok(KeypressResult::Consumed);
        }

        if !self.editor.exists() {
            let program = self.editor.program().to_string_lossy().into_owned();
            self.notify(format!("Editor not found: {program}"));
            return Ok(KeypressResult::Consumed);
        }
        if let Err(e) = open_in_editor(&self.editor, &path) {
            self.notify(format!("Editor failed: {e}"));
        }
        Ok(KeypressResult::OpenedEditor)
    }

    /// Switches the preview pane on or off.
    ///
    /// The list area changes width, so every remembered position is dropped and
    /// the selected entry is located again in the new grid.
    fn toggle_preview(&mut self) {
        self.preview.toggle();
        self.positions.clear();
        self.focus = self.selected_entry().map(|e| e.name().to_os_string());
        self.sync_layout();
    }

    /// Scrolls to the cursor, remembers it and refreshes the preview.
    fn after_cursor_change(&mut self) {
        self.update_offset();
        self.save_position();
        self.request_preview();
    }

    /// The editor may have changed the file on display, so the preview is
    /// reloaded even though the selection did not move.
    fn after_editor(&mut self) {
        self.preview.clear();
        self.after_cursor_change();
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::{AppState, KeypressResult};
    use crate::config::Config;
    use crate::core::proc::EditorCommand;
    use crate::core::{Cursor, Direction, PreviewContent};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::fs::{self, File};
    use std::path::Path;
    use std::time::{Duration, Instant};
    use tempfile::{TempDir, tempdir};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ch(c: char) -> KeyEvent {
        press(KeyCode::Char(c))
    }

    fn selected_name(app: &AppState) -> Option<String> {
        app.selected_entry().map(|e| e.name_str().into_owned())
    }

    /// a_dir/ with nested files, plus seven plain files.
    ///
    /// Sorted by bytes: Cargo.toml, LICENSE, a_dir, build.rs, notes.md,
    /// readme.txt, src_main.rs, zeta.
    fn fixture() -> Result<TempDir, Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let sub = temp.path().join("a_dir");
        fs::create_dir(&sub)?;
        for i in 0..12 {
            File::create(sub.join(format!("inner_{i:02}")))?;
        }
        for name in [
            "build.rs",
            "Cargo.toml",
            "LICENSE",
            "notes.md",
            "readme.txt",
            "src_main.rs",
            "zeta",
        ] {
            fs::write(temp.path().join(name), name)?;
        }
        Ok(temp)
    }

    fn app_at<'a>(config: &'a Config, path: &Path) -> Result<AppState<'a>, Box<dyn std::error::Error>> {
        let mut app = AppState::from_dir(config, path)?;
        app.set_size(120, 7);
        Ok(app)
    }

    #[test]
    fn vi_keys_move_the_cursor() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;
        // height 6 -> 8 entries / 2 = 4 columns of 2 rows
        assert_eq!(app.grid().columns(), 4);
        assert_eq!(app.grid().rows(), 2);

        app.handle_keypress(ch('j'))?;
        assert_eq!(app.cursor(), Cursor::new(0, 1));
        app.handle_keypress(ch('l'))?;
        assert_eq!(app.cursor(), Cursor::new(1, 1));
        app.handle_keypress(ch('G'))?;
        assert_eq!(app.cursor(), app.cursor().moved(Direction::Bottom, app.grid().shape()));
        app.handle_keypress(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT))?;
        assert_eq!(app.cursor().column, 0);
        Ok(())
    }

    #[test]
    fn search_relocates_cursor_and_letters_are_query_text() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        app.handle_keypress(ch('/'))?;
        assert!(app.search().is_active());

        // 'l' would move right in browse mode
        for c in "lic".chars() {
            app.handle_keypress(ch(c))?;
        }
        assert_eq!(app.search().query(), "lic");
        assert_eq!(selected_name(&app).as_deref(), Some("LICENSE"));
        assert_eq!(app.search().matched(), &[0, 1, 2]);

        // no match keeps the cursor
        app.handle_keypress(ch('q'))?;
        assert_eq!(selected_name(&app).as_deref(), Some("LICENSE"));
        assert!(app.search().matched().is_empty());

        app.handle_keypress(ch('/'))?;
        assert!(!app.search().is_active());
        assert_eq!(selected_name(&app).as_deref(), Some("LICENSE"));
        Ok(())
    }

    #[test]
    fn backspace_edits_query_then_ascends() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let sub = temp.path().join("a_dir");
        let mut app = app_at(&config, &sub)?;

        app.handle_keypress(ch('/'))?;
        app.handle_keypress(ch('9'))?;
        app.handle_keypress(press(KeyCode::Backspace))?;
        assert_eq!(app.search().query(), "");
        assert_eq!(app.current_dir(), sub.as_path());

        app.handle_keypress(press(KeyCode::Backspace))?;
        assert_eq!(app.current_dir(), temp.path());
        assert!(!app.search().is_active());
        Ok(())
    }

    #[test]
    fn ascending_selects_the_directory_just_left() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        fs::create_dir(temp.path().join("zz_dir"))?;
        let mut app = app_at(&config, &temp.path().join("zz_dir"))?;

        app.handle_keypress(press(KeyCode::Backspace))?;
        assert_eq!(app.current_dir(), temp.path());
        assert_eq!(selected_name(&app).as_deref(), Some("zz_dir"));
        Ok(())
    }

    #[test]
    fn position_round_trip_through_parent() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        app.handle_keypress(ch('l'))?;
        assert_eq!(selected_name(&app).as_deref(), Some("a_dir"));
        app.handle_keypress(press(KeyCode::Enter))?;
        assert_eq!(app.current_dir(), temp.path().join("a_dir").as_path());
        assert_eq!(app.cursor(), Cursor::default());

        app.handle_keypress(ch('l'))?;
        app.handle_keypress(ch('j'))?;
        let saved = (app.cursor(), app.offset());
        assert_ne!(saved.0, Cursor::default());

        app.handle_keypress(press(KeyCode::Backspace))?;
        assert_eq!(selected_name(&app).as_deref(), Some("a_dir"));
        app.handle_keypress(press(KeyCode::Enter))?;
        assert_eq!((app.cursor(), app.offset()), saved);
        Ok(())
    }

    #[test]
    fn preview_toggle_clears_positions_and_keeps_selection() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        app.handle_keypress(ch('G'))?;
        let before = selected_name(&app);
        app.handle_keypress(ch(' '))?;

        assert!(app.preview().is_enabled());
        assert_eq!(app.list_area().0, 60);
        assert_eq!(selected_name(&app), before);
        // only the entry saved after the toggle remains
        assert_eq!(app.positions().len(), 1);
        assert!(app.preview().path().is_some());

        app.handle_keypress(ch(' '))?;
        assert!(!app.preview().is_enabled());
        assert!(app.preview().content().is_none());
        Ok(())
    }

    #[test]
    fn space_toggles_preview_inside_search() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        app.handle_keypress(ch('/'))?;
        app.handle_keypress(ch(' '))?;
        assert!(app.preview().is_enabled());
        assert_eq!(app.search().query(), "");
        Ok(())
    }

    /// Applies worker responses until the preview shows `expected`.
    fn wait_for_preview(app: &mut AppState, expected: &PreviewContent) -> bool {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if let Ok(response) = app.workers().response_rx().recv_timeout(Duration::from_millis(20)) {
                app.apply_response(response);
            }
            if app.preview().content() == Some(expected) {
                return true;
            }
        }
        false
    }

    #[test]
    fn enter_in_search_opens_directory_and_ends_search() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        for c in ['/', 'a', '_'] {
            app.handle_keypress(ch(c))?;
        }
        assert_eq!(selected_name(&app).as_deref(), Some("a_dir"));
        app.handle_keypress(press(KeyCode::Enter))?;

        assert!(!app.search().is_active());
        assert_eq!(app.current_dir(), temp.path().join("a_dir"));
        assert_eq!(selected_name(&app).as_deref(), Some("inner_00"));
        Ok(())
    }

    #[test]
    fn arrows_navigate_inside_search() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        app.handle_keypress(ch('/'))?;
        app.handle_keypress(press(KeyCode::Down))?;
        assert_eq!(app.cursor(), Cursor::new(0, 1));
        assert_eq!(selected_name(&app).as_deref(), Some("LICENSE"));
        assert!(app.search().is_active());
        assert_eq!(app.search().query(), "");
        Ok(())
    }

    #[test]
    fn preview_reloads_after_editor_returns() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        app.handle_keypress(ch(' '))?;
        let before = PreviewContent::Text("Cargo.toml".into());
        assert!(wait_for_preview(&mut app, &before));

        fs::write(temp.path().join("Cargo.toml"), "edited")?;
        app.after_editor();
        let after = PreviewContent::Text("edited".into());
        assert!(wait_for_preview(&mut app, &after));
        assert_eq!(selected_name(&app).as_deref(), Some("Cargo.toml"));
        Ok(())
    }

    #[test]
    fn missing_editor_becomes_a_notice() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;
        app.editor = EditorCommand::parse("llama-missing-editor-xyz").ok_or("empty editor")?;

        assert_eq!(selected_name(&app).as_deref(), Some("Cargo.toml"));
        let result = app.handle_keypress(press(KeyCode::Enter))?;
        assert_eq!(result, KeypressResult::Consumed);
        let notice = app.notification().map(|n| n.text().to_string());
        assert!(notice.is_some_and(|t| t.contains("llama-missing-editor-xyz")));
        Ok(())
    }

    #[test]
    fn quit_keys() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let temp = fixture()?;
        let mut app = app_at(&config, temp.path())?;

        assert_eq!(app.handle_keypress(press(KeyCode::Esc))?, KeypressResult::Quit);
        app.handle_keypress(ch('/'))?;
        assert_eq!(app.handle_keypress(press(KeyCode::Esc))?, KeypressResult::Quit);
        assert_eq!(
            app.handle_keypress(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))?,
            KeypressResult::ForceQuit
        );
        assert_eq!(app.handle_keypress(press(KeyCode::Tab))?, KeypressResult::Continue);
        Ok(())
    }
}
