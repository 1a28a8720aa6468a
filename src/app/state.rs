//! Application State and main controller module for llama.
//!
//! This module defines the [AppState] struct, the single owner of all session state:
//! - Configuration and the keymap built from it
//! - The current directory, its entries and the grid they are laid out in
//! - Cursor, scroll offset and the per-directory position memory
//! - Search and preview state
//! - Communication with worker threads via crossbeam_channel
//! - Transient notifications
//!
//! Input handling lives in [crate::app::handlers]; everything here is the
//! bookkeeping those handlers share.

use crate::app::keymap::Keymap;
use crate::app::positions::{Position, PositionMemory};
use crate::app::{PreviewState, SearchState};
use crate::config::Config;
use crate::core::proc::EditorCommand;
use crate::core::worker::{WorkerResponse, WorkerTask, Workers};
use crate::core::{Cursor, FileEntry, Formatter, GridLayout, GridName, browse_dir};
use crate::utils::clean_path;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(4);

/// Terminal size used until the event loop reports the real one.
const INITIAL_SIZE: (u16, u16) = (80, 60);

/// Result of processing a single keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// Key was not bound to anything.
    Continue,
    /// Key was handled; redraw.
    Consumed,
    /// Exit and report the current directory.
    Quit,
    /// Exit without reporting a directory.
    ForceQuit,
    /// An external program had the terminal; redraw everything.
    OpenedEditor,
}

/// A transient message shown next to the location bar.
#[derive(Debug, Clone)]
pub struct Notification {
    text: String,
    expires: Instant,
}

impl Notification {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Main struct which holds the central application state of llama.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) editor: EditorCommand,

    pub(super) current_dir: PathBuf,
    pub(super) entries: Vec<FileEntry>,
    pub(super) names: Vec<String>,
    pub(super) grid: GridLayout,

    pub(super) size: (u16, u16),
    pub(super) cursor: Cursor,
    pub(super) offset: usize,
    pub(super) positions: PositionMemory,
    /// Entry name to select once the next layout is computed.
    pub(super) focus: Option<OsString>,

    pub(super) search: SearchState,
    pub(super) preview: PreviewState,

    pub(super) workers: Workers,
    pub(super) notification: Option<Notification>,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config) -> io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_dir(config, &current_dir)
    }

    /// Creates the state with `initial_path` listed.
    ///
    /// The path is made absolute and `..` is folded lexically, but symlinks are
    /// kept, so the reported directory is the one the user navigated to.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> io::Result<Self> {
        let current_dir = clean_path(&std::path::absolute(initial_path)?);
        if !current_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", current_dir.display()),
            ));
        }

        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            editor: config.editor().command(),
            current_dir: PathBuf::new(),
            entries: Vec::new(),
            names: Vec::new(),
            grid: GridLayout::default(),
            size: INITIAL_SIZE,
            cursor: Cursor::default(),
            offset: 0,
            positions: PositionMemory::new(),
            focus: None,
            search: SearchState::default(),
            preview: PreviewState::default(),
            workers: Workers::spawn(),
            notification: None,
        };
        app.load_dir(current_dir)?;
        app.sync_layout();
        Ok(app)
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    #[inline]
    pub fn positions(&self) -> &PositionMemory {
        &self.positions
    }

    #[inline]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[inline]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    #[inline]
    pub fn workers(&self) -> &Workers {
        &self.workers
    }

    #[inline]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[inline]
    pub fn editor(&self) -> &EditorCommand {
        &self.editor
    }

    // Entry functions

    /// Index of the entry under the cursor.
    pub fn selected_index(&self) -> Option<usize> {
        self.grid.index_of(self.cursor)
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index().and_then(|idx| self.entries.get(idx))
    }

    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|entry| self.current_dir.join(entry.name()))
    }

    // Layout

    /// Width and height of the grid area: the left half in preview mode,
    /// everything below the location bar.
    pub fn list_area(&self) -> (usize, usize) {
        let (width, height) = (self.size.0 as usize, self.size.1 as usize);
        let width = if self.preview.is_enabled() {
            width / 2
        } else {
            width
        };
        (width, height.saturating_sub(1))
    }

    /// Visible grid rows.
    #[inline]
    pub fn list_height(&self) -> usize {
        self.list_area().1
    }

    /// Recomputes the grid for the current entries and terminal size.
    ///
    /// Resolves a pending focus name, then keeps the cursor on a populated cell
    /// and the scroll offset within the grid.
    pub fn sync_layout(&mut self) {
        let (width, height) = self.list_area();
        let names = std::mem::take(&mut self.grid).into_names();
        self.grid = GridLayout::compute_with_separator(
            names,
            width,
            height,
            self.config.display().separator_width(),
        );

        if let Some(name) = self.focus.take() {
            if let Some(cursor) = self.grid.position_of(&self.entries, &name) {
                self.cursor = cursor;
            }
            self.cursor = self.cursor.clamped(self.grid.shape());
            self.update_offset();
            self.save_position();
        } else {
            self.cursor = self.cursor.clamped(self.grid.shape());
            self.update_offset();
        }
    }

    /// Scrolls so the cursor row is visible, never past the last row.
    pub fn update_offset(&mut self) {
        let height = self.list_height().max(1);
        let rows = self.grid.rows();
        let row = self.cursor.row;

        if row >= self.offset + height {
            self.offset = row + 1 - height;
        }
        if row < self.offset {
            self.offset = row;
        }
        if rows > height && self.offset > rows - height {
            self.offset = rows - height;
        }
        if rows <= height {
            self.offset = 0;
        }
    }

    /// Remembers cursor and offset for the current directory.
    pub fn save_position(&mut self) {
        self.positions.save(
            &self.current_dir,
            Position::new(self.cursor, self.offset),
        );
    }

    /// Sets the terminal size without invalidating anything. Used on startup.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.sync_layout();
    }

    /// Applies a terminal resize.
    ///
    /// Every remembered position refers to the old geometry, so the memory is
    /// cleared and the selected entry is located again in the new grid.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.positions.clear();
        self.focus = self.selected_entry().map(|e| e.name().to_os_string());
        self.cursor = Cursor::default();
        self.sync_layout();
    }

    // Directory loading

    /// Lists `dir` and makes it the current directory.
    ///
    /// Listing failures are returned to the caller unchanged; the event loop
    /// treats them as fatal.
    pub(super) fn load_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        let mut entries = browse_dir(&dir)?;
        let general = self.config.general();
        Formatter::new(
            general.dirs_first(),
            general.show_hidden(),
            general.case_insensitive(),
        )
        .filter_entries(&mut entries);

        let dir_marker = self.config.display().dir_marker();
        let cells: Vec<GridName> = entries
            .iter()
            .map(|e| GridName::from_entry(e, dir_marker))
            .collect();

        self.names = entries.iter().map(|e| e.name_str().into_owned()).collect();
        self.entries = entries;
        self.grid = GridLayout::compute(cells, 0, 0);
        self.current_dir = dir;
        Ok(())
    }

    /// Enters `dir`, restoring its remembered position or starting at the top.
    pub(super) fn enter_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        match self.positions.get(&dir) {
            Some(pos) => {
                self.cursor = pos.cursor;
                self.offset = pos.offset;
            }
            None => {
                self.cursor = Cursor::default();
                self.offset = 0;
            }
        }
        self.load_dir(dir)?;
        self.sync_layout();
        Ok(())
    }

    /// Goes to the parent directory.
    ///
    /// Without a remembered position the cursor lands on the directory just left.
    pub(super) fn go_parent(&mut self) -> io::Result<()> {
        let child = self.current_dir.file_name().map(|n| n.to_os_string());
        let parent = match self.current_dir.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.current_dir.clone(),
        };

        match self.positions.get(&parent) {
            Some(pos) => {
                self.cursor = pos.cursor;
                self.offset = pos.offset;
            }
            None => self.focus = child,
        }
        self.load_dir(parent)?;
        self.sync_layout();
        Ok(())
    }

    // Worker requests

    /// Requests a preview of the selected entry if preview mode is on.
    pub fn request_preview(&mut self) {
        if !self.preview.is_enabled() {
            return;
        }
        let Some(path) = self.selected_path() else {
            self.preview.clear();
            return;
        };
        if self.preview.path() == Some(path.as_path()) && self.preview.content().is_some() {
            return;
        }
        let request_id = self.preview.prepare_new_request(path.clone());
        let _ = self.workers.preview_tx().send(WorkerTask::LoadPreview {
            path,
            max_bytes: self.config.general().max_preview_bytes(),
            request_id,
        });
    }

    /// Schedules the idle expiry of the search session `session_id`.
    pub(super) fn schedule_search_clear(&self, session_id: u64) {
        let _ = self.workers.timer_tx().send(WorkerTask::ClearSearch {
            session_id,
            delay: self.config.general().search_timeout(),
        });
    }

    /// Shows `text` next to the location bar for a while.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            expires: Instant::now() + NOTIFICATION_TIMEOUT,
        });
    }

    /// Updates time-based state and applies worker responses.
    ///
    /// Called by the event loop on every iteration. Returns true if anything
    /// visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if let Some(notification) = &self.notification
            && Instant::now() >= notification.expires
        {
            self.notification = None;
            changed = true;
        }

        while let Ok(response) = self.workers.response_rx().try_recv() {
            changed |= self.apply_response(response);
        }
        changed
    }

    /// Applies one worker response; stale responses are ignored.
    pub fn apply_response(&mut self, response: WorkerResponse) -> bool {
        match response {
            WorkerResponse::PreviewLoaded {
                path,
                content,
                request_id,
            } => {
                self.preview.path() == Some(path.as_path())
                    && self.preview.update_content(content, request_id)
            }
            WorkerResponse::SearchExpired { session_id } => self.search.expire(session_id),
        }
    }
}
