//! Application model type: `App`.
//!
//! The `App` struct holds the shuffled playlist, the current track index and
//! transient status lines used by the UI and runtime.

use std::path::{Path, PathBuf};

/// The main application model.
pub struct App {
    /// Play order after the startup shuffle; never reordered afterwards.
    pub playlist: Vec<PathBuf>,
    /// Index into `playlist` of the track the player is on.
    pub current: usize,
    /// The directory the playlist was scanned from, for the header line.
    pub current_dir: String,

    /// Last load/playback error, shown until the next successful action.
    pub last_error: Option<String>,
    /// Confirmation line after saving a note.
    pub note_status: Option<String>,
}

impl App {
    /// Create a new `App` over an already-ordered playlist.
    pub fn new(playlist: Vec<PathBuf>, current_dir: String) -> Self {
        Self {
            playlist,
            current: 0,
            current_dir,
            last_error: None,
            note_status: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Path of the current track, if the playlist is non-empty.
    pub fn current_path(&self) -> Option<&Path> {
        self.playlist.get(self.current).map(PathBuf::as_path)
    }

    /// Index after `current`, wrapping past the end.
    pub fn next_index(&self) -> usize {
        if self.playlist.is_empty() {
            return 0;
        }
        (self.current + 1) % self.playlist.len()
    }

    /// Index before `current`, wrapping past the start.
    pub fn prev_index(&self) -> usize {
        if self.playlist.is_empty() {
            return 0;
        }
        (self.current + self.playlist.len() - 1) % self.playlist.len()
    }

    pub fn advance(&mut self) {
        self.current = self.next_index();
    }

    pub fn retreat(&mut self) {
        self.current = self.prev_index();
    }
}
