//! Track note saving.
//!
//! Appends one checklist line per saved track to a markdown file, so a
//! listening session leaves behind a list of tracks to revisit.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const NOTES_HEADER: &str = "# dirplay track notes\n";

/// Default notes file: `~/track-notes.md`, or the bare filename when `HOME`
/// is unset.
pub fn default_notes_path() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("track-notes.md"),
        None => PathBuf::from("track-notes.md"),
    }
}

/// Append a note line for the given track, creating the file with a header
/// on first use.
pub fn append_note(
    path: &Path,
    artist: &str,
    album: &str,
    title: &str,
) -> std::io::Result<()> {
    let is_new = !path.exists();

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if is_new {
        file.write_all(NOTES_HEADER.as_bytes())?;
    }
    writeln!(file, "[ ] {artist} - {album} - {title}")?;
    Ok(())
}
