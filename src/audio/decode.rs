//! Opening audio files: codec selection, tag metadata and duration.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use rodio::{Decoder, Source};
use tracing::debug;

use super::types::{PlayerError, Track};

/// Extensions with a matching decoder. The directory scanner accepts a wider
/// candidate list (m4a/aac), but those fail here with `UnsupportedFormat`.
const DECODABLE: [&str; 4] = ["mp3", "wav", "flac", "ogg"];

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Open `path` and produce a [`Track`] ready for rendering.
///
/// Tag-read failures are not errors; they fall back to the filename stem and
/// placeholder artist/album. Codec failures close the file and surface the
/// underlying cause. Never touches the output sink.
pub fn open(path: &Path) -> Result<Track, PlayerError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    if !DECODABLE.contains(&ext.as_str()) {
        return Err(PlayerError::UnsupportedFormat(ext));
    }

    // Tags are read with lofty on its own file handle, so the decode handle
    // below starts at the beginning of the file.
    let (title, artist, album, tag_duration) = read_metadata(path);

    let file = File::open(path)?;
    let source = Decoder::try_from(file)?;

    let sample_rate = source.sample_rate();
    let duration = source.total_duration().or(tag_duration).unwrap_or_default();

    debug!(path = %path.display(), sample_rate, ?duration, "opened track");

    Ok(Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        sample_rate,
        duration,
        stream: Some(Box::new(source)),
    })
}

fn read_metadata(path: &Path) -> (String, String, String, Option<Duration>) {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = UNKNOWN_ARTIST.to_string();
    let mut album = UNKNOWN_ALBUM.to_string();
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    album = v.to_string();
                }
            }
        }
    }

    (title, artist, album, duration)
}
