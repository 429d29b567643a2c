//! Engine-level types: the loaded track, playback states and errors.

use std::path::PathBuf;
use std::time::Duration;

use rodio::Source;
use thiserror::Error;

/// The playback state of the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// A loaded, decoded audio source ready for rendering.
///
/// Metadata fields carry fallbacks already applied: missing tags become
/// `"Unknown Artist"`, the filename stem and `"Unknown Album"`.
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Native sample rate of the decoded stream, fixed for the track's lifetime.
    pub sample_rate: u32,
    /// Total decoded length, computed once at open time and never re-estimated.
    pub duration: Duration,
    /// The seekable sample stream. Present until the track is attached to the
    /// output sink; attaching moves ownership to the render side, which
    /// releases it once a detach completes.
    pub(crate) stream: Option<Box<dyn Source + Send>>,
}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("path", &self.path)
            .field("title", &self.title)
            .field("artist", &self.artist)
            .field("album", &self.album)
            .field("sample_rate", &self.sample_rate)
            .field("duration", &self.duration)
            .field("stream", &self.stream.as_ref().map(|_| "<stream>"))
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("unsupported audio format: .{0}")]
    UnsupportedFormat(String),

    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no track loaded")]
    NoTrackLoaded,

    #[error("failed to seek: {0}")]
    Seek(#[from] rodio::source::SeekError),

    #[error("audio device unavailable: {0}")]
    DeviceInit(String),

    /// The render side did not release the previous stream within the detach
    /// deadline. Fatal for the current track: freeing its stream now could
    /// race a live render callback.
    #[error("output sink did not release the previous stream in time")]
    TeardownTimeout,
}
