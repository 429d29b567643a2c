//! The playback controller: a small state machine over decoder and sink.
//!
//! Position is computed on demand from a wall-clock anchor recorded on each
//! play/resume plus the time already banked by earlier playing intervals.
//! There is no ticker thread to drift or to cancel on stop; pausing simply
//! banks the elapsed interval and drops the anchor.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::debug;

use super::decode;
use super::sink::{OutputSink, RodioSink};
use super::source::{EndSignal, EndedFlag};
use super::types::{PlayerError, PlayerState, Track};

pub struct Player<S = RodioSink> {
    sink: S,
    track: Option<Track>,
    state: PlayerState,
    /// Elapsed playback banked before the current playing interval began.
    accumulated: Duration,
    /// Wall-clock anchor for the current playing interval; `None` unless
    /// playing.
    playing_since: Option<Instant>,
    /// Flag latched by the completion wrapper around the attached stream.
    end_flag: Option<EndedFlag>,
    ended: bool,
}

impl Player<RodioSink> {
    pub fn new(detach_timeout: Duration) -> Self {
        Self::with_sink(RodioSink::new(detach_timeout))
    }
}

impl<S: OutputSink> Player<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            sink,
            track: None,
            state: PlayerState::Stopped,
            accumulated: Duration::ZERO,
            playing_since: None,
            end_flag: None,
            ended: false,
        }
    }

    /// Stop and release the current track, then decode `path`. The new track
    /// is loaded but not rendering until [`Player::play`].
    ///
    /// On failure the previous track is already gone and the player stays
    /// stopped; the caller decides whether to try another path.
    pub fn load(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.stop()?;

        let track = decode::open(path)?;
        self.sink.ensure_initialized(track.sample_rate)?;
        debug!(path = %track.path.display(), title = %track.title, "loaded");
        self.install(track);
        Ok(())
    }

    fn install(&mut self, track: Track) {
        self.track = Some(track);
        self.accumulated = Duration::ZERO;
        self.playing_since = None;
        self.end_flag = None;
        self.ended = false;
    }

    /// Begin or continue rendering the loaded track.
    ///
    /// From stopped, wraps the track's stream in a completion observer and
    /// attaches it to the sink; from paused, behaves like [`Player::resume`];
    /// while playing, a no-op.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlayerState::Playing => Ok(()),
            PlayerState::Paused => {
                self.resume();
                Ok(())
            }
            PlayerState::Stopped => {
                let track = self.track.as_mut().ok_or(PlayerError::NoTrackLoaded)?;
                let stream = track.stream.take().ok_or(PlayerError::NoTrackLoaded)?;

                let (wrapped, flag) = EndSignal::new(stream);
                self.sink.attach(Box::new(wrapped))?;
                self.end_flag = Some(flag);
                self.ended = false;
                self.playing_since = Some(Instant::now());
                self.state = PlayerState::Playing;
                debug!("playing");
                Ok(())
            }
        }
    }

    /// Bank the current interval and silence the render without losing
    /// stream position. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state != PlayerState::Playing {
            return;
        }
        if let Some(since) = self.playing_since.take() {
            self.accumulated = self.clamp(self.accumulated + since.elapsed());
        }
        self.sink.set_paused(true);
        self.state = PlayerState::Paused;
    }

    /// Continue pulling samples from where pause left off. No-op unless
    /// paused.
    pub fn resume(&mut self) {
        if self.state != PlayerState::Paused {
            return;
        }
        self.sink.set_paused(false);
        self.playing_since = Some(Instant::now());
        self.state = PlayerState::Playing;
    }

    /// Detach from the sink and release the track. Safe to call from any
    /// state, including mid-play.
    ///
    /// A `TeardownTimeout` from the sink aborts the release: the track stays
    /// loaded rather than freeing a stream the render side may still read.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        self.sink.detach()?;

        self.track = None;
        self.end_flag = None;
        self.ended = false;
        self.accumulated = Duration::ZERO;
        self.playing_since = None;
        self.state = PlayerState::Stopped;
        Ok(())
    }

    /// Reposition to `pos`, clamped to `[0, duration]`. Keeps the current
    /// state; while playing, the wall-clock anchor restarts at the new
    /// position.
    pub fn seek(&mut self, pos: Duration) -> Result<(), PlayerError> {
        let Some(track) = self.track.as_mut() else {
            return Err(PlayerError::NoTrackLoaded);
        };
        let pos = if track.duration > Duration::ZERO {
            pos.min(track.duration)
        } else {
            pos
        };

        match track.stream.as_mut() {
            // Not yet attached: reposition the owned stream directly.
            Some(stream) => stream.try_seek(pos)?,
            None => self.sink.seek(pos)?,
        }

        self.accumulated = pos;
        if self.state == PlayerState::Playing {
            self.playing_since = Some(Instant::now());
        }
        debug!(?pos, "seek");
        Ok(())
    }

    /// Seek relative to the current position; deltas past either end clamp.
    pub fn seek_by(&mut self, delta_secs: i64) -> Result<(), PlayerError> {
        let cur = self.position().as_secs() as i64;
        let target = (cur + delta_secs).max(0) as u64;
        self.seek(Duration::from_secs(target))
    }

    /// Current position, clamped to the track duration. Monotone while
    /// playing, frozen while paused or stopped.
    pub fn position(&self) -> Duration {
        match (self.state, self.playing_since) {
            (PlayerState::Playing, Some(since)) => {
                self.clamp(self.accumulated + since.elapsed())
            }
            _ => self.accumulated,
        }
    }

    fn clamp(&self, pos: Duration) -> Duration {
        match self.track.as_ref() {
            Some(t) if t.duration > Duration::ZERO => pos.min(t.duration),
            _ => pos,
        }
    }

    pub fn duration(&self) -> Duration {
        self.track.as_ref().map(|t| t.duration).unwrap_or_default()
    }

    /// True once the render side exhausted the stream; latched until the
    /// next load, play or stop. Falls back to the clamped position reaching
    /// the duration while playing, for streams that never report a clean end.
    pub fn has_ended(&mut self) -> bool {
        if self.track.is_none() {
            return false;
        }
        if self.ended {
            return true;
        }
        if self.end_flag.as_ref().is_some_and(EndedFlag::is_set) {
            self.ended = true;
            return true;
        }

        let duration = self.duration();
        if self.state == PlayerState::Playing
            && duration > Duration::ZERO
            && self.position() >= duration
        {
            self.ended = true;
            return true;
        }
        false
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.track.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.title.as_str())
    }

    pub fn artist(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.artist.as_str())
    }

    pub fn album(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.album.as_str())
    }

    #[cfg(test)]
    pub(crate) fn load_track(&mut self, track: Track) {
        self.install(track);
    }

    #[cfg(test)]
    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
