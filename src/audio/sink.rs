//! The process-wide audio output sink.
//!
//! [`RodioSink`] owns the one physical output stream for the process lifetime
//! plus the `rodio::Sink` currently rendering through it. All methods are
//! called from the control thread; rodio's render thread pulls samples
//! concurrently, with pause and seek applied under rodio's internal control
//! lock so they are atomic with respect to any in-flight pull.
//!
//! The trait exists so tests can substitute a recording fake that never
//! touches real hardware.

use std::thread;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, error};

use super::types::PlayerError;

/// How often `detach` re-checks that the render side released the stream.
const DETACH_POLL: Duration = Duration::from_millis(5);

pub trait OutputSink {
    /// Initialize the physical device at most once per process lifetime.
    /// Subsequent calls are no-ops.
    fn ensure_initialized(&mut self, sample_rate: u32) -> Result<(), PlayerError>;

    /// Detach whatever is currently rendering, then begin rendering `stream`.
    fn attach(&mut self, stream: Box<dyn Source + Send>) -> Result<(), PlayerError>;

    /// Stop rendering and block until the render side can no longer touch the
    /// previously attached stream. Only after this returns `Ok` is it safe to
    /// release the stream's backing resources.
    fn detach(&mut self) -> Result<(), PlayerError>;

    /// Pause or resume sample pulls without losing stream position.
    fn set_paused(&mut self, paused: bool);

    /// Reposition the attached stream.
    fn seek(&mut self, pos: Duration) -> Result<(), PlayerError>;
}

pub struct RodioSink {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    detach_timeout: Duration,
}

impl RodioSink {
    pub fn new(detach_timeout: Duration) -> Self {
        Self {
            stream: None,
            sink: None,
            detach_timeout,
        }
    }
}

impl Default for RodioSink {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl OutputSink for RodioSink {
    fn ensure_initialized(&mut self, sample_rate: u32) -> Result<(), PlayerError> {
        if self.stream.is_some() {
            return Ok(());
        }

        // One fixed configuration for the whole process, chosen by the first
        // track; later tracks render through the same stream. Fall back to
        // the device default when the exact rate is not available.
        let mut stream = OutputStreamBuilder::from_default_device()
            .and_then(|b| b.with_sample_rate(sample_rate).open_stream())
            .or_else(|_| OutputStreamBuilder::open_default_stream())
            .map_err(|e| PlayerError::DeviceInit(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        debug!(sample_rate, "output stream opened");
        self.stream = Some(stream);
        Ok(())
    }

    fn attach(&mut self, stream: Box<dyn Source + Send>) -> Result<(), PlayerError> {
        self.detach()?;

        let Some(out) = self.stream.as_ref() else {
            return Err(PlayerError::DeviceInit(
                "output stream not initialized".to_string(),
            ));
        };

        let sink = Sink::connect_new(out.mixer());
        sink.append(stream);
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn detach(&mut self) -> Result<(), PlayerError> {
        let Some(sink) = self.sink.take() else {
            return Ok(());
        };
        sink.stop();

        // The mixer lets go of the stream once the stop is observed; closing
        // the track's file before that would race the render callback.
        let deadline = Instant::now() + self.detach_timeout;
        while !sink.empty() {
            if Instant::now() >= deadline {
                error!("detach timed out, keeping the stream alive");
                self.sink = Some(sink);
                return Err(PlayerError::TeardownTimeout);
            }
            thread::sleep(DETACH_POLL);
        }

        debug!("render stream detached");
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        if let Some(sink) = self.sink.as_ref() {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }

    fn seek(&mut self, pos: Duration) -> Result<(), PlayerError> {
        let Some(sink) = self.sink.as_ref() else {
            return Err(PlayerError::NoTrackLoaded);
        };
        sink.try_seek(pos)?;
        Ok(())
    }
}
