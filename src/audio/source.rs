//! Completion detection for sample streams.
//!
//! The render thread is the only code that pulls samples, so the controller
//! cannot ask the stream directly whether it ran out. [`EndSignal`] wraps a
//! stream in a pass-through decorator that latches a shared flag on the first
//! empty pull; the controller polls the flag instead of the render thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::Source;
use rodio::source::SeekError;

/// Shared flag latched once the wrapped stream reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct EndedFlag(Arc<AtomicBool>);

impl EndedFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Pass-through source that records when the inner stream runs dry.
///
/// Forwards every pull and every `Source` query, so the render path is
/// unaware of the wrapping.
pub struct EndSignal<S> {
    inner: S,
    ended: EndedFlag,
}

impl<S> EndSignal<S> {
    /// Wrap `inner`, returning the wrapper and the flag it will latch.
    pub fn new(inner: S) -> (Self, EndedFlag) {
        let ended = EndedFlag::default();
        (
            Self {
                inner,
                ended: ended.clone(),
            },
            ended,
        )
    }
}

impl<S: Source> Iterator for EndSignal<S> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next();
        if item.is_none() {
            self.ended.set();
        }
        item
    }
}

impl<S: Source> Source for EndSignal<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.inner.try_seek(pos)
    }
}
