//! Audio playback engine: decoding, the output sink and the playback
//! controller.
//!
//! The engine plays exactly one track at a time from local files. `decode`
//! turns a path into a [`Track`], `sink` owns the process-wide output device,
//! and `engine` orchestrates both behind a small stopped/playing/paused state
//! machine.

mod decode;
mod engine;
mod sink;
mod source;
mod types;

pub use decode::open;
pub use engine::Player;
pub use sink::{OutputSink, RodioSink};
pub use source::{EndSignal, EndedFlag};
pub use types::{PlayerError, PlayerState, Track};
