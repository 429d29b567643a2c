//! Directory scanning and playlist ordering.
//!
//! The library is nothing more than the list of playable file paths under
//! one directory; per-track metadata is read lazily by the decoder when a
//! track is actually loaded.

mod scan;
mod shuffle;

pub use scan::scan;
pub use shuffle::shuffle_playlist;
