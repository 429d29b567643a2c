use std::path::PathBuf;

use rand::Rng;
use rand::seq::SliceRandom;

/// Randomize the play order in place. The caller owns the RNG so tests can
/// seed one; the runtime passes `rand::thread_rng()`.
pub fn shuffle_playlist<R: Rng + ?Sized>(playlist: &mut [PathBuf], rng: &mut R) {
    playlist.shuffle(rng);
}
