//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist, the index
//! of the current track and transient status shown by the UI.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
