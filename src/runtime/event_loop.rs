use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{OutputSink, Player, PlayerState};
use crate::config;
use crate::notes;
use crate::ui;

/// Main terminal event loop: draws the UI, auto-advances at end of track
/// and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run<S: OutputSink>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.playback.tick_ms);
    let scrub = settings.controls.scrub_seconds as i64;

    // Autoplay the first track.
    load_and_play(app, player);

    loop {
        // When the render side has exhausted the current track, move on.
        if player.state() == PlayerState::Playing && player.has_ended() {
            info!(track = ?player.title(), "track ended");
            app.advance();
            load_and_play(app, player);
        }

        let now = ui::NowPlaying {
            title: player.title().map(str::to_string),
            artist: player.artist().map(str::to_string),
            state: player.state(),
            position: player.position(),
            duration: player.duration(),
        };
        terminal.draw(|f| ui::draw(f, app, &now, &settings.ui, &settings.controls))?;

        if !event::poll(tick)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                player.stop()?;
                return Ok(());
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                player.stop()?;
                return Ok(());
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => match player.state() {
                PlayerState::Playing => player.pause(),
                PlayerState::Paused => player.resume(),
                // After an end-of-playlist stop, restart the current track.
                PlayerState::Stopped => load_and_play(app, player),
            },
            KeyCode::Char('l') | KeyCode::Right => {
                app.advance();
                load_and_play(app, player);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                app.retreat();
                load_and_play(app, player);
            }
            KeyCode::Char('L') => {
                if let Err(e) = player.seek_by(scrub) {
                    app.last_error = Some(e.to_string());
                }
            }
            KeyCode::Char('H') => {
                if let Err(e) = player.seek_by(-scrub) {
                    app.last_error = Some(e.to_string());
                }
            }
            KeyCode::Char('n') => save_note(app, player, settings),
            _ => {}
        }
    }
}

/// Load the current playlist entry and start playing it. Failures are shown
/// in the status line instead of killing the session; the user can skip past
/// a broken file.
fn load_and_play<S: OutputSink>(app: &mut App, player: &mut Player<S>) {
    app.note_status = None;
    if !app.has_tracks() {
        return;
    }

    let Some(path) = app.current_path().map(std::path::Path::to_path_buf) else {
        return;
    };

    match player.load(&path).and_then(|()| player.play()) {
        Ok(()) => app.last_error = None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to play");
            app.last_error = Some(format!("{}: {e}", path.display()));
        }
    }
}

fn save_note<S: OutputSink>(app: &mut App, player: &Player<S>, settings: &config::Settings) {
    let (Some(title), Some(artist), Some(album)) =
        (player.title(), player.artist(), player.album())
    else {
        app.last_error = Some("nothing playing to note down".to_string());
        return;
    };

    let path = settings
        .notes
        .file
        .clone()
        .unwrap_or_else(notes::default_notes_path);

    match notes::append_note(&path, artist, album, title) {
        Ok(()) => {
            app.note_status = Some(format!("Saved note for {title}"));
            app.last_error = None;
        }
        Err(e) => app.last_error = Some(format!("note save failed: {e}")),
    }
}
