use std::env;
use std::path::Path;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::Player;
use crate::library::{scan, shuffle_playlist};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init();

    let Some(dir) = env::args().nth(1) else {
        eprintln!("usage: dirplay <music-dir>");
        std::process::exit(2);
    };

    let mut playlist = scan(Path::new(&dir), &settings.library);
    if playlist.is_empty() {
        eprintln!("dirplay: no playable files under {dir}");
        std::process::exit(1);
    }
    if settings.playback.shuffle_on_start {
        shuffle_playlist(&mut playlist, &mut rand::rng());
    }
    info!(tracks = playlist.len(), %dir, "scanned library");

    let mut app = App::new(playlist, dir);
    let mut player = Player::new(Duration::from_millis(settings.audio.detach_timeout_ms));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
