use std::path::PathBuf;

use super::App;

fn app_with(n: usize) -> App {
    let playlist = (0..n).map(|i| PathBuf::from(format!("{i}.mp3"))).collect();
    App::new(playlist, "/music".to_string())
}

#[test]
fn next_and_prev_wrap_around() {
    let mut app = app_with(3);
    assert_eq!(app.current, 0);
    assert_eq!(app.next_index(), 1);
    assert_eq!(app.prev_index(), 2);

    app.advance();
    app.advance();
    assert_eq!(app.current, 2);
    app.advance();
    assert_eq!(app.current, 0);

    app.retreat();
    assert_eq!(app.current, 2);
}

#[test]
fn single_track_playlist_stays_on_it() {
    let mut app = app_with(1);
    app.advance();
    assert_eq!(app.current, 0);
    app.retreat();
    assert_eq!(app.current, 0);
    assert_eq!(app.current_path(), Some(std::path::Path::new("0.mp3")));
}

#[test]
fn empty_playlist_has_no_current_path() {
    let mut app = app_with(0);
    assert!(!app.has_tracks());
    assert_eq!(app.current_path(), None);
    // Indices stay pinned rather than dividing by zero.
    app.advance();
    app.retreat();
    assert_eq!(app.current, 0);
}
