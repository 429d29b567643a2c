//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::audio::PlayerState;
use crate::config::{ControlsSettings, UiSettings};

/// Snapshot of the player taken once per frame, so rendering never touches
/// the engine mid-draw.
pub struct NowPlaying {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub state: PlayerState,
    pub position: Duration,
    pub duration: Duration,
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next song".to_string(),
        format!("[H/L] scrub -/+{}s", scrub_seconds),
        "[n] save note".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Progress bar fill in `[0, 1]`; a zero duration renders as empty.
fn progress_ratio(position: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

fn track_label(app: &App, index: usize) -> String {
    app.playlist[index]
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Render the entire UI into the provided `frame` using `app` state and the
/// per-frame player snapshot.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    now: &NowPlaying,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" dirplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let state = match now.state {
            PlayerState::Stopped => "Stopped",
            PlayerState::Playing => "Playing",
            PlayerState::Paused => "Paused",
        };
        parts.push(state.to_string());

        if let Some(title) = &now.title {
            match now.artist.as_deref().filter(|a| !a.trim().is_empty()) {
                Some(artist) => parts.push(format!("Song: {} - {}", artist, title)),
                None => parts.push(format!("Song: {}", title)),
            }
        }

        parts.push(format!(
            "Track {}/{}",
            app.current + 1,
            app.playlist.len()
        ));
        parts.push(format!("Dir: {}", app.current_dir));

        if let Some(err) = &app.last_error {
            parts.push(format!("Error: {}", err));
        }
        if let Some(note) = &app.note_status {
            parts.push(note.clone());
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track list, windowed around the current track.
    {
        let total = app.playlist.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = app.current.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = (start..end)
            .map(|i| ListItem::new(track_label(app, i)))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Progress bar
    let progress_label = format!(
        "{} / {}",
        format_mmss(now.position),
        format_mmss(now.duration)
    );
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(progress_ratio(now.position, now.duration))
        .label(progress_label);
    frame.render_widget(progress, chunks[3]);

    // Controls footer
    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(61)), "01:01");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn progress_ratio_clamps_and_handles_zero_duration() {
        assert_eq!(progress_ratio(Duration::from_secs(5), Duration::ZERO), 0.0);
        assert_eq!(
            progress_ratio(Duration::from_secs(5), Duration::from_secs(10)),
            0.5
        );
        assert_eq!(
            progress_ratio(Duration::from_secs(20), Duration::from_secs(10)),
            1.0
        );
    }
}
