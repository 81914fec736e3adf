//! Line-oriented presentation shell.
//!
//! The shell owns the single event-processing loop: it alternates between
//! draining backend notifications into the session and dispatching typed
//! commands from stdin. All rendering is plain stdout.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::backend::{MediaBackend, MediaEvent, PlaybackState};
use crate::config::Settings;
use crate::library::scan;
use crate::player::{PlayerSession, RepeatMode};

pub(super) fn run<B: MediaBackend>(
    session: &mut PlayerSession<B>,
    events: &Receiver<MediaEvent>,
    settings: &Settings,
) {
    println!(
        "adagio: {} tracks loaded, type 'help' for commands",
        session.track_count()
    );

    let lines = spawn_stdin_lines();

    loop {
        pump_events(session, events);

        match lines.recv_timeout(Duration::from_millis(200)) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if !dispatch(session, settings, line) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Forward stdin lines over a channel so the loop can keep pumping backend
/// events while nobody is typing.
fn spawn_stdin_lines() -> Receiver<String> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(l).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

/// Drain pending backend notifications. Announces track changes that happen
/// without a command (auto-advance) and surfaces backend failures.
fn pump_events<B: MediaBackend>(session: &mut PlayerSession<B>, events: &Receiver<MediaEvent>) {
    let before = session.current_track().map(|t| t.path.clone());

    while let Ok(event) = events.try_recv() {
        session.handle_event(event);
    }

    let after = session.current_track().map(|t| t.path.clone());
    if before != after {
        announce_current(session);
    }
    if let Some(message) = session.take_error() {
        println!("error: {message}");
    }
}

fn announce_current<B: MediaBackend>(session: &PlayerSession<B>) {
    if let Some(track) = session.current_track() {
        println!("now playing: {}", track.display_name);
    }
}

/// Handle one command line. Returns `false` when the shell should exit.
fn dispatch<B: MediaBackend>(
    session: &mut PlayerSession<B>,
    settings: &Settings,
    line: &str,
) -> bool {
    // "/moon" is shorthand for "search moon".
    if let Some(query) = line.strip_prefix('/') {
        session.set_query(query);
        print_list(session);
        return true;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "help" | "h" => print_help(),
        "list" | "ls" => print_list(session),
        "search" => {
            session.set_query(rest);
            print_list(session);
        }
        "play" => match rest.parse::<usize>() {
            Ok(row) => {
                session.play_row(row);
                announce_current(session);
            }
            Err(_) => println!("usage: play <row>"),
        },
        "pause" | "p" => session.toggle_pause(),
        "stop" => session.stop(),
        "next" | "n" => {
            session.play_next();
            announce_current(session);
        }
        "prev" | "b" => {
            session.play_previous();
            announce_current(session);
        }
        "seek" => match rest.parse::<f64>() {
            Ok(fraction) => session.seek_to(fraction),
            Err(_) => println!("usage: seek <0.0..1.0>"),
        },
        "vol" => match rest.parse::<f32>() {
            Ok(volume) => session.set_volume(volume),
            Err(_) => println!("usage: vol <0.0..1.0>"),
        },
        "shuffle" => {
            session.toggle_shuffle();
            println!("shuffle {}", if session.shuffle() { "on" } else { "off" });
        }
        "repeat" => {
            session.cycle_repeat();
            println!("repeat {}", repeat_label(session.repeat()));
        }
        "add" => {
            if rest.is_empty() {
                println!("usage: add <directory>");
            } else {
                let files = scan(Path::new(rest), &settings.library);
                let added = session.add_files(files);
                println!("{added} new tracks, {} total", session.track_count());
            }
        }
        "status" => print_status(session),
        "quit" | "q" => return false,
        _ => println!("unknown command '{command}', type 'help'"),
    }

    true
}

fn print_list<B: MediaBackend>(session: &PlayerSession<B>) {
    let view = session.visible();
    let current = session.current_track().map(|t| t.path.clone());

    for (row, track) in view.iter().enumerate() {
        let marker = if current.as_deref() == Some(track.path.as_path()) {
            '>'
        } else {
            ' '
        };
        println!("{marker}{row:4}  {}", track.display_name);
    }
    println!("{} of {} tracks", view.len(), session.track_count());
}

fn print_status<B: MediaBackend>(session: &PlayerSession<B>) {
    let status = match session.transport().status() {
        PlaybackState::Stopped => "stopped",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
    };
    match session.current_track() {
        Some(track) => println!(
            "[{status}] {}  {}",
            track.display_name,
            session.transport().clock()
        ),
        None => println!("[{status}] nothing loaded"),
    }
    println!(
        "{} tracks, shuffle {}, repeat {}",
        session.track_count(),
        if session.shuffle() { "on" } else { "off" },
        repeat_label(session.repeat())
    );
}

fn repeat_label(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    }
}

fn print_help() {
    println!("  list              show the filtered track list");
    println!("  search <text>     filter tracks (empty text clears, '/text' works too)");
    println!("  play <row>        play the track at a visible row");
    println!("  pause             toggle pause/resume (starts playback when stopped)");
    println!("  next / prev       skip forward / navigate back");
    println!("  stop              stop playback");
    println!("  seek <fraction>   jump within the current track, e.g. seek 0.5");
    println!("  vol <volume>      set output volume, e.g. vol 0.7");
    println!("  shuffle / repeat  toggle shuffle, cycle repeat off/all/one");
    println!("  add <directory>   scan another directory into the library");
    println!("  status            show playback status");
    println!("  quit              exit");
}
