//! Interactive session
//!
//! Line-oriented driver for the session manager. The terminal plays the part
//! of the playback surface: `tick`, `meta` and `end` stand in for the time
//! update, metadata and end-of-media callbacks a real player would send.

use crate::commands::{print_queue, write_item};
use anyhow::Result;
use cadence_core::{Catalog, PlaylistId};
use cadence_playback::{format_clock, SessionManager};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
commands:
  play <id>          play a catalog item
  playlist <id>      play a playlist from the start
  toggle             play / pause
  next | prev        move through the queue
  seek <seconds>     jump to a position
  volume <0-1>       set volume
  repeat on|off      wrap around at the end of the queue
  tick <seconds>     report playback position
  meta <seconds>     report decoded duration
  end                report end of media
  status | queue     show state
  quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Play(String),
    Playlist(String),
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Volume(f64),
    Repeat(bool),
    Tick(f64),
    Meta(f64),
    End,
    Status,
    Queue,
    Help,
    Quit,
}

fn parse_seconds(arg: Option<&str>, command: &str) -> Result<f64, String> {
    let arg = arg.ok_or_else(|| format!("{command} needs a number"))?;
    arg.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("{command}: not a number: {arg}"))
}

fn parse_id(arg: Option<&str>, command: &str) -> Result<String, String> {
    arg.map(str::to_string)
        .ok_or_else(|| format!("{command} needs an id"))
}

/// Parse one line; `Ok(None)` for blank lines
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let input = match command {
        "play" => Input::Play(parse_id(arg, command)?),
        "playlist" => Input::Playlist(parse_id(arg, command)?),
        "toggle" => Input::Toggle,
        "next" => Input::Next,
        "prev" => Input::Prev,
        "seek" => Input::Seek(parse_seconds(arg, command)?),
        "volume" => Input::Volume(parse_seconds(arg, command)?),
        "repeat" => match arg {
            Some("on") => Input::Repeat(true),
            Some("off") => Input::Repeat(false),
            _ => return Err("repeat takes on or off".to_string()),
        },
        "tick" => Input::Tick(parse_seconds(arg, command)?),
        "meta" => Input::Meta(parse_seconds(arg, command)?),
        "end" => Input::End,
        "status" => Input::Status,
        "queue" => Input::Queue,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("unknown command: {other} (try help)")),
    };

    Ok(Some(input))
}

fn write_status(out: &mut impl Write, session: &SessionManager) -> Result<()> {
    let snapshot = session.snapshot();
    match &snapshot.current {
        Some(item) => {
            write!(out, "{:<8} ", snapshot.transport.as_str())?;
            write_item(out, item)?;
            writeln!(
                out,
                "         {} / {} ({:.0}%)  volume {:.2}  repeat {}",
                format_clock(snapshot.progress),
                format_clock(snapshot.display_duration),
                snapshot.progress_percent,
                snapshot.volume,
                if snapshot.repeat { "on" } else { "off" }
            )?;
        }
        None => writeln!(out, "Nothing playing")?,
    }
    Ok(())
}

/// Apply one input; returns `false` when the session should end
pub fn apply(
    input: Input,
    session: &mut SessionManager,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<bool> {
    match input {
        Input::Play(id) => match catalog.require(&id) {
            Ok(item) => {
                session.play(item.clone());
                write_status(out, session)?;
            }
            Err(e) => writeln!(out, "{e}")?,
        },
        Input::Playlist(id) => match catalog.playlist_items(&PlaylistId::new(id.clone())) {
            Ok(items) if items.is_empty() => writeln!(out, "Playlist {id} is empty")?,
            Ok(items) => {
                session.play_collection(items);
                write_status(out, session)?;
            }
            Err(e) => writeln!(out, "{e}")?,
        },
        Input::Toggle => {
            session.toggle_play();
            write_status(out, session)?;
        }
        Input::Next => {
            session.play_next();
            write_status(out, session)?;
        }
        Input::Prev => {
            session.play_prev();
            write_status(out, session)?;
        }
        Input::Seek(position) => session.seek(position),
        Input::Volume(volume) => {
            if (0.0..=1.0).contains(&volume) {
                session.set_volume(volume);
            } else {
                writeln!(out, "volume must be between 0 and 1")?;
            }
        }
        Input::Repeat(repeat) => session.set_repeat(repeat),
        Input::Tick(position) => session.on_time_update(position),
        Input::Meta(duration) => session.on_loaded_metadata(duration),
        Input::End => {
            session.on_ended();
            write_status(out, session)?;
        }
        Input::Status => write_status(out, session)?,
        Input::Queue => print_queue(out, session)?,
        Input::Help => writeln!(out, "{HELP}")?,
        Input::Quit => return Ok(false),
    }

    for event in session.drain_events() {
        debug!(?event, "session event");
    }

    Ok(true)
}

/// Read commands until `quit` or end of input
pub fn run(
    session: &mut SessionManager,
    catalog: &Catalog,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    writeln!(out, "cadence session, {} items (help for commands)", catalog.len())?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                if !apply(command, session, catalog, &mut out)? {
                    break;
                }
            }
            Err(message) => writeln!(out, "{message}")?,
        }
        out.flush()?;
    }

    // Keep the position of whatever was playing
    session.on_pause();
    Ok(())
}
