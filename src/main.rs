//! # Progress Face Simulator Entry Point
//!
//! This binary drives the progress face interactively in a terminal, playing
//! the role the watch firmware plays in production: it owns the clock, the
//! record store, and the display, generates ticks at the face's requested
//! frequency, and maps keystrokes to button events.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Timelike};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use progress_face_lib::config::Config;
use progress_face_lib::face::ProgressFace;
use progress_face_lib::host::{Clock, Event, HostControl};
use progress_face_lib::store::FsRecordStore;
use progress_face_lib::terminal::{FixedClock, SimHost, SystemClock, TerminalDisplay};
use progress_face_lib::CalendarDateTime;
use std::env;
use std::io::{self, Write};
use std::time::Duration;

/// Parse an optional `--now YYYY-MM-DDTHH:MM` argument pinning the clock.
fn parse_pinned_clock(args: &[String]) -> Result<Option<CalendarDateTime>> {
    let Some(position) = args.iter().position(|arg| arg == "--now") else {
        return Ok(None);
    };
    let value = args
        .get(position + 1)
        .ok_or_else(|| anyhow!("--now requires a YYYY-MM-DDTHH:MM value"))?;

    let parsed = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .with_context(|| format!("invalid --now value: {}", value))?;

    Ok(Some(CalendarDateTime {
        year: parsed.year() as u16,
        month: parsed.month() as u8,
        day: parsed.day() as u8,
        hour: parsed.hour() as u8,
        minute: parsed.minute() as u8,
    }))
}

/// Interactive loop: poll for keys at the tick period, synthesizing a tick
/// whenever the poll times out with no input.
fn run_interactive(face: &mut ProgressFace, host: &mut SimHost<FsRecordStore>) -> Result<()> {
    let mut subsecond: u8 = 0;

    loop {
        let hz = host.tick_hz().max(1);
        let period = Duration::from_millis(1000 / u64::from(hz));

        if event::poll(period)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Any input wakes the watch out of sleep mode
                if host.sleep_animation_running() {
                    host.stop_sleep_animation();
                }

                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break;
                    }
                    KeyCode::Char('q') => break,
                    KeyCode::Char('l') => {
                        face.on_event(Event::LightButtonDown, host);
                        face.on_event(Event::LightButtonUp, host);
                    }
                    KeyCode::Char('a') => {
                        host.alarm_down = false;
                        face.on_event(Event::AlarmButtonUp, host);
                    }
                    KeyCode::Char('A') => {
                        host.alarm_down = true;
                        face.on_event(Event::AlarmLongPress, host);
                    }
                    KeyCode::Char('r') => {
                        host.alarm_down = false;
                        face.on_event(Event::AlarmLongRelease, host);
                    }
                    KeyCode::Char('t') => {
                        face.on_event(Event::Timeout, host);
                    }
                    KeyCode::Char('p') => {
                        face.on_event(Event::LowPowerTick, host);
                    }
                    _ => {}
                }
            }
        } else {
            subsecond = (subsecond + 1) % host.tick_hz().max(1);
            face.on_event(Event::Tick { subsecond }, host);
        }

        let mut out = io::stdout();
        write!(out, "\r{}", host.display.render_line())?;
        out.flush()?;
    }

    Ok(())
}

/// Main application entry point.
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    // Render one frame and exit; useful for scripting and screenshots
    let run_once = args.iter().any(|arg| arg == "--once");
    let pinned = parse_pinned_clock(&args)?;

    let config = Config::load();
    let store = FsRecordStore::open(&config.storage.data_dir)
        .with_context(|| format!("opening record store in {}", config.storage.data_dir))?;

    let clock: Box<dyn Clock> = match pinned {
        Some(now) => Box::new(FixedClock::new(now)),
        None => Box::new(SystemClock),
    };
    let display = TerminalDisplay::new(config.display.personality());
    let mut host = SimHost::new(clock, display, store);

    let mut face = ProgressFace::new(config.face.instance_index, &host);
    face.on_event(Event::Activate, &mut host);

    if run_once {
        println!("{}", host.display.render_line());
        face.on_event(Event::Resign, &mut host);
        return Ok(());
    }

    eprintln!("progress-face simulator (instance {})", config.face.instance_index);
    eprintln!("  l = light button (advance field)");
    eprintln!("  a = alarm button (increment)");
    eprintln!("  A = hold alarm (enter settings / quick-cycle)");
    eprintln!("  r = release alarm   t = idle timeout   p = low-power tick");
    eprintln!("  q = quit");

    terminal::enable_raw_mode()?;
    let result = run_interactive(&mut face, &mut host);
    terminal::disable_raw_mode()?;
    println!();

    // Deactivation persists any pending date changes
    face.on_event(Event::Resign, &mut host);

    result
}
