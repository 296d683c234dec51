//! # End-to-End Scenario Tests
//!
//! These tests walk the face through complete user interactions against a
//! real filesystem record store: first-run setup, a full edit cycle, a
//! simulated power cycle, and the progress rendering states. They exercise
//! the same composition of clock, display, and store the simulator uses.

use progress_face_lib::face::{Field, Page, ProgressFace};
use progress_face_lib::host::{Event, LcdType, RecordStore, Zone};
use progress_face_lib::store::{self, FsRecordStore};
use progress_face_lib::terminal::{FixedClock, SimHost, TerminalDisplay};
use progress_face_lib::{CalendarDateTime, DateRange};
use tempfile::tempdir;

fn dt(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> CalendarDateTime {
    CalendarDateTime {
        year,
        month,
        day,
        hour,
        minute,
    }
}

fn host_in(
    dir: &std::path::Path,
    now: CalendarDateTime,
    lcd_type: LcdType,
) -> SimHost<FsRecordStore> {
    SimHost::new(
        Box::new(FixedClock::new(now)),
        TerminalDisplay::new(lcd_type),
        FsRecordStore::open(dir).expect("record store should open"),
    )
}

fn light_press(face: &mut ProgressFace, host: &mut SimHost<FsRecordStore>) {
    face.on_event(Event::LightButtonDown, host);
    face.on_event(Event::LightButtonUp, host);
}

/// First run: no stored record, the face opens straight into start-date
/// settings; completing both endpoints writes the record and lands on the
/// progress display.
#[test]
fn fresh_install_walkthrough() {
    let dir = tempdir().unwrap();
    let mut host = host_in(dir.path(), dt(2025, 6, 15, 12, 0), LcdType::Custom);

    let mut face = ProgressFace::new(0, &host);
    assert_eq!(face.page(), Page::EditStart);
    assert_eq!(face.field(), Field::Year);
    face.on_event(Event::Activate, &mut host);
    assert_eq!(host.tick_hz(), 4);

    // Accept the defaults for every field of both endpoints
    for _ in 0..10 {
        light_press(&mut face, &mut host);
    }
    assert_eq!(face.page(), Page::Display);
    assert_eq!(host.tick_hz(), 1);

    // The record landed on disk with the fixed 8-byte layout
    let record = dir.path().join(store::record_name(0));
    assert_eq!(std::fs::metadata(&record).unwrap().len(), 8);
}

/// A completed edit cycle survives a power cycle: a fresh host and face over
/// the same storage directory open in display mode with the edited range.
#[test]
fn settings_survive_a_restart() {
    let dir = tempdir().unwrap();
    let now = dt(2025, 6, 15, 12, 0);

    {
        let mut host = host_in(dir.path(), now, LcdType::Custom);
        let mut face = ProgressFace::new(0, &host);

        // Bump the start year twice, keep everything else at defaults
        face.on_event(Event::AlarmButtonUp, &mut host);
        face.on_event(Event::AlarmButtonUp, &mut host);
        for _ in 0..10 {
            light_press(&mut face, &mut host);
        }
        assert_eq!(face.page(), Page::Display);
        face.on_event(Event::Resign, &mut host);
    }

    let host = host_in(dir.path(), now, LcdType::Custom);
    let face = ProgressFace::new(0, &host);
    assert_eq!(face.page(), Page::Display);

    // Start moved to 2027; the end snapped up to match when the start passed it
    assert_eq!(face.dates().start.year, 2027);
    assert_eq!(face.dates().end, face.dates().start);
}

/// Before the range starts, the display reads 00.0000%.
#[test]
fn display_reads_zero_before_start() {
    let dir = tempdir().unwrap();
    let range = DateRange {
        start: dt(2025, 8, 1, 0, 0),
        end: dt(2025, 12, 31, 23, 59),
    };
    let mut host = host_in(dir.path(), dt(2025, 6, 1, 0, 0), LcdType::Classic);
    host.store
        .write(&store::record_name(0), &store::encode_range(&range));

    let mut face = ProgressFace::new(0, &host);
    face.on_event(Event::Activate, &mut host);

    assert_eq!(host.display.zone(Zone::Bottom), "000000");
    assert!(host.display.colon());
    assert!(host.display.render_line().contains("00:0000"));
}

/// After the range ends, the literal full token is shown, not a truncated
/// six-digit form.
#[test]
fn display_reads_full_token_after_end() {
    let dir = tempdir().unwrap();
    let range = DateRange {
        start: dt(2024, 1, 1, 0, 0),
        end: dt(2024, 12, 31, 23, 59),
    };

    let mut custom = host_in(dir.path(), dt(2025, 6, 1, 0, 0), LcdType::Custom);
    custom
        .store
        .write(&store::record_name(0), &store::encode_range(&range));
    let mut face = ProgressFace::new(0, &custom);
    face.on_event(Event::Activate, &mut custom);
    assert_eq!(custom.display.zone(Zone::Bottom), "1000000");
    assert!(custom.display.render_line().contains("100.0000"));

    let mut classic = host_in(dir.path(), dt(2025, 6, 1, 0, 0), LcdType::Classic);
    classic
        .store
        .write(&store::record_name(1), &store::encode_range(&range));
    let mut face = ProgressFace::new(1, &classic);
    face.on_event(Event::Activate, &mut classic);
    assert_eq!(classic.display.zone(Zone::Bottom), "100   ");
    assert!(!classic.display.colon());
}

/// Mid-range, the rendered percentage is strictly between the endpoints.
#[test]
fn display_reads_partial_progress_mid_range() {
    let dir = tempdir().unwrap();
    let range = DateRange {
        start: dt(2025, 1, 1, 0, 0),
        end: dt(2025, 12, 31, 23, 59),
    };
    let mut host = host_in(dir.path(), dt(2025, 7, 2, 12, 0), LcdType::Custom);
    host.store
        .write(&store::record_name(0), &store::encode_range(&range));

    let mut face = ProgressFace::new(0, &host);
    face.on_event(Event::Activate, &mut host);

    let shown = host.display.zone(Zone::Bottom);
    assert_eq!(shown.len(), 6);
    let value: u64 = shown.parse().expect("display shows a number");
    assert!(value > 0 && value < 1_000_000);
    // Roughly half the year has elapsed
    assert!((450_000..=550_000).contains(&value));
}

/// Each instance index keys its own record; two faces over the same store do
/// not share state.
#[test]
fn instances_keep_separate_ranges() {
    let dir = tempdir().unwrap();
    let now = dt(2025, 6, 15, 12, 0);

    let mut host = host_in(dir.path(), now, LcdType::Custom);
    let mut face0 = ProgressFace::new(0, &host);
    for _ in 0..10 {
        light_press(&mut face0, &mut host);
    }
    assert_eq!(face0.page(), Page::Display);

    // Instance 1 has no record yet, so it opens in settings
    let face1 = ProgressFace::new(1, &host);
    assert_eq!(face1.page(), Page::EditStart);
}
