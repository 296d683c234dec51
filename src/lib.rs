//! # Progress Face Core Library
//!
//! This library implements a date-range progress complication for watches with
//! low-resolution segmented displays: given a user-configured start and end
//! date/time, it shows the elapsed fraction of that interval as a percentage
//! with four decimal digits of precision, refreshed once per minute.
//!
//! ## Design Philosophy
//!
//! ### Event-driven, single-threaded
//! The host delivers one discrete event at a time (ticks, button presses,
//! activation/deactivation) to [`face::ProgressFace::on_event`] and waits for
//! it to return. Nothing blocks, nothing runs concurrently; all state lives in
//! one `ProgressFace` record per instance.
//!
//! ### Integer time base
//! Calendar values are linearized through a Julian-Day-Number conversion
//! (`julian_day * 1440 + hour * 60 + minute`), so comparisons and percentage
//! arithmetic are exact integer operations with no floating-point drift.
//!
//! ### Injected collaborators
//! The real watch owns the clock, the segment driver, and the byte-oriented
//! record store. The core only sees them through the small traits in [`host`],
//! so the arithmetic and the settings state machine are testable against a
//! fixed clock, an in-memory store, and a zone-buffered terminal display.
//!
//! ### Display personalities
//! Two segment layouts exist: a "custom" personality with a true decimal point
//! (renders `XX.XXXX`) and a "classic" personality that substitutes a colon
//! (renders `XX:XXXX` and a short literal token at exactly 100%).
//!
//! ## Core Types
//!
//! - [`CalendarDateTime`]: a minute-precision calendar value
//! - [`DateRange`]: a start/end pair with the end-not-before-start invariant

use serde::{Deserialize, Serialize};

// Module declarations
pub mod calendar;
pub mod config;
pub mod face;
pub mod host;
pub mod progress;
pub mod store;
pub mod terminal;

/// A calendar date/time with minute precision.
///
/// Fields are plain integers with documented ranges; callers are expected to
/// keep them in range. The module itself only clamps values while applying
/// increment wraparound in settings mode, never on access.
///
/// Supported ranges:
/// - `year`: 0–4095 (fits the 12-bit storage packing)
/// - `month`: 1–12
/// - `day`: 1–31
/// - `hour`: 0–23
/// - `minute`: 0–59
///
/// # Example
/// ```
/// use progress_face_lib::CalendarDateTime;
///
/// let noon = CalendarDateTime {
///     year: 2025,
///     month: 7,
///     day: 2,
///     hour: 12,
///     minute: 0,
/// };
/// assert_eq!(noon.month, 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDateTime {
    /// Calendar year (0–4095)
    pub year: u16,
    /// Month of year (1–12)
    pub month: u8,
    /// Day of month (1–31)
    pub day: u8,
    /// Hour of day (0–23)
    pub hour: u8,
    /// Minute of hour (0–59)
    pub minute: u8,
}

/// A start/end pair of calendar values describing the tracked interval.
///
/// Invariant: `end >= start` under linear-time comparison. The settings
/// navigator enforces this after every edit by snapping `end` to `start`,
/// never by rejecting the edit (see [`face`]).
///
/// Persisted as a fixed-size 8-byte record, one per face instance (see
/// [`store`]).
///
/// # Example
/// ```
/// use progress_face_lib::{CalendarDateTime, DateRange};
///
/// let range = DateRange {
///     start: CalendarDateTime { year: 2025, month: 1, day: 1, hour: 0, minute: 0 },
///     end: CalendarDateTime { year: 2025, month: 12, day: 31, hour: 23, minute: 59 },
/// };
/// assert_eq!(range.start.year, range.end.year);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Beginning of the tracked interval
    pub start: CalendarDateTime,
    /// End of the tracked interval (never before `start`)
    pub end: CalendarDateTime,
}
