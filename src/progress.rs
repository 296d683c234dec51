//! Fixed-point progress calculation and its display rendering.
//!
//! Progress through the configured range is expressed as an integer in
//! `0..=1_000_000` (percent × 10,000, i.e. four decimal digits), computed
//! entirely in `u64` arithmetic so the result is exact for the whole
//! supported year range. Rendering picks between the two display
//! personalities: the custom LCD shows a true decimal point (`XX.XXXX`), the
//! classic LCD substitutes a colon (`XX:XXXX`) and a short literal token at
//! exactly 100%.

use crate::calendar;
use crate::host::{DisplaySink, LcdType, Zone};
use crate::{CalendarDateTime, DateRange};

/// Full progress: 100.0000% on the fixed-point scale.
pub const FULL_SCALE: u64 = 1_000_000;

/// Literal token shown at exactly 100% on the custom personality.
pub const FULL_TOKEN: &str = "1000000";

/// Literal token shown at exactly 100% on the classic personality.
pub const FULL_TOKEN_REDUCED: &str = "100   ";

/// Label for the top zone while displaying progress.
const PROGRESS_TITLE: &str = "PROG ";
const PROGRESS_TITLE_REDUCED: &str = "PR   ";

/// Elapsed fraction of `range` at `now`, as percent × 10,000.
///
/// - `now <= start` yields exactly 0.
/// - `now >= end` yields exactly [`FULL_SCALE`]; this also covers the
///   degenerate `end == start` range, which therefore reads as 100% whenever
///   `now` has passed the shared instant.
/// - In between, the result is `floor((now - start) * 1_000_000 / (end -
///   start))`, monotonically non-decreasing as `now` advances.
pub fn progress_fixed_point(range: &DateRange, now: CalendarDateTime) -> u64 {
    let start = calendar::linear_minutes(range.start);
    let end = calendar::linear_minutes(range.end);
    let now = calendar::linear_minutes(now);

    if now <= start {
        0
    } else if now >= end {
        FULL_SCALE
    } else {
        // start < now < end here, so the duration is nonzero
        (now - start) * FULL_SCALE / (end - start)
    }
}

/// Six-digit zero-padded form of a sub-100% progress value.
pub fn format_fixed_point(progress: u64) -> String {
    format!("{:06}", progress)
}

/// Render the current progress to the display.
///
/// Shows the progress label in the top zone and the percentage in the main
/// zone, selecting the literal full token at exactly 100% independent of
/// personality; only the token's rendering differs between the two.
pub fn render(display: &mut impl DisplaySink, range: &DateRange, now: CalendarDateTime) {
    let progress = progress_fixed_point(range, now);

    display.display_text_with_fallback(Zone::Top, PROGRESS_TITLE, PROGRESS_TITLE_REDUCED);

    if progress >= FULL_SCALE {
        display.display_text_with_fallback(Zone::Bottom, FULL_TOKEN, FULL_TOKEN_REDUCED);

        if display.lcd_type() != LcdType::Custom {
            display.clear_colon();
        }
    } else {
        let text = format_fixed_point(progress);

        if display.lcd_type() != LcdType::Custom {
            display.set_colon();
        }

        display.display_text(Zone::Bottom, &text);
    }

    if display.lcd_type() == LcdType::Custom {
        display.set_decimal();
    }
}
