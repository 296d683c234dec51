//! Host interface: the collaborator traits the watch provides to the face.
//!
//! The face never talks to hardware directly. The clock, the segment driver,
//! the tick scheduler, and the byte-oriented record store are all owned by the
//! host and injected behind these traits, so the settings state machine and
//! the progress arithmetic can be exercised against fakes (a fixed clock, an
//! in-memory store, a zone-buffered terminal display — see [`crate::terminal`]
//! and [`crate::store`]).

use crate::CalendarDateTime;

/// The closed set of events the host delivers, one at a time, to
/// [`crate::face::ProgressFace::on_event`].
///
/// The light button is the secondary (field-advance) button; the alarm button
/// is the primary (increment) button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The face became the active display.
    Activate,
    /// The face is being deactivated; pending date changes are persisted.
    Resign,
    /// Periodic tick at the requested frequency. `subsecond` counts ticks
    /// within the current second and drives the edit-field blink.
    Tick { subsecond: u8 },
    /// Tick delivered while the watch is in its low-power refresh mode.
    LowPowerTick,
    /// Light (secondary) button pressed.
    LightButtonDown,
    /// Light (secondary) button released; advances the edited field.
    LightButtonUp,
    /// Alarm (primary) button released; applies one increment while editing.
    AlarmButtonUp,
    /// Alarm (primary) button held down long enough to register a long press.
    AlarmLongPress,
    /// Alarm (primary) button released after a long press.
    AlarmLongRelease,
    /// The host's idle timeout elapsed with no input.
    Timeout,
}

/// Display personality of the attached segment LCD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcdType {
    /// Richer layout with a true decimal point.
    Custom,
    /// Reduced character set; a colon stands in for the decimal point.
    Classic,
}

/// Addressable display zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// 5-character label row.
    Top,
    /// Main value row (4–7 characters depending on content).
    Bottom,
    /// Left 2-character half of the main row.
    Hours,
    /// Right 2-character half of the main row.
    Minutes,
    /// 2-character corner zone (page indicator while editing).
    Seconds,
}

/// Source of the host's local calendar time.
pub trait Clock {
    /// Current local date/time at minute precision.
    fn now(&self) -> CalendarDateTime;

    /// Seconds within the current minute, for minute-boundary refresh.
    fn second(&self) -> u8;
}

/// Semantic text output to the segment display.
pub trait DisplaySink {
    /// Which personality is attached.
    fn lcd_type(&self) -> LcdType;

    /// Show `text` in `zone`.
    fn display_text(&mut self, zone: Zone, text: &str);

    /// Show `rich` on the custom personality, `reduced` on the classic one.
    fn display_text_with_fallback(&mut self, zone: Zone, rich: &str, reduced: &str) {
        match self.lcd_type() {
            LcdType::Custom => self.display_text(zone, rich),
            LcdType::Classic => self.display_text(zone, reduced),
        }
    }

    /// Light the colon indicator (no-op if the personality lacks it).
    fn set_colon(&mut self);
    /// Clear the colon indicator.
    fn clear_colon(&mut self);
    /// Light the decimal-point indicator (no-op if the personality lacks it).
    fn set_decimal(&mut self);
    /// Clear the decimal-point indicator.
    fn clear_decimal(&mut self);
}

/// Scheduling, button sampling, and cosmetic side effects.
pub trait HostControl {
    /// Request one of the supported tick rates (1, 4, or 8 Hz).
    fn request_tick_frequency(&mut self, hz: u8);

    /// Whether the alarm button is physically held down right now. Sampled on
    /// every tick while quick-cycle repeat is active.
    fn alarm_button_is_down(&self) -> bool;

    /// Light the backlight LED.
    fn illuminate_led(&mut self);

    /// Start the sleep-mode indicator animation.
    fn start_sleep_animation(&mut self, period_ms: u32);
    /// Stop the sleep-mode indicator animation.
    fn stop_sleep_animation(&mut self);
    /// Whether the sleep-mode indicator animation is running.
    fn sleep_animation_running(&self) -> bool;
}

/// Byte-oriented persistent storage keyed by record name.
///
/// Failures are unified with absence: a read that cannot fill the buffer
/// exactly reports `false`, and writes are fire-and-forget (the in-memory
/// state stays authoritative regardless of write success).
pub trait RecordStore {
    /// Whether a record with this name exists.
    fn exists(&self, name: &str) -> bool;

    /// Read a record into `buf`; `true` only if exactly `buf.len()` bytes
    /// were available.
    fn read(&self, name: &str, buf: &mut [u8]) -> bool;

    /// Write (or overwrite) a record.
    fn write(&mut self, name: &str, data: &[u8]);
}

/// Everything the face needs from the host, as one bound.
///
/// Implemented automatically for any type providing all four collaborator
/// traits, so the entry point takes a single `&mut H` while tests substitute
/// each seam independently.
pub trait Host: Clock + DisplaySink + HostControl + RecordStore {}

impl<T: Clock + DisplaySink + HostControl + RecordStore + ?Sized> Host for T {}
