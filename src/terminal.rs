//! Terminal host for development and testing.
//!
//! This module plays the role the real watch plays in production: it owns the
//! clock, the display, and the record store, and hands them to the face
//! behind the traits in [`crate::host`]. The display is a zone buffer that
//! renders a one-line faux LCD, which is both the simulator's output and a
//! convenient assertion surface for tests.

use crate::host::{Clock, DisplaySink, HostControl, LcdType, RecordStore, Zone};
use crate::CalendarDateTime;
use chrono::{Datelike, Local, Timelike};
use log::debug;

/// Wall-clock time source backed by the local system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CalendarDateTime {
        let now = Local::now();
        CalendarDateTime {
            year: now.year() as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
        }
    }

    fn second(&self) -> u8 {
        Local::now().second() as u8
    }
}

/// Deterministic time source for tests and the simulator's `--now` flag.
pub struct FixedClock {
    /// The pinned calendar value.
    pub now: CalendarDateTime,
    /// Seconds within the pinned minute; zero makes every tick a
    /// minute-boundary tick.
    pub second: u8,
}

impl FixedClock {
    pub fn new(now: CalendarDateTime) -> Self {
        FixedClock { now, second: 0 }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> CalendarDateTime {
        self.now
    }

    fn second(&self) -> u8 {
        self.second
    }
}

/// Zone-buffered display that renders a one-line faux LCD.
///
/// `Hours` and `Minutes` overlay the left and right halves of the main row,
/// mirroring how the segment driver addresses sub-zones of the physical
/// digit positions.
pub struct TerminalDisplay {
    lcd_type: LcdType,
    top: String,
    bottom: String,
    seconds: String,
    colon: bool,
    decimal: bool,
}

impl TerminalDisplay {
    pub fn new(lcd_type: LcdType) -> Self {
        TerminalDisplay {
            lcd_type,
            top: String::new(),
            bottom: String::new(),
            seconds: String::new(),
            colon: false,
            decimal: false,
        }
    }

    /// Current contents of a zone (sub-zones are slices of the main row).
    pub fn zone(&self, zone: Zone) -> String {
        match zone {
            Zone::Top => self.top.clone(),
            Zone::Bottom => self.bottom.clone(),
            Zone::Hours => self.bottom.get(0..2).unwrap_or("").to_string(),
            Zone::Minutes => self.bottom.get(2..4).unwrap_or("").to_string(),
            Zone::Seconds => self.seconds.clone(),
        }
    }

    /// Whether the colon indicator is lit.
    pub fn colon(&self) -> bool {
        self.colon
    }

    /// Whether the decimal-point indicator is lit.
    pub fn decimal(&self) -> bool {
        self.decimal
    }

    /// Write into a half-zone of the main row, padding it out first if the
    /// current contents are shorter than the slice.
    fn overwrite_bottom(&mut self, range: std::ops::Range<usize>, text: &str) {
        while self.bottom.len() < range.end {
            self.bottom.push(' ');
        }
        self.bottom.replace_range(range, text);
    }

    /// Render the current frame as one line of text, inserting the active
    /// indicator between the digit groups the way the physical LCD shows it.
    pub fn render_line(&self) -> String {
        let mut main = self.bottom.clone();

        let indicator = if self.decimal {
            Some('.')
        } else if self.colon {
            Some(':')
        } else {
            None
        };
        if let Some(ch) = indicator {
            let len = main.len();
            if len >= 4 {
                // Indicator sits four digits from the right, but never
                // before the first digit pair
                let pos = len.saturating_sub(4).max(2);
                main.insert(pos, ch);
            }
        }

        format!("{:<5} {:>8} {:>2}", self.top, main, self.seconds)
    }
}

impl DisplaySink for TerminalDisplay {
    fn lcd_type(&self) -> LcdType {
        self.lcd_type
    }

    fn display_text(&mut self, zone: Zone, text: &str) {
        match zone {
            Zone::Top => self.top = text.to_string(),
            Zone::Bottom => self.bottom = text.to_string(),
            Zone::Hours => self.overwrite_bottom(0..2, text),
            Zone::Minutes => self.overwrite_bottom(2..4, text),
            Zone::Seconds => self.seconds = text.to_string(),
        }
    }

    fn set_colon(&mut self) {
        self.colon = true;
    }

    fn clear_colon(&mut self) {
        self.colon = false;
    }

    fn set_decimal(&mut self) {
        // Only the custom personality has a decimal point
        if self.lcd_type == LcdType::Custom {
            self.decimal = true;
        }
    }

    fn clear_decimal(&mut self) {
        self.decimal = false;
    }
}

/// Host implementation composing a clock, a terminal display, and a record
/// store, with the scheduling and button state the simulator's input loop
/// maintains.
pub struct SimHost<S: RecordStore> {
    /// Time source; boxed so the simulator can pin it with `--now`.
    pub clock: Box<dyn Clock>,
    /// Zone-buffered display.
    pub display: TerminalDisplay,
    /// Backing record store.
    pub store: S,
    /// Whether the alarm button is currently held (set by the input loop).
    pub alarm_down: bool,
    tick_hz: u8,
    led_lit: bool,
    sleep_animation: Option<u32>,
}

impl<S: RecordStore> SimHost<S> {
    pub fn new(clock: Box<dyn Clock>, display: TerminalDisplay, store: S) -> Self {
        SimHost {
            clock,
            display,
            store,
            alarm_down: false,
            tick_hz: 1,
            led_lit: false,
            sleep_animation: None,
        }
    }

    /// Most recently requested tick rate.
    pub fn tick_hz(&self) -> u8 {
        self.tick_hz
    }

    /// Whether the backlight LED is lit.
    pub fn led_lit(&self) -> bool {
        self.led_lit
    }
}

impl<S: RecordStore> Clock for SimHost<S> {
    fn now(&self) -> CalendarDateTime {
        self.clock.now()
    }

    fn second(&self) -> u8 {
        self.clock.second()
    }
}

impl<S: RecordStore> DisplaySink for SimHost<S> {
    fn lcd_type(&self) -> LcdType {
        self.display.lcd_type()
    }

    fn display_text(&mut self, zone: Zone, text: &str) {
        self.display.display_text(zone, text);
    }

    fn set_colon(&mut self) {
        self.display.set_colon();
    }

    fn clear_colon(&mut self) {
        self.display.clear_colon();
    }

    fn set_decimal(&mut self) {
        self.display.set_decimal();
    }

    fn clear_decimal(&mut self) {
        self.display.clear_decimal();
    }
}

impl<S: RecordStore> HostControl for SimHost<S> {
    fn request_tick_frequency(&mut self, hz: u8) {
        if self.tick_hz != hz {
            debug!("tick frequency -> {} Hz", hz);
        }
        self.tick_hz = hz;
    }

    fn alarm_button_is_down(&self) -> bool {
        self.alarm_down
    }

    fn illuminate_led(&mut self) {
        self.led_lit = true;
    }

    fn start_sleep_animation(&mut self, period_ms: u32) {
        self.sleep_animation = Some(period_ms);
    }

    fn stop_sleep_animation(&mut self) {
        self.sleep_animation = None;
    }

    fn sleep_animation_running(&self) -> bool {
        self.sleep_animation.is_some()
    }
}

impl<S: RecordStore> RecordStore for SimHost<S> {
    fn exists(&self, name: &str) -> bool {
        self.store.exists(name)
    }

    fn read(&self, name: &str, buf: &mut [u8]) -> bool {
        self.store.read(name, buf)
    }

    fn write(&mut self, name: &str, data: &[u8]) {
        self.store.write(name, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_indicator_splits_four_digit_values() {
        let mut display = TerminalDisplay::new(LcdType::Classic);
        display.display_text(Zone::Bottom, "0930");
        display.set_colon();
        assert!(display.render_line().contains("09:30"));
    }

    #[test]
    fn colon_indicator_splits_six_digit_values() {
        let mut display = TerminalDisplay::new(LcdType::Classic);
        display.display_text(Zone::Bottom, "012345");
        display.set_colon();
        assert!(display.render_line().contains("01:2345"));
    }

    #[test]
    fn decimal_indicator_handles_the_full_token() {
        let mut display = TerminalDisplay::new(LcdType::Custom);
        display.display_text(Zone::Bottom, "1000000");
        display.set_decimal();
        assert!(display.render_line().contains("100.0000"));
    }

    #[test]
    fn decimal_is_a_no_op_on_classic() {
        let mut display = TerminalDisplay::new(LcdType::Classic);
        display.set_decimal();
        assert!(!display.decimal());
    }

    #[test]
    fn half_zones_overlay_the_main_row() {
        let mut display = TerminalDisplay::new(LcdType::Custom);
        display.display_text(Zone::Bottom, "0930");
        display.display_text(Zone::Hours, "  ");
        assert_eq!(display.zone(Zone::Bottom), "  30");

        display.display_text(Zone::Bottom, "0930");
        display.display_text(Zone::Minutes, "  ");
        assert_eq!(display.zone(Zone::Bottom), "09  ");
    }

    #[test]
    fn half_zone_writes_pad_an_empty_row() {
        let mut display = TerminalDisplay::new(LcdType::Custom);
        display.display_text(Zone::Minutes, "xy");
        assert_eq!(display.zone(Zone::Bottom), "  xy");
    }

    #[test]
    fn fallback_text_selection_follows_personality() {
        let mut custom = TerminalDisplay::new(LcdType::Custom);
        custom.display_text_with_fallback(Zone::Top, "Month", "MO");
        assert_eq!(custom.zone(Zone::Top), "Month");

        let mut classic = TerminalDisplay::new(LcdType::Classic);
        classic.display_text_with_fallback(Zone::Top, "Month", "MO");
        assert_eq!(classic.zone(Zone::Top), "MO");
    }

    #[test]
    fn system_clock_yields_plausible_fields() {
        let clock = SystemClock;
        let now = clock.now();
        assert!((1..=12).contains(&now.month));
        assert!((1..=31).contains(&now.day));
        assert!(now.hour < 24);
        assert!(now.minute < 60);
        assert!(clock.second() < 60);
    }
}
