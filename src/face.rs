//! Settings navigator and event dispatch for the progress face.
//!
//! One [`ProgressFace`] per watch-face instance. The host delivers events one
//! at a time to [`ProgressFace::on_event`]; depending on the current page the
//! face either refreshes the progress display or edits the configured range.
//!
//! The page cycle is `Display -> EditStart -> EditEnd -> Display`: a long
//! press on the alarm button enters settings, the light button advances
//! through the five fields of each endpoint (year, month, day, hour, minute),
//! and completing the end-date fields persists the range and returns to the
//! progress display. Holding the alarm button enters quick-cycle repeat,
//! which raises the tick rate and applies one increment per tick for as long
//! as the button stays down.

use crate::calendar::{self, days_in_month};
use crate::host::{Event, Host, LcdType, Zone};
use crate::progress;
use crate::store;
use crate::DateRange;
use log::debug;
use std::cmp::Ordering;

/// Tick rate while showing progress.
const DISPLAY_TICK_HZ: u8 = 1;
/// Tick rate while editing.
const EDIT_TICK_HZ: u8 = 4;
/// Tick rate during quick-cycle repeat.
const QUICK_CYCLE_TICK_HZ: u8 = 8;

/// Editable years span the host's current year plus or minus this window.
const YEAR_WINDOW: u16 = 100;

/// Sleep-animation period in display mode.
const SLEEP_ANIMATION_MS: u32 = 1000;

/// Which page the face is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Showing the elapsed percentage.
    Display,
    /// Editing the start of the range.
    EditStart,
    /// Editing the end of the range.
    EditEnd,
}

/// Which field of the active endpoint is being edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Year => Field::Month,
            Field::Month => Field::Day,
            Field::Day => Field::Hour,
            Field::Hour => Field::Minute,
            Field::Minute => Field::Year,
        }
    }

    /// Top-zone title and its reduced-character-set form.
    fn title(self) -> (&'static str, &'static str) {
        match self {
            Field::Year => ("Year ", "YR"),
            Field::Month => ("Month", "MO"),
            Field::Day => ("Day  ", "DA"),
            Field::Hour => ("Hour ", "HR"),
            Field::Minute => ("Minut", "M1"),
        }
    }
}

/// Full mutable state of one face instance.
///
/// Created once at initialization and owned by the host for the lifetime of
/// the instance. The instance index keys this instance's persisted record and
/// is assigned by the host at construction.
pub struct ProgressFace {
    page: Page,
    field: Field,
    instance_index: u8,
    dates: DateRange,
    dates_changed: bool,
    quick_cycle: bool,
}

impl ProgressFace {
    /// Initialize a face instance, loading its stored range.
    ///
    /// On the first ever run (no stored record) the face opens directly into
    /// start-date settings; otherwise it opens into the progress display.
    pub fn new<H: Host>(instance_index: u8, host: &H) -> Self {
        let (dates, found) = store::load(host, host, instance_index);

        let page = if found {
            Page::Display
        } else {
            debug!("instance {}: first run, opening settings", instance_index);
            Page::EditStart
        };

        ProgressFace {
            page,
            field: Field::Year,
            instance_index,
            dates,
            dates_changed: false,
            quick_cycle: false,
        }
    }

    /// Current page (for hosts that adapt chrome to the mode).
    pub fn page(&self) -> Page {
        self.page
    }

    /// Field currently under the edit cursor.
    pub fn field(&self) -> Field {
        self.field
    }

    /// The configured range as currently edited.
    pub fn dates(&self) -> DateRange {
        self.dates
    }

    /// Whether quick-cycle repeat is active.
    pub fn quick_cycle(&self) -> bool {
        self.quick_cycle
    }

    /// Handle one host event. Returns `true` when the face has fully settled
    /// and the host may enter low-power mode (always the case here; the face
    /// performs no deferred work).
    pub fn on_event<H: Host>(&mut self, event: Event, host: &mut H) -> bool {
        match event {
            Event::Activate => self.activate(host),
            Event::Resign => self.resign(host),
            Event::Tick { subsecond } => self.tick(subsecond, false, host),
            Event::LowPowerTick => self.tick(0, true, host),
            Event::LightButtonDown => {
                // Only illuminate while showing progress; while editing the
                // light button is the field-advance control
                if self.page == Page::Display {
                    host.illuminate_led();
                }
            }
            Event::LightButtonUp => self.advance_field(host),
            Event::AlarmButtonUp => {
                if matches!(self.page, Page::EditStart | Page::EditEnd) {
                    self.abort_quick_cycle(host);
                    self.increment_active_field(host);
                }
            }
            Event::AlarmLongPress => match self.page {
                Page::Display => self.enter_settings(host),
                Page::EditStart | Page::EditEnd => {
                    self.quick_cycle = true;
                    host.request_tick_frequency(QUICK_CYCLE_TICK_HZ);
                    debug!("quick cycle started");
                }
            },
            Event::AlarmLongRelease | Event::Timeout => self.abort_quick_cycle(host),
        }
        true
    }

    fn activate<H: Host>(&mut self, host: &mut H) {
        if self.page == Page::Display {
            host.request_tick_frequency(DISPLAY_TICK_HZ);
            let now = host.now();
            progress::render(host, &self.dates, now);
        } else {
            host.request_tick_frequency(EDIT_TICK_HZ);
        }
    }

    fn resign<H: Host>(&mut self, host: &mut H) {
        // Deactivation is the second persistence point; the first is the
        // completed edit cycle
        if self.dates_changed {
            store::persist(host, self.instance_index, &self.dates);
            self.dates_changed = false;
        }
    }

    fn tick<H: Host>(&mut self, subsecond: u8, low_power: bool, host: &mut H) {
        if self.quick_cycle {
            if host.alarm_button_is_down() {
                self.increment_active_field(host);
            } else {
                self.abort_quick_cycle(host);
            }
        }

        match self.page {
            Page::EditStart | Page::EditEnd => self.render_settings(subsecond, host),
            Page::Display => {
                // Refresh at the top of each minute, or on every low-power tick
                if low_power || host.second() == 0 {
                    let now = host.now();
                    progress::render(host, &self.dates, now);
                }

                if host.lcd_type() == LcdType::Classic {
                    // The corner zone carries the sleep-mode indicator instead
                    host.display_text(Zone::Seconds, "  ");
                }
                if !host.sleep_animation_running() {
                    host.start_sleep_animation(SLEEP_ANIMATION_MS);
                }
            }
        }
    }

    fn enter_settings<H: Host>(&mut self, host: &mut H) {
        debug!("instance {}: entering settings", self.instance_index);
        self.page = Page::EditStart;
        self.field = Field::Year;

        host.clear_decimal();
        host.clear_colon();
        host.request_tick_frequency(EDIT_TICK_HZ);
    }

    /// Advance the field cursor; wrapping past Minute moves to the next page.
    fn advance_field<H: Host>(&mut self, host: &mut H) {
        if self.page == Page::Display {
            return;
        }

        self.field = self.field.next();
        if self.field != Field::Year {
            return;
        }

        // Completed all five fields of the current endpoint
        self.abort_quick_cycle(host);
        if self.page == Page::EditStart {
            debug!("start date set, editing end date");
            self.page = Page::EditEnd;
            self.clamp_end_to_start();
        } else {
            debug!("end date set, returning to display");
            self.page = Page::Display;
            store::persist(host, self.instance_index, &self.dates);
            self.dates_changed = false;

            host.clear_decimal();
            host.clear_colon();
            let now = host.now();
            progress::render(host, &self.dates, now);
            host.request_tick_frequency(DISPLAY_TICK_HZ);
        }
    }

    /// Apply one increment to the field under the cursor, with wraparound.
    fn increment_active_field<H: Host>(&mut self, host: &mut H) {
        let current_year = host.now().year;

        self.dates_changed = true;
        let dt = match self.page {
            Page::EditEnd => &mut self.dates.end,
            _ => &mut self.dates.start,
        };

        match self.field {
            Field::Year => {
                // Keep the editable range within a century of today
                dt.year += 1;
                if dt.year > current_year + YEAR_WINDOW {
                    dt.year = current_year.saturating_sub(YEAR_WINDOW);
                }
            }
            Field::Month => dt.month = dt.month % 12 + 1,
            Field::Day => dt.day = dt.day % days_in_month(dt.month, dt.year) + 1,
            Field::Hour => dt.hour = (dt.hour + 1) % 24,
            Field::Minute => dt.minute = (dt.minute + 1) % 60,
        }

        // A month or day edit can retroactively move the end before the
        // start, so the check runs after every end-date edit
        if self.page == Page::EditEnd {
            self.clamp_end_to_start();
        }
    }

    /// Enforce the end-not-before-start invariant by correction.
    fn clamp_end_to_start(&mut self) {
        if calendar::compare(self.dates.end, self.dates.start) == Ordering::Less {
            debug!("end date fell before start, snapping end to start");
            self.dates.end = self.dates.start;
            self.dates_changed = true;
        }
    }

    fn abort_quick_cycle<H: Host>(&mut self, host: &mut H) {
        if self.quick_cycle {
            self.quick_cycle = false;
            host.request_tick_frequency(EDIT_TICK_HZ);
            debug!("quick cycle aborted");
        }
    }

    fn render_settings<H: Host>(&mut self, subsecond: u8, host: &mut H) {
        let (title, reduced) = self.field.title();
        host.display_text_with_fallback(Zone::Top, title, reduced);

        // Corner zone shows which endpoint is being edited
        host.display_text(
            Zone::Seconds,
            if self.page == Page::EditStart {
                "St"
            } else {
                "En"
            },
        );

        self.render_active_value(subsecond, host);
    }

    fn render_active_value<H: Host>(&mut self, subsecond: u8, host: &mut H) {
        let dt = match self.page {
            Page::EditEnd => self.dates.end,
            _ => self.dates.start,
        };

        let text = match self.field {
            Field::Year => {
                host.clear_colon();
                format!("{:4}", dt.year)
            }
            Field::Month | Field::Day => {
                host.clear_colon();
                format!("{:02}{:02}", dt.month, dt.day)
            }
            Field::Hour | Field::Minute => {
                host.set_colon();
                format!("{:02}{:02}", dt.hour, dt.minute)
            }
        };
        host.display_text(Zone::Bottom, &text);

        // Blink the edited field on odd subseconds; steady during quick-cycle
        // so the value stays readable while it spins
        if subsecond % 2 == 1 && !self.quick_cycle {
            match self.field {
                Field::Year => host.display_text(Zone::Bottom, "    "),
                Field::Month | Field::Hour => host.display_text(Zone::Hours, "  "),
                Field::Day | Field::Minute => host.display_text(Zone::Minutes, "  "),
            }
        }
    }
}
