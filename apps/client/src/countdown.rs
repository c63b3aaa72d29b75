//! Countdown to the next 1 January.

use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone};

/// Whole days, hours, minutes and seconds left before the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub const ZERO: TimeLeft = TimeLeft {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Splits the time from `now` to `target`, rounding down to whole
    /// seconds. A target in the past gives [`TimeLeft::ZERO`].
    pub fn between<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> Self {
        let total = target.clone().signed_duration_since(now).num_seconds();
        if total <= 0 {
            return Self::ZERO;
        }

        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} Days / {:02} Hours / {:02} Minutes / {:02} Seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Countdown to midnight on 1 January of a given year.
#[derive(Debug, Clone)]
pub struct Countdown<Tz: TimeZone> {
    year: i32,
    target: DateTime<Tz>,
}

impl Countdown<Local> {
    /// Counts down in local time, to `target_year` or else the next year.
    pub fn local(target_year: Option<i32>) -> Option<Self> {
        Self::starting_at(&Local::now(), target_year)
    }
}

impl<Tz: TimeZone> Countdown<Tz> {
    /// Builds the countdown as seen at `now`.
    ///
    /// Returns `None` if midnight on 1 January does not exist in the zone.
    pub fn starting_at(now: &DateTime<Tz>, target_year: Option<i32>) -> Option<Self> {
        let year = target_year.unwrap_or(now.year() + 1);
        let target = now
            .timezone()
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .earliest()?;
        Some(Self { year, target })
    }

    /// The year being counted down to.
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn target(&self) -> &DateTime<Tz> {
        &self.target
    }

    pub fn time_left(&self, now: &DateTime<Tz>) -> TimeLeft {
        TimeLeft::between(now, &self.target)
    }

    /// True once the target has passed, including targets already in the
    /// past when the countdown started.
    pub fn is_reached(&self, now: &DateTime<Tz>) -> bool {
        self.time_left(now).is_zero()
    }
}
