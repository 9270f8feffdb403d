//! Wall-clock source and display formatting for show times

use chrono::{DateTime, Utc};

/// Display layout for show times on detail pages, e.g. `Tue 05, 21, 2019 9:30PM`.
pub const DISPLAY_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";

/// Source of "now" for upcoming/past classification
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn format_display(ts: DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_format() {
        let ts = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(format_display(ts), "Tue 05, 21, 2019 9:30PM");

        let morning = Utc.with_ymd_and_hms(2035, 4, 1, 9, 5, 0).unwrap();
        assert_eq!(format_display(morning), "Sun 04, 01, 2035 9:05AM");
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let ts = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock(ts);
        assert_eq!(clock.now(), ts);
        assert_eq!(clock.now(), clock.now());
    }
}
