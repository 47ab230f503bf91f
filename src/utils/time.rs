use std::sync::{Arc, Mutex};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Source of "now" for validation rules and date-window filters.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock; every read returns the last value set.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock mutex poisoned");
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// Half-open `[start of year, start of next year)` window containing `now`.
pub fn year_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (year_start(now.year()), year_start(now.year() + 1))
}

pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

fn year_start(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Accepts RFC 3339 or the `YYYY-MM-DDTHH:MM[:SS]` shape sent by
/// `<input type="datetime-local">`, interpreted as UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn format_datetime_local(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn year_window_covers_whole_calendar_year() {
        let (start, end) = year_bounds(at(2026, 10, 16, 12));
        assert_eq!(start, at(2026, 1, 1, 0));
        assert_eq!(end, at(2027, 1, 1, 0));
    }

    #[test]
    fn month_start_truncates_to_midnight_of_day_one() {
        assert_eq!(month_start(at(2026, 10, 16, 12)), at(2026, 10, 1, 0));
        assert_eq!(month_start(at(2026, 1, 1, 0)), at(2026, 1, 1, 0));
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(at(2026, 3, 1, 9));
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), at(2026, 3, 1, 9) + Duration::minutes(5));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn parses_form_and_rfc3339_datetimes() {
        assert_eq!(parse_datetime("2026-02-03T10:30"), Some(at(2026, 2, 3, 10) + Duration::minutes(30)));
        assert_eq!(parse_datetime("2026-02-03T10:00:00Z"), Some(at(2026, 2, 3, 10)));
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(format_datetime_local(at(2026, 2, 3, 10)), "2026-02-03T10:00");
    }
}
