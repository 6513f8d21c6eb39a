use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::error::LunchError;

/// Calendar context for turning instants into calendar days.
///
/// Plans store a `NaiveDate`, so a stored day never moves when the offset
/// changes. The offset only decides which day an instant such as "now" falls
/// on, and it is always passed in explicitly so tests behave the same on any
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// The process's current local offset, captured once.
    pub fn local() -> Self {
        Self {
            offset: *Local::now().offset(),
        }
    }

    /// Parse `Z`, `+HH:MM`, `-HH:MM` or `+HHMM`.
    pub fn parse_offset(input: &str) -> Result<Self, LunchError> {
        let bad = || LunchError::config(format!("Invalid UTC offset '{input}'. Use +HH:MM or -HH:MM."));
        let s = input.trim();
        if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        let (sign, rest) = match s.chars().next() {
            Some('+') => (1, &s[1..]),
            Some('-') => (-1, &s[1..]),
            _ => return Err(bad()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| bad())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| bad())?;
        if hours > 23 || minutes > 59 {
            return Err(bad());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::with_offset)
            .ok_or_else(bad)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day an instant falls on. Drops the time of day.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// The calendar day after the one `reference` falls on.
    pub fn tomorrow(&self, reference: DateTime<Utc>) -> NaiveDate {
        let today = self.date_of(reference);
        today.succ_opt().unwrap_or(today)
    }

    /// Resolve user date input to a calendar day.
    ///
    /// Accepts `today`, `tomorrow`, `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn parse_date_input(&self, input: &str, now: DateTime<Utc>) -> Result<NaiveDate, LunchError> {
        let s = input.trim();
        match s.to_ascii_lowercase().as_str() {
            "today" => return Ok(self.date_of(now)),
            "tomorrow" => return Ok(self.tomorrow(now)),
            _ => {}
        }
        if let Ok(date) = parse_iso_date(s) {
            return Ok(date);
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(self.date_of(instant.with_timezone(&Utc)));
        }
        Err(LunchError::invalid_date(input))
    }
}

/// "Tue, Jul 16"
pub fn weekday_month_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "20240716"
pub fn yyyymmdd(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// "2024-07-16". Also the stored form of a plan date.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn berlin_summer() -> Calendar {
        Calendar::parse_offset("+02:00").unwrap()
    }

    #[test]
    fn test_date_of_strips_time() {
        let cal = berlin_summer();
        // 2024-07-16 15:30 local
        assert_eq!(cal.date_of(at("2024-07-16T13:30:00Z")), ymd(2024, 7, 16));
        // 00:30 local, still the previous day in UTC
        assert_eq!(cal.date_of(at("2024-07-15T22:30:00Z")), ymd(2024, 7, 16));
        assert_eq!(Calendar::utc().date_of(at("2024-07-15T22:30:00Z")), ymd(2024, 7, 15));
    }

    #[test]
    fn test_same_day_instants_share_a_date() {
        let cals = [
            Calendar::utc(),
            berlin_summer(),
            Calendar::parse_offset("-09:30").unwrap(),
            Calendar::parse_offset("+14:00").unwrap(),
        ];
        for cal in cals {
            let morning = cal.date_of(at("2024-02-29T08:00:00Z"));
            let later = at("2024-02-29T08:00:00Z") + chrono::Duration::hours(1);
            assert_eq!(cal.date_of(later), morning, "{:?}", cal.offset());
        }
    }

    #[test]
    fn test_tomorrow_ignores_time_of_day() {
        let cal = berlin_summer();
        for s in [
            "2024-07-15T22:00:00Z", // local midnight
            "2024-07-16T06:00:00Z",
            "2024-07-16T21:59:59Z", // one second before local midnight
        ] {
            assert_eq!(cal.tomorrow(at(s)), ymd(2024, 7, 17), "{s}");
        }
    }

    #[test]
    fn test_tomorrow_crosses_month_and_year() {
        let cal = Calendar::utc();
        assert_eq!(cal.tomorrow(at("2024-02-29T10:00:00Z")), ymd(2024, 3, 1));
        assert_eq!(cal.tomorrow(at("2024-12-31T23:00:00Z")), ymd(2025, 1, 1));
    }

    #[test]
    fn test_display_formats() {
        let d = ymd(2024, 7, 16);
        assert_eq!(weekday_month_day(d), "Tue, Jul 16");
        assert_eq!(yyyymmdd(d), "20240716");
        assert_eq!(iso_date(d), "2024-07-16");
        assert_eq!(parse_iso_date(&iso_date(d)).unwrap(), d);
    }

    #[test]
    fn test_parse_date_input() {
        let cal = Calendar::utc();
        let now = at("2024-07-16T13:30:00Z");
        assert_eq!(cal.parse_date_input("today", now).unwrap(), ymd(2024, 7, 16));
        assert_eq!(cal.parse_date_input("Tomorrow", now).unwrap(), ymd(2024, 7, 17));
        assert_eq!(cal.parse_date_input("2024-08-01", now).unwrap(), ymd(2024, 8, 1));
        assert_eq!(
            cal.parse_date_input("2024-08-01T18:45:00+00:00", now).unwrap(),
            ymd(2024, 8, 1)
        );
        assert!(cal.parse_date_input("next week", now).is_err());
    }

    #[test]
    fn test_explicit_date_does_not_depend_on_offset() {
        let now = at("2024-01-10T12:00:00Z");
        let winter = Calendar::parse_offset("+01:00").unwrap();
        let summer = berlin_summer();
        assert_eq!(
            winter.parse_date_input("2030-07-16", now).unwrap(),
            summer.parse_date_input("2030-07-16", now).unwrap()
        );
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(Calendar::parse_offset("Z").unwrap().offset().local_minus_utc(), 0);
        assert_eq!(Calendar::parse_offset("+05:30").unwrap().offset().local_minus_utc(), 19800);
        assert_eq!(Calendar::parse_offset("-0800").unwrap().offset().local_minus_utc(), -28800);
        assert!(Calendar::parse_offset("0800").is_err());
        assert!(Calendar::parse_offset("+25:00").is_err());
    }
}
