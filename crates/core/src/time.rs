//! # Time Normalization
//!
//! Every time value that enters the scheduling core passes through this module.
//! Wire values are strict `HH:MM` times and `YYYY-MM-DD` dates; stored values
//! may additionally be full timestamps written by older code paths. All of
//! them are reduced to minute resolution and anchored at the business's fixed
//! UTC offset, so comparisons behave identically at every call site.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Timelike, Utc,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BookingError, BookingResult};

/// Wire format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";
/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset used when none is configured (UTC-03:00).
pub const DEFAULT_OFFSET_SECONDS: i32 = -3 * 3600;

pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Parses an offset such as `-03:00`, `+0530`, `-03` or `Z`.
pub fn parse_offset(s: &str) -> BookingResult<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let invalid = || BookingError::InvalidTimeFormat(format!("invalid UTC offset '{s}'"));
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "00"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// A time of day with minute resolution, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Truncates seconds and sub-second precision.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.0.hour() * 60 + self.0.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_of_day(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_time_of_day(&s).map_err(serde::de::Error::custom)
    }
}

/// A half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

impl<T: Ord + Copy> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Two intervals overlap iff `s1 < e2 && e1 > s2`. Touching endpoints do not.
    pub fn overlaps(&self, other: &Interval<T>) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

impl fmt::Display for Interval<TimeOfDay> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

fn strict_two_digit_pairs(s: &str, separator: u8) -> Option<(u32, u32)> {
    let b = s.as_bytes();
    if b.len() != 5 || b[2] != separator {
        return None;
    }
    if !b[..2].iter().chain(&b[3..]).all(u8::is_ascii_digit) {
        return None;
    }
    let first = s[..2].parse().ok()?;
    let second = s[3..].parse().ok()?;
    Some((first, second))
}

/// Parses a strict `HH:MM` string (hour 00–23, minute 00–59).
pub fn parse_time_of_day(s: &str) -> BookingResult<TimeOfDay> {
    strict_two_digit_pairs(s, b':')
        .and_then(|(hour, minute)| TimeOfDay::new(hour, minute))
        .ok_or_else(|| BookingError::InvalidTimeFormat(format!("expected HH:MM, got '{s}'")))
}

/// Parses a strict `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> BookingResult<NaiveDate> {
    let b = s.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return Err(BookingError::InvalidTimeFormat(format!(
            "expected YYYY-MM-DD, got '{s}'"
        )));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| BookingError::InvalidTimeFormat(format!("invalid date '{s}': {e}")))
}

/// Anchors a time of day on a date at the given offset.
pub fn anchor(date: NaiveDate, time: TimeOfDay, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(time.as_naive());
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` time into an instant at `offset`.
pub fn parse_instant(
    date_text: &str,
    time_text: &str,
    offset: FixedOffset,
) -> BookingResult<DateTime<FixedOffset>> {
    let date = parse_date(date_text)?;
    let time = parse_time_of_day(time_text)?;
    Ok(anchor(date, time, offset))
}

fn truncate_to_minute(instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    instant
        .with_second(0)
        .and_then(|i| i.with_nanosecond(0))
        .unwrap_or(instant)
}

/// A stored time value in one of the representations found in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoredTime {
    Bare(TimeOfDay),
    Instant(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

fn classify_stored(text: &str) -> Option<StoredTime> {
    let text = text.trim();

    if let Ok(t) = parse_time_of_day(text) {
        return Some(StoredTime::Bare(t));
    }
    if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M:%S%.f") {
        return Some(StoredTime::Bare(TimeOfDay::from_naive(t)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(StoredTime::Instant(dt));
    }

    // "2025-08-20 15:00:00 -0300 -03": the trailing zone abbreviation carries
    // nothing the numeric offset doesn't.
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let with_offset = match tokens.as_slice() {
        [date, time, offset] | [date, time, offset, _] => Some(format!("{date} {time} {offset}")),
        _ => None,
    };
    if let Some(candidate) = with_offset {
        for layout in ["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M:%S%.f %:z", "%Y-%m-%d %H:%M:%S%.f %#z"] {
            if let Ok(dt) = DateTime::parse_from_str(&candidate, layout) {
                return Some(StoredTime::Instant(dt));
            }
        }
    }

    for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(StoredTime::Naive(dt));
        }
    }

    None
}

fn unrecognized(text: &str) -> BookingError {
    BookingError::InvalidTimeFormat(format!("unrecognized stored time '{text}'"))
}

/// Yields only the time-of-day component of a stored value, in `offset`.
///
/// Accepts bare times (`HH:MM`, `HH:MM:SS`) and full timestamps. Timestamps
/// carrying their own offset are converted; naive timestamps are taken to be
/// in `offset` already.
pub fn extract_time_of_day(text: &str, offset: FixedOffset) -> BookingResult<TimeOfDay> {
    match classify_stored(text).ok_or_else(|| unrecognized(text))? {
        StoredTime::Bare(t) => Ok(t),
        StoredTime::Instant(dt) => Ok(TimeOfDay::from_naive(dt.with_timezone(&offset).time())),
        StoredTime::Naive(dt) => Ok(TimeOfDay::from_naive(dt.time())),
    }
}

/// Normalizes a stored value to an instant, anchoring bare times on `date`.
pub fn normalize_stored(
    date: NaiveDate,
    text: &str,
    offset: FixedOffset,
) -> BookingResult<DateTime<FixedOffset>> {
    let instant = match classify_stored(text).ok_or_else(|| unrecognized(text))? {
        StoredTime::Bare(t) => anchor(date, t, offset),
        StoredTime::Instant(dt) => dt.with_timezone(&offset),
        StoredTime::Naive(dt) => anchor(dt.date(), TimeOfDay::from_naive(dt.time()), offset),
    };
    Ok(truncate_to_minute(instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn offset() -> FixedOffset {
        default_offset()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    #[rstest]
    #[case("00:00", 0, 0)]
    #[case("09:30", 9, 30)]
    #[case("23:59", 23, 59)]
    fn test_parse_time_of_day_accepts_strict_format(
        #[case] input: &str,
        #[case] hour: u32,
        #[case] minute: u32,
    ) {
        let t = parse_time_of_day(input).unwrap();
        assert_eq!((t.hour(), t.minute()), (hour, minute));
        assert_eq!(t.to_string(), input);
    }

    #[rstest]
    #[case("9:30")]
    #[case("09:30:00")]
    #[case("24:00")]
    #[case("12:60")]
    #[case("ab:cd")]
    #[case("0930")]
    #[case(" 09:30")]
    #[case("")]
    fn test_parse_time_of_day_rejects_malformed(#[case] input: &str) {
        assert!(matches!(
            parse_time_of_day(input),
            Err(BookingError::InvalidTimeFormat(_))
        ));
    }

    #[rstest]
    #[case("2025-8-20")]
    #[case("2025-02-30")]
    #[case("20250820")]
    #[case("2025-08-20T00:00")]
    fn test_parse_date_rejects_malformed(#[case] input: &str) {
        assert!(matches!(parse_date(input), Err(BookingError::InvalidTimeFormat(_))));
    }

    #[test]
    fn test_parse_instant_is_anchored_at_business_offset() {
        let instant = parse_instant("2025-08-20", "15:30", offset()).unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-08-20T15:30:00-03:00");
        assert_eq!(instant.naive_utc().to_string(), "2025-08-20 18:30:00");
    }

    #[test]
    fn test_parse_instant_rejects_bad_parts() {
        assert!(parse_instant("2025-08-20", "3pm", offset()).is_err());
        assert!(parse_instant("20-08-2025", "15:00", offset()).is_err());
    }

    #[rstest]
    #[case("15:04")]
    #[case("15:04:59")]
    #[case("2025-08-20T18:04:00Z")]
    #[case("2025-08-20T15:04:00-03:00")]
    #[case("2025-08-20 15:04:05 -0300 -03")]
    #[case("2025-08-20 15:04:00")]
    fn test_extract_time_of_day_tolerates_stored_formats(#[case] input: &str) {
        let t = extract_time_of_day(input, offset()).unwrap();
        assert_eq!(t.to_string(), "15:04");
    }

    #[test]
    fn test_extract_time_of_day_rejects_garbage() {
        assert!(extract_time_of_day("soon", offset()).is_err());
    }

    #[test]
    fn test_normalize_stored_anchors_bare_time_on_date() {
        let bare = normalize_stored(date(), "10:00", offset()).unwrap();
        let full = normalize_stored(date(), "2025-08-20T13:00:00Z", offset()).unwrap();
        assert_eq!(bare, full);
        assert_eq!(bare, parse_instant("2025-08-20", "10:00", offset()).unwrap());
    }

    #[test]
    fn test_normalize_stored_keeps_minute_resolution() {
        let a = normalize_stored(date(), "10:00:59", offset()).unwrap();
        let b = normalize_stored(date(), "10:00", offset()).unwrap();
        assert_eq!(a, b);
    }

    #[rstest]
    #[case("-03:00", -3 * 3600)]
    #[case("+0530", 5 * 3600 + 30 * 60)]
    #[case("-03", -3 * 3600)]
    #[case("Z", 0)]
    fn test_parse_offset(#[case] input: &str, #[case] seconds: i32) {
        assert_eq!(parse_offset(input).unwrap().local_minus_utc(), seconds);
    }

    #[test]
    fn test_parse_offset_rejects_garbage() {
        assert!(parse_offset("three hours").is_err());
        assert!(parse_offset("+25:00").is_err());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let t = |s| parse_time_of_day(s).unwrap();
        let a = Interval::new(t("09:00"), t("09:30"));
        let b = Interval::new(t("09:30"), t("10:00"));
        let c = Interval::new(t("09:15"), t("09:45"));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_time_of_day_serde_uses_wire_format() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};

        let t = TimeOfDay::new(7, 5).unwrap();
        assert_tokens(&t, &[Token::Str("07:05")]);
        assert_de_tokens_error::<TimeOfDay>(
            &[Token::Str("7:05")],
            "Invalid time format: expected HH:MM, got '7:05'",
        );
    }
}
