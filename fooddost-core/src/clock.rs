//! Wall-clock context for day-part-aware recommendations.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use std::fmt;

/// Offset for Indian Standard Time (UTC+5:30). IST has no daylight saving,
/// so a fixed offset is exact year-round.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Snapshot of the Mumbai wall-clock, taken once per turn and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeContext {
    /// Hour on a 12-hour clock, 1-12, no leading zero.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// "AM" or "PM".
    pub meridiem: &'static str,
    /// Full weekday name, e.g. "Saturday".
    pub weekday: String,
}

impl TimeContext {
    /// Capture the current time in Mumbai.
    pub fn now() -> Self {
        Self::for_instant(Utc::now())
    }

    /// Build a context for a specific instant. Tests use this for a fixed clock.
    pub fn for_instant(instant: DateTime<Utc>) -> Self {
        let ist = FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is in range");
        let local = instant.with_timezone(&ist);
        let (is_pm, hour) = local.hour12();

        Self {
            hour,
            minute: local.minute(),
            meridiem: if is_pm { "PM" } else { "AM" },
            weekday: local.format("%A").to_string(),
        }
    }
}

/// Renders the way the recommendation prompt embeds it,
/// e.g. "7:45 PM on a Saturday".
impl fmt::Display for TimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02} {} on a {}",
            self.hour, self.minute, self.meridiem, self.weekday
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_evening_in_ist() {
        // 14:15 UTC on a Saturday is 19:45 IST
        let instant = Utc.with_ymd_and_hms(2025, 6, 14, 14, 15, 0).unwrap();
        let time = TimeContext::for_instant(instant);

        assert_eq!(time.to_string(), "7:45 PM on a Saturday");
    }

    #[test]
    fn test_morning_has_no_leading_zero() {
        // 03:35 UTC on a Monday is 09:05 IST
        let instant = Utc.with_ymd_and_hms(2025, 6, 16, 3, 35, 0).unwrap();
        let time = TimeContext::for_instant(instant);

        assert_eq!(time.hour, 9);
        assert_eq!(time.to_string(), "9:05 AM on a Monday");
    }

    #[test]
    fn test_midnight_is_twelve() {
        // 18:30 UTC is 00:00 IST the next day (Wednesday)
        let instant = Utc.with_ymd_and_hms(2025, 6, 17, 18, 30, 0).unwrap();
        let time = TimeContext::for_instant(instant);

        assert_eq!(time.hour, 12);
        assert_eq!(time.meridiem, "AM");
        assert_eq!(time.weekday, "Wednesday");
    }

    #[test]
    fn test_noon_is_twelve_pm() {
        // 06:30 UTC is 12:00 IST
        let instant = Utc.with_ymd_and_hms(2025, 6, 14, 6, 30, 0).unwrap();
        let time = TimeContext::for_instant(instant);

        assert_eq!(time.hour, 12);
        assert_eq!(time.meridiem, "PM");
    }
}
