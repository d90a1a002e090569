//! Date and time display utilities.

use std::fmt;

use jiff::{
    civil::Date,
    tz::TimeZone,
    Timestamp, Zoned,
};

/// A wrapper around `Timestamp` that formats it in the system timezone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A calendar date with its weekday, e.g. `Sat 2024-06-01`.
pub struct DayDate<'a>(pub &'a Date);

impl fmt::Display for DayDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d"))
    }
}

/// Today's date in the system timezone.
pub fn today() -> Date {
    Zoned::now().date()
}
