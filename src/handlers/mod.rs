pub mod diet_logs;
pub mod pets;
pub mod reminders;
pub mod users;
pub mod vaccine_logs;
pub mod weight_logs;

use crate::error::PawtrackError;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

/// The server's local calendar date, read fresh per request. All the
/// "overdue"/"due soon"/"upcoming" windows are anchored here.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` payload or query field, rejecting anything else
/// with a field-specific validation error.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, PawtrackError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PawtrackError::validation(format!("{field} must be YYYY-MM-DD")))
}

/// Parse an `HH:MM` payload field.
pub(crate) fn parse_time(field: &str, value: &str) -> Result<NaiveTime, PawtrackError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| PawtrackError::validation(format!("{field} must be HH:MM")))
}

/// Treat empty strings like absent fields, matching the truthiness checks
/// of the service this replaces.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// For partial updates: distinguishes an absent field (`None`) from an
/// explicit `null` (`Some(None)`), so `null` can clear a column.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_time};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(
            parse_date("date", "2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_other_orders() {
        let err = parse_date("date", "15-01-2024").unwrap_err();
        assert_eq!(err.to_string(), "date must be YYYY-MM-DD");
        assert!(parse_date("start_date", "2024/01/15").is_err());
        assert!(parse_date("date", "not a date").is_err());
    }

    #[test]
    fn parse_time_accepts_hh_mm_only() {
        assert_eq!(
            parse_time("feeding_time", "08:30").unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert!(parse_time("feeding_time", "8 o'clock").is_err());
    }
}
