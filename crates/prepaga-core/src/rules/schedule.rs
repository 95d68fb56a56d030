//! Scheduled deletion ("baja programada") and scheduled activation checks.
//!
//! The deletion check runs after the schedule request has already returned:
//! it only decides whether the result dialog shows success or an error. It
//! compares calendar dates, never times, so any time on today's date is
//! invalid.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

/// Schedule validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Elegí una fecha y hora.")]
    Missing,

    #[error("La fecha/hora debe ser al menos 1 minuto en el futuro.")]
    TooSoon,
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Minimum lead time for a scheduled activation.
pub const MIN_ACTIVATION_LEAD_SECS: i64 = 60;

/// Calendar date encoded in the first 10 characters of an ISO string.
pub fn scheduled_local_date(iso: &str) -> Option<NaiveDate> {
    let head = iso.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// A chosen date is valid only when strictly after `today`.
pub fn is_scheduled_date_valid(iso: &str, today: NaiveDate) -> bool {
    scheduled_local_date(iso).is_some_and(|picked| picked > today)
}

/// [`is_scheduled_date_valid`] against the local calendar.
pub fn is_scheduled_date_valid_now(iso: &str) -> bool {
    is_scheduled_date_valid(iso, Local::now().date_naive())
}

/// Local midnight of `date` as an RFC 3339 UTC timestamp, the value sent as
/// `scheduledDate`.
pub fn scheduled_date_iso(date: NaiveDate) -> String {
    let midnight = date.and_time(NaiveTime::default());
    let utc = Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));
    utc.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `d/m/yyyy`, without zero padding.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// What the result dialog shows after a deletion was scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled {
        name: Option<String>,
        date: NaiveDate,
    },
    InvalidDate,
}

impl ScheduleOutcome {
    /// Judge a date read back from the `scheduledDate` string. East of UTC
    /// that string carries the previous day, so prefer [`Self::for_date`]
    /// when the picked date is at hand.
    pub fn evaluate(name: Option<&str>, iso: &str, today: NaiveDate) -> Self {
        match scheduled_local_date(iso) {
            Some(date) => Self::for_date(name, date, today),
            None => ScheduleOutcome::InvalidDate,
        }
    }

    /// Judge the calendar date the user picked.
    pub fn for_date(name: Option<&str>, date: NaiveDate, today: NaiveDate) -> Self {
        if date <= today {
            return ScheduleOutcome::InvalidDate;
        }
        ScheduleOutcome::Scheduled {
            name: name.filter(|n| !n.trim().is_empty()).map(str::to_string),
            date,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScheduleOutcome::InvalidDate)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScheduleOutcome::Scheduled { .. } => "Baja programada",
            ScheduleOutcome::InvalidDate => "Error al programar la baja",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ScheduleOutcome::Scheduled {
                name: Some(name),
                date,
            } => format!(
                "La baja para {} fue programada para el {}.",
                name,
                format_short_date(*date)
            ),
            ScheduleOutcome::Scheduled { name: None, date } => {
                format!("La baja fue programada para el {}.", format_short_date(*date))
            }
            ScheduleOutcome::InvalidDate => "Por favor seleccione una fecha futura.".to_string(),
        }
    }
}

/// Check a scheduled activation ("alta programada") time: it must be at
/// least one minute after `now`. Returns the instant to submit.
pub fn validate_scheduled_activation(
    at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ScheduleResult<DateTime<Utc>> {
    let at = at.ok_or(ScheduleError::Missing)?;
    if at < now + Duration::seconds(MIN_ACTIVATION_LEAD_SECS) {
        return Err(ScheduleError::TooSoon);
    }
    Ok(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_validity_boundaries() {
        let today = day(2026, 10, 19);
        assert!(is_scheduled_date_valid("2026-10-20", today));
        assert!(is_scheduled_date_valid("2026-10-20T03:00:00.000Z", today));
        // Any time on today's date is invalid
        assert!(!is_scheduled_date_valid("2026-10-19T23:59:59.000Z", today));
        assert!(!is_scheduled_date_valid("2026-10-19", today));
        assert!(!is_scheduled_date_valid("2025-01-01", today));
    }

    #[test]
    fn test_unparsable_dates_are_invalid() {
        let today = day(2026, 10, 19);
        assert!(!is_scheduled_date_valid("", today));
        assert!(!is_scheduled_date_valid("mañana", today));
        assert!(!is_scheduled_date_valid("2026-13-01", today));
        assert!(!is_scheduled_date_valid("20/10/2026", today));
    }

    #[test]
    fn test_outcome_texts() {
        let today = day(2026, 10, 19);
        let ok = ScheduleOutcome::evaluate(Some("Ana Mogno"), "2026-11-05T03:00:00.000Z", today);
        assert!(!ok.is_error());
        assert_eq!(ok.title(), "Baja programada");
        assert_eq!(
            ok.message(),
            "La baja para Ana Mogno fue programada para el 5/11/2026."
        );

        // Midnight in UTC-3 is 03:00Z the same day; in UTC+2 it is 22:00Z the
        // day before, which the string alone would judge as today.
        let picked = day(2026, 10, 20);
        assert!(ScheduleOutcome::evaluate(None, "2026-10-19T22:00:00.000Z", today).is_error());
        assert!(!ScheduleOutcome::for_date(None, picked, today).is_error());
        assert!(ScheduleOutcome::for_date(None, today, today).is_error());

        let anon = ScheduleOutcome::evaluate(None, "2026-11-05", today);
        assert_eq!(anon.message(), "La baja fue programada para el 5/11/2026.");

        let bad = ScheduleOutcome::evaluate(Some("Ana Mogno"), "2026-10-19", today);
        assert!(bad.is_error());
        assert_eq!(bad.title(), "Error al programar la baja");
        assert_eq!(bad.message(), "Por favor seleccione una fecha futura.");
    }

    #[test]
    fn test_scheduled_date_iso_round_trips_to_same_day() {
        let date = day(2026, 11, 5);
        let iso = scheduled_date_iso(date);
        let parsed = DateTime::parse_from_rfc3339(&iso).unwrap();
        assert_eq!(parsed.with_timezone(&Local).date_naive(), date);
    }

    #[test]
    fn test_scheduled_activation_lead_time() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(
            validate_scheduled_activation(None, now),
            Err(ScheduleError::Missing)
        );
        assert_eq!(
            validate_scheduled_activation(Some(now + Duration::seconds(30)), now),
            Err(ScheduleError::TooSoon)
        );
        let later = now + Duration::minutes(5);
        assert_eq!(validate_scheduled_activation(Some(later), now), Ok(later));
    }
}
