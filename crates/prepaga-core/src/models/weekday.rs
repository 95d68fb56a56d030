//! Canonical weekday enumeration.
//!
//! Screens historically mixed numeric days (0–6 and 1–6), short labels
//! (`"Lun"`..`"Sáb"`) and full names (`"Lunes"`..`"Domingo"`). Everything
//! inside the crate uses [`Weekday`]; conversions happen at the edges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::text::fold;

/// Weekday parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeekdayError {
    #[error("Unknown weekday: {0}")]
    Unknown(String),

    #[error("Weekday number out of range: {0}")]
    OutOfRange(i64),
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Days offered by the schedule forms (no Sunday).
    pub const WORKWEEK: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Number with Monday = 1 .. Sunday = 7.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// From Monday = 1 .. Sunday = 7.
    pub fn from_number(n: i64) -> Result<Self, WeekdayError> {
        match n {
            1..=7 => Ok(Self::ALL[(n - 1) as usize]),
            _ => Err(WeekdayError::OutOfRange(n)),
        }
    }

    /// Backend day number: either convention, so `0` and `7` are both Sunday.
    pub fn from_wire_number(n: i64) -> Result<Self, WeekdayError> {
        match n {
            0 => Ok(Weekday::Sunday),
            _ => Self::from_number(n),
        }
    }

    /// From the JavaScript-style index with Sunday = 0 .. Saturday = 6.
    pub fn from_sunday_index(n: i64) -> Result<Self, WeekdayError> {
        match n {
            0 => Ok(Weekday::Sunday),
            1..=6 => Ok(Self::ALL[(n - 1) as usize]),
            _ => Err(WeekdayError::OutOfRange(n)),
        }
    }

    /// Short label as shown in day pickers.
    pub fn short_label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lun",
            Weekday::Tuesday => "Mar",
            Weekday::Wednesday => "Mié",
            Weekday::Thursday => "Jue",
            Weekday::Friday => "Vie",
            Weekday::Saturday => "Sáb",
            Weekday::Sunday => "Dom",
        }
    }

    /// Full display name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }

    /// Full name without accents, as the provider endpoints spell it.
    pub fn wire_name(self) -> &'static str {
        match self {
            Weekday::Wednesday => "Miercoles",
            Weekday::Saturday => "Sabado",
            other => other.name(),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = WeekdayError;

    /// Accepts short labels, full names and numbers (1 = Monday), with or
    /// without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        if let Ok(n) = folded.parse::<i64>() {
            return Self::from_wire_number(n);
        }
        Self::ALL
            .into_iter()
            .find(|d| fold(d.short_label()) == folded || fold(d.name()) == folded)
            .ok_or_else(|| WeekdayError::Unknown(s.to_string()))
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Weekday::from_wire_number(n).map_err(serde::de::Error::custom),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Render a day set for tables: exactly Monday–Friday collapses to
/// `"Lun - Vie"`, anything else is the short labels joined by commas.
pub fn format_days(days: &[Weekday]) -> String {
    let weekdays = &Weekday::ALL[..5];
    if days.len() == 5 && weekdays.iter().all(|d| days.contains(d)) {
        return "Lun - Vie".to_string();
    }
    days.iter()
        .map(|d| d.short_label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Toggle a day in a selection, keeping insertion order.
pub fn toggle_day(days: &mut Vec<Weekday>, day: Weekday) {
    if let Some(pos) = days.iter().position(|d| *d == day) {
        days.remove(pos);
    } else {
        days.push(day);
    }
}
