//! Provider agenda entries.

use serde::{Deserialize, Serialize};

use super::provider::TimeBlock;
use super::weekday::{format_days, Weekday};

/// Separator between time ranges in `horario`.
pub const RANGE_SEPARATOR: &str = " / ";

/// Separator between start and end inside one range.
pub const TIME_SEPARATOR: &str = " - ";

/// Default appointment length in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// A provider's agenda: where, which days and which hours they attend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgendaEntry {
    pub id: String,
    /// Provider display name
    pub prestador: String,
    /// Specialty display name
    pub especialidad: String,
    pub lugar: String,
    pub dias: Vec<Weekday>,
    /// `"08:00 - 12:00 / 14:00 - 18:00"`
    pub horario: String,
    /// Appointment length in minutes
    pub duracion: u32,
}

/// One `desde - hasta` segment of an agenda's hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl AgendaEntry {
    /// Parse `horario` into its ranges. Segments without a dash become a
    /// range with an empty end.
    pub fn time_ranges(&self) -> Vec<TimeRange> {
        self.horario
            .split(RANGE_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|segment| match segment.split_once(TIME_SEPARATOR.trim()) {
                Some((from, to)) => TimeRange {
                    from: from.trim().to_string(),
                    to: to.trim().to_string(),
                },
                None => TimeRange {
                    from: segment.to_string(),
                    to: String::new(),
                },
            })
            .collect()
    }

    /// Days rendered for the agenda table.
    pub fn days_label(&self) -> String {
        format_days(&self.dias)
    }

    /// Expand the entry back into blocks, one per time range, each carrying
    /// the full day set.
    pub fn to_blocks(&self) -> Vec<TimeBlock> {
        let ranges = self.time_ranges();
        if ranges.is_empty() {
            return vec![TimeBlock::new(self.dias.clone(), "", "")];
        }
        ranges
            .into_iter()
            .map(|r| TimeBlock::new(self.dias.clone(), r.from, r.to))
            .collect()
    }
}

/// Join blocks into a `horario` string.
pub fn join_ranges<'a>(blocks: impl IntoIterator<Item = &'a TimeBlock>) -> String {
    blocks
        .into_iter()
        .map(TimeBlock::range_label)
        .collect::<Vec<_>>()
        .join(RANGE_SEPARATOR)
}
