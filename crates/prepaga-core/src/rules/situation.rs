//! Therapeutic situations and the end-date rule.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::text::fold;

/// The fixed set of therapeutic situation kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SituationKind {
    Embarazo,
    Diabetes,
    Miopia,
    Hipertension,
    RehabMotriz,
    Kinesiologia,
    Psicoterapia,
    Fonoaudiologia,
    Otra,
}

impl SituationKind {
    /// All kinds, in backend id order.
    pub const ALL: [SituationKind; 9] = [
        SituationKind::Embarazo,
        SituationKind::Diabetes,
        SituationKind::Miopia,
        SituationKind::Hipertension,
        SituationKind::RehabMotriz,
        SituationKind::Kinesiologia,
        SituationKind::Psicoterapia,
        SituationKind::Fonoaudiologia,
        SituationKind::Otra,
    ];

    /// Whether the form shows an end-date input for this kind.
    pub fn requires_end_date(self) -> bool {
        matches!(
            self,
            SituationKind::Embarazo
                | SituationKind::RehabMotriz
                | SituationKind::Kinesiologia
                | SituationKind::Psicoterapia
                | SituationKind::Fonoaudiologia
        )
    }

    /// Id in the therapeutic-situation catalog (1..=9).
    pub fn backend_id(self) -> i64 {
        self as i64 + 1
    }

    pub fn from_backend_id(id: i64) -> Option<Self> {
        match id {
            1..=9 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Form key (e.g., `"rehab_motriz"`).
    pub fn key(self) -> &'static str {
        match self {
            SituationKind::Embarazo => "embarazo",
            SituationKind::Diabetes => "diabetes",
            SituationKind::Miopia => "miopia",
            SituationKind::Hipertension => "hipertension",
            SituationKind::RehabMotriz => "rehab_motriz",
            SituationKind::Kinesiologia => "kinesiologia",
            SituationKind::Psicoterapia => "psicoterapia",
            SituationKind::Fonoaudiologia => "fonoaudiologia",
            SituationKind::Otra => "otra",
        }
    }

    /// Parse a form key; unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let folded = fold(key);
        Self::ALL.into_iter().find(|k| k.key() == folded)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SituationKind::Embarazo => "Embarazo",
            SituationKind::Diabetes => "Diabetes",
            SituationKind::Miopia => "Miopía",
            SituationKind::Hipertension => "Hipertensión",
            SituationKind::RehabMotriz => "Rehabilitación motriz",
            SituationKind::Kinesiologia => "Kinesiología",
            SituationKind::Psicoterapia => "Psicoterapia",
            SituationKind::Fonoaudiologia => "Fonoaudiología",
            SituationKind::Otra => "Otra",
        }
    }
}

impl fmt::Display for SituationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Backend id for a form key. Unknown keys map to "otra".
pub fn backend_id_for_key(key: &str) -> i64 {
    SituationKind::from_key(key)
        .unwrap_or(SituationKind::Otra)
        .backend_id()
}

/// One situation row in an affiliate form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SituationEntry {
    /// Selected kind; `None` while the row's select is still empty
    pub kind: Option<SituationKind>,
    pub end_date: Option<NaiveDate>,
}

impl SituationEntry {
    pub fn new(kind: SituationKind, end_date: Option<NaiveDate>) -> Self {
        Self {
            kind: Some(kind),
            end_date,
        }
    }

    /// Evaluated per row: only the allowlisted kinds show the end date.
    pub fn show_end_date(&self) -> bool {
        self.kind.is_some_and(SituationKind::requires_end_date)
    }

    /// Change the kind. A kind that takes no end date clears it.
    pub fn set_kind(&mut self, kind: Option<SituationKind>) {
        self.kind = kind;
        if !self.show_end_date() {
            self.end_date = None;
        }
    }

    /// Wire payload, or `None` for a row with no kind selected.
    pub fn to_payload(&self, start: NaiveDate) -> Option<SituationPayload> {
        let kind = self.kind?;
        Some(SituationPayload {
            id: kind.backend_id(),
            start_date: start,
            end_date: if kind.requires_end_date() {
                self.end_date
            } else {
                None
            },
        })
    }
}

/// Situation as sent inside a new-affiliate payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SituationPayload {
    pub id: i64,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end_date: Option<NaiveDate>,
}
