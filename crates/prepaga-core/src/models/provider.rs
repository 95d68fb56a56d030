//! Healthcare provider models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::nullable;
use super::weekday::Weekday;
use crate::text::is_blank;

/// CUIL/CUIT errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CuitError {
    #[error("El CUIT/CUIL debe tener 11 dígitos. Formato: XX-XXXXXXXX-X")]
    InvalidLength(String),
}

/// An 11-digit tax id, stored as digits and displayed as `XX-XXXXXXXX-X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cuit {
    digits: String,
}

impl Cuit {
    /// The bare 11 digits.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Canonical dashed form.
    pub fn canonical(&self) -> String {
        format!(
            "{}-{}-{}",
            &self.digits[..2],
            &self.digits[2..10],
            &self.digits[10..]
        )
    }
}

impl FromStr for Cuit {
    type Err = CuitError;

    /// Dashes are optional; anything else must be digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.trim().chars().filter(|c| *c != '-').collect();
        if digits.len() != 11 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CuitError::InvalidLength(s.to_string()));
        }
        Ok(Self { digits })
    }
}

impl fmt::Display for Cuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Provider type. A professional may belong to a center; a center never
/// belongs to another center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    #[serde(rename = "profesional")]
    Professional,
    #[serde(rename = "centro")]
    Center,
}

impl ProviderKind {
    /// Frontend key (`profesional` / `centro`).
    pub fn key(self) -> &'static str {
        match self {
            ProviderKind::Professional => "profesional",
            ProviderKind::Center => "centro",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Professional => "Profesional",
            ProviderKind::Center => "Centro Médico",
        }
    }
}

/// Reference to the medical center a professional works at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CenterRef {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A recurring block of attendance hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TimeBlock {
    #[serde(rename = "dias", default, deserialize_with = "nullable")]
    pub days: Vec<Weekday>,
    /// Start time, `HH:MM`
    #[serde(rename = "desde", default, deserialize_with = "nullable")]
    pub from: String,
    /// End time, `HH:MM`
    #[serde(rename = "hasta", default, deserialize_with = "nullable")]
    pub to: String,
    #[serde(rename = "especialidadId", default, skip_serializing_if = "Option::is_none")]
    pub specialty_id: Option<String>,
}

impl TimeBlock {
    pub fn new(days: Vec<Weekday>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            days,
            from: from.into(),
            to: to.into(),
            specialty_id: None,
        }
    }

    /// A block counts only with at least one day and both times set.
    pub fn is_complete(&self) -> bool {
        !self.days.is_empty() && !is_blank(&self.from) && !is_blank(&self.to)
    }

    /// `"08:00 - 12:00"`.
    pub fn range_label(&self) -> String {
        format!("{} - {}", self.from, self.to)
    }
}

/// An address where a provider attends, with its hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AttendanceAddress {
    #[serde(rename = "etiqueta", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "calle", default)]
    pub street: String,
    #[serde(rename = "numero", default)]
    pub number: Option<String>,
    #[serde(rename = "localidad", default)]
    pub locality: Option<String>,
    #[serde(rename = "provincia", default)]
    pub province: Option<String>,
    #[serde(rename = "cp", default)]
    pub postal_code: String,
    #[serde(rename = "horarios", default)]
    pub schedule: Vec<TimeBlock>,
}

impl AttendanceAddress {
    /// `"Calle 123"`, number omitted when blank.
    pub fn street_line(&self) -> String {
        format!("{} {}", self.street, self.number.as_deref().unwrap_or(""))
            .trim()
            .to_string()
    }

    /// Blocks with days and both times set.
    pub fn complete_blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.schedule.iter().filter(|b| b.is_complete())
    }
}

/// A healthcare provider, professional or medical center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    /// Local id; providers fetched from the backend use the CUIT
    pub id: String,
    #[serde(rename = "cuilCuit")]
    pub cuil_cuit: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "tipo")]
    pub kind: ProviderKind,
    /// Specialty ids, in the order they were declared
    #[serde(rename = "especialidades", default)]
    pub specialties: Vec<String>,
    #[serde(rename = "integraCentroMedico", default)]
    pub center: Option<CenterRef>,
    #[serde(rename = "telefonos", default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(rename = "direcciones", default)]
    pub addresses: Vec<AttendanceAddress>,
}

impl Provider {
    /// Create a provider with no contact data or addresses.
    pub fn new(cuil_cuit: impl Into<String>, full_name: impl Into<String>, kind: ProviderKind) -> Self {
        let cuil_cuit = cuil_cuit.into();
        Self {
            id: cuil_cuit.clone(),
            cuil_cuit,
            full_name: full_name.into(),
            kind,
            specialties: Vec::new(),
            center: None,
            phones: Vec::new(),
            emails: Vec::new(),
            addresses: Vec::new(),
        }
    }

    pub fn is_center(&self) -> bool {
        self.kind == ProviderKind::Center
    }

    /// Center membership only applies to professionals.
    pub fn center_name(&self) -> Option<&str> {
        match self.kind {
            ProviderKind::Professional => self.center.as_ref().map(|c| c.name.as_str()),
            ProviderKind::Center => None,
        }
    }

    /// Drop a center reference carried by a center.
    pub fn normalized(mut self) -> Self {
        if self.kind == ProviderKind::Center {
            self.center = None;
        }
        self
    }

    pub fn primary_phone(&self) -> Option<&str> {
        self.phones.first().map(String::as_str)
    }

    /// Parsed tax id, if the stored value is well formed.
    pub fn cuit(&self) -> Option<Cuit> {
        self.cuil_cuit.parse().ok()
    }
}

/// Split a full name for the providers table: the last word is the surname.
pub fn split_full_name(full: &str) -> (String, String) {
    let mut parts: Vec<&str> = full.split_whitespace().collect();
    if parts.len() <= 1 {
        return (full.to_string(), String::new());
    }
    let surname = parts.pop().unwrap_or_default().to_string();
    (parts.join(" "), surname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuit_parse_and_format() {
        let cuit: Cuit = "20123456789".parse().unwrap();
        assert_eq!(cuit.canonical(), "20-12345678-9");

        let dashed: Cuit = "20-12345678-9".parse().unwrap();
        assert_eq!(dashed, cuit);
        assert_eq!(dashed.digits(), "20123456789");

        assert!("20-1234567-9".parse::<Cuit>().is_err());
        assert!("20-1234567a-9".parse::<Cuit>().is_err());
        assert!("".parse::<Cuit>().is_err());
    }

    #[test]
    fn test_center_never_belongs_to_center() {
        let mut center = Provider::new("30-12345678-9", "Hospital Italiano", ProviderKind::Center);
        center.center = Some(CenterRef {
            id: "x".into(),
            name: "Otro".into(),
        });
        assert_eq!(center.center_name(), None);
        assert!(center.normalized().center.is_none());

        let mut pro = Provider::new("20-11111111-1", "Ana Pérez", ProviderKind::Professional);
        pro.center = Some(CenterRef {
            id: "30-12345678-9".into(),
            name: "Hospital Italiano".into(),
        });
        assert_eq!(pro.center_name(), Some("Hospital Italiano"));
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("Juan Carlos Pérez"),
            ("Juan Carlos".to_string(), "Pérez".to_string())
        );
        assert_eq!(split_full_name("Cher"), ("Cher".to_string(), String::new()));
    }

    #[test]
    fn test_time_block_completeness() {
        assert!(TimeBlock::new(vec![Weekday::Monday], "08:00", "12:00").is_complete());
        assert!(!TimeBlock::new(vec![], "08:00", "12:00").is_complete());
        assert!(!TimeBlock::new(vec![Weekday::Monday], "08:00", " ").is_complete());
        assert_eq!(
            TimeBlock::new(vec![Weekday::Monday], "08:00", "12:00").range_label(),
            "08:00 - 12:00"
        );
    }

    #[test]
    fn test_time_block_null_hours_are_incomplete() {
        let block: TimeBlock =
            serde_json::from_str(r#"{"dias": [0], "desde": null, "hasta": "12:00"}"#).unwrap();
        assert_eq!(block.days, vec![Weekday::Sunday]);
        assert!(block.from.is_empty());
        assert!(!block.is_complete());
    }

    #[test]
    fn test_frontend_shape_round_trip_names() {
        let json = r#"{
            "id": "centro-italiano",
            "cuilCuit": "30-12345678-9",
            "nombreCompleto": "Hospital Italiano",
            "tipo": "centro",
            "especialidades": ["clinica", "cardiologia"],
            "integraCentroMedico": null,
            "telefonos": ["1140000000"],
            "emails": ["contacto@hitaliano.org"],
            "direcciones": [{
                "etiqueta": "Sede Central",
                "calle": "Gascón",
                "numero": "450",
                "localidad": "CABA",
                "provincia": "Buenos Aires",
                "cp": "1181",
                "horarios": [{"dias": [1, 2, 3, 4, 5], "desde": "08:00", "hasta": "20:00"}]
            }]
        }"#;
        let p: Provider = serde_json::from_str(json).unwrap();
        assert!(p.is_center());
        assert_eq!(p.addresses[0].street_line(), "Gascón 450");
        assert_eq!(p.addresses[0].schedule[0].days.len(), 5);
        assert_eq!(p.cuit().unwrap().digits(), "30123456789");
    }
}
