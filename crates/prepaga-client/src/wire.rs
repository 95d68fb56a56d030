//! Backend wire formats.
//!
//! The provider endpoints speak a different shape than [`Provider`]:
//! `cuitCuil` instead of `cuilCuit`, `centro_medico` instead of `centro`,
//! `mails` instead of `emails`, and a single `lugarAtencion` instead of an
//! address list. Everything else the backend sends is read as-is.

use prepaga_core::models::{
    nullable, AttendanceAddress, CenterRef, Provider, ProviderKind, Specialty, TimeBlock,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend spelling of [`ProviderKind::Center`].
pub const BACKEND_CENTER_KIND: &str = "centro_medico";
pub const BACKEND_PROFESSIONAL_KIND: &str = "profesional";

/// Ids arrive as numbers or strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    /// Numeric when the text is all digits.
    pub fn from_text(id: &str) -> Self {
        match id.trim().parse::<i64>() {
            Ok(n) => WireId::Number(n),
            Err(_) => WireId::Text(id.to_string()),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s.clone(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            WireId::Number(n) => *n == 0,
            WireId::Text(s) => s.trim().is_empty(),
        }
    }
}

/// A specialty inside a provider: a bare id or a catalog record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SpecialtyRef {
    Record {
        #[serde(rename = "idEspecialidad")]
        id: WireId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nombre: Option<String>,
    },
    Id(WireId),
}

impl SpecialtyRef {
    pub fn id_text(&self) -> String {
        match self {
            SpecialtyRef::Record { id, .. } | SpecialtyRef::Id(id) => id.as_text(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BackendCenter {
    #[serde(rename = "nombreCompleto", default, deserialize_with = "nullable")]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BackendPlace {
    /// `"calle numero"`
    #[serde(rename = "direccion", default, deserialize_with = "nullable")]
    pub address: String,
    /// Blank parts travel as `null`.
    #[serde(rename = "localidad", default)]
    pub locality: Option<String>,
    #[serde(rename = "provincia", default)]
    pub province: Option<String>,
    #[serde(rename = "codigoPostal", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "horarios", default, deserialize_with = "nullable")]
    pub schedule: Vec<TimeBlock>,
}

/// Provider as the backend stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BackendProvider {
    #[serde(rename = "cuitCuil")]
    pub cuit_cuil: String,
    #[serde(rename = "nombreCompleto", default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(rename = "tipoPrestador", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(rename = "especialidades", default, deserialize_with = "nullable")]
    pub specialties: Vec<SpecialtyRef>,
    #[serde(rename = "telefonos", default, deserialize_with = "nullable")]
    pub phones: Vec<String>,
    #[serde(rename = "mails", default, deserialize_with = "nullable")]
    pub emails: Vec<String>,
    #[serde(rename = "centroMedicoId", default, skip_serializing_if = "Option::is_none")]
    pub center_id: Option<WireId>,
    #[serde(rename = "centroMedico", default, skip_serializing_if = "Option::is_none")]
    pub center: Option<BackendCenter>,
    #[serde(rename = "lugarAtencion", default, skip_serializing_if = "Option::is_none")]
    pub place: Option<BackendPlace>,
}

fn kind_from_backend(kind: &str) -> ProviderKind {
    match kind {
        BACKEND_CENTER_KIND | "centro" => ProviderKind::Center,
        _ => ProviderKind::Professional,
    }
}

fn kind_to_backend(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Center => BACKEND_CENTER_KIND,
        ProviderKind::Professional => BACKEND_PROFESSIONAL_KIND,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Backend record → domain provider. The CUIT doubles as the local id.
pub fn provider_from_backend(backend: BackendProvider) -> Provider {
    let kind = kind_from_backend(&backend.kind);
    let center = backend
        .center_id
        .filter(|id| !id.is_empty())
        .map(|id| CenterRef {
            id: id.as_text(),
            name: backend.center.map(|c| c.full_name).unwrap_or_default(),
        });
    let addresses = backend
        .place
        .map(|place| AttendanceAddress {
            label: None,
            street: place.address,
            number: None,
            locality: place.locality.and_then(non_empty),
            province: place.province.and_then(non_empty),
            postal_code: place.postal_code.unwrap_or_default(),
            schedule: place.schedule,
        })
        .into_iter()
        .collect();

    let mut provider = Provider::new(backend.cuit_cuil, backend.full_name, kind);
    provider.specialties = backend.specialties.iter().map(SpecialtyRef::id_text).collect();
    provider.center = center;
    provider.phones = backend.phones;
    provider.emails = backend.emails;
    provider.addresses = addresses;
    provider.normalized()
}

/// Domain provider → backend record for create and update.
///
/// Only numeric specialty ids are sent. The first address becomes the
/// attendance place and keeps its complete blocks only. A center reference
/// is sent for professionals only.
pub fn provider_to_backend(provider: &Provider) -> BackendProvider {
    let specialties = provider
        .specialties
        .iter()
        .filter_map(|id| id.trim().parse::<i64>().ok())
        .map(|n| SpecialtyRef::Id(WireId::Number(n)))
        .collect();

    let center_id = match provider.kind {
        ProviderKind::Professional => provider
            .center
            .as_ref()
            .filter(|c| !c.id.trim().is_empty())
            .map(|c| WireId::from_text(&c.id)),
        ProviderKind::Center => None,
    };

    let place = provider.addresses.first().map(|a| BackendPlace {
        address: a.street_line(),
        locality: a.locality.clone().and_then(non_empty),
        province: a.province.clone().and_then(non_empty),
        postal_code: non_empty(a.postal_code.clone()),
        schedule: a.complete_blocks().cloned().collect(),
    });

    BackendProvider {
        cuit_cuil: provider.cuil_cuit.clone(),
        full_name: provider.full_name.clone(),
        kind: kind_to_backend(provider.kind).to_string(),
        specialties,
        phones: provider.phones.clone(),
        emails: provider.emails.clone(),
        center_id,
        center: None,
        place,
    }
}

/// Parse a provider list response.
pub fn providers_from_value(value: Value) -> serde_json::Result<Vec<Provider>> {
    let list: Vec<BackendProvider> = nullable_list(value)?;
    Ok(list.into_iter().map(provider_from_backend).collect())
}

/// Specialty catalog record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendSpecialty {
    #[serde(rename = "idEspecialidad")]
    pub id: WireId,
    pub nombre: String,
}

impl From<BackendSpecialty> for Specialty {
    fn from(s: BackendSpecialty) -> Self {
        Specialty::new(s.id.as_text(), s.nombre)
    }
}

/// A list response; `null` reads as empty.
pub fn nullable_list<T: for<'de> Deserialize<'de>>(value: Value) -> serde_json::Result<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
}
