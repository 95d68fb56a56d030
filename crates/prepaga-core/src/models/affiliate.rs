//! Affiliate (insured member) models.

use serde::{Deserialize, Serialize};

use super::catalog::Plan;
use super::nullable;
use crate::rules::credential;

/// An affiliate as returned by the affiliates endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Affiliate {
    /// Backend family-group id
    #[serde(rename = "grupoFamiliar", default)]
    pub family_group: Option<i64>,
    /// Document type (e.g., "DNI")
    #[serde(rename = "tipoDocumento", default, deserialize_with = "nullable")]
    pub document_type: String,
    /// National id number
    pub dni: String,
    /// Credential `GGGGGGG-SS`
    #[serde(rename = "credencial", default, deserialize_with = "nullable")]
    pub credential: String,
    #[serde(rename = "nombre", default, deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(rename = "apellido", default, deserialize_with = "nullable")]
    pub last_name: String,
    /// Birth date as sent by the backend (format is not normalized)
    #[serde(rename = "fecha_nacimiento", alias = "fechaNacimiento", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "direccion", default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(rename = "direccion2", default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// Explicit relationship to the titular, when the backend has one
    #[serde(rename = "parentesco", default)]
    pub relationship: Option<String>,
    #[serde(rename = "email", default, deserialize_with = "nullable")]
    pub emails: Vec<EmailEntry>,
    #[serde(rename = "telefonos", default, deserialize_with = "nullable")]
    pub phones: Vec<PhoneEntry>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(
        rename = "situaciones",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub situations: Vec<AffiliateSituation>,
}

/// An email address attached to an affiliate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailEntry {
    #[serde(rename = "idEmail", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
}

/// A phone number attached to an affiliate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneEntry {
    #[serde(rename = "telefono")]
    pub phone: String,
}

/// A therapeutic situation recorded on an affiliate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AffiliateSituation {
    /// Situation key (e.g., "embarazo")
    #[serde(rename = "situacion")]
    pub situation: String,
    /// End date, only meaningful for kinds that require one
    #[serde(rename = "fechaFinalizacion", default)]
    pub end_date: Option<String>,
}

impl Affiliate {
    /// Create an affiliate with the identifying fields set.
    pub fn new(dni: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            document_type: "DNI".into(),
            dni: dni.into(),
            credential: credential.into(),
            ..Self::default()
        }
    }

    /// "Nombre Apellido".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// First phone on record.
    pub fn primary_phone(&self) -> Option<&str> {
        self.phones.first().map(|p| p.phone.as_str())
    }

    /// First email on record.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(|e| e.email.as_str())
    }

    /// Plan name, empty when the affiliate has no plan.
    pub fn plan_name(&self) -> &str {
        self.plan.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Relationship label: explicit `parentesco` first, credential fallback.
    pub fn relationship_label(&self) -> String {
        credential::resolve_relationship(self.relationship.as_deref(), &self.credential)
    }

    /// Whether the credential marks this affiliate as a titular.
    pub fn is_titular(&self) -> bool {
        credential::is_titular(&self.credential)
    }

    /// Family-group part of the credential.
    pub fn group(&self) -> Option<&str> {
        credential::group_prefix(&self.credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "grupoFamiliar": 7,
            "tipoDocumento": "DNI",
            "apellido": "Mogno",
            "credencial": "0000001-02",
            "fecha_nacimiento": "2002-12-16",
            "direccion": "Calle Falsa 123",
            "dni": "23456789",
            "nombre": "Juan",
            "parentesco": "Cónyuge",
            "email": [{"idEmail": 3, "email": "juan@example.com"}],
            "telefonos": [{"telefono": "1140000000"}, {"telefono": "1140000001"}],
            "plan": {"idPlan": 2, "nombre": "210"}
        }"#
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let a: Affiliate = serde_json::from_str(
            r#"{
                "dni": "30111222",
                "credencial": null,
                "nombre": "Ana",
                "apellido": null,
                "tipoDocumento": null,
                "direccion": null,
                "email": null,
                "telefonos": null,
                "situaciones": null,
                "plan": null
            }"#,
        )
        .unwrap();
        assert_eq!(a.full_name(), "Ana");
        assert!(a.address.is_empty());
        assert!(a.credential.is_empty());
        assert!(a.emails.is_empty());
        assert_eq!(a.primary_phone(), None);
        assert!(a.situations.is_empty());
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let a: Affiliate = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(a.family_group, Some(7));
        assert_eq!(a.full_name(), "Juan Mogno");
        assert_eq!(a.primary_phone(), Some("1140000000"));
        assert_eq!(a.primary_email(), Some("juan@example.com"));
        assert_eq!(a.plan_name(), "210");
        assert_eq!(a.birth_date.as_deref(), Some("2002-12-16"));
        assert_eq!(a.group(), Some("0000001"));
        assert!(!a.is_titular());
    }

    #[test]
    fn test_birth_date_alias_and_null() {
        let a: Affiliate =
            serde_json::from_str(r#"{"dni":"1","fechaNacimiento":"1990-01-01"}"#).unwrap();
        assert_eq!(a.birth_date.as_deref(), Some("1990-01-01"));

        let b: Affiliate = serde_json::from_str(r#"{"dni":"1","fecha_nacimiento":null}"#).unwrap();
        assert!(b.birth_date.is_none());
    }

    #[test]
    fn test_relationship_label_precedence() {
        let mut a = Affiliate::new("1", "0000001-01");
        assert_eq!(a.relationship_label(), "Titular");

        a.relationship = Some("Hijo".into());
        assert_eq!(a.relationship_label(), "Hijo");
    }

    #[test]
    fn test_missing_plan_is_empty_name() {
        let a = Affiliate::new("1", "0000001-01");
        assert_eq!(a.plan_name(), "");
        assert_eq!(a.primary_phone(), None);
    }
}
