//! Catalog records: plans, specialties and therapeutic situations.

use serde::{Deserialize, Serialize};

/// A medical plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Backend plan id
    #[serde(rename = "idPlan")]
    pub id: i64,
    /// Plan name (e.g., "210", "310")
    #[serde(rename = "nombre")]
    pub name: String,
    /// Optional description
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Plan {
    /// Create a plan reference.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }
}

/// A medical specialty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Specialty {
    /// Catalog id (numeric ids are kept as their decimal string)
    pub id: String,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Specialty {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A therapeutic situation as listed by the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TherapeuticSituation {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_wire_names() {
        let plan: Plan = serde_json::from_str(r#"{"idPlan":4,"nombre":"410"}"#).unwrap();
        assert_eq!(plan, Plan::new(4, "410"));

        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"idPlan":4,"nombre":"410"}"#);
    }

    #[test]
    fn test_therapeutic_situation_optional_description() {
        let s: TherapeuticSituation =
            serde_json::from_str(r#"{"id":1,"nombre":"Embarazo"}"#).unwrap();
        assert_eq!(s.name, "Embarazo");
        assert!(s.description.is_none());
    }
}
