//! New-affiliate and edit-affiliate forms.
//!
//! A new affiliate is created together with its family members in a single
//! request. Family members may reuse the titular's address and contact data.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::{check_birth_date, check_optional_email, parse_leading_int, require, ValidationErrors};
use crate::models::Affiliate;
use crate::rules::situation::{SituationEntry, SituationPayload};
use crate::text::is_blank;

/// Plan preselected in a new form.
pub const DEFAULT_PLAN_ID: &str = "4";

/// Document type preselected in every form.
pub const DEFAULT_DOCUMENT_TYPE: &str = "DNI";

/// Relationship preselected for a new family member.
pub const DEFAULT_FAMILY_RELATIONSHIP: &str = "Hijo";

/// Titular section of the new-affiliate form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateForm {
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD` as typed
    pub birth_date: String,
    /// Selected plan id
    pub plan_id: String,
    pub phone: String,
    pub phone2: String,
    pub email: String,
    pub email2: String,
    pub address: String,
    pub address2: String,
    pub situations: Vec<SituationEntry>,
    pub family: Vec<FamilyMemberForm>,
}

impl Default for AffiliateForm {
    fn default() -> Self {
        Self {
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            document_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            birth_date: String::new(),
            plan_id: DEFAULT_PLAN_ID.to_string(),
            phone: String::new(),
            phone2: String::new(),
            email: String::new(),
            email2: String::new(),
            address: String::new(),
            address2: String::new(),
            situations: Vec::new(),
            family: Vec::new(),
        }
    }
}

/// One family member sub-form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMemberForm {
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub relationship: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub uses_titular_address: bool,
    pub uses_titular_contact: bool,
    pub situations: Vec<SituationEntry>,
}

impl Default for FamilyMemberForm {
    fn default() -> Self {
        Self {
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            document_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            birth_date: String::new(),
            relationship: DEFAULT_FAMILY_RELATIONSHIP.to_string(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            uses_titular_address: true,
            uses_titular_contact: false,
            situations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmailPayload {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhonePayload {
    pub telefono: String,
}

/// Body of `POST /api/affiliates`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewAffiliatePayload {
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub direccion: String,
    #[serde(rename = "tipoDocumento")]
    pub tipo_documento: String,
    pub fecha_nacimiento: String,
    /// `null` when the selected plan is not numeric
    pub plan: Option<i64>,
    pub emails: Vec<EmailPayload>,
    pub telefonos: Vec<PhonePayload>,
    pub situaciones: Vec<SituationPayload>,
    pub familiares: Vec<FamilyMemberPayload>,
}

/// A family member embedded in a new-affiliate payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FamilyMemberPayload {
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub parentesco: String,
    pub direccion: String,
    #[serde(rename = "tipoDocumento")]
    pub tipo_documento: String,
    pub fecha_nacimiento: String,
    pub emails: Vec<EmailPayload>,
    pub telefonos: Vec<PhonePayload>,
    pub situaciones: Vec<SituationPayload>,
}

impl AffiliateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_situation(&mut self) {
        self.situations.push(SituationEntry::default());
    }

    pub fn remove_situation(&mut self, index: usize) {
        if index < self.situations.len() {
            self.situations.remove(index);
        }
    }

    /// Append an empty family member and return its index.
    pub fn add_family_member(&mut self) -> usize {
        self.family.push(FamilyMemberForm::default());
        self.family.len() - 1
    }

    pub fn remove_family_member(&mut self, index: usize) {
        if index < self.family.len() {
            self.family.remove(index);
        }
    }

    pub fn family_member_mut(&mut self, index: usize) -> Option<&mut FamilyMemberForm> {
        self.family.get_mut(index)
    }

    /// Titular section filled from an existing affiliate, with no family
    /// rows. Used to attach new members to an existing group.
    pub fn for_titular(titular: &Affiliate) -> Self {
        let edit = AffiliateEditForm::from_affiliate(titular);
        Self {
            document_type: edit.document_type,
            document_number: edit.document_number,
            first_name: edit.first_name,
            last_name: edit.last_name,
            birth_date: edit.birth_date,
            plan_id: edit.plan_id,
            phone: edit.phone,
            phone2: edit.phone2,
            email: edit.email,
            email2: edit.email2,
            address: edit.address,
            address2: edit.address2,
            situations: Vec::new(),
            family: Vec::new(),
        }
    }

    /// Validate the titular and every family member.
    pub fn validate(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        require(&mut errors, "nroDocumento", &self.document_number);
        require(&mut errors, "nombre", &self.first_name);
        require(&mut errors, "apellido", &self.last_name);
        check_birth_date(&mut errors, "fechaNacimiento", &self.birth_date, today);
        check_optional_email(&mut errors, "email", &self.email);
        check_optional_email(&mut errors, "email2", &self.email2);
        if self.plan_id.is_empty() {
            errors.insert("planMedico", super::REQUIRED);
        }

        for (index, member) in self.family.iter().enumerate() {
            member.validate_into(&mut errors, index, today);
        }

        debug!(errors = errors.len(), family = self.family.len(), "Validated affiliate form");
        errors
    }

    /// Build the creation request. `today` is the start date of every
    /// situation.
    pub fn to_payload(&self, today: NaiveDate) -> NewAffiliatePayload {
        let emails = [&self.email, &self.email2]
            .into_iter()
            .filter(|e| !is_blank(e))
            .map(|e| EmailPayload {
                email: e.trim().to_string(),
            })
            .collect();
        let telefonos = [&self.phone, &self.phone2]
            .into_iter()
            .filter(|p| !is_blank(p))
            .map(|p| PhonePayload {
                telefono: p.trim().to_string(),
            })
            .collect();

        NewAffiliatePayload {
            dni: self.document_number.clone(),
            nombre: self.first_name.clone(),
            apellido: self.last_name.clone(),
            direccion: self.address.clone(),
            tipo_documento: self.document_type.clone(),
            fecha_nacimiento: self.birth_date.clone(),
            plan: parse_leading_int(&self.plan_id),
            emails,
            telefonos,
            situaciones: situation_payloads(&self.situations, today),
            familiares: self
                .family
                .iter()
                .map(|m| m.to_payload(self, today))
                .collect(),
        }
    }
}

impl FamilyMemberForm {
    /// Field key prefix for this member's errors.
    pub fn error_prefix(index: usize) -> String {
        format!("familiares[{}]", index)
    }

    /// Validate a member entered on its own, keyed by bare field names.
    pub fn validate(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        self.validate_keyed(&mut errors, |field| field.to_string(), today);
        errors
    }

    fn validate_into(&self, errors: &mut ValidationErrors, index: usize, today: NaiveDate) {
        let prefix = Self::error_prefix(index);
        self.validate_keyed(errors, |field| format!("{}.{}", prefix, field), today);
    }

    fn validate_keyed(
        &self,
        errors: &mut ValidationErrors,
        key: impl Fn(&str) -> String,
        today: NaiveDate,
    ) {
        require(errors, &key("nroDocumento"), &self.document_number);
        require(errors, &key("nombre"), &self.first_name);
        require(errors, &key("apellido"), &self.last_name);
        check_birth_date(errors, &key("fechaNacimiento"), &self.birth_date, today);
        check_optional_email(errors, &key("email"), &self.email);
    }

    pub fn add_situation(&mut self) {
        self.situations.push(SituationEntry::default());
    }

    pub fn remove_situation(&mut self, index: usize) {
        if index < self.situations.len() {
            self.situations.remove(index);
        }
    }

    fn to_payload(&self, titular: &AffiliateForm, today: NaiveDate) -> FamilyMemberPayload {
        let shared_or_own = |shared: &str, own: &str| -> Option<String> {
            if self.uses_titular_contact && !shared.is_empty() {
                Some(shared.to_string())
            } else if !is_blank(own) {
                Some(own.trim().to_string())
            } else {
                None
            }
        };

        FamilyMemberPayload {
            dni: self.document_number.clone(),
            nombre: self.first_name.clone(),
            apellido: self.last_name.clone(),
            parentesco: self.relationship.clone(),
            direccion: if self.uses_titular_address {
                titular.address.clone()
            } else {
                self.address.clone()
            },
            tipo_documento: self.document_type.clone(),
            fecha_nacimiento: self.birth_date.clone(),
            emails: shared_or_own(&titular.email, &self.email)
                .map(|email| vec![EmailPayload { email }])
                .unwrap_or_default(),
            telefonos: shared_or_own(&titular.phone, &self.phone)
                .map(|telefono| vec![PhonePayload { telefono }])
                .unwrap_or_default(),
            situaciones: situation_payloads(&self.situations, today),
        }
    }
}

fn situation_payloads(rows: &[SituationEntry], today: NaiveDate) -> Vec<SituationPayload> {
    rows.iter().filter_map(|s| s.to_payload(today)).collect()
}

/// Edit form for an existing affiliate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateEditForm {
    /// DNI the update is addressed to
    original_dni: String,
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub relationship: String,
    pub plan_id: String,
    pub phone: String,
    pub phone2: String,
    pub email: String,
    pub email2: String,
    pub address: String,
    pub address2: String,
}

/// Body of `PUT /api/affiliates/:dni`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AffiliateUpdate {
    #[serde(rename = "tipoDocumento")]
    pub tipo_documento: String,
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub fecha_nacimiento: String,
    pub direccion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parentesco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<i64>,
    pub emails: Vec<EmailPayload>,
    pub telefonos: Vec<PhonePayload>,
}

impl AffiliateEditForm {
    pub fn from_affiliate(a: &Affiliate) -> Self {
        let phone_at = |i: usize| a.phones.get(i).map(|p| p.phone.clone()).unwrap_or_default();
        let email_at = |i: usize| a.emails.get(i).map(|e| e.email.clone()).unwrap_or_default();
        let document_type = if a.document_type.is_empty() {
            DEFAULT_DOCUMENT_TYPE.to_string()
        } else {
            a.document_type.clone()
        };

        Self {
            original_dni: a.dni.clone(),
            document_type,
            document_number: a.dni.clone(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            birth_date: a
                .birth_date
                .as_deref()
                .map(|d| d.get(..10).unwrap_or(d).to_string())
                .unwrap_or_default(),
            relationship: a.relationship.clone().unwrap_or_default(),
            plan_id: a.plan.as_ref().map(|p| p.id.to_string()).unwrap_or_default(),
            phone: phone_at(0),
            phone2: phone_at(1),
            email: email_at(0),
            email2: email_at(1),
            address: a.address.clone(),
            address2: a.address2.clone().unwrap_or_default(),
        }
    }

    /// DNI of the record being edited.
    pub fn original_dni(&self) -> &str {
        &self.original_dni
    }

    /// Same titular rules as the creation form.
    pub fn validate(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "nroDocumento", &self.document_number);
        require(&mut errors, "nombre", &self.first_name);
        require(&mut errors, "apellido", &self.last_name);
        check_birth_date(&mut errors, "fechaNacimiento", &self.birth_date, today);
        check_optional_email(&mut errors, "email", &self.email);
        check_optional_email(&mut errors, "email2", &self.email2);
        errors
    }

    pub fn to_update(&self) -> AffiliateUpdate {
        let non_blank = |s: &str| (!is_blank(s)).then(|| s.trim().to_string());
        AffiliateUpdate {
            tipo_documento: self.document_type.clone(),
            dni: self.document_number.trim().to_string(),
            nombre: self.first_name.trim().to_string(),
            apellido: self.last_name.trim().to_string(),
            fecha_nacimiento: self.birth_date.clone(),
            direccion: self.address.trim().to_string(),
            direccion2: non_blank(&self.address2),
            parentesco: non_blank(&self.relationship),
            plan: parse_leading_int(&self.plan_id),
            emails: [&self.email, &self.email2]
                .into_iter()
                .filter_map(|e| non_blank(e))
                .map(|email| EmailPayload { email })
                .collect(),
            telefonos: [&self.phone, &self.phone2]
                .into_iter()
                .filter_map(|p| non_blank(p))
                .map(|telefono| PhonePayload { telefono })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmailEntry, Plan, PhoneEntry};
    use crate::rules::situation::SituationKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn filled_form() -> AffiliateForm {
        AffiliateForm {
            document_number: "30111222".into(),
            first_name: "Lucía".into(),
            last_name: "Fernández".into(),
            birth_date: "1985-04-02".into(),
            phone: "1144445555".into(),
            email: "lucia@example.com".into(),
            address: "Av. Rivadavia 1234".into(),
            ..AffiliateForm::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = AffiliateForm::new();
        assert_eq!(form.plan_id, "4");
        assert_eq!(form.document_type, "DNI");

        let member = FamilyMemberForm::default();
        assert!(member.uses_titular_address);
        assert!(!member.uses_titular_contact);
        assert_eq!(member.relationship, "Hijo");
    }

    #[test]
    fn test_titular_errors() {
        let mut form = AffiliateForm::new();
        form.email2 = "no-es-un-mail".into();
        form.plan_id.clear();
        let errors = form.validate(today());
        assert_eq!(errors.get("nroDocumento"), Some("Requerido"));
        assert_eq!(errors.get("nombre"), Some("Requerido"));
        assert_eq!(errors.get("apellido"), Some("Requerido"));
        assert_eq!(errors.get("fechaNacimiento"), Some("Requerido"));
        assert_eq!(errors.get("email2"), Some("Formato de email inválido"));
        assert_eq!(errors.get("planMedico"), Some("Requerido"));
        assert!(!errors.contains("email"));
    }

    #[test]
    fn test_future_birth_date() {
        let mut form = filled_form();
        form.birth_date = "2030-01-01".into();
        let errors = form.validate(today());
        assert_eq!(errors.get("fechaNacimiento"), Some("La fecha no puede ser futura"));
    }

    #[test]
    fn test_family_member_errors_are_indexed() {
        let mut form = filled_form();
        let i = form.add_family_member();
        let m = form.family_member_mut(i).unwrap();
        m.first_name = "Tomás".into();
        m.last_name = "Fernández".into();
        m.birth_date = "2015-06-01".into();

        let errors = form.validate(today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("familiares[0].nroDocumento"), Some("Requerido"));
    }

    #[test]
    fn test_payload_without_family() {
        let form = filled_form();
        assert!(form.validate(today()).is_empty());

        let json = serde_json::to_value(form.to_payload(today())).unwrap();
        assert_eq!(json["dni"], "30111222");
        assert_eq!(json["tipoDocumento"], "DNI");
        assert_eq!(json["plan"], 4);
        assert_eq!(json["emails"][0]["email"], "lucia@example.com");
        assert_eq!(json["telefonos"].as_array().unwrap().len(), 1);
        assert!(json["familiares"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_family_payload_shares_titular_data() {
        let mut form = filled_form();
        form.add_situation();
        form.situations[0].set_kind(Some(SituationKind::Diabetes));
        form.add_situation();

        let i = form.add_family_member();
        let m = form.family_member_mut(i).unwrap();
        m.document_number = "50111222".into();
        m.uses_titular_contact = true;
        m.email = "propio@example.com".into();
        m.situations.push(SituationEntry::new(
            SituationKind::Embarazo,
            NaiveDate::from_ymd_opt(2027, 3, 1),
        ));

        let j = form.add_family_member();
        let m = form.family_member_mut(j).unwrap();
        m.uses_titular_address = false;
        m.address = "Calle 2".into();
        m.phone = " 1133334444 ".into();

        let payload = form.to_payload(today());
        // The empty situation row is dropped
        assert_eq!(payload.situaciones.len(), 1);
        assert_eq!(payload.situaciones[0].id, 2);

        let first = &payload.familiares[0];
        assert_eq!(first.direccion, "Av. Rivadavia 1234");
        assert_eq!(first.emails, vec![EmailPayload { email: "lucia@example.com".into() }]);
        assert_eq!(first.telefonos[0].telefono, "1144445555");
        assert_eq!(first.situaciones[0].end_date, NaiveDate::from_ymd_opt(2027, 3, 1));

        let second = &payload.familiares[1];
        assert_eq!(second.direccion, "Calle 2");
        assert!(second.emails.is_empty());
        assert_eq!(second.telefonos[0].telefono, "1133334444");
        assert_eq!(second.parentesco, "Hijo");
    }

    #[test]
    fn test_standalone_member_keys_are_bare() {
        let member = FamilyMemberForm {
            first_name: "Tomás".into(),
            email: "tomas@".into(),
            ..FamilyMemberForm::default()
        };
        let errors = member.validate(today());
        assert_eq!(errors.get("nroDocumento"), Some("Requerido"));
        assert_eq!(errors.get("apellido"), Some("Requerido"));
        assert_eq!(errors.get("email"), Some("Formato de email inválido"));
        assert!(!errors.contains("nombre"));
    }

    #[test]
    fn test_form_for_existing_titular() {
        let mut titular = Affiliate::new("30111222", "0000009-01");
        titular.first_name = "Lucía".into();
        titular.last_name = "Fernández".into();
        titular.address = "Av. Rivadavia 1234".into();
        titular.birth_date = Some("1985-04-02T00:00:00.000Z".into());
        titular.plan = Some(Plan::new(3, "310"));
        titular.emails = vec![EmailEntry { id: None, email: "lucia@example.com".into() }];

        let mut form = AffiliateForm::for_titular(&titular);
        assert_eq!(form.birth_date, "1985-04-02");
        assert!(form.family.is_empty());

        let i = form.add_family_member();
        let m = form.family_member_mut(i).unwrap();
        m.document_number = "50111222".into();
        m.first_name = "Tomás".into();
        m.last_name = "Fernández".into();
        m.birth_date = "2018-02-01".into();

        let payload = form.to_payload(today());
        assert_eq!(payload.dni, "30111222");
        assert_eq!(payload.plan, Some(3));
        assert_eq!(payload.familiares.len(), 1);
        assert_eq!(payload.familiares[0].direccion, "Av. Rivadavia 1234");
    }

    #[test]
    fn test_edit_form_round_trip() {
        let mut a = Affiliate::new("23456789", "0000001-01");
        a.first_name = "Juan".into();
        a.last_name = "Mogno".into();
        a.birth_date = Some("2002-12-16T00:00:00.000Z".into());
        a.plan = Some(Plan::new(2, "210"));
        a.phones = vec![PhoneEntry { phone: "111".into() }];
        a.emails = vec![EmailEntry { id: Some(1), email: "juan@example.com".into() }];

        let mut form = AffiliateEditForm::from_affiliate(&a);
        assert_eq!(form.birth_date, "2002-12-16");
        assert_eq!(form.plan_id, "2");
        assert!(form.validate(today()).is_empty());

        form.last_name = "Mogno Ruiz".into();
        let update = form.to_update();
        assert_eq!(update.apellido, "Mogno Ruiz");
        assert_eq!(update.plan, Some(2));
        assert!(update.direccion2.is_none());
        assert_eq!(form.original_dni(), "23456789");

        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("direccion2").is_none());
        assert_eq!(json["emails"][0]["email"], "juan@example.com");
    }
}
