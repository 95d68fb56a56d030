//! Form controllers and client-side validation.
//!
//! Validation never consults the server and never fails with `Err` for user
//! mistakes: it returns a [`ValidationErrors`] map keyed by form field, which
//! is empty when the form can be submitted.

pub mod affiliate_form;
pub mod agenda_form;
pub mod provider_form;

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::text::is_blank;

pub use affiliate_form::{
    AffiliateEditForm, AffiliateForm, AffiliateUpdate, EmailPayload, FamilyMemberForm,
    FamilyMemberPayload, NewAffiliatePayload, PhonePayload,
};
pub use agenda_form::{AgendaEditForm, AgendaForm, AgendaFormError};
pub use provider_form::{AddressForm, ProviderForm, ProviderFormError};

/// Message for an empty required field.
pub const REQUIRED: &str = "Requerido";

/// Message for a birth date after today.
pub const FUTURE_DATE: &str = "La fecha no puede ser futura";

/// Message for a birth date that is not `YYYY-MM-DD`.
pub const INVALID_DATE: &str = "Fecha inválida";

/// Message for a malformed email address.
pub const INVALID_EMAIL: &str = "Formato de email inválido";

/// Field key → message, in the order the errors were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; a second error for the same key replaces the first.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((key, message)),
        }
    }

    /// Clear the error of one field (the field was edited).
    pub fn clear_field(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First recorded error.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(k, m)| (k.as_str(), m.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, m)| (k.as_str(), m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(k, m)| format!("{}: {}", k, m))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, m) in &self.entries {
            map.serialize_entry(k, m)?;
        }
        map.end()
    }
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Record `REQUIRED` under `key` when `value` is blank.
pub fn require(errors: &mut ValidationErrors, key: &str, value: &str) {
    if is_blank(value) {
        errors.insert(key, REQUIRED);
    }
}

/// Record an email error under `key` for a non-empty malformed address.
pub fn check_optional_email(errors: &mut ValidationErrors, key: &str, value: &str) {
    if !value.is_empty() && !is_valid_email(value) {
        errors.insert(key, INVALID_EMAIL);
    }
}

/// Birth date must be present, well formed and not after `today`.
pub fn check_birth_date(errors: &mut ValidationErrors, key: &str, value: &str, today: NaiveDate) {
    if is_blank(value) {
        errors.insert(key, REQUIRED);
        return;
    }
    match parse_form_date(value) {
        Some(date) if date > today => errors.insert(key, FUTURE_DATE),
        Some(_) => {}
        None => errors.insert(key, INVALID_DATE),
    }
}

/// Parse a date input value (`YYYY-MM-DD`).
pub fn parse_form_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Leading integer of a form value, the way select values are converted.
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let digits: String = digits.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Non-blank entries of a repeatable text list, trimmed.
pub(crate) fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
