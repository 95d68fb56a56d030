//! Search and filter state for the affiliate, provider and agenda lists.

use serde::{Deserialize, Serialize};

use crate::models::{AgendaEntry, Affiliate, Provider, ProviderKind, Weekday};
use crate::text::fold;

/// Field searched by the affiliates search box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AffiliateSearchField {
    #[default]
    Dni,
    Nombre,
    Apellido,
    Credencial,
    Plan,
}

impl AffiliateSearchField {
    pub const ALL: [AffiliateSearchField; 5] = [
        AffiliateSearchField::Dni,
        AffiliateSearchField::Nombre,
        AffiliateSearchField::Apellido,
        AffiliateSearchField::Credencial,
        AffiliateSearchField::Plan,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AffiliateSearchField::Dni => "DNI",
            AffiliateSearchField::Nombre => "Nombre",
            AffiliateSearchField::Apellido => "Apellido",
            AffiliateSearchField::Credencial => "Credencial",
            AffiliateSearchField::Plan => "Plan",
        }
    }

    fn value(self, a: &Affiliate) -> &str {
        match self {
            AffiliateSearchField::Dni => &a.dni,
            AffiliateSearchField::Nombre => &a.first_name,
            AffiliateSearchField::Apellido => &a.last_name,
            AffiliateSearchField::Credencial => &a.credential,
            AffiliateSearchField::Plan => a.plan_name(),
        }
    }
}

/// Affiliate search: accent and case insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliateQuery {
    pub field: AffiliateSearchField,
    pub text: String,
}

impl AffiliateQuery {
    pub fn new(field: AffiliateSearchField, text: impl Into<String>) -> Self {
        Self {
            field,
            text: text.into(),
        }
    }

    pub fn matches(&self, affiliate: &Affiliate) -> bool {
        let needle = fold(&self.text);
        needle.is_empty() || fold(self.field.value(affiliate)).contains(&needle)
    }
}

/// Affiliates matching the query. An empty query returns everything.
pub fn filter_affiliates<'a>(all: &'a [Affiliate], query: &AffiliateQuery) -> Vec<&'a Affiliate> {
    all.iter().filter(|a| query.matches(a)).collect()
}

/// Provider type filter toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKindFilter {
    #[default]
    All,
    Only(ProviderKind),
}

impl ProviderKindFilter {
    /// Pressing the active toggle returns to `All`.
    pub fn toggle(self, pressed: ProviderKind) -> Self {
        match self {
            ProviderKindFilter::Only(current) if current == pressed => ProviderKindFilter::All,
            _ => ProviderKindFilter::Only(pressed),
        }
    }

    pub fn accepts(self, kind: ProviderKind) -> bool {
        match self {
            ProviderKindFilter::All => true,
            ProviderKindFilter::Only(k) => k == kind,
        }
    }
}

/// Field searched by the providers search box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProviderSearchField {
    #[default]
    #[serde(rename = "cuilCuit")]
    CuilCuit,
    #[serde(rename = "nombreCompleto")]
    NombreCompleto,
}

/// Provider search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderQuery {
    pub kind: ProviderKindFilter,
    pub field: ProviderSearchField,
    pub text: String,
}

impl ProviderQuery {
    pub fn matches(&self, provider: &Provider) -> bool {
        if !self.kind.accepts(provider.kind) {
            return false;
        }
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let value = match self.field {
            ProviderSearchField::CuilCuit => &provider.cuil_cuit,
            ProviderSearchField::NombreCompleto => &provider.full_name,
        };
        value.to_lowercase().contains(&needle)
    }
}

pub fn filter_providers<'a>(all: &'a [Provider], query: &ProviderQuery) -> Vec<&'a Provider> {
    all.iter().filter(|p| query.matches(p)).collect()
}

/// Provider search box of the agenda screens: name or type contains the
/// text. Blank text returns every provider.
pub fn search_providers<'a>(all: &'a [Provider], text: &str) -> Vec<&'a Provider> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return all.iter().collect();
    }
    all.iter()
        .filter(|p| {
            p.full_name.to_lowercase().contains(&needle) || p.kind.key().contains(&needle)
        })
        .collect()
}

/// Agenda list filters. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaFilter {
    /// Provider display name
    pub provider: Option<String>,
    /// Specialty display name
    pub specialty: Option<String>,
    /// Entry must include at least one of these days
    pub days: Vec<Weekday>,
}

impl AgendaFilter {
    /// Changing the provider clears the specialty.
    pub fn set_provider(&mut self, provider: Option<String>) {
        self.provider = provider;
        self.specialty = None;
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        crate::models::toggle_day(&mut self.days, day);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, entry: &AgendaEntry) -> bool {
        let same = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .map_or(true, |w| fold(w).is_empty() || fold(w) == fold(actual))
        };
        same(&self.provider, &entry.prestador)
            && same(&self.specialty, &entry.especialidad)
            && (self.days.is_empty() || self.days.iter().any(|d| entry.dias.contains(d)))
    }
}

pub fn filter_agendas<'a>(all: &'a [AgendaEntry], filter: &AgendaFilter) -> Vec<&'a AgendaEntry> {
    all.iter().filter(|e| filter.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plan;

    fn affiliate(dni: &str, credential: &str, nombre: &str, apellido: &str, plan: &str) -> Affiliate {
        let mut a = Affiliate::new(dni, credential);
        a.first_name = nombre.into();
        a.last_name = apellido.into();
        a.plan = Some(Plan::new(1, plan));
        a
    }

    fn affiliates() -> Vec<Affiliate> {
        vec![
            affiliate("23456789", "0000001-01", "José", "Pérez", "210"),
            affiliate("34567890", "0000001-02", "María", "Muñoz", "210"),
            affiliate("45678901", "0000002-01", "Lucas", "Gómez", "310"),
        ]
    }

    #[test]
    fn test_affiliate_search_is_accent_insensitive() {
        let all = affiliates();
        let q = AffiliateQuery::new(AffiliateSearchField::Apellido, "perez");
        let found = filter_affiliates(&all, &q);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dni, "23456789");

        let q = AffiliateQuery::new(AffiliateSearchField::Nombre, "MARÍA");
        assert_eq!(filter_affiliates(&all, &q).len(), 1);
    }

    #[test]
    fn test_affiliate_search_fields() {
        let all = affiliates();
        let by_plan = AffiliateQuery::new(AffiliateSearchField::Plan, "210");
        assert_eq!(filter_affiliates(&all, &by_plan).len(), 2);

        let by_credential = AffiliateQuery::new(AffiliateSearchField::Credencial, "0000002");
        assert_eq!(filter_affiliates(&all, &by_credential).len(), 1);

        let empty = AffiliateQuery::new(AffiliateSearchField::Dni, "  ");
        assert_eq!(filter_affiliates(&all, &empty).len(), 3);
    }

    fn providers() -> Vec<Provider> {
        vec![
            Provider::new("20-11111111-1", "Ana Pérez", ProviderKind::Professional),
            Provider::new("30-22222222-2", "Clínica del Sol", ProviderKind::Center),
            Provider::new("20-33333333-3", "Bruno Díaz", ProviderKind::Professional),
        ]
    }

    #[test]
    fn test_kind_toggle() {
        let f = ProviderKindFilter::All.toggle(ProviderKind::Center);
        assert_eq!(f, ProviderKindFilter::Only(ProviderKind::Center));
        assert_eq!(f.toggle(ProviderKind::Center), ProviderKindFilter::All);
        assert_eq!(
            f.toggle(ProviderKind::Professional),
            ProviderKindFilter::Only(ProviderKind::Professional)
        );
    }

    #[test]
    fn test_provider_filters_combine() {
        let all = providers();
        let mut q = ProviderQuery {
            kind: ProviderKindFilter::Only(ProviderKind::Professional),
            ..ProviderQuery::default()
        };
        assert_eq!(filter_providers(&all, &q).len(), 2);

        q.field = ProviderSearchField::CuilCuit;
        q.text = "33333".into();
        let found = filter_providers(&all, &q);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name, "Bruno Díaz");

        q.field = ProviderSearchField::NombreCompleto;
        q.text = "clínica".into();
        assert!(filter_providers(&all, &q).is_empty());
    }

    #[test]
    fn test_search_providers_by_name_or_kind() {
        let all = providers();
        assert_eq!(search_providers(&all, "centro").len(), 1);
        assert_eq!(search_providers(&all, "ana").len(), 1);
        assert_eq!(search_providers(&all, "profesional").len(), 2);
        assert_eq!(search_providers(&all, "").len(), 3);
    }

    #[test]
    fn test_agenda_filter() {
        let entry = |id: &str, prestador: &str, esp: &str, dias: Vec<Weekday>| AgendaEntry {
            id: id.into(),
            prestador: prestador.into(),
            especialidad: esp.into(),
            lugar: "Sede".into(),
            dias,
            horario: "08:00 - 12:00".into(),
            duracion: 30,
        };
        let all = vec![
            entry("1", "Tito Merello", "Cardiología", vec![Weekday::Monday]),
            entry("2", "Juan Pérez", "Pediatría", vec![Weekday::Tuesday, Weekday::Thursday]),
        ];

        let mut f = AgendaFilter::default();
        assert_eq!(filter_agendas(&all, &f).len(), 2);

        f.toggle_day(Weekday::Thursday);
        assert_eq!(filter_agendas(&all, &f)[0].id, "2");

        f.clear();
        f.set_provider(Some("tito merello".into()));
        f.specialty = Some("cardiologia".into());
        assert_eq!(filter_agendas(&all, &f)[0].id, "1");

        f.set_provider(Some("Juan Pérez".into()));
        assert!(f.specialty.is_none());
        assert_eq!(filter_agendas(&all, &f).len(), 1);
    }
}
