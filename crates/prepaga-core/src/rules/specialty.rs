//! Specialty catalog and the provider → specialty cascading selection.

use tracing::debug;

use crate::models::{Provider, Specialty};

/// Lookup table of specialties by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtyCatalog {
    entries: Vec<Specialty>,
}

impl SpecialtyCatalog {
    pub fn new(entries: Vec<Specialty>) -> Self {
        Self { entries }
    }

    /// The catalog used while the specialties endpoint is unavailable.
    pub fn builtin() -> Self {
        let entries = [
            ("clinica", "Clínica"),
            ("pediatria", "Pediatría"),
            ("cardiologia", "Cardiología"),
            ("dermatologia", "Dermatología"),
            ("oftalmologia", "Oftalmología"),
            ("otorrino", "Otorrinolaringología"),
            ("ginecologia", "Ginecología"),
            ("resonancia", "Resonancias"),
        ]
        .into_iter()
        .map(|(id, name)| Specialty::new(id, name))
        .collect();
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Specialty> {
        self.entries.iter().find(|s| s.id == id)
    }

    /// Display name for an id, falling back to the raw id.
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|s| s.name.as_str()).unwrap_or(id)
    }

    pub fn entries(&self) -> &[Specialty] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One entry in the specialty dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyOption {
    pub id: String,
    pub label: String,
}

/// Options for a provider: exactly its declared specialties, in order.
pub fn specialty_options(provider: &Provider, catalog: &SpecialtyCatalog) -> Vec<SpecialtyOption> {
    provider
        .specialties
        .iter()
        .map(|id| SpecialtyOption {
            id: id.clone(),
            label: catalog.label_for(id).to_string(),
        })
        .collect()
}

/// Label of a provider's first specialty for the providers table, `"-"` when
/// the provider declares none.
pub fn first_specialty_label(provider: &Provider, catalog: &SpecialtyCatalog) -> String {
    provider
        .specialties
        .first()
        .map(|id| catalog.label_for(id).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// State of the provider and specialty selects in the agenda forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtySelection {
    provider_id: Option<String>,
    options: Vec<SpecialtyOption>,
    selected: Option<String>,
}

impl SpecialtySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a provider (or none). Always resets the chosen specialty, then
    /// auto-selects when the provider has a single specialty.
    pub fn select_provider(&mut self, provider: Option<&Provider>, catalog: &SpecialtyCatalog) {
        self.selected = None;
        match provider {
            Some(p) => {
                self.provider_id = Some(p.id.clone());
                self.options = specialty_options(p, catalog);
                if let [only] = self.options.as_slice() {
                    self.selected = Some(only.id.clone());
                }
                debug!(
                    provider = %p.id,
                    options = self.options.len(),
                    auto_selected = self.selected.is_some(),
                    "Provider selected"
                );
            }
            None => {
                self.provider_id = None;
                self.options.clear();
            }
        }
    }

    /// Choose a specialty. Ids outside the current options are rejected.
    pub fn choose(&mut self, id: &str) -> bool {
        if self.options.iter().any(|o| o.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Clear the specialty, keeping the provider.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    pub fn options(&self) -> &[SpecialtyOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Label of the chosen specialty.
    pub fn selected_label(&self) -> Option<&str> {
        let id = self.selected.as_deref()?;
        self.options
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderKind;

    fn provider(id: &str, specialties: &[&str]) -> Provider {
        let mut p = Provider::new(id, format!("Prestador {}", id), ProviderKind::Professional);
        p.specialties = specialties.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn test_options_preserve_order_and_fallback() {
        let catalog = SpecialtyCatalog::builtin();
        let p = provider("p1", &["pediatria", "clinica", "acupuntura"]);
        let options = specialty_options(&p, &catalog);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Pediatría", "Clínica", "acupuntura"]);
    }

    #[test]
    fn test_single_specialty_auto_selects() {
        let catalog = SpecialtyCatalog::builtin();
        let mut sel = SpecialtySelection::new();
        sel.select_provider(Some(&provider("p1", &["cardiologia"])), &catalog);
        assert_eq!(sel.selected(), Some("cardiologia"));
        assert_eq!(sel.selected_label(), Some("Cardiología"));
    }

    #[test]
    fn test_changing_provider_resets_selection() {
        let catalog = SpecialtyCatalog::builtin();
        let mut sel = SpecialtySelection::new();
        sel.select_provider(Some(&provider("p1", &["clinica", "pediatria"])), &catalog);
        assert_eq!(sel.selected(), None);
        assert!(sel.choose("pediatria"));
        assert!(!sel.choose("cardiologia"));
        assert_eq!(sel.selected(), Some("pediatria"));

        sel.select_provider(Some(&provider("p2", &["clinica", "dermatologia"])), &catalog);
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.provider_id(), Some("p2"));

        sel.select_provider(None, &catalog);
        assert!(sel.options().is_empty());
        assert_eq!(sel.provider_id(), None);
    }

    #[test]
    fn test_first_specialty_label() {
        let catalog = SpecialtyCatalog::builtin();
        assert_eq!(first_specialty_label(&provider("p", &["otorrino"]), &catalog), "Otorrinolaringología");
        assert_eq!(first_specialty_label(&provider("p", &["42"]), &catalog), "42");
        assert_eq!(first_specialty_label(&provider("p", &[]), &catalog), "-");
    }
}
