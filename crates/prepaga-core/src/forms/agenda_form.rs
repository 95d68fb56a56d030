//! Agenda create and edit forms.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::parse_leading_int;
use crate::models::{
    join_ranges, toggle_day, AgendaEntry, Provider, TimeBlock, Weekday, DEFAULT_DURATION_MINUTES,
};
use crate::rules::specialty::{SpecialtyCatalog, SpecialtySelection};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaFormError {
    #[error("Debe seleccionar un prestador.")]
    MissingProvider,

    #[error("Debe configurar al menos un bloque horario con días y horarios válidos.")]
    NoValidBlock,
}

/// Days of every complete block, deduplicated in first-seen order.
fn union_days<'a>(blocks: impl IntoIterator<Item = &'a TimeBlock>) -> Vec<Weekday> {
    let mut days = Vec::new();
    for day in blocks.into_iter().flat_map(|b| b.days.iter()) {
        if !days.contains(day) {
            days.push(*day);
        }
    }
    days
}

fn complete_blocks(blocks: &[TimeBlock]) -> Vec<&TimeBlock> {
    blocks.iter().filter(|b| b.is_complete()).collect()
}

/// New-agenda form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaForm {
    /// Text in the provider search box
    pub provider_search: String,
    selection: SpecialtySelection,
    pub place: String,
    /// Appointment length as typed
    pub duration: String,
    pub blocks: Vec<TimeBlock>,
}

impl Default for AgendaForm {
    fn default() -> Self {
        Self {
            provider_search: String::new(),
            selection: SpecialtySelection::new(),
            place: String::new(),
            duration: DEFAULT_DURATION_MINUTES.to_string(),
            blocks: vec![TimeBlock::default()],
        }
    }
}

impl AgendaForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a provider from the search results. The search box shows its
    /// name and the specialty options follow the provider.
    pub fn select_provider(&mut self, provider: &Provider, catalog: &SpecialtyCatalog) {
        self.selection.select_provider(Some(provider), catalog);
        self.provider_search = provider.full_name.clone();
    }

    /// Type into the search box. Clearing it clears the provider.
    pub fn set_provider_search(&mut self, text: &str, catalog: &SpecialtyCatalog) {
        self.provider_search = text.to_string();
        if text.trim().is_empty() {
            self.selection.select_provider(None, catalog);
        }
    }

    pub fn choose_specialty(&mut self, id: &str) -> bool {
        self.selection.choose(id)
    }

    pub fn selection(&self) -> &SpecialtySelection {
        &self.selection
    }

    pub fn add_block(&mut self) {
        self.blocks.push(TimeBlock::default());
    }

    /// The last remaining block cannot be removed.
    pub fn remove_block(&mut self, index: usize) {
        if self.blocks.len() > 1 && index < self.blocks.len() {
            self.blocks.remove(index);
        }
    }

    pub fn toggle_day(&mut self, block: usize, day: Weekday) {
        if let Some(b) = self.blocks.get_mut(block) {
            toggle_day(&mut b.days, day);
        }
    }

    pub fn set_hours(&mut self, block: usize, from: &str, to: &str) {
        if let Some(b) = self.blocks.get_mut(block) {
            b.from = from.to_string();
            b.to = to.to_string();
        }
    }

    pub fn validate(&self) -> Result<(), AgendaFormError> {
        if self.selection.provider_id().is_none() {
            return Err(AgendaFormError::MissingProvider);
        }
        if complete_blocks(&self.blocks).is_empty() {
            return Err(AgendaFormError::NoValidBlock);
        }
        Ok(())
    }

    /// Build the agenda entry. Incomplete blocks are ignored; an unparsable
    /// duration becomes 0.
    pub fn to_entry(&self, providers: &[Provider]) -> Result<AgendaEntry, AgendaFormError> {
        self.validate()?;
        let provider_id = self
            .selection
            .provider_id()
            .ok_or(AgendaFormError::MissingProvider)?;
        let blocks = complete_blocks(&self.blocks);

        let entry = AgendaEntry {
            id: Uuid::new_v4().to_string(),
            prestador: providers
                .iter()
                .find(|p| p.id == provider_id)
                .map(|p| p.full_name.clone())
                .unwrap_or_default(),
            especialidad: self.selection.selected_label().unwrap_or_default().to_string(),
            lugar: self.place.clone(),
            dias: union_days(blocks.iter().copied()),
            horario: join_ranges(blocks.iter().copied()),
            duracion: parse_leading_int(&self.duration)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
        };
        debug!(id = %entry.id, blocks = blocks.len(), "Built agenda entry");
        Ok(entry)
    }
}

/// Edit form for an existing agenda entry, one block per time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEditForm {
    id: String,
    pub prestador: String,
    pub especialidad: String,
    pub lugar: String,
    pub duracion: u32,
    pub blocks: Vec<TimeBlock>,
}

impl AgendaEditForm {
    pub fn from_entry(entry: &AgendaEntry) -> Self {
        Self {
            id: entry.id.clone(),
            prestador: entry.prestador.clone(),
            especialidad: entry.especialidad.clone(),
            lugar: entry.lugar.clone(),
            duracion: entry.duracion,
            blocks: entry.to_blocks(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_block(&mut self) {
        self.blocks.push(TimeBlock::default());
    }

    pub fn remove_block(&mut self, index: usize) {
        if self.blocks.len() > 1 && index < self.blocks.len() {
            self.blocks.remove(index);
        }
    }

    pub fn toggle_day(&mut self, block: usize, day: Weekday) {
        if let Some(b) = self.blocks.get_mut(block) {
            toggle_day(&mut b.days, day);
        }
    }

    pub fn set_hours(&mut self, block: usize, from: &str, to: &str) {
        if let Some(b) = self.blocks.get_mut(block) {
            b.from = from.to_string();
            b.to = to.to_string();
        }
    }

    /// Updated entry. Every complete block is kept.
    pub fn apply(&self) -> Result<AgendaEntry, AgendaFormError> {
        let blocks = complete_blocks(&self.blocks);
        if blocks.is_empty() {
            return Err(AgendaFormError::NoValidBlock);
        }
        Ok(AgendaEntry {
            id: self.id.clone(),
            prestador: self.prestador.clone(),
            especialidad: self.especialidad.clone(),
            lugar: self.lugar.clone(),
            dias: union_days(blocks.iter().copied()),
            horario: join_ranges(blocks.iter().copied()),
            duracion: self.duracion,
        })
    }
}
