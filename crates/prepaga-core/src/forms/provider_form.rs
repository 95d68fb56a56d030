//! Provider create/edit form.

use thiserror::Error;
use tracing::debug;

use super::non_blank;
use crate::models::{
    toggle_day, AttendanceAddress, CenterRef, Cuit, Provider, ProviderKind, TimeBlock, Weekday,
};
use crate::text::is_blank;

/// Provider form errors. Only the first failing check is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFormError {
    #[error("Debe seleccionar si es profesional o centro médico.")]
    MissingKind,

    #[error("Complete el CUIL/CUIT y el nombre completo.")]
    MissingIdentity,

    #[error("El CUIT/CUIL debe tener 11 dígitos. Formato: XX-XXXXXXXX-X")]
    InvalidCuit,

    #[error("Debe seleccionar al menos una especialidad.")]
    MissingSpecialty,
}

/// One attendance address with its time blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressForm {
    pub label: String,
    pub street: String,
    pub number: String,
    pub locality: String,
    pub province: String,
    pub postal_code: String,
    pub blocks: Vec<TimeBlock>,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            label: String::new(),
            street: String::new(),
            number: String::new(),
            locality: String::new(),
            province: String::new(),
            postal_code: String::new(),
            blocks: vec![TimeBlock::default()],
        }
    }
}

impl AddressForm {
    pub fn add_block(&mut self) {
        self.blocks.push(TimeBlock::default());
    }

    /// Remove a block. Removing the last one leaves a single empty block.
    pub fn remove_block(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.blocks.remove(index);
        }
        if self.blocks.is_empty() {
            self.blocks.push(TimeBlock::default());
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

    fn from_address(a: &AttendanceAddress) -> Self {
        let mut form = Self {
            label: a.label.clone().unwrap_or_default(),
            street: a.street.clone(),
            number: a.number.clone().unwrap_or_default(),
            locality: a.locality.clone().unwrap_or_default(),
            province: a.province.clone().unwrap_or_default(),
            postal_code: a.postal_code.clone(),
            blocks: a.schedule.clone(),
        };
        if form.blocks.is_empty() {
            form.blocks.push(TimeBlock::default());
        }
        form
    }

    fn is_empty_row(&self) -> bool {
        is_blank(&self.street) && is_blank(&self.number) && !self.blocks.iter().any(TimeBlock::is_complete)
    }

    fn to_address(&self) -> AttendanceAddress {
        let opt = |s: &str| (!is_blank(s)).then(|| s.trim().to_string());
        AttendanceAddress {
            label: opt(&self.label),
            street: self.street.trim().to_string(),
            number: opt(&self.number),
            locality: opt(&self.locality),
            province: opt(&self.province),
            postal_code: self.postal_code.trim().to_string(),
            schedule: self
                .blocks
                .iter()
                .filter(|b| b.is_complete())
                .cloned()
                .collect(),
        }
    }
}

/// Provider form state. Repeatable lists start with one empty row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderForm {
    /// Local id kept when editing
    id: Option<String>,
    pub kind: Option<ProviderKind>,
    pub cuil_cuit: String,
    pub full_name: String,
    pub specialties: Vec<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub addresses: Vec<AddressForm>,
    /// Center the professional works at, by id
    pub center_id: String,
}

impl Default for ProviderForm {
    fn default() -> Self {
        Self {
            id: None,
            kind: None,
            cuil_cuit: String::new(),
            full_name: String::new(),
            specialties: vec![String::new()],
            phones: vec![String::new()],
            emails: vec![String::new()],
            addresses: vec![AddressForm::default()],
            center_id: String::new(),
        }
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

impl ProviderForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit form prefilled from an existing provider.
    pub fn from_provider(p: &Provider) -> Self {
        let or_one_empty = |v: &[String]| {
            if v.is_empty() {
                vec![String::new()]
            } else {
                v.to_vec()
            }
        };
        let addresses = if p.addresses.is_empty() {
            vec![AddressForm::default()]
        } else {
            p.addresses.iter().map(AddressForm::from_address).collect()
        };

        Self {
            id: Some(p.id.clone()),
            kind: Some(p.kind),
            cuil_cuit: p.cuil_cuit.clone(),
            full_name: p.full_name.clone(),
            specialties: or_one_empty(&p.specialties),
            phones: or_one_empty(&p.phones),
            emails: or_one_empty(&p.emails),
            addresses,
            center_id: p
                .center_name()
                .and(p.center.as_ref())
                .map(|c| c.id.clone())
                .unwrap_or_default(),
        }
    }

    pub fn add_specialty(&mut self) {
        self.specialties.push(String::new());
    }

    pub fn remove_specialty(&mut self, index: usize) {
        remove_at(&mut self.specialties, index);
    }

    pub fn add_phone(&mut self) {
        self.phones.push(String::new());
    }

    pub fn remove_phone(&mut self, index: usize) {
        remove_at(&mut self.phones, index);
    }

    pub fn add_email(&mut self) {
        self.emails.push(String::new());
    }

    pub fn remove_email(&mut self, index: usize) {
        remove_at(&mut self.emails, index);
    }

    pub fn add_address(&mut self) {
        self.addresses.push(AddressForm::default());
    }

    pub fn remove_address(&mut self, index: usize) {
        remove_at(&mut self.addresses, index);
    }

    pub fn address_mut(&mut self, index: usize) -> Option<&mut AddressForm> {
        self.addresses.get_mut(index)
    }

    /// Switching to a center drops the center membership.
    pub fn set_kind(&mut self, kind: ProviderKind) {
        self.kind = Some(kind);
        if kind == ProviderKind::Center {
            self.center_id.clear();
        }
    }

    /// Checks run in order; the first failure is returned.
    pub fn validate(&self) -> Result<(), ProviderFormError> {
        if self.kind.is_none() {
            return Err(ProviderFormError::MissingKind);
        }
        if is_blank(&self.cuil_cuit) || is_blank(&self.full_name) {
            return Err(ProviderFormError::MissingIdentity);
        }
        if self.cuil_cuit.trim().parse::<Cuit>().is_err() {
            return Err(ProviderFormError::InvalidCuit);
        }
        if non_blank(&self.specialties).is_empty() {
            return Err(ProviderFormError::MissingSpecialty);
        }
        Ok(())
    }

    /// Build the provider: blank rows and incomplete blocks are dropped and
    /// a center never carries a center reference. `centers` resolves the
    /// selected center's name.
    pub fn to_provider(&self, centers: &[Provider]) -> Result<Provider, ProviderFormError> {
        self.validate()?;
        let kind = self.kind.ok_or(ProviderFormError::MissingKind)?;
        let cuil_cuit = self.cuil_cuit.trim().to_string();

        let center = match kind {
            ProviderKind::Professional if !is_blank(&self.center_id) => {
                let name = centers
                    .iter()
                    .find(|c| c.is_center() && c.id == self.center_id)
                    .map(|c| c.full_name.clone())
                    .unwrap_or_default();
                Some(CenterRef {
                    id: self.center_id.clone(),
                    name,
                })
            }
            _ => None,
        };

        let provider = Provider {
            id: self.id.clone().unwrap_or_else(|| cuil_cuit.clone()),
            cuil_cuit,
            full_name: self.full_name.trim().to_string(),
            kind,
            specialties: non_blank(&self.specialties),
            center,
            phones: non_blank(&self.phones),
            emails: non_blank(&self.emails),
            addresses: self
                .addresses
                .iter()
                .filter(|a| !a.is_empty_row())
                .map(AddressForm::to_address)
                .collect(),
        };
        debug!(cuit = %provider.cuil_cuit, kind = provider.kind.key(), "Built provider from form");
        Ok(provider.normalized())
    }
}
