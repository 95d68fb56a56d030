//! Screen controllers.
//!
//! Each controller owns the list a screen shows and mutates it only after
//! the matching call succeeded. Validation always runs first; a form with
//! errors never reaches the transport.

use chrono::NaiveDate;
use prepaga_core::forms::{
    AffiliateEditForm, AffiliateForm, AgendaEditForm, AgendaForm, AgendaFormError,
    FamilyMemberForm, ProviderForm, ProviderFormError,
};
use prepaga_core::listing::pagination::{
    AFFILIATES_PAGE_SIZE, FAMILY_PAGE_SIZE, PROVIDERS_DESKTOP_PAGE_SIZE,
    PROVIDERS_MOBILE_PAGE_SIZE,
};
use prepaga_core::listing::{
    filter_affiliates, filter_agendas, filter_providers, AffiliateQuery, AffiliateSearchField,
    AgendaFilter, Paginator, ProviderKindFilter, ProviderQuery, ProviderSearchField,
};
use prepaga_core::models::{Affiliate, AgendaEntry, Provider, ProviderKind};
use prepaga_core::rules::family::{apply_local_deletion, DeletionPlan, FamilyGroup};
use prepaga_core::rules::schedule::{scheduled_date_iso, ScheduleOutcome};
use prepaga_core::rules::specialty::SpecialtyCatalog;
use prepaga_core::ValidationErrors;
use tracing::{error, info, warn};

use crate::api::BackOfficeClient;
use crate::transport::Transport;
use crate::{ApiError, ApiResult};

/// Success message after creating an affiliate and its family.
pub const AFFILIATE_CREATED: &str = "Afiliado y familiares creados con éxito";

pub const PROVIDER_CREATED: &str = "Prestador agregado correctamente.";

/// Shown when a call fails without a server message.
pub const SAVE_FAILED: &str = "Error al guardar. Verifica la conexión con el servidor.";

/// Route after a successful affiliate creation.
pub const HOME_ROUTE: &str = "/home";

pub const PROVIDERS_ROUTE: &str = "/prestadores";

/// Shown when the family endpoint returns no members.
pub const FAMILY_NOT_FOUND: &str = "No se encontraron afiliados en el grupo familiar";

/// Error key for a failed submission.
pub const SUBMIT_KEY: &str = "submit";

/// Error key for provider form checks, which report one message at a time.
pub const PROVIDER_FORM_KEY: &str = "form";

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked(ValidationErrors),
    Created {
        message: String,
        navigate_to: &'static str,
    },
    Saved {
        message: String,
    },
    /// The call failed; the message is under [`SUBMIT_KEY`].
    Failed(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. } | SubmitOutcome::Saved { .. })
    }

    /// Field errors to show, if any.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmitOutcome::Blocked(e) | SubmitOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    fn failed(err: &ApiError) -> Self {
        let mut errors = ValidationErrors::new();
        errors.insert(SUBMIT_KEY, user_message(err));
        SubmitOutcome::Failed(errors)
    }
}

/// Text shown to the user for a failed call.
pub fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
        ApiError::Validation(errors) => errors.to_string(),
        ApiError::InvalidProvider(e) => e.to_string(),
        _ => SAVE_FAILED.to_string(),
    }
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub rows: Vec<&'a T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// `"start–end / total"`
    pub range_label: String,
}

fn page_of<'a, T>(pager: &mut Paginator, rows: Vec<&'a T>) -> PageView<'a, T> {
    pager.clamp(rows.len());
    let range_label = pager.range_label(rows.len());
    let page = pager.slice(&rows);
    PageView {
        rows: page.items.to_vec(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
        range_label,
    }
}

// ==================== Affiliates ====================

/// Result of a confirmed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    /// Rows removed from the local list
    pub removed: usize,
    pub message: String,
}

/// Affiliates screen: list, search, pagination, deletion.
#[derive(Debug, Clone)]
pub struct AffiliateDirectory {
    affiliates: Vec<Affiliate>,
    query: AffiliateQuery,
    pager: Paginator,
    pending: Option<DeletionPlan>,
}

impl Default for AffiliateDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AffiliateDirectory {
    pub fn new(affiliates: Vec<Affiliate>) -> Self {
        Self {
            affiliates,
            query: AffiliateQuery::default(),
            pager: Paginator::new(AFFILIATES_PAGE_SIZE),
            pending: None,
        }
    }

    /// Re-fetch the whole list.
    pub fn refresh<T: Transport>(&mut self, client: &BackOfficeClient<T>) -> ApiResult<usize> {
        self.affiliates = client.list_affiliates()?;
        info!(count = self.affiliates.len(), "Affiliates loaded");
        Ok(self.affiliates.len())
    }

    pub fn affiliates(&self) -> &[Affiliate] {
        &self.affiliates
    }

    /// New search text or field; back to the first page.
    pub fn search(&mut self, field: AffiliateSearchField, text: &str) {
        self.query = AffiliateQuery::new(field, text);
        self.pager.reset();
    }

    pub fn filtered(&self) -> Vec<&Affiliate> {
        filter_affiliates(&self.affiliates, &self.query)
    }

    pub fn current_page(&mut self) -> PageView<'_, Affiliate> {
        let rows = filter_affiliates(&self.affiliates, &self.query);
        page_of(&mut self.pager, rows)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let len = self.filtered().len();
        self.pager.go_to(page, len);
    }

    /// Open the delete dialog for a DNI. The plan carries the confirmation
    /// text, with the family warning for titulars.
    pub fn request_deletion(&mut self, dni: &str) -> Option<&DeletionPlan> {
        let affiliate = self.affiliates.iter().find(|a| a.dni == dni)?;
        self.pending = Some(DeletionPlan::for_affiliate(affiliate));
        self.pending.as_ref()
    }

    pub fn pending_deletion(&self) -> Option<&DeletionPlan> {
        self.pending.as_ref()
    }

    pub fn cancel_deletion(&mut self) {
        self.pending = None;
    }

    /// Issue the single delete call for the pending plan.
    ///
    /// Returns `Ok(None)` when there is nothing to confirm. The call holds
    /// `&mut self`, so a second delete cannot start while one is in flight.
    /// The dialog closes whatever the result.
    pub fn confirm_deletion<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
    ) -> ApiResult<Option<Deleted>> {
        let Some(plan) = self.pending.take() else {
            return Ok(None);
        };
        let removed = delete_planned(client, &plan, &mut self.affiliates)?;
        let remaining = self.filtered().len();
        self.pager.clamp(remaining);
        Ok(Some(Deleted {
            removed,
            message: deleted_message(&plan),
        }))
    }

    /// Submit a scheduled deletion for the picked date, then judge it.
    pub fn schedule_deletion<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
        dni: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> ApiResult<ScheduleOutcome> {
        let name = self
            .affiliates
            .iter()
            .find(|a| a.dni == dni)
            .map(Affiliate::full_name);
        let outcome = schedule_and_judge(client, dni, name.as_deref(), date, today)?;
        self.pending = None;
        Ok(outcome)
    }

    /// Save an edited affiliate and re-fetch the list.
    pub fn save_edit<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
        form: &AffiliateEditForm,
        today: NaiveDate,
    ) -> SubmitOutcome {
        let errors = form.validate(today);
        if !errors.is_empty() {
            return SubmitOutcome::Blocked(errors);
        }
        let update = form.to_update();
        if let Err(e) = client.update_affiliate(form.original_dni(), &update) {
            return SubmitOutcome::failed(&e);
        }
        if let Err(e) = self.refresh(client) {
            warn!(error = %e, "Could not reload affiliates after update");
        }
        SubmitOutcome::Saved {
            message: format!("Afiliado {} actualizado", update.nombre),
        }
    }
}

fn deleted_message(plan: &DeletionPlan) -> String {
    format!("Afiliado {} eliminado correctamente", plan.display_name)
}

/// One delete call for `plan`; `list` is only touched once it succeeded.
fn delete_planned<T: Transport>(
    client: &BackOfficeClient<T>,
    plan: &DeletionPlan,
    list: &mut Vec<Affiliate>,
) -> ApiResult<usize> {
    if let Err(e) = client.delete_affiliate(&plan.dni) {
        error!(dni = %plan.dni, error = %e, "Affiliate deletion failed");
        return Err(e);
    }
    Ok(apply_local_deletion(list, plan))
}

/// Post the schedule for local midnight of `date`, then judge `date`
/// itself. The check only picks the result dialog; it runs after the call
/// returned.
fn schedule_and_judge<T: Transport>(
    client: &BackOfficeClient<T>,
    dni: &str,
    name: Option<&str>,
    date: NaiveDate,
    today: NaiveDate,
) -> ApiResult<ScheduleOutcome> {
    client.schedule_affiliate_deletion(dni, &scheduled_date_iso(date))?;
    let outcome = ScheduleOutcome::for_date(name, date, today);
    if outcome.is_error() {
        warn!(dni = %dni, %date, "Scheduled deletion date is not in the future");
    }
    Ok(outcome)
}

/// Fetch the family group of a DNI or base credential.
pub fn load_family_group<T: Transport>(
    client: &BackOfficeClient<T>,
    dni: &str,
) -> ApiResult<Option<FamilyGroup>> {
    Ok(FamilyGroup::from_members(client.family_group(dni)?))
}

// ==================== Family group ====================

/// Family-group screen: the titular card plus a paginated table of the
/// other members.
#[derive(Debug, Clone)]
pub struct FamilyGroupView {
    /// DNI or base credential the screen was opened with
    key: String,
    group: Option<FamilyGroup>,
    pager: Paginator,
    pending: Option<DeletionPlan>,
}

impl FamilyGroupView {
    /// Empty view; [`FamilyGroupView::refresh`] loads it.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            group: None,
            pager: Paginator::new(FAMILY_PAGE_SIZE),
            pending: None,
        }
    }

    /// Open the screen for `key` and load it.
    pub fn open<T: Transport>(client: &BackOfficeClient<T>, key: &str) -> ApiResult<Self> {
        let mut view = Self::new(key);
        view.refresh(client)?;
        Ok(view)
    }

    /// Re-fetch the group. Returns the member count, titular included.
    pub fn refresh<T: Transport>(&mut self, client: &BackOfficeClient<T>) -> ApiResult<usize> {
        self.group = load_family_group(client, &self.key)?;
        let count = self.group.as_ref().map_or(0, FamilyGroup::len);
        if count == 0 {
            warn!(key = %self.key, "{}", FAMILY_NOT_FOUND);
        } else {
            info!(key = %self.key, count, "Family group loaded");
        }
        let others = self.others().len();
        self.pager.clamp(others);
        Ok(count)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn group(&self) -> Option<&FamilyGroup> {
        self.group.as_ref()
    }

    pub fn titular(&self) -> Option<&Affiliate> {
        self.group.as_ref().map(FamilyGroup::titular)
    }

    /// Members shown in the table: everyone but the titular.
    pub fn others(&self) -> &[Affiliate] {
        self.group
            .as_ref()
            .map(FamilyGroup::others)
            .unwrap_or_default()
    }

    /// The group's plan, read from the titular.
    pub fn plan_name(&self) -> &str {
        self.titular().map_or("", Affiliate::plan_name)
    }

    pub fn current_page(&mut self) -> PageView<'_, Affiliate> {
        let rows: Vec<&Affiliate> = match &self.group {
            Some(group) => group.others().iter().collect(),
            None => Vec::new(),
        };
        page_of(&mut self.pager, rows)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let len = self.others().len();
        self.pager.go_to(page, len);
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    pub fn next_page(&mut self) {
        let len = self.others().len();
        self.pager.next(len);
    }

    /// Attach a new member to this group and re-fetch it.
    ///
    /// The member goes out as the only family row of a creation request
    /// addressed to the titular's DNI.
    pub fn add_member<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
        member: &FamilyMemberForm,
        today: NaiveDate,
    ) -> SubmitOutcome {
        let errors = member.validate(today);
        if !errors.is_empty() {
            return SubmitOutcome::Blocked(errors);
        }
        let Some(titular) = self.titular() else {
            let mut errors = ValidationErrors::new();
            errors.insert(SUBMIT_KEY, FAMILY_NOT_FOUND);
            return SubmitOutcome::Failed(errors);
        };

        let mut form = AffiliateForm::for_titular(titular);
        form.family.push(member.clone());
        if let Err(e) = client.create_affiliate(&form.to_payload(today)) {
            return SubmitOutcome::failed(&e);
        }
        if let Err(e) = self.refresh(client) {
            warn!(error = %e, "Could not reload family group after adding a member");
        }
        SubmitOutcome::Saved {
            message: format!(
                "Familiar {} {} agregado",
                member.first_name.trim(),
                member.last_name.trim()
            ),
        }
    }

    /// Open the delete dialog for a member of this group.
    pub fn request_deletion(&mut self, dni: &str) -> Option<&DeletionPlan> {
        let group = self.group.as_ref()?;
        let affiliate = std::iter::once(group.titular())
            .chain(group.others())
            .find(|a| a.dni == dni)?;
        self.pending = Some(DeletionPlan::for_affiliate(affiliate));
        self.pending.as_ref()
    }

    pub fn pending_deletion(&self) -> Option<&DeletionPlan> {
        self.pending.as_ref()
    }

    pub fn cancel_deletion(&mut self) {
        self.pending = None;
    }

    /// Issue the delete call for the pending plan. Removing the titular
    /// empties the view.
    pub fn confirm_deletion<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
    ) -> ApiResult<Option<Deleted>> {
        let Some(plan) = self.pending.take() else {
            return Ok(None);
        };
        let mut members = self
            .group
            .clone()
            .map(FamilyGroup::into_members)
            .unwrap_or_default();
        let removed = delete_planned(client, &plan, &mut members)?;
        self.group = FamilyGroup::from_members(members);
        let others = self.others().len();
        self.pager.clamp(others);
        Ok(Some(Deleted {
            removed,
            message: deleted_message(&plan),
        }))
    }

    /// Schedule a member's deletion for the picked date.
    pub fn schedule_deletion<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
        dni: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> ApiResult<ScheduleOutcome> {
        let name = self
            .group
            .as_ref()
            .and_then(|g| {
                std::iter::once(g.titular())
                    .chain(g.others())
                    .find(|a| a.dni == dni)
            })
            .map(Affiliate::full_name);
        let outcome = schedule_and_judge(client, dni, name.as_deref(), date, today)?;
        self.pending = None;
        Ok(outcome)
    }
}

/// Validate and create an affiliate with its family members.
pub fn submit_new_affiliate<T: Transport>(
    client: &BackOfficeClient<T>,
    form: &AffiliateForm,
    today: NaiveDate,
) -> SubmitOutcome {
    let errors = form.validate(today);
    if !errors.is_empty() {
        info!(errors = errors.len(), "Affiliate submission blocked by validation");
        return SubmitOutcome::Blocked(errors);
    }
    match client.create_affiliate(&form.to_payload(today)) {
        Ok(_) => SubmitOutcome::Created {
            message: AFFILIATE_CREATED.to_string(),
            navigate_to: HOME_ROUTE,
        },
        Err(e) => SubmitOutcome::failed(&e),
    }
}

// ==================== Providers ====================

/// Providers screen: kind toggles, search, pagination, edit and delete.
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    providers: Vec<Provider>,
    query: ProviderQuery,
    pager: Paginator,
}

impl Default for ProviderDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProviderDirectory {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self {
            providers,
            query: ProviderQuery::default(),
            pager: Paginator::new(PROVIDERS_DESKTOP_PAGE_SIZE),
        }
    }

    pub fn refresh<T: Transport>(&mut self, client: &BackOfficeClient<T>) -> ApiResult<usize> {
        self.providers = client.list_providers()?;
        info!(count = self.providers.len(), "Providers loaded");
        Ok(self.providers.len())
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Centers a professional can be attached to.
    pub fn centers(&self) -> Vec<&Provider> {
        self.providers.iter().filter(|p| p.is_center()).collect()
    }

    pub fn kind_filter(&self) -> ProviderKindFilter {
        self.query.kind
    }

    /// Press a kind toggle; pressing the active one shows every kind.
    pub fn toggle_kind(&mut self, kind: ProviderKind) {
        self.query.kind = self.query.kind.toggle(kind);
        self.pager.reset();
    }

    pub fn search(&mut self, field: ProviderSearchField, text: &str) {
        self.query.field = field;
        self.query.text = text.to_string();
        self.pager.reset();
    }

    /// Narrow screens show fewer rows per page.
    pub fn set_compact(&mut self, compact: bool) {
        let size = if compact {
            PROVIDERS_MOBILE_PAGE_SIZE
        } else {
            PROVIDERS_DESKTOP_PAGE_SIZE
        };
        let len = self.filtered().len();
        self.pager.set_page_size(size, len);
    }

    pub fn filtered(&self) -> Vec<&Provider> {
        filter_providers(&self.providers, &self.query)
    }

    pub fn current_page(&mut self) -> PageView<'_, Provider> {
        let rows = filter_providers(&self.providers, &self.query);
        page_of(&mut self.pager, rows)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let len = self.filtered().len();
        self.pager.go_to(page, len);
    }

    /// Save an edited provider under its original CUIT; the local row is
    /// replaced once the server accepted it.
    pub fn save_edit<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
        form: &ProviderForm,
    ) -> SubmitOutcome {
        let centers: Vec<Provider> = self.centers().into_iter().cloned().collect();
        let provider = match form.to_provider(&centers) {
            Ok(p) => p,
            Err(e) => return SubmitOutcome::Blocked(provider_form_errors(&e)),
        };
        if let Err(e) = client.update_provider(&provider.id, &provider) {
            return SubmitOutcome::failed(&e);
        }
        let message = format!("Prestador {} actualizado", provider.full_name);
        match self.providers.iter_mut().find(|p| p.id == provider.id) {
            Some(row) => *row = provider,
            None => self.providers.push(provider),
        }
        SubmitOutcome::Saved { message }
    }

    /// Delete by CUIT; the row is dropped after the server confirmed.
    pub fn delete<T: Transport>(
        &mut self,
        client: &BackOfficeClient<T>,
        cuit: &str,
    ) -> ApiResult<bool> {
        if let Err(e) = client.delete_provider(cuit) {
            error!(cuit = %cuit, error = %e, "Provider deletion failed");
            return Err(e);
        }
        let before = self.providers.len();
        self.providers.retain(|p| p.id != cuit && p.cuil_cuit != cuit);
        let len = self.filtered().len();
        self.pager.clamp(len);
        Ok(self.providers.len() < before)
    }
}

fn provider_form_errors(err: &ProviderFormError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.insert(PROVIDER_FORM_KEY, err.to_string());
    errors
}

/// Validate and create a provider. `centers` resolves the selected center.
pub fn submit_new_provider<T: Transport>(
    client: &BackOfficeClient<T>,
    form: &ProviderForm,
    centers: &[Provider],
) -> SubmitOutcome {
    let provider = match form.to_provider(centers) {
        Ok(p) => p,
        Err(e) => {
            info!(error = %e, "Provider submission blocked by validation");
            return SubmitOutcome::Blocked(provider_form_errors(&e));
        }
    };
    match client.create_provider(&provider) {
        Ok(_) => SubmitOutcome::Created {
            message: PROVIDER_CREATED.to_string(),
            navigate_to: PROVIDERS_ROUTE,
        },
        Err(e) => SubmitOutcome::failed(&e),
    }
}

// ==================== Agendas ====================

/// Agenda list. Agendas have no endpoint and live in memory only.
#[derive(Debug, Clone, Default)]
pub struct AgendaBook {
    entries: Vec<AgendaEntry>,
    filter: AgendaFilter,
}

impl AgendaBook {
    pub fn new(entries: Vec<AgendaEntry>) -> Self {
        Self {
            entries,
            filter: AgendaFilter::default(),
        }
    }

    pub fn entries(&self) -> &[AgendaEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&AgendaEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Build an entry from the new-agenda form and append it.
    pub fn add(
        &mut self,
        form: &AgendaForm,
        providers: &[Provider],
    ) -> Result<&AgendaEntry, AgendaFormError> {
        let entry = form.to_entry(providers)?;
        info!(id = %entry.id, prestador = %entry.prestador, "Agenda added");
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        Ok(&self.entries[last])
    }

    /// Apply an edit form. Returns `false` when the entry no longer exists.
    pub fn update(&mut self, form: &AgendaEditForm) -> Result<bool, AgendaFormError> {
        let updated = form.apply()?;
        match self.entries.iter_mut().find(|e| e.id == updated.id) {
            Some(entry) => {
                *entry = updated;
                Ok(true)
            }
            None => {
                warn!(id = %form.id(), "Edited agenda not found");
                Ok(false)
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    pub fn filter_mut(&mut self) -> &mut AgendaFilter {
        &mut self.filter
    }

    pub fn filtered(&self) -> Vec<&AgendaEntry> {
        filter_agendas(&self.entries, &self.filter)
    }

    /// Distinct provider names, for the provider filter.
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.prestador.as_str()) {
                names.push(&entry.prestador);
            }
        }
        names
    }

    /// Specialties offered by the filtered provider, or every specialty.
    pub fn specialty_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let provider = self.filter.provider.as_deref();
        for entry in &self.entries {
            if provider.is_some_and(|p| p != entry.prestador) {
                continue;
            }
            if !entry.especialidad.is_empty() && !names.contains(&entry.especialidad.as_str()) {
                names.push(&entry.especialidad);
            }
        }
        names
    }
}

/// Load the specialty catalog, falling back to the built-in list.
pub fn load_specialty_catalog<T: Transport>(client: &BackOfficeClient<T>) -> SpecialtyCatalog {
    match client.list_specialties() {
        Ok(list) if !list.is_empty() => SpecialtyCatalog::new(list),
        Ok(_) => SpecialtyCatalog::builtin(),
        Err(e) => {
            warn!(error = %e, "Using built-in specialty catalog");
            SpecialtyCatalog::builtin()
        }
    }
}
