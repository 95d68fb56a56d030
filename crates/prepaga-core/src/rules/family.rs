//! Family-group view and the deletion cascade decision.

use tracing::debug;

use super::credential::{group_prefix, is_titular, Relationship};
use crate::models::Affiliate;

/// Warning shown when the member being removed is a titular.
pub const WHOLE_GROUP_WARNING: &str =
    "Si elimina este afiliado se eliminarán todos los miembros del grupo familiar.";

/// A family group as shown by the family view.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyGroup {
    titular: Affiliate,
    others: Vec<Affiliate>,
}

impl FamilyGroup {
    /// Build the view from the members returned by the family endpoint.
    ///
    /// The titular is the member whose explicit `parentesco` is "Titular",
    /// else the first member. Returns `None` for an empty list.
    pub fn from_members(members: Vec<Affiliate>) -> Option<Self> {
        let pos = members
            .iter()
            .position(|m| {
                m.relationship
                    .as_deref()
                    .and_then(Relationship::from_label)
                    == Some(Relationship::Titular)
            })
            .unwrap_or(0);

        let mut members = members;
        if members.is_empty() {
            return None;
        }
        let titular = members.remove(pos);
        let others = members
            .into_iter()
            .filter(|m| m.credential != titular.credential)
            .collect();

        Some(Self { titular, others })
    }

    pub fn titular(&self) -> &Affiliate {
        &self.titular
    }

    /// Every member except the titular.
    pub fn others(&self) -> &[Affiliate] {
        &self.others
    }

    /// Every member, titular first.
    pub fn into_members(self) -> Vec<Affiliate> {
        let mut members = Vec::with_capacity(self.others.len() + 1);
        members.push(self.titular);
        members.extend(self.others);
        members
    }

    /// Member count including the titular.
    pub fn len(&self) -> usize {
        self.others.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Members of `all` whose credential carries the given group prefix.
pub fn members_of_group<'a>(all: &'a [Affiliate], group: &str) -> Vec<&'a Affiliate> {
    all.iter()
        .filter(|a| group_prefix(&a.credential) == Some(group))
        .collect()
}

/// Key used to open the family view: the credential's group prefix, else
/// the DNI.
pub fn family_route_key(affiliate: &Affiliate) -> &str {
    group_prefix(&affiliate.credential).unwrap_or(&affiliate.dni)
}

/// What removing an affiliate will do, decided before the delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionScope {
    /// Titular: the backend removes the whole group
    WholeGroup { group: String },
    /// Only this member
    SingleMember,
}

/// A pending affiliate deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    /// DNI sent in the single delete call
    pub dni: String,
    /// "Nombre Apellido"
    pub display_name: String,
    pub scope: DeletionScope,
}

impl DeletionPlan {
    pub fn for_affiliate(affiliate: &Affiliate) -> Self {
        let scope = if is_titular(&affiliate.credential) {
            let group = group_prefix(&affiliate.credential)
                .unwrap_or(&affiliate.dni)
                .to_string();
            DeletionScope::WholeGroup { group }
        } else {
            DeletionScope::SingleMember
        };
        debug!(dni = %affiliate.dni, ?scope, "Planned affiliate deletion");

        Self {
            dni: affiliate.dni.clone(),
            display_name: affiliate.full_name(),
            scope,
        }
    }

    pub fn warns_whole_group(&self) -> bool {
        matches!(self.scope, DeletionScope::WholeGroup { .. })
    }

    /// Confirmation question, plus the whole-group warning for titulars.
    pub fn confirmation_message(&self) -> String {
        let question = format!(
            "¿Está seguro que desea dar de baja al afiliado {}, DNI {}?",
            self.display_name, self.dni
        );
        if self.warns_whole_group() {
            format!("{}\n{}", question, WHOLE_GROUP_WARNING)
        } else {
            question
        }
    }

    /// Text shown while the delete call is in flight.
    pub fn progress_message(&self) -> String {
        format!("Eliminando afiliado {}...", self.display_name)
    }
}

/// Mirror a successful delete in a locally held list.
///
/// Returns the number of records removed.
pub fn apply_local_deletion(list: &mut Vec<Affiliate>, plan: &DeletionPlan) -> usize {
    let before = list.len();
    match &plan.scope {
        DeletionScope::WholeGroup { group } => {
            list.retain(|a| group_prefix(&a.credential) != Some(group.as_str()) && a.dni != plan.dni)
        }
        DeletionScope::SingleMember => list.retain(|a| a.dni != plan.dni),
    }
    before - list.len()
}
