//! Business rules: credentials and family groups, deletion cascade,
//! scheduling checks, therapeutic situations and specialty selection.

pub mod credential;
pub mod family;
pub mod schedule;
pub mod situation;
pub mod specialty;

pub use credential::{
    group_prefix, is_titular, relationship_from_credential, resolve_relationship, Credential,
    CredentialError, Relationship,
};
pub use family::{
    apply_local_deletion, family_route_key, members_of_group, DeletionPlan, DeletionScope,
    FamilyGroup,
};
pub use schedule::{
    is_scheduled_date_valid, is_scheduled_date_valid_now, scheduled_date_iso,
    validate_scheduled_activation, ScheduleError, ScheduleOutcome,
};
pub use situation::{SituationEntry, SituationKind, SituationPayload};
pub use specialty::{
    first_specialty_label, specialty_options, SpecialtyCatalog, SpecialtyOption,
    SpecialtySelection,
};
