//! Prepaga Core Library
//!
//! Domain logic for a medical-insurance back office: affiliates and their
//! family groups, healthcare providers, and provider agendas.
//!
//! # Architecture
//!
//! ```text
//!   backend records ──► models ──► listing (filter + paginate) ──► tables
//!                          │
//!                          ├──► rules (credential, family, schedule,
//!                          │           situation, specialty)
//!                          │
//!   user input ──────► forms (validate) ──► payloads ──► prepaga-client
//! ```
//!
//! # Core Principle
//!
//! **Validation runs before any network call and never consults the
//! server.** A form with errors produces no request.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Affiliate, Provider, AgendaEntry, Weekday, etc.)
//! - [`rules`]: Credential/family-group rules, deletion cascade, schedule checks
//! - [`listing`]: Search filters and pagination
//! - [`forms`]: Form controllers and validation

pub mod forms;
pub mod listing;
pub mod models;
pub mod rules;
pub mod text;

// Re-export commonly used types
pub use forms::{AffiliateForm, AgendaForm, ProviderForm, ValidationErrors};
pub use listing::{Page, Paginator};
pub use models::{
    Affiliate, AgendaEntry, AttendanceAddress, Cuit, Plan, Provider, ProviderKind, Specialty,
    TimeBlock, Weekday,
};
pub use rules::{Credential, DeletionPlan, FamilyGroup, Relationship, SituationKind};

/// Crate-wide error.
#[derive(Debug, thiserror::Error)]
pub enum PrepagaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] rules::CredentialError),

    #[error("Invalid CUIT/CUIL: {0}")]
    InvalidCuit(#[from] models::CuitError),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(#[from] models::WeekdayError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PrepagaError {
    fn from(e: serde_json::Error) -> Self {
        PrepagaError::SerializationError(e.to_string())
    }
}

impl From<forms::ProviderFormError> for PrepagaError {
    fn from(e: forms::ProviderFormError) -> Self {
        PrepagaError::InvalidInput(e.to_string())
    }
}

impl From<forms::AgendaFormError> for PrepagaError {
    fn from(e: forms::AgendaFormError) -> Self {
        PrepagaError::InvalidInput(e.to_string())
    }
}

impl From<rules::ScheduleError> for PrepagaError {
    fn from(e: rules::ScheduleError) -> Self {
        PrepagaError::InvalidInput(e.to_string())
    }
}

pub type PrepagaResult<T> = Result<T, PrepagaError>;
