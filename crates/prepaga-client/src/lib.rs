//! Blocking client for the prepaga back-office REST API.
//!
//! This crate provides the HTTP side of the back office: configuration,
//! a swappable transport, the provider wire translation, one method per
//! endpoint, and the screen workflows that join form validation with the
//! calls it guards.
//!
//! # Architecture
//!
//! ```text
//!   ClientConfig ──► HttpTransport ──┐
//!                                    ├──► BackOfficeClient ──► workflow
//!   (tests) MockTransport ───────────┘          │
//!                                               └──► wire (provider DTOs)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Base URL and timeout from the environment
//! - [`transport`]: `Transport` trait, reqwest implementation, status handling
//! - [`wire`]: Backend provider and specialty formats
//! - [`api`]: Endpoint methods
//! - [`workflow`]: Screen controllers (affiliate list, family group, creation, providers, agendas)

pub mod api;
pub mod config;
pub mod transport;
pub mod wire;
pub mod workflow;

use prepaga_core::ValidationErrors;
use thiserror::Error;

pub use api::BackOfficeClient;
pub use config::{ClientConfig, ConfigError};
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, MockTransport, Transport, TransportError,
};
pub use workflow::{
    submit_new_affiliate, submit_new_provider, AffiliateDirectory, AgendaBook, FamilyGroupView,
    ProviderDirectory, SubmitOutcome,
};

/// Errors surfaced by API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx response; the message is what the user is shown.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid provider: {0}")]
    InvalidProvider(#[from] prepaga_core::forms::ProviderFormError),
}

impl ApiError {
    /// HTTP status of a rejected call.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_server_message() {
        let err = ApiError::Status {
            status: 409,
            message: "El DNI ya existe".into(),
        };
        assert_eq!(err.to_string(), "El DNI ya existe");
        assert_eq!(err.status(), Some(409));

        let err: ApiError = TransportError::Connection("refused".into()).into();
        assert_eq!(err.status(), None);
    }
}
