//! Remote collaborators for the Med Alliance client.
//!
//! # Architecture
//!
//! The backend is an opaque service reached through two call/response seams:
//!
//! - [`ProfileBackend`] - reads the current user's profile and persists one field at a time
//! - [`LookupSource`] - serves categorical option lists (colleges, degrees, ...)
//!
//! [`HttpBackend`] implements both over JSON/HTTP. Tests and the engine talk
//! to the traits only, so any in-memory implementation can stand in.
//!
//! # Error Handling
//!
//! Every failure is a [`BackendError`]. Callers surface [`BackendError::message`]
//! to the user; nothing here retries.

mod errors;
mod http;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

pub use errors::{extract_error_message, read_capped_error_body};
pub use http::{HttpBackend, HttpBackendConfig};
pub use medalliance_types;

use medalliance_types::{FieldKey, FieldValue, LookupEntry, LookupKind, ProfileData};

pub type BackendFut<'a, T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Network request failed: {0}")]
    Transport(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    /// Refusal from a backend that has no HTTP status to report, such as an
    /// in-process store.
    #[error("{0}")]
    Rejected(String),
}

impl BackendError {
    /// Text suitable for the global error banner.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Remote field persistence.
pub trait ProfileBackend: Send + Sync {
    fn fetch_profile(&self) -> BackendFut<'_, ProfileData>;

    /// Persist a single field and return the profile as the server now sees it.
    fn update_field(&self, key: FieldKey, value: FieldValue) -> BackendFut<'_, ProfileData>;
}

/// Lookup data provider.
pub trait LookupSource: Send + Sync {
    fn fetch_lookup(&self, kind: LookupKind) -> BackendFut<'_, Vec<LookupEntry>>;
}
