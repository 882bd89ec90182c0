//! Shared test utilities and fixtures
//!
//! In-memory backends that record every call, plus wiremock helpers for the
//! HTTP client.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use medalliance_backend::{
    BackendError, BackendFut, HttpBackend, HttpBackendConfig, LookupSource, ProfileBackend,
};
use medalliance_engine::{App, AppOptions};
use medalliance_types::{FieldKey, FieldValue, LookupEntry, LookupKind, ProfileData, UserId};
use wiremock::MockServer;

/// A profile with a handful of fields filled in.
pub fn sample_profile() -> ProfileData {
    ProfileData::new(UserId::new("user-42"))
        .with_field(FieldKey::Name, "Old Name")
        .with_field(FieldKey::Pronouns, "she/her")
        .with_field(FieldKey::Bio, "Second-year student")
        .with_field(FieldKey::CurrYear, 2_i64)
        .with_field(FieldKey::College, "Harvard")
}

/// Profile backend and lookup source held entirely in memory.
#[derive(Default)]
pub struct MemoryBackend {
    profile: Mutex<Option<ProfileData>>,
    updates: Mutex<Vec<(FieldKey, FieldValue)>>,
    lookup_calls: Mutex<Vec<LookupKind>>,
    reject_with: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new(profile: ProfileData) -> Arc<Self> {
        let backend = Self::default();
        *backend.profile.lock().unwrap() = Some(profile);
        Arc::new(backend)
    }

    pub fn updates(&self) -> Vec<(FieldKey, FieldValue)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn lookup_calls(&self) -> Vec<LookupKind> {
        self.lookup_calls.lock().unwrap().clone()
    }

    /// Make every following update fail with `message`, or succeed again with `None`.
    pub fn reject_updates(&self, message: Option<&str>) {
        *self.reject_with.lock().unwrap() = message.map(str::to_string);
    }
}

impl ProfileBackend for MemoryBackend {
    fn fetch_profile(&self) -> BackendFut<'_, ProfileData> {
        let profile = self.profile.lock().unwrap().clone();
        Box::pin(async move { profile.ok_or_else(|| BackendError::Rejected("no profile".into())) })
    }

    fn update_field(&self, key: FieldKey, value: FieldValue) -> BackendFut<'_, ProfileData> {
        self.updates.lock().unwrap().push((key, value.clone()));
        let result = if let Some(message) = self.reject_with.lock().unwrap().clone() {
            Err(BackendError::Rejected(message))
        } else {
            let mut guard = self.profile.lock().unwrap();
            let profile = guard.get_or_insert_with(|| ProfileData::new(UserId::new("anon")));
            profile.set(key, value);
            Ok(profile.clone())
        };
        Box::pin(async move { result })
    }
}

impl LookupSource for MemoryBackend {
    fn fetch_lookup(&self, kind: LookupKind) -> BackendFut<'_, Vec<LookupEntry>> {
        self.lookup_calls.lock().unwrap().push(kind);
        let entries = match kind {
            LookupKind::Colleges => vec![
                LookupEntry::new(1, "Harvard"),
                LookupEntry::new(2, "Johns Hopkins"),
                LookupEntry::new(3, "Stanford"),
            ],
            LookupKind::Degrees => vec![LookupEntry::new(1, "MD"), LookupEntry::new(2, "DO")],
            _ => Vec::new(),
        };
        Box::pin(async move { Ok(entries) })
    }
}

pub fn app_with(backend: &Arc<MemoryBackend>) -> App {
    let profile = sample_profile();
    App::new(
        profile,
        backend.clone(),
        backend.clone(),
        AppOptions::default(),
    )
}

/// Start a mock server standing in for the Med Alliance API
pub async fn start_api_mock() -> MockServer {
    MockServer::start().await
}

pub fn http_backend(server: &MockServer, token: Option<&str>) -> HttpBackend {
    HttpBackend::new(HttpBackendConfig {
        base_url: format!("{}/v1", server.uri()),
        token: token.map(str::to_string),
        timeout: Duration::from_secs(5),
        allow_http: true,
    })
    .unwrap()
}

pub fn profile_json() -> serde_json::Value {
    serde_json::json!({
        "id": "user-42",
        "fields": {
            "name": "Old Name",
            "currYear": 2,
            "college": "Harvard"
        }
    })
}
