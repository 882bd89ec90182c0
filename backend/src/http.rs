//! JSON/HTTP implementation of the backend seams.
//!
//! | Call | Request |
//! |------|---------|
//! | `fetch_profile` | `GET {base}/profile` |
//! | `update_field` | `PATCH {base}/profile` with `{"field": .., "value": ..}` |
//! | `fetch_lookup` | `GET {base}/lookups/{kind}` |

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use medalliance_types::{FieldKey, FieldValue, LookupEntry, LookupKind, ProfileData};

use crate::{
    BackendError, BackendFut, LookupSource, ProfileBackend, extract_error_message,
    read_capped_error_body,
};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct HttpBackendConfig {
    pub base_url: String,
    /// Bearer token attached to every request.
    pub token: Option<String>,
    pub timeout: Duration,
    /// Permit plain `http://` endpoints (local development and tests).
    pub allow_http: bool,
}

// Manual Debug impl to prevent leaking the token in logs.
impl std::fmt::Debug for HttpBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackendConfig")
            .field("base_url", &self.base_url)
            .field(
                "token",
                &if self.token.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("timeout", &self.timeout)
            .field("allow_http", &self.allow_http)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct UpdateFieldRequest<'a> {
    field: FieldKey,
    value: &'a FieldValue,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .https_only(!config.allow_http)
            .default_headers(default_headers)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.filter(|token| !token.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = read_capped_error_body(response).await;
        let message = extract_error_message(&body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() || trimmed.starts_with('<') {
                format!("Request failed ({status})")
            } else {
                trimmed.to_string()
            }
        });
        tracing::warn!(status = status.as_u16(), %message, "backend request failed");
        return Err(BackendError::Status {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

impl ProfileBackend for HttpBackend {
    fn fetch_profile(&self) -> BackendFut<'_, ProfileData> {
        Box::pin(Self::send(self.request(Method::GET, "profile")))
    }

    fn update_field(&self, key: FieldKey, value: FieldValue) -> BackendFut<'_, ProfileData> {
        let builder = self
            .request(Method::PATCH, "profile")
            .json(&UpdateFieldRequest {
                field: key,
                value: &value,
            });
        tracing::debug!(field = %key, "persisting profile field");
        Box::pin(Self::send(builder))
    }
}

impl LookupSource for HttpBackend {
    fn fetch_lookup(&self, kind: LookupKind) -> BackendFut<'_, Vec<LookupEntry>> {
        let path = format!("lookups/{}", kind.as_str());
        Box::pin(Self::send(self.request(Method::GET, &path)))
    }
}
