//! HTTP backend against a mock API server

use medalliance_backend::{BackendError, LookupSource, ProfileBackend};
use medalliance_types::{FieldKey, FieldValue, LookupEntry, LookupKind};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{http_backend, profile_json, start_api_mock};

#[tokio::test]
async fn fetch_profile_sends_bearer_token() {
    let server = start_api_mock().await;
    Mock::given(method("GET"))
        .and(path("/v1/profile"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let backend = http_backend(&server, Some("test-token"));
    let profile = backend.fetch_profile().await.unwrap();

    assert_eq!(profile.id.as_str(), "user-42");
    assert_eq!(profile.get(FieldKey::CurrYear), Some(&FieldValue::Number(2)));
    assert_eq!(profile.form_text(FieldKey::Name), "Old Name");
}

#[tokio::test]
async fn update_field_patches_one_field() {
    let server = start_api_mock().await;
    let mut updated = profile_json();
    updated["fields"]["currYear"] = serde_json::json!(3);
    Mock::given(method("PATCH"))
        .and(path("/v1/profile"))
        .and(body_json(serde_json::json!({ "field": "currYear", "value": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let backend = http_backend(&server, None);
    let profile = backend
        .update_field(FieldKey::CurrYear, FieldValue::Number(3))
        .await
        .unwrap();

    assert_eq!(profile.get(FieldKey::CurrYear), Some(&FieldValue::Number(3)));
}

#[tokio::test]
async fn error_bodies_become_user_messages() {
    let server = start_api_mock().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/profile"))
        .respond_with(ResponseTemplate::new(422).set_body_json(
            serde_json::json!({ "error": { "message": "Bio contains a banned word" } }),
        ))
        .mount(&server)
        .await;

    let backend = http_backend(&server, None);
    let err = backend
        .update_field(FieldKey::Bio, FieldValue::Text("spam".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "Bio contains a banned word");
}

#[tokio::test]
async fn html_error_pages_fall_back_to_the_status() {
    let server = start_api_mock().await;
    Mock::given(method("GET"))
        .and(path("/v1/profile"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let backend = http_backend(&server, None);
    let err = backend.fetch_profile().await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert!(err.message().starts_with("Request failed (502"));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = start_api_mock().await;
    Mock::given(method("GET"))
        .and(path("/v1/lookups/degrees"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = http_backend(&server, None);
    let err = backend.fetch_lookup(LookupKind::Degrees).await.unwrap_err();

    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn lookups_are_fetched_by_kind() {
    let server = start_api_mock().await;
    Mock::given(method("GET"))
        .and(path("/v1/lookups/colleges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "name": "Harvard" },
            { "id": 2, "name": "Yale" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = http_backend(&server, None);
    let colleges = backend.fetch_lookup(LookupKind::Colleges).await.unwrap();

    assert_eq!(
        colleges,
        vec![LookupEntry::new(1, "Harvard"), LookupEntry::new(2, "Yale")]
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let server = start_api_mock().await;
    let backend = http_backend(&server, None);
    drop(server);

    let err = backend.fetch_profile().await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
    assert!(err.message().starts_with("Network request failed"));
}
