//! Inline profile editing: commit semantics, field switching, notifications

use std::time::Duration;

use medalliance_engine::CommitOutcome;
use medalliance_types::{FieldKey, FieldValue};

use crate::common::{MemoryBackend, app_with, sample_profile};

#[tokio::test]
async fn unchanged_values_never_reach_the_backend() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);

    for field in FieldKey::ALL {
        assert!(app.open_field(field).await, "{field}");
        let current = app.profile().form_text(field);
        app.set_field_value(field, current);
        assert_eq!(app.commit().await, CommitOutcome::Unchanged, "{field}");
        assert!(app.blur().await, "{field}");
    }
    assert!(backend.updates().is_empty());
    assert_eq!(app.success_message(), None);
}

#[tokio::test]
async fn rejected_values_stay_local_with_the_rule_message() {
    let cases = [
        (FieldKey::CurrYear, "twelve", "Invalid value"),
        (FieldKey::CurrYear, "9", "Invalid value"),
        (FieldKey::GradYear, "1800", "Invalid value"),
        (FieldKey::Name, "   ", "Name is required"),
        (FieldKey::Name, "A", "Name must be at least 2 characters"),
    ];

    for (field, input, message) in cases {
        let backend = MemoryBackend::new(sample_profile());
        let mut app = app_with(&backend);
        app.open_field(field).await;
        app.set_field_value(field, input);

        assert!(!app.blur().await, "{field}={input}");
        assert_eq!(app.form().error(field), Some(message), "{field}={input}");
        assert_eq!(app.active_field(), Some(field));
        assert!(backend.updates().is_empty());
        assert_eq!(app.error(), None);
    }
}

#[tokio::test]
async fn curr_year_rejection_sets_only_that_error() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_field(FieldKey::CurrYear).await;
    app.set_field_value(FieldKey::CurrYear, "0");

    assert!(!app.save().await);

    let errors: Vec<(FieldKey, &str)> = app
        .form()
        .errors()
        .iter()
        .map(|(field, message)| (*field, message.as_str()))
        .collect();
    assert_eq!(errors, vec![(FieldKey::CurrYear, "Invalid value")]);
    assert_eq!(app.active_field(), Some(FieldKey::CurrYear));
}

#[tokio::test]
async fn remote_rejection_goes_to_the_global_channel() {
    let backend = MemoryBackend::new(sample_profile());
    backend.reject_updates(Some("Profile is locked"));
    let mut app = app_with(&backend);
    app.open_field(FieldKey::Bio).await;
    app.set_field_value(FieldKey::Bio, "Now a resident");

    assert!(!app.blur().await);
    assert_eq!(app.error(), Some("Profile is locked"));
    assert_eq!(app.active_field(), Some(FieldKey::Bio));
    assert_eq!(app.form().error(FieldKey::Bio), None);
    assert_eq!(app.profile().form_text(FieldKey::Bio), "Second-year student");

    app.clear_error();
    backend.reject_updates(None);
    assert!(app.blur().await);
    assert_eq!(app.profile().form_text(FieldKey::Bio), "Now a resident");
}

#[tokio::test]
async fn blur_after_valid_name_change_shows_success() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_field(FieldKey::Name).await;
    app.set_field_value(FieldKey::Name, "New Name");

    assert!(app.blur().await);
    assert_eq!(app.success_message(), Some("Changes saved!"));
    assert_eq!(app.active_field(), None);
    assert_eq!(
        backend.updates(),
        vec![(FieldKey::Name, FieldValue::Text("New Name".to_string()))]
    );

    app.tick(Duration::from_millis(2999));
    assert_eq!(app.success_message(), Some("Changes saved!"));
    app.tick(Duration::from_millis(1));
    assert_eq!(app.success_message(), None);
}

#[tokio::test]
async fn switching_fields_commits_the_previous_one_exactly_once() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_field(FieldKey::Name).await;
    app.set_field_value(FieldKey::Name, "Dr. Old Name");

    assert!(app.open_field(FieldKey::CurrYear).await);
    assert_eq!(app.active_field(), Some(FieldKey::CurrYear));
    assert_eq!(backend.updates().len(), 1);
    assert_eq!(backend.updates()[0].0, FieldKey::Name);
}

#[tokio::test]
async fn failed_switch_keeps_the_previous_field_open() {
    let backend = MemoryBackend::new(sample_profile());
    backend.reject_updates(Some("Service unavailable"));
    let mut app = app_with(&backend);
    app.open_field(FieldKey::Name).await;
    app.set_field_value(FieldKey::Name, "Someone Else");

    assert!(!app.open_field(FieldKey::Bio).await);
    assert_eq!(app.active_field(), Some(FieldKey::Name));
    assert_eq!(app.error(), Some("Service unavailable"));
    assert_eq!(backend.updates().len(), 1);
}

#[tokio::test]
async fn counters_persist_as_numbers() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_field(FieldKey::GradYear).await;
    app.set_field_value(FieldKey::GradYear, " 2027 ");

    assert!(app.save().await);
    assert_eq!(
        backend.updates(),
        vec![(FieldKey::GradYear, FieldValue::Number(2027))]
    );
    assert_eq!(app.form().value(FieldKey::GradYear), "2027");
}

#[tokio::test]
async fn cancel_discards_the_draft() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_field(FieldKey::Pronouns).await;
    app.set_field_value(FieldKey::Pronouns, "they/them");

    app.cancel_edit();

    assert_eq!(app.active_field(), None);
    assert_eq!(app.form().value(FieldKey::Pronouns), "she/her");
    assert!(backend.updates().is_empty());
}

#[tokio::test]
async fn lookup_picker_options_are_loaded_when_the_field_opens() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    assert!(app.picker_options(FieldKey::College).is_empty());

    app.open_field(FieldKey::College).await;
    assert!(app.picker_options(FieldKey::College).contains("Stanford"));
    assert_eq!(app.picker_options(FieldKey::Pronouns).len(), 4);
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed_before_rules_and_save() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    let at_limit = "x".repeat(20);

    app.open_field(FieldKey::Pronouns).await;
    app.set_field_value(FieldKey::Pronouns, format!("  {at_limit}x  "));
    assert!(!app.blur().await);
    assert_eq!(
        app.form().error(FieldKey::Pronouns),
        Some("Pronouns must be at most 20 characters")
    );
    assert!(backend.updates().is_empty());

    app.set_field_value(FieldKey::Pronouns, format!("  {at_limit}  "));
    assert!(app.blur().await);
    assert_eq!(
        backend.updates(),
        vec![(FieldKey::Pronouns, FieldValue::Text(at_limit.clone()))]
    );
    assert_eq!(app.form().value(FieldKey::Pronouns), at_limit);
}

#[tokio::test]
async fn whitespace_only_edit_is_not_saved() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_field(FieldKey::Name).await;
    app.set_field_value(FieldKey::Name, " Old Name   ");

    assert!(app.blur().await);
    assert!(backend.updates().is_empty());
    assert_eq!(app.success_message(), None);
    assert_eq!(app.active_field(), None);
    assert_eq!(app.form().value(FieldKey::Name), "Old Name");
}
