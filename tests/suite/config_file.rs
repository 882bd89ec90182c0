//! Config file loading feeding the session

use std::time::Duration;

use medalliance_config::MedAllianceConfig;
use medalliance_engine::{App, AppOptions};
use medalliance_types::FieldKey;

use crate::common::{MemoryBackend, sample_profile};

#[tokio::test]
async fn validation_overrides_and_notice_duration_apply_to_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[profile]
success_message_ms = 500

[validation.bio]
checks = [{ check = "max_length", max = 10, message = "Keep it short" }]
"#,
    )
    .unwrap();

    let config = MedAllianceConfig::load_from(&path).unwrap();
    let backend = MemoryBackend::new(sample_profile());
    let mut app = App::new(
        sample_profile(),
        backend.clone(),
        backend.clone(),
        AppOptions {
            rules: config.rule_set(),
            success_message_duration: config.success_message_duration(),
        },
    );

    app.open_field(FieldKey::Bio).await;
    app.set_field_value(FieldKey::Bio, "Far too long for the limit");
    assert!(!app.blur().await);
    assert_eq!(app.form().error(FieldKey::Bio), Some("Keep it short"));

    app.set_field_value(FieldKey::Bio, "Short");
    assert!(app.blur().await);
    assert_eq!(app.form().error(FieldKey::Bio), None);
    app.tick(Duration::from_millis(500));
    assert_eq!(app.success_message(), None);

    // Built-in rules for other fields stay in force.
    app.open_field(FieldKey::Name).await;
    app.set_field_value(FieldKey::Name, "");
    assert!(!app.blur().await);
    assert_eq!(app.form().error(FieldKey::Name), Some("Name is required"));
}
