//! Profile record holder and the editable form built from it.

use std::collections::BTreeMap;

use medalliance_types::{FieldKey, ProfileData};

/// Owner of the authoritative current-user profile.
///
/// Only replaced wholesale with what the backend returns after a save.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile: ProfileData,
}

impl ProfileStore {
    #[must_use]
    pub fn new(profile: ProfileData) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileData {
        &self.profile
    }

    pub fn replace(&mut self, profile: ProfileData) {
        self.profile = profile;
    }
}

/// Candidate text per field plus field-scoped error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    values: BTreeMap<FieldKey, String>,
    errors: BTreeMap<FieldKey, String>,
}

impl ProfileForm {
    #[must_use]
    pub fn from_profile(profile: &ProfileData) -> Self {
        let values = FieldKey::ALL
            .into_iter()
            .map(|key| (key, profile.form_text(key)))
            .collect();
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Current candidate text; fields never touched read as empty.
    #[must_use]
    pub fn value(&self, key: FieldKey) -> &str {
        self.values.get(&key).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, key: FieldKey, text: impl Into<String>) {
        self.values.insert(key, text.into());
    }

    /// Replace the whole error map.
    pub fn set_errors(&mut self, errors: BTreeMap<FieldKey, String>) {
        self.errors = errors;
    }

    pub fn clear_error(&mut self, key: FieldKey) {
        self.errors.remove(&key);
    }

    #[must_use]
    pub fn error(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<FieldKey, String> {
        &self.errors
    }

    /// Restore one field to the profile's value and drop its error.
    pub fn reset_field(&mut self, key: FieldKey, profile: &ProfileData) {
        self.values.insert(key, profile.form_text(key));
        self.errors.remove(&key);
    }
}
