//! Profile fields and the current-user profile record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{LookupKind, UserId};

/// An editable profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Pronouns,
    Bio,
    Quote,
    College,
    Degree,
    Major,
    Minor,
    Occupation,
    Specialty,
    Program,
    Format,
    CurrYear,
    GradYear,
    Birthday,
    Location,
}

/// How a field is edited. Supplied per field instead of being guessed from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Picker(PickerSource),
    Date,
    /// Whole number kept as text in the form, sent as a number.
    Counter,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSource {
    Static(&'static [&'static str]),
    Lookup(LookupKind),
}

const PRONOUNS: &[&str] = &["he/him", "she/her", "they/them", "other"];

impl FieldKey {
    pub const ALL: [FieldKey; 16] = [
        FieldKey::Name,
        FieldKey::Pronouns,
        FieldKey::Bio,
        FieldKey::Quote,
        FieldKey::College,
        FieldKey::Degree,
        FieldKey::Major,
        FieldKey::Minor,
        FieldKey::Occupation,
        FieldKey::Specialty,
        FieldKey::Program,
        FieldKey::Format,
        FieldKey::CurrYear,
        FieldKey::GradYear,
        FieldKey::Birthday,
        FieldKey::Location,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Pronouns => "pronouns",
            FieldKey::Bio => "bio",
            FieldKey::Quote => "quote",
            FieldKey::College => "college",
            FieldKey::Degree => "degree",
            FieldKey::Major => "major",
            FieldKey::Minor => "minor",
            FieldKey::Occupation => "occupation",
            FieldKey::Specialty => "specialty",
            FieldKey::Program => "program",
            FieldKey::Format => "format",
            FieldKey::CurrYear => "currYear",
            FieldKey::GradYear => "gradYear",
            FieldKey::Birthday => "birthday",
            FieldKey::Location => "location",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FieldKey::Name => "Name",
            FieldKey::Pronouns => "Pronouns",
            FieldKey::Bio => "Bio",
            FieldKey::Quote => "Quote",
            FieldKey::College => "College",
            FieldKey::Degree => "Degree",
            FieldKey::Major => "Major",
            FieldKey::Minor => "Minor",
            FieldKey::Occupation => "Occupation",
            FieldKey::Specialty => "Specialty",
            FieldKey::Program => "Program",
            FieldKey::Format => "Format",
            FieldKey::CurrYear => "Current Year",
            FieldKey::GradYear => "Graduation Year",
            FieldKey::Birthday => "Birthday",
            FieldKey::Location => "Location",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            FieldKey::Name
            | FieldKey::Bio
            | FieldKey::Quote
            | FieldKey::Major
            | FieldKey::Minor
            | FieldKey::Location => FieldKind::Text,
            FieldKey::Pronouns => FieldKind::Picker(PickerSource::Static(PRONOUNS)),
            FieldKey::College => FieldKind::Picker(PickerSource::Lookup(LookupKind::Colleges)),
            FieldKey::Degree => FieldKind::Picker(PickerSource::Lookup(LookupKind::Degrees)),
            FieldKey::Occupation => {
                FieldKind::Picker(PickerSource::Lookup(LookupKind::Occupations))
            }
            FieldKey::Specialty => FieldKind::Picker(PickerSource::Lookup(LookupKind::Specialties)),
            FieldKey::Program => FieldKind::Picker(PickerSource::Lookup(LookupKind::Programs)),
            FieldKey::Format => FieldKind::Picker(PickerSource::Lookup(LookupKind::Formats)),
            FieldKey::CurrYear | FieldKey::GradYear => FieldKind::Counter,
            FieldKey::Birthday => FieldKind::Date,
        }
    }

    /// Case-insensitive match against the camelCase key.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl FieldValue {
    /// The value as it appears in an edit form.
    #[must_use]
    pub fn to_form_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

/// The current user's profile as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub id: UserId,
    #[serde(default)]
    pub fields: BTreeMap<FieldKey, FieldValue>,
}

impl ProfileData {
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: FieldKey, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.fields.get(&key)
    }

    pub fn set(&mut self, key: FieldKey, value: FieldValue) {
        self.fields.insert(key, value);
    }

    /// Form text for `key`; absent fields read as empty.
    #[must_use]
    pub fn form_text(&self, key: FieldKey) -> String {
        self.get(key).map(FieldValue::to_form_text).unwrap_or_default()
    }
}
