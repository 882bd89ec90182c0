//! Categorical lookup collections served by the backend.

use serde::{Deserialize, Serialize};

use crate::LookupId;

/// A backend-maintained option collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Colleges,
    Degrees,
    Occupations,
    Specialties,
    Formats,
    Programs,
}

impl LookupKind {
    pub const ALL: [LookupKind; 6] = [
        LookupKind::Colleges,
        LookupKind::Degrees,
        LookupKind::Occupations,
        LookupKind::Specialties,
        LookupKind::Formats,
        LookupKind::Programs,
    ];

    /// Path segment used by the backend (`/lookups/{kind}`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LookupKind::Colleges => "colleges",
            LookupKind::Degrees => "degrees",
            LookupKind::Occupations => "occupations",
            LookupKind::Specialties => "specialties",
            LookupKind::Formats => "formats",
            LookupKind::Programs => "programs",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable lookup value. `name` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: LookupId,
    pub name: String,
}

impl LookupEntry {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: LookupId::new(id),
            name: name.into(),
        }
    }
}
