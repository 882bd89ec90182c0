//! Filter categories and the criteria record used for matching.

use serde::{Deserialize, Serialize};

use crate::LookupKind;

/// Wire form of the "no filter applied" sentinel.
pub const ANY: &str = "any";

/// A single filterable dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    AccountType,
    Department,
    College,
    Degree,
    Occupation,
    Format,
    Program,
    Quote,
    OnlineStatus,
    MajorMinor,
    Goals,
    Group,
    ProfileType,
}

/// Where the selectable options for a category come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    /// Fixed enumeration; `Any` is always the first label.
    Static(&'static [&'static str]),
    /// Options served by the lookup cache.
    Lookup(LookupKind),
}

const ACCOUNT_TYPES: &[&str] = &["Any", "Student", "Professional"];
const DEPARTMENTS: &[&str] = &[
    "Any",
    "Anesthesiology",
    "Emergency Medicine",
    "Family Medicine",
    "Internal Medicine",
    "Neurology",
    "Pediatrics",
    "Psychiatry",
    "Radiology",
    "Surgery",
];
const QUOTE: &[&str] = &["Any", "Yes", "No"];
const ONLINE_STATUS: &[&str] = &["Any", "Online", "Offline"];
const MAJOR_MINOR: &[&str] = &["Any", "Major", "Minor"];
const GOALS: &[&str] = &[
    "Any",
    "Mentorship",
    "Research",
    "Networking",
    "Study Partner",
];
const GROUPS: &[&str] = &["Any", "Pre-Med", "Med School", "Residency", "Attending"];
const PROFILE_TYPES: &[&str] = &["Any", "Mentor", "Mentee"];

impl FilterCategory {
    pub const ALL: [FilterCategory; 13] = [
        FilterCategory::AccountType,
        FilterCategory::Department,
        FilterCategory::College,
        FilterCategory::Degree,
        FilterCategory::Occupation,
        FilterCategory::Format,
        FilterCategory::Program,
        FilterCategory::Quote,
        FilterCategory::OnlineStatus,
        FilterCategory::MajorMinor,
        FilterCategory::Goals,
        FilterCategory::Group,
        FilterCategory::ProfileType,
    ];

    /// camelCase key used in the criteria record and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterCategory::AccountType => "accountType",
            FilterCategory::Department => "department",
            FilterCategory::College => "college",
            FilterCategory::Degree => "degree",
            FilterCategory::Occupation => "occupation",
            FilterCategory::Format => "format",
            FilterCategory::Program => "program",
            FilterCategory::Quote => "quote",
            FilterCategory::OnlineStatus => "onlineStatus",
            FilterCategory::MajorMinor => "majorMinor",
            FilterCategory::Goals => "goals",
            FilterCategory::Group => "group",
            FilterCategory::ProfileType => "profileType",
        }
    }

    /// Human-readable chip label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FilterCategory::AccountType => "Account Type",
            FilterCategory::Department => "Department",
            FilterCategory::College => "College",
            FilterCategory::Degree => "Degree",
            FilterCategory::Occupation => "Occupation",
            FilterCategory::Format => "Format",
            FilterCategory::Program => "Program",
            FilterCategory::Quote => "Quote",
            FilterCategory::OnlineStatus => "Online Status",
            FilterCategory::MajorMinor => "Major/Minor",
            FilterCategory::Goals => "Goals",
            FilterCategory::Group => "Group",
            FilterCategory::ProfileType => "Profile Type",
        }
    }

    /// Case-insensitive exact match against the camelCase key.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
    }

    #[must_use]
    pub const fn source(self) -> OptionSource {
        match self {
            FilterCategory::AccountType => OptionSource::Static(ACCOUNT_TYPES),
            FilterCategory::Department => OptionSource::Static(DEPARTMENTS),
            FilterCategory::College => OptionSource::Lookup(LookupKind::Colleges),
            FilterCategory::Degree => OptionSource::Lookup(LookupKind::Degrees),
            FilterCategory::Occupation => OptionSource::Lookup(LookupKind::Occupations),
            FilterCategory::Format => OptionSource::Lookup(LookupKind::Formats),
            FilterCategory::Program => OptionSource::Lookup(LookupKind::Programs),
            FilterCategory::Quote => OptionSource::Static(QUOTE),
            FilterCategory::OnlineStatus => OptionSource::Static(ONLINE_STATUS),
            FilterCategory::MajorMinor => OptionSource::Static(MAJOR_MINOR),
            FilterCategory::Goals => OptionSource::Static(GOALS),
            FilterCategory::Group => OptionSource::Static(GROUPS),
            FilterCategory::ProfileType => OptionSource::Static(PROFILE_TYPES),
        }
    }
}

impl std::fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selected value for one category.
///
/// Concrete values are always stored lower-cased so comparisons against
/// display labels can be done case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterValue {
    #[default]
    Any,
    Value(String),
}

impl FilterValue {
    /// Normalize a tapped option label. Blank input and `"any"` (any case) map to [`FilterValue::Any`].
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if lower.is_empty() || lower == ANY {
            FilterValue::Any
        } else {
            FilterValue::Value(lower)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            FilterValue::Any => ANY,
            FilterValue::Value(value) => value,
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }

    /// Whether a display label denotes this value, compared the way labels are stored.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        *self == FilterValue::new(label)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<FilterValue> for String {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Any => ANY.to_string(),
            FilterValue::Value(value) => value,
        }
    }
}

/// One selected value per category; every category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub account_type: FilterValue,
    pub department: FilterValue,
    pub college: FilterValue,
    pub degree: FilterValue,
    pub occupation: FilterValue,
    pub format: FilterValue,
    pub program: FilterValue,
    pub quote: FilterValue,
    pub online_status: FilterValue,
    pub major_minor: FilterValue,
    pub goals: FilterValue,
    pub group: FilterValue,
    pub profile_type: FilterValue,
}

impl FilterCriteria {
    #[must_use]
    pub fn get(&self, category: FilterCategory) -> &FilterValue {
        match category {
            FilterCategory::AccountType => &self.account_type,
            FilterCategory::Department => &self.department,
            FilterCategory::College => &self.college,
            FilterCategory::Degree => &self.degree,
            FilterCategory::Occupation => &self.occupation,
            FilterCategory::Format => &self.format,
            FilterCategory::Program => &self.program,
            FilterCategory::Quote => &self.quote,
            FilterCategory::OnlineStatus => &self.online_status,
            FilterCategory::MajorMinor => &self.major_minor,
            FilterCategory::Goals => &self.goals,
            FilterCategory::Group => &self.group,
            FilterCategory::ProfileType => &self.profile_type,
        }
    }

    pub fn get_mut(&mut self, category: FilterCategory) -> &mut FilterValue {
        match category {
            FilterCategory::AccountType => &mut self.account_type,
            FilterCategory::Department => &mut self.department,
            FilterCategory::College => &mut self.college,
            FilterCategory::Degree => &mut self.degree,
            FilterCategory::Occupation => &mut self.occupation,
            FilterCategory::Format => &mut self.format,
            FilterCategory::Program => &mut self.program,
            FilterCategory::Quote => &mut self.quote,
            FilterCategory::OnlineStatus => &mut self.online_status,
            FilterCategory::MajorMinor => &mut self.major_minor,
            FilterCategory::Goals => &mut self.goals,
            FilterCategory::Group => &mut self.group,
            FilterCategory::ProfileType => &mut self.profile_type,
        }
    }

    /// Categories with a concrete value, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = (FilterCategory, &FilterValue)> {
        FilterCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, value)| !value.is_any())
    }
}
