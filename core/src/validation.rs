//! Declarative per-field validation rules.
//!
//! Rules are looked up by [`FieldKey`] and evaluated one field at a time, so
//! an inline edit never fails because of some other field on the form.
//!
//! ```toml
//! [validation.bio]
//! checks = [{ check = "max_length", max = 300 }]
//!
//! [validation.currYear]
//! checks = [
//!     { check = "integer", message = "Invalid value" },
//!     { check = "range", min = 1, max = 6, message = "Invalid value" },
//! ]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use medalliance_types::{FieldKey, FieldKind, FieldValue};

/// A field-scoped validation failure carrying the message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FieldKey,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: FieldKey, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// One constraint. `message` replaces the generated message when set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    Required {
        #[serde(default)]
        message: Option<String>,
    },
    MinLength {
        min: usize,
        #[serde(default)]
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        #[serde(default)]
        message: Option<String>,
    },
    Integer {
        #[serde(default)]
        message: Option<String>,
    },
    Range {
        min: i64,
        max: i64,
        #[serde(default)]
        message: Option<String>,
    },
}

impl Check {
    fn is_required(&self) -> bool {
        matches!(self, Check::Required { .. })
    }

    fn evaluate(&self, field: FieldKey, value: &str) -> Result<(), ValidationError> {
        let label = field.label();
        let fail = |custom: &Option<String>, generated: String| -> Result<(), ValidationError> {
            Err(ValidationError::new(field, custom.clone().unwrap_or(generated)))
        };
        match self {
            Check::Required { message } => {
                if value.is_empty() {
                    return fail(message, format!("{label} is required"));
                }
            }
            Check::MinLength { min, message } => {
                if value.chars().count() < *min {
                    return fail(
                        message,
                        format!("{label} must be at least {min} characters"),
                    );
                }
            }
            Check::MaxLength { max, message } => {
                if value.chars().count() > *max {
                    return fail(message, format!("{label} must be at most {max} characters"));
                }
            }
            Check::Integer { message } => {
                if value.parse::<i64>().is_err() {
                    return fail(message, format!("{label} must be a whole number"));
                }
            }
            Check::Range { min, max, message } => match value.parse::<i64>() {
                Ok(n) if (*min..=*max).contains(&n) => {}
                _ => return fail(message, format!("{label} must be between {min} and {max}")),
            },
        }
        Ok(())
    }
}

/// The ordered checks for one field. The first failing check wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl FieldRule {
    #[must_use]
    pub fn new(checks: Vec<Check>) -> Self {
        Self { checks }
    }

    /// Blank optional values pass; everything else runs every check in order.
    pub fn validate(&self, field: FieldKey, raw: &str) -> Result<(), ValidationError> {
        let value = raw.trim();
        if value.is_empty() && !self.checks.iter().any(Check::is_required) {
            return Ok(());
        }
        self.checks
            .iter()
            .try_for_each(|check| check.evaluate(field, value))
    }
}

const INVALID_VALUE: &str = "Invalid value";

fn max_len(max: usize) -> Check {
    Check::MaxLength { max, message: None }
}

fn year_rule(min: i64, max: i64) -> FieldRule {
    FieldRule::new(vec![
        Check::Integer {
            message: Some(INVALID_VALUE.to_string()),
        },
        Check::Range {
            min,
            max,
            message: Some(INVALID_VALUE.to_string()),
        },
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<FieldKey, FieldRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            FieldKey::Name,
            FieldRule::new(vec![
                Check::Required { message: None },
                Check::MinLength {
                    min: 2,
                    message: None,
                },
                max_len(50),
            ]),
        );
        rules.insert(FieldKey::Pronouns, FieldRule::new(vec![max_len(20)]));
        rules.insert(FieldKey::Bio, FieldRule::new(vec![max_len(500)]));
        rules.insert(FieldKey::Quote, FieldRule::new(vec![max_len(150)]));
        rules.insert(FieldKey::Location, FieldRule::new(vec![max_len(100)]));
        rules.insert(FieldKey::CurrYear, year_rule(1, 8));
        rules.insert(FieldKey::GradYear, year_rule(1950, 2100));
        Self { rules }
    }
}

impl RuleSet {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Default rules with each overridden field's rule replaced wholesale.
    #[must_use]
    pub fn with_overrides(overrides: BTreeMap<FieldKey, FieldRule>) -> Self {
        let mut set = Self::default();
        set.rules.extend(overrides);
        set
    }

    pub fn insert(&mut self, field: FieldKey, rule: FieldRule) {
        self.rules.insert(field, rule);
    }

    #[must_use]
    pub fn rule(&self, field: FieldKey) -> Option<&FieldRule> {
        self.rules.get(&field)
    }

    /// Validate a single field. Fields without a rule always pass.
    pub fn validate_field(&self, field: FieldKey, value: &str) -> Result<(), ValidationError> {
        self.rule(field)
            .map_or(Ok(()), |rule| rule.validate(field, value))
    }
}

/// Convert validated form text into the value sent to the backend.
pub fn coerce(field: FieldKey, value: &str) -> Result<FieldValue, ValidationError> {
    match field.kind() {
        FieldKind::Counter => value.trim().parse::<i64>().map(FieldValue::Number).map_err(|_| {
            ValidationError::new(field, format!("{} must be a whole number", field.label()))
        }),
        FieldKind::Picker(_) | FieldKind::Date | FieldKind::Text => {
            Ok(FieldValue::Text(value.to_string()))
        }
    }
}
