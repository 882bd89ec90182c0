//! Process-wide cache of lookup collections.

use std::collections::BTreeMap;

use medalliance_types::{LookupEntry, LookupKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Absent,
    Loading,
    Loaded(Vec<LookupEntry>),
    Failed(String),
}

static ABSENT: LookupState = LookupState::Absent;

#[derive(Debug, Clone, Default)]
pub struct LookupCache {
    states: BTreeMap<LookupKind, LookupState>,
}

impl LookupCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, kind: LookupKind) -> &LookupState {
        self.states.get(&kind).unwrap_or(&ABSENT)
    }

    /// Cached entries; empty while absent, loading or failed.
    #[must_use]
    pub fn entries(&self, kind: LookupKind) -> &[LookupEntry] {
        match self.state(kind) {
            LookupState::Loaded(entries) => entries,
            _ => &[],
        }
    }

    /// Absent and failed collections are fetched; loaded and in-flight ones are not.
    #[must_use]
    pub fn needs_fetch(&self, kind: LookupKind) -> bool {
        matches!(
            self.state(kind),
            LookupState::Absent | LookupState::Failed(_)
        )
    }

    pub fn begin_loading(&mut self, kind: LookupKind) {
        self.states.insert(kind, LookupState::Loading);
    }

    pub fn store(&mut self, kind: LookupKind, entries: Vec<LookupEntry>) {
        tracing::debug!(kind = %kind, count = entries.len(), "lookup cached");
        self.states.insert(kind, LookupState::Loaded(entries));
    }

    pub fn fail(&mut self, kind: LookupKind, message: impl Into<String>) {
        self.states.insert(kind, LookupState::Failed(message.into()));
    }
}
