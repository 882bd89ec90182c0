//! Filter state store.
//!
//! Holds the selected criteria plus two independent pieces of UI state:
//! whether the filter panel is visible at all, and which category row (if
//! any) is expanded inside it. Every operation is infallible.

use medalliance_types::{FilterCategory, FilterCriteria, FilterValue};

/// Which category row is expanded inside the filter panel.
///
/// `expanded` is only ever true while `active` is set. Collapsing keeps
/// `active` so the same row can be reopened with a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowExpansion {
    active: Option<FilterCategory>,
    expanded: bool,
}

impl RowExpansion {
    #[must_use]
    pub fn active(&self) -> Option<FilterCategory> {
        self.active
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The category whose options are currently shown.
    #[must_use]
    pub fn expanded_category(&self) -> Option<FilterCategory> {
        self.active.filter(|_| self.expanded)
    }

    fn toggle(&mut self, category: FilterCategory) {
        if self.active == Some(category) {
            self.expanded = !self.expanded;
        } else {
            self.active = Some(category);
            self.expanded = true;
        }
    }
}

/// Reducer-style description of a filter mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Open,
    Close,
    ToggleOption(FilterCategory),
    SetCriterion {
        category: FilterCategory,
        value: String,
    },
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
    panel_open: bool,
    expansion: RowExpansion,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn expansion(&self) -> RowExpansion {
        self.expansion
    }

    pub fn open(&mut self) {
        self.panel_open = true;
    }

    /// Hide the panel. Row expansion is left alone so reopening resumes where the user left off.
    pub fn close(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_option(&mut self, category: FilterCategory) {
        self.expansion.toggle(category);
        tracing::debug!(
            category = %category,
            expanded = self.expansion.expanded,
            "filter row toggled"
        );
    }

    pub fn set_criterion(&mut self, category: FilterCategory, value: &str) {
        *self.criteria.get_mut(category) = FilterValue::new(value);
    }

    /// Reset criteria and UI state in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
        tracing::debug!("filters cleared");
    }

    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::Open => self.open(),
            FilterAction::Close => self.close(),
            FilterAction::ToggleOption(category) => self.toggle_option(category),
            FilterAction::SetCriterion { category, value } => self.set_criterion(category, &value),
            FilterAction::Clear => self.clear(),
        }
    }

    /// Number of categories with a concrete value selected.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.criteria.active().count()
    }
}
