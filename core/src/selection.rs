//! Filter selection controller.
//!
//! Bridges the generic "pick one option for the active category" row to the
//! option source and criterion of that concrete category.

use std::iter::Copied;
use std::slice;

use medalliance_types::filter::ANY;
use medalliance_types::{FilterCategory, FilterValue, LookupEntry, LookupKind, OptionSource};

use crate::{FilterState, LookupCache};

/// Selectable labels for one category. Cheap to copy; iterate as often as needed.
#[derive(Debug, Clone, Copy)]
pub enum CategoryOptions<'a> {
    Static(&'static [&'static str]),
    Lookup(&'a [LookupEntry]),
    Empty,
}

impl<'a> CategoryOptions<'a> {
    #[must_use]
    pub fn iter(&self) -> OptionIter<'a> {
        match *self {
            CategoryOptions::Static(labels) => OptionIter::Static(labels.iter().copied()),
            CategoryOptions::Lookup(entries) => OptionIter::Lookup(entries.iter()),
            CategoryOptions::Empty => OptionIter::Empty,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            CategoryOptions::Static(labels) => labels.len(),
            CategoryOptions::Lookup(entries) => entries.len(),
            CategoryOptions::Empty => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        let wanted = FilterValue::new(label);
        self.iter().any(|option| wanted.matches_label(option))
    }
}

impl<'a> IntoIterator for CategoryOptions<'a> {
    type Item = &'a str;
    type IntoIter = OptionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub enum OptionIter<'a> {
    Static(Copied<slice::Iter<'static, &'static str>>),
    Lookup(slice::Iter<'a, LookupEntry>),
    Empty,
}

impl<'a> Iterator for OptionIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OptionIter::Static(labels) => labels.next(),
            OptionIter::Lookup(entries) => entries.next().map(|entry| entry.name.as_str()),
            OptionIter::Empty => None,
        }
    }
}

/// Borrow-scoped access to the filter store for option selection.
pub struct FilterSelection<'a> {
    filters: &'a mut FilterState,
    lookups: &'a LookupCache,
}

impl<'a> FilterSelection<'a> {
    pub fn new(filters: &'a mut FilterState, lookups: &'a LookupCache) -> Self {
        Self { filters, lookups }
    }

    #[must_use]
    pub fn active_category(&self) -> Option<FilterCategory> {
        self.filters.expansion().active()
    }

    /// Options for the active category. Lookup-backed categories yield whatever is
    /// cached right now, which is empty while the collection is still loading.
    #[must_use]
    pub fn options(&self) -> CategoryOptions<'a> {
        self.active_category()
            .map_or(CategoryOptions::Empty, |category| self.options_for(category))
    }

    #[must_use]
    pub fn options_for(&self, category: FilterCategory) -> CategoryOptions<'a> {
        match category.source() {
            OptionSource::Static(labels) => CategoryOptions::Static(labels),
            OptionSource::Lookup(kind) => CategoryOptions::Lookup(self.lookups.entries(kind)),
        }
    }

    /// Options for a category given by its wire name. Unknown names yield nothing.
    #[must_use]
    pub fn options_for_name(&self, name: &str) -> CategoryOptions<'a> {
        match FilterCategory::parse(name) {
            Some(category) => self.options_for(category),
            None => {
                tracing::warn!(name, "unknown filter category");
                CategoryOptions::Empty
            }
        }
    }

    /// Lookup collection the active category draws from, if any.
    #[must_use]
    pub fn lookup_needed(&self) -> Option<LookupKind> {
        match self.active_category()?.source() {
            OptionSource::Lookup(kind) => Some(kind),
            OptionSource::Static(_) => None,
        }
    }

    #[must_use]
    pub fn current_value(&self) -> &str {
        self.active_category().map_or(ANY, |category| {
            self.filters.criteria().get(category).as_str()
        })
    }

    #[must_use]
    pub fn is_selected(&self, label: &str) -> bool {
        match self.active_category() {
            Some(category) => self.filters.criteria().get(category).matches_label(label),
            None => FilterValue::Any.matches_label(label),
        }
    }

    /// Commit a tapped option to the active category and collapse its row.
    ///
    /// Labels the category does not offer leave the criterion untouched; the
    /// row still collapses. `Any` is always accepted.
    pub fn select_option(&mut self, label: &str) {
        let Some(category) = self.active_category() else {
            tracing::debug!(label, "option selected with no active filter category");
            return;
        };
        if FilterValue::new(label).is_any() || self.options().contains(label) {
            self.filters.set_criterion(category, label);
        } else {
            tracing::warn!(
                category = %category,
                label,
                "option not offered by filter category"
            );
        }
        if self.filters.expansion().is_expanded() {
            self.filters.toggle_option(category);
        }
        tracing::debug!(
            category = %category,
            value = self.filters.criteria().get(category).as_str(),
            "filter criterion selected"
        );
    }
}
