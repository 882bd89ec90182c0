//! Filter panel behavior through a full session

use medalliance_core::{FilterAction, FilterSelection, FilterState, LookupCache};
use medalliance_types::{FilterCategory, FilterCriteria, FilterValue, LookupEntry, LookupKind};

use crate::common::{MemoryBackend, app_with, sample_profile};

fn prior_states(first: FilterCategory) -> Vec<FilterState> {
    let fresh = FilterState::new();
    let mut expanded = FilterState::new();
    expanded.toggle_option(first);
    let mut collapsed = expanded.clone();
    collapsed.toggle_option(first);
    vec![fresh, expanded, collapsed]
}

#[test]
fn toggle_pair_restores_expansion() {
    for first in FilterCategory::ALL {
        for category in FilterCategory::ALL {
            for mut state in prior_states(first) {
                // Another row being open makes the first toggle a switch, not a flip.
                if state.expansion().expanded_category().is_some_and(|open| open != category) {
                    continue;
                }
                let before = state.expansion().is_expanded();

                state.toggle_option(category);
                state.toggle_option(category);

                assert_eq!(
                    state.expansion().is_expanded(),
                    before,
                    "{first} then {category}"
                );
            }
        }
    }
}

#[test]
fn toggling_another_row_switches_directly() {
    let mut state = FilterState::new();
    state.toggle_option(FilterCategory::College);
    state.toggle_option(FilterCategory::Goals);
    assert_eq!(
        state.expansion().expanded_category(),
        Some(FilterCategory::Goals)
    );
}

#[test]
fn clear_resets_everything_regardless_of_prior_state() {
    let mut state = FilterState::new();
    state.apply(FilterAction::Open);
    state.apply(FilterAction::ToggleOption(FilterCategory::Goals));
    for category in FilterCategory::ALL {
        state.apply(FilterAction::SetCriterion {
            category,
            value: "Something".to_string(),
        });
    }
    assert_eq!(state.active_filter_count(), FilterCategory::ALL.len());

    state.apply(FilterAction::Clear);

    assert_eq!(state.criteria(), &FilterCriteria::default());
    assert!(!state.is_panel_open());
    assert_eq!(state.expansion().active(), None);
    assert!(!state.expansion().is_expanded());
    assert_eq!(state.active_filter_count(), 0);
}

#[test]
fn selecting_harvard_stores_lowercase_and_collapses() {
    let mut filters = FilterState::new();
    let mut lookups = LookupCache::new();
    lookups.store(LookupKind::Colleges, vec![LookupEntry::new(7, "Harvard")]);
    filters.open();
    filters.toggle_option(FilterCategory::College);

    let mut selection = FilterSelection::new(&mut filters, &lookups);
    assert!(selection.options().contains("Harvard"));
    selection.select_option("Harvard");

    assert_eq!(
        filters.criteria().get(FilterCategory::College),
        &FilterValue::Value("harvard".to_string())
    );
    assert!(!filters.expansion().is_expanded());
}

#[test]
fn selecting_any_clears_the_criterion() {
    let mut filters = FilterState::new();
    let lookups = LookupCache::new();
    filters.toggle_option(FilterCategory::Department);
    filters.set_criterion(FilterCategory::Department, "Surgery");

    FilterSelection::new(&mut filters, &lookups).select_option("Any");

    assert!(filters.criteria().get(FilterCategory::Department).is_any());
    assert_eq!(filters.active_filter_count(), 0);
}

#[test]
fn unknown_category_name_yields_no_options() {
    let mut filters = FilterState::new();
    let lookups = LookupCache::new();
    let selection = FilterSelection::new(&mut filters, &lookups);
    assert!(selection.options_for_name("favouriteColour").is_empty());
    assert_eq!(selection.options_for_name("quote").len(), 3);
}

#[tokio::test]
async fn session_loads_lookup_options_on_first_expand() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_filters();

    app.expand_category(FilterCategory::Degree).await;
    let degrees: Vec<String> = app.options().iter().map(str::to_string).collect();
    assert_eq!(degrees, vec!["MD", "DO"]);

    app.select_option("DO");
    assert_eq!(
        app.filters().criteria().get(FilterCategory::Degree).as_str(),
        "do"
    );
    assert!(app.filters().is_panel_open());

    app.expand_category(FilterCategory::Degree).await;
    assert_eq!(backend.lookup_calls(), vec![LookupKind::Degrees]);
    assert!(app.selection().is_selected("DO"));
}

#[tokio::test]
async fn closing_the_panel_keeps_criteria() {
    let backend = MemoryBackend::new(sample_profile());
    let mut app = app_with(&backend);
    app.open_filters();
    app.expand_category(FilterCategory::OnlineStatus).await;
    app.select_option("Online");
    app.close_filters();

    assert!(!app.filters().is_panel_open());
    assert_eq!(app.filters().active_filter_count(), 1);

    app.clear_filters();
    assert_eq!(app.filters().active_filter_count(), 0);
}
