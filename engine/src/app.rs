//! One user session: filters, lookups, the profile being edited and the
//! notification state, wired to the backend.

use std::sync::Arc;
use std::time::Duration;

use medalliance_backend::{LookupSource, ProfileBackend};
use medalliance_core::{
    CategoryOptions, ErrorChannel, FilterAction, FilterSelection, FilterState, LookupCache,
    ProfileForm, ProfileStore, RuleSet, SUCCESS_NOTICE_DURATION,
};
use medalliance_types::{FieldKey, FieldKind, FilterCategory, PickerSource, ProfileData};

use crate::{CommitOutcome, EditContext, LookupLoader, ProfileEditController};

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub rules: RuleSet,
    pub success_message_duration: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            success_message_duration: SUCCESS_NOTICE_DURATION,
        }
    }
}

pub struct App {
    filters: FilterState,
    lookups: LookupCache,
    loader: LookupLoader,
    profile: ProfileStore,
    form: ProfileForm,
    errors: ErrorChannel,
    editor: ProfileEditController,
}

impl App {
    pub fn new(
        profile: ProfileData,
        backend: Arc<dyn ProfileBackend>,
        lookups: Arc<dyn LookupSource>,
        options: AppOptions,
    ) -> Self {
        let editor = ProfileEditController::new(backend, Arc::new(options.rules))
            .with_notice_duration(options.success_message_duration);
        Self {
            filters: FilterState::new(),
            lookups: LookupCache::new(),
            loader: LookupLoader::new(lookups),
            form: ProfileForm::from_profile(&profile),
            profile: ProfileStore::new(profile),
            errors: ErrorChannel::new(),
            editor,
        }
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn apply_filter(&mut self, action: FilterAction) {
        self.filters.apply(action);
    }

    pub fn open_filters(&mut self) {
        self.filters.open();
    }

    pub fn close_filters(&mut self) {
        self.filters.close();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Toggle a category row, loading its lookup collection when the row opens.
    pub async fn expand_category(&mut self, category: FilterCategory) {
        self.filters.toggle_option(category);
        if self.filters.expansion().expanded_category() != Some(category) {
            return;
        }
        let needed = self.selection().lookup_needed();
        if let Some(kind) = needed {
            self.loader.ensure(kind, &mut self.lookups).await;
        }
    }

    pub fn selection(&mut self) -> FilterSelection<'_> {
        FilterSelection::new(&mut self.filters, &self.lookups)
    }

    /// Options for the active category row.
    pub fn options(&mut self) -> CategoryOptions<'_> {
        FilterSelection::new(&mut self.filters, &self.lookups).options()
    }

    pub fn select_option(&mut self, label: &str) {
        self.selection().select_option(label);
    }

    /// Load every lookup collection that is not cached yet.
    pub async fn preload_lookups(&mut self) {
        self.loader.ensure_all(&mut self.lookups).await;
    }

    #[must_use]
    pub fn lookups(&self) -> &LookupCache {
        &self.lookups
    }

    fn edit_context(&mut self) -> (&mut ProfileEditController, EditContext<'_>) {
        (
            &mut self.editor,
            EditContext {
                profile: &mut self.profile,
                form: &mut self.form,
                errors: &mut self.errors,
            },
        )
    }

    /// Open `key` for editing. Lookup-backed pickers get their options loaded
    /// once the field is actually open.
    pub async fn open_field(&mut self, key: FieldKey) -> bool {
        let (editor, mut ctx) = self.edit_context();
        if !editor.open_field(key, &mut ctx).await {
            return false;
        }
        if let FieldKind::Picker(PickerSource::Lookup(kind)) = key.kind() {
            self.loader.ensure(kind, &mut self.lookups).await;
        }
        true
    }

    /// Record user input for `key`. Nothing is validated until commit.
    pub fn set_field_value(&mut self, key: FieldKey, text: impl Into<String>) {
        self.form.set_value(key, text);
    }

    pub async fn blur(&mut self) -> bool {
        let (editor, mut ctx) = self.edit_context();
        editor.blur(&mut ctx).await
    }

    pub async fn save(&mut self) -> bool {
        let (editor, mut ctx) = self.edit_context();
        editor.save(&mut ctx).await
    }

    pub async fn commit(&mut self) -> CommitOutcome {
        let (editor, mut ctx) = self.edit_context();
        editor.commit(&mut ctx).await
    }

    pub fn cancel_edit(&mut self) {
        let (editor, mut ctx) = self.edit_context();
        editor.cancel(&mut ctx);
    }

    #[must_use]
    pub fn active_field(&self) -> Option<FieldKey> {
        self.editor.active_field()
    }

    /// Choices for a picker field; empty for every other kind.
    #[must_use]
    pub fn picker_options(&self, key: FieldKey) -> CategoryOptions<'_> {
        match key.kind() {
            FieldKind::Picker(PickerSource::Static(labels)) => CategoryOptions::Static(labels),
            FieldKind::Picker(PickerSource::Lookup(kind)) => {
                CategoryOptions::Lookup(self.lookups.entries(kind))
            }
            FieldKind::Date | FieldKind::Counter | FieldKind::Text => CategoryOptions::Empty,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileData {
        self.profile.profile()
    }

    #[must_use]
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.errors.error()
    }

    pub fn clear_error(&mut self) {
        self.errors.clear_error();
    }

    #[must_use]
    pub fn success_message(&self) -> Option<&'static str> {
        self.editor.success_message()
    }

    /// Advance time-based state (the success notice).
    pub fn tick(&mut self, delta: Duration) {
        self.editor.advance(delta);
    }
}
