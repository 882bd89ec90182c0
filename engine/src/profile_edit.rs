//! Inline profile field editing.
//!
//! At most one field is open at a time. Opening a different field first
//! commits the open one, and the switch only happens if that commit
//! succeeds. Every commit runs validate -> persist -> reflect and reports
//! back a plain success flag; failures never escape as errors.
//!
//! The controller is borrowed mutably for the whole of a commit, including
//! the await on the backend, so a second commit or field switch on the same
//! session cannot begin until the first one resolves.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use medalliance_backend::{BackendError, ProfileBackend};
use medalliance_core::validation::coerce;
use medalliance_core::{
    ErrorChannel, ProfileForm, ProfileStore, RuleSet, SUCCESS_NOTICE_DURATION, SuccessNotice,
    ValidationError,
};
use medalliance_types::FieldKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(FieldKey),
}

impl EditState {
    #[must_use]
    pub fn active_field(self) -> Option<FieldKey> {
        match self {
            EditState::Idle => None,
            EditState::Editing(field) => Some(field),
        }
    }
}

/// State owned elsewhere that a commit reads and updates.
pub struct EditContext<'a> {
    pub profile: &'a mut ProfileStore,
    pub form: &'a mut ProfileForm,
    pub errors: &'a mut ErrorChannel,
}

/// How a commit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No field was open.
    NothingOpen,
    /// Candidate equals the stored value; the backend was not called.
    Unchanged,
    Saved,
    Invalid(ValidationError),
    Failed(BackendError),
}

impl CommitOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CommitOutcome::NothingOpen | CommitOutcome::Unchanged | CommitOutcome::Saved
        )
    }
}

pub struct ProfileEditController {
    backend: Arc<dyn ProfileBackend>,
    rules: Arc<RuleSet>,
    state: EditState,
    notice: Option<SuccessNotice>,
    notice_duration: Duration,
}

impl ProfileEditController {
    pub fn new(backend: Arc<dyn ProfileBackend>, rules: Arc<RuleSet>) -> Self {
        Self {
            backend,
            rules,
            state: EditState::Idle,
            notice: None,
            notice_duration: SUCCESS_NOTICE_DURATION,
        }
    }

    #[must_use]
    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    #[must_use]
    pub fn state(&self) -> EditState {
        self.state
    }

    #[must_use]
    pub fn active_field(&self) -> Option<FieldKey> {
        self.state.active_field()
    }

    #[must_use]
    pub fn success_message(&self) -> Option<&'static str> {
        self.notice.as_ref().map(SuccessNotice::message)
    }

    /// Advance the success notice timer, dropping the notice once it has expired.
    pub fn advance(&mut self, delta: Duration) {
        if let Some(notice) = &mut self.notice {
            notice.advance(delta);
            if notice.is_expired() {
                self.notice = None;
            }
        }
    }

    /// Put `key` into edit mode, committing any other open field first.
    ///
    /// Returns `false` when the open field could not be committed; that field
    /// stays open and the request for `key` is dropped.
    pub async fn open_field(&mut self, key: FieldKey, ctx: &mut EditContext<'_>) -> bool {
        self.notice = None;
        match self.state {
            EditState::Editing(current) if current == key => true,
            EditState::Editing(current) => {
                if !self.commit_save(ctx).await {
                    tracing::debug!(open = %current, requested = %key, "field switch aborted");
                    return false;
                }
                self.state = EditState::Editing(key);
                true
            }
            EditState::Idle => {
                self.state = EditState::Editing(key);
                tracing::debug!(field = %key, "field opened");
                true
            }
        }
    }

    /// Commit on blur. Closes the field when the commit succeeds.
    pub async fn blur(&mut self, ctx: &mut EditContext<'_>) -> bool {
        self.commit_and_close(ctx).await
    }

    /// Commit on an explicit save. Closes the field when the commit succeeds.
    pub async fn save(&mut self, ctx: &mut EditContext<'_>) -> bool {
        self.commit_and_close(ctx).await
    }

    async fn commit_and_close(&mut self, ctx: &mut EditContext<'_>) -> bool {
        let saved = self.commit_save(ctx).await;
        if saved {
            self.state = EditState::Idle;
        }
        saved
    }

    /// Abandon the open edit without committing and restore the stored value.
    pub fn cancel(&mut self, ctx: &mut EditContext<'_>) {
        if let EditState::Editing(field) = self.state {
            ctx.form.reset_field(field, ctx.profile.profile());
            tracing::debug!(field = %field, "edit cancelled");
        }
        self.state = EditState::Idle;
    }

    pub async fn commit_save(&mut self, ctx: &mut EditContext<'_>) -> bool {
        self.commit(ctx).await.is_success()
    }

    /// Validate, persist and reflect the open field. Leaves the edit state untouched.
    pub async fn commit(&mut self, ctx: &mut EditContext<'_>) -> CommitOutcome {
        let EditState::Editing(field) = self.state else {
            return CommitOutcome::NothingOpen;
        };

        // Compared, validated and sent as one trimmed value.
        let candidate = ctx.form.value(field).trim().to_string();
        if candidate == ctx.profile.profile().form_text(field) {
            ctx.form.reset_field(field, ctx.profile.profile());
            return CommitOutcome::Unchanged;
        }

        let value = match self
            .rules
            .validate_field(field, &candidate)
            .and_then(|()| coerce(field, &candidate))
        {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(field = %field, message = %err.message, "field rejected");
                ctx.form
                    .set_errors(BTreeMap::from([(field, err.message.clone())]));
                return CommitOutcome::Invalid(err);
            }
        };

        match self.backend.update_field(field, value).await {
            Ok(profile) => {
                ctx.profile.replace(profile);
                ctx.form.reset_field(field, ctx.profile.profile());
                self.notice = Some(SuccessNotice::saved(self.notice_duration));
                tracing::info!(field = %field, "profile field saved");
                CommitOutcome::Saved
            }
            Err(err) => {
                ctx.errors.report_error(err.message());
                CommitOutcome::Failed(err)
            }
        }
    }
}
