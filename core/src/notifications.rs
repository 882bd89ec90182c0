//! Global, user-visible error banner.
//!
//! The channel holds at most one message. A new report replaces whatever is
//! showing; nothing is queued. Only remote and system failures belong here:
//! validation problems stay next to the field that caused them.

use medalliance_types::{NonEmptyStaticStr, NonEmptyString};

const GENERIC_ERROR: NonEmptyStaticStr = NonEmptyStaticStr::new("Something went wrong");

#[derive(Debug, Default)]
pub struct ErrorChannel {
    current: Option<NonEmptyString>,
}

impl ErrorChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing any previous error. Blank messages fall back to a generic text.
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = NonEmptyString::new(message)
            .unwrap_or_else(|_| NonEmptyString::from(GENERIC_ERROR));
        tracing::warn!(error = %message, "error reported");
        self.current = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.current.is_some()
    }
}
