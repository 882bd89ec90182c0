//! Transient success notice shown after a field is saved.

use std::time::Duration;

use medalliance_types::NonEmptyStaticStr;

pub const SUCCESS_MESSAGE: NonEmptyStaticStr = NonEmptyStaticStr::new("Changes saved!");
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// A message that expires once its timer has been advanced past `duration`.
///
/// Advanced by the caller's frame/tick delta. Showing a new notice replaces
/// the old one outright, so at most one expiry is ever pending.
#[derive(Debug, Clone)]
pub struct SuccessNotice {
    message: NonEmptyStaticStr,
    elapsed: Duration,
    duration: Duration,
}

impl SuccessNotice {
    #[must_use]
    pub fn new(message: NonEmptyStaticStr, duration: Duration) -> Self {
        Self {
            message,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    #[must_use]
    pub fn saved(duration: Duration) -> Self {
        Self::new(SUCCESS_MESSAGE, duration)
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message.as_str()
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}
