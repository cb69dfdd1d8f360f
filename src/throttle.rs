//! Client-side submission throttle
//!
//! The caller owns the throttle and passes in the current time, so there is
//! no process-wide "last submission" value and tests never sleep. The state
//! is serializable for callers that want to keep it between runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistrationError;

/// Minimum gap between two submissions
pub const DEFAULT_DELAY_MS: i64 = 5_000;

/// Longest accepted gap; larger delays are capped to it
pub const MAX_DELAY_MS: i64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionThrottle {
    delay_ms: i64,
    last_submission: Option<DateTime<Utc>>,
}

impl SubmissionThrottle {
    /// Throttle with a minimum gap of `delay_ms` milliseconds, clamped to
    /// `0..=MAX_DELAY_MS`
    pub fn new(delay_ms: i64) -> Self {
        Self {
            delay_ms: delay_ms.clamp(0, MAX_DELAY_MS),
            last_submission: None,
        }
    }

    pub fn delay(&self) -> Duration {
        // deserialized state skips `new`
        Duration::milliseconds(self.delay_ms.clamp(0, MAX_DELAY_MS))
    }

    pub fn last_submission(&self) -> Option<DateTime<Utc>> {
        self.last_submission
    }

    /// Whether a submission at `now` is allowed
    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        match self.last_submission {
            None => true,
            Some(last) => now - last >= self.delay(),
        }
    }

    pub fn record_submission(&mut self, now: DateTime<Utc>) {
        self.last_submission = Some(now);
    }

    /// Whole seconds until the next submission is allowed, rounded up
    pub fn seconds_until_next(&self, now: DateTime<Utc>) -> u64 {
        let Some(last) = self.last_submission else {
            return 0;
        };

        let elapsed_ms = (now - last).num_milliseconds();
        let remaining_ms = self.delay().num_milliseconds().saturating_sub(elapsed_ms);
        if remaining_ms <= 0 {
            0
        } else {
            (remaining_ms as u64).div_ceil(1000)
        }
    }

    /// `Ok` if a submission at `now` is allowed, otherwise the retry delay
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), RegistrationError> {
        if self.can_submit(now) {
            Ok(())
        } else {
            Err(RegistrationError::Throttled {
                retry_after_secs: self.seconds_until_next(now),
            })
        }
    }

    /// Forget the last submission
    pub fn reset(&mut self) {
        self.last_submission = None;
    }
}

impl Default for SubmissionThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}
