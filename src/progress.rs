//! Registration progress toward the target contact count

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target used when none is configured
pub const DEFAULT_TARGET_COUNT: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationProgress {
    pub count: u64,
    pub target: u64,
}

impl RegistrationProgress {
    pub fn new(count: u64, target: u64) -> Self {
        Self { count, target }
    }

    /// Percentage complete, capped at 100. A zero target counts as complete.
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.count as f64 / self.target as f64 * 100.0).min(100.0)
    }

    /// Once complete, the front-end offers the VCF download instead of
    /// the registration form.
    pub fn is_complete(&self) -> bool {
        self.count >= self.target
    }

    pub fn remaining(&self) -> u64 {
        self.target.saturating_sub(self.count)
    }
}

impl fmt::Display for RegistrationProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} contacts ({:.1}%)",
            self.count,
            self.target,
            self.percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_progress() {
        let progress = RegistrationProgress::new(33, 150);
        assert!((progress.percent() - 22.0).abs() < 1e-9);
        assert!(!progress.is_complete());
        assert_eq!(progress.remaining(), 117);
        assert_eq!(progress.to_string(), "33 / 150 contacts (22.0%)");
    }

    #[test]
    fn test_progress_caps_at_hundred() {
        let progress = RegistrationProgress::new(180, 150);
        assert_eq!(progress.percent(), 100.0);
        assert!(progress.is_complete());
        assert_eq!(progress.remaining(), 0);
    }

    #[test]
    fn test_zero_target_is_complete() {
        let progress = RegistrationProgress::new(0, 0);
        assert_eq!(progress.percent(), 100.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_display_rounds_to_one_decimal() {
        assert_eq!(
            RegistrationProgress::new(1, 110).to_string(),
            "1 / 110 contacts (0.9%)"
        );
    }
}
