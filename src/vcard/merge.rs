//! Merge normalization
//!
//! Brings numbers that were stored with and without a calling code onto the
//! same canonical digits so the generator can detect duplicates.

use contact_types::NormalizedNumber;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Calling codes that can be assumed for local numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefaultCallingCode {
    /// +254
    #[default]
    Kenya,
    /// +255
    Tanzania,
    /// +234
    Nigeria,
}

impl DefaultCallingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultCallingCode::Kenya => "254",
            DefaultCallingCode::Tanzania => "255",
            DefaultCallingCode::Nigeria => "234",
        }
    }

    /// Subscriber-number length that gets the calling code prepended
    fn local_length(&self) -> usize {
        match self {
            DefaultCallingCode::Kenya | DefaultCallingCode::Tanzania => 9,
            DefaultCallingCode::Nigeria => 10,
        }
    }

    /// Pick the default code for a raw stored number.
    ///
    /// Only an explicit `255` or `234` prefix on the raw string changes the
    /// default; everything else gets `fallback`.
    pub fn infer(raw: &str, fallback: DefaultCallingCode) -> DefaultCallingCode {
        if raw.starts_with("255") {
            DefaultCallingCode::Tanzania
        } else if raw.starts_with("234") {
            DefaultCallingCode::Nigeria
        } else {
            fallback
        }
    }
}

impl fmt::Display for DefaultCallingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultCallingCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('+') {
            "254" => Ok(DefaultCallingCode::Kenya),
            "255" => Ok(DefaultCallingCode::Tanzania),
            "234" => Ok(DefaultCallingCode::Nigeria),
            other => Err(ConfigError::InvalidValue {
                key: "default calling code",
                value: other.to_string(),
                reason: "expected one of 254, 255, 234".to_string(),
            }),
        }
    }
}

/// Canonical digits for deduplication.
///
/// A leading `0` is replaced by the default code; otherwise a bare
/// subscriber number (9 digits for 254/255, 10 for 234) gets the default
/// code prepended. Anything else is assumed to carry its calling code.
pub fn normalize_for_merge(raw: &str, default_code: DefaultCallingCode) -> NormalizedNumber {
    let digits = NormalizedNumber::from_raw(raw);

    if let Some(local) = digits.without_trunk_prefix() {
        local.with_calling_code(default_code.as_str())
    } else if digits.len() == default_code.local_length() {
        digits.with_calling_code(default_code.as_str())
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_takes_default_code() {
        let n = normalize_for_merge("0712345678", DefaultCallingCode::Kenya);
        assert_eq!(n.as_str(), "254712345678");

        let n = normalize_for_merge("0712 345 678", DefaultCallingCode::Tanzania);
        assert_eq!(n.as_str(), "255712345678");

        let n = normalize_for_merge("08012345678", DefaultCallingCode::Nigeria);
        assert_eq!(n.as_str(), "2348012345678");
    }

    #[test]
    fn test_subscriber_number_gets_prefixed() {
        assert_eq!(
            normalize_for_merge("712345678", DefaultCallingCode::Kenya).as_str(),
            "254712345678"
        );
        assert_eq!(
            normalize_for_merge("712345678", DefaultCallingCode::Tanzania).as_str(),
            "255712345678"
        );
        assert_eq!(
            normalize_for_merge("8012345678", DefaultCallingCode::Nigeria).as_str(),
            "2348012345678"
        );
    }

    #[test]
    fn test_length_rule_is_per_code() {
        // 10 digits is only a subscriber number under Nigeria
        assert_eq!(
            normalize_for_merge("8012345678", DefaultCallingCode::Kenya).as_str(),
            "8012345678"
        );
        // 9 digits is only a subscriber number under Kenya/Tanzania
        assert_eq!(
            normalize_for_merge("712345678", DefaultCallingCode::Nigeria).as_str(),
            "712345678"
        );
    }

    #[test]
    fn test_leading_zero_replacement_is_not_followed_by_prefixing() {
        // "0" + 6 digits becomes 9 digits; it must not be prefixed a second time
        assert_eq!(
            normalize_for_merge("0123456", DefaultCallingCode::Kenya).as_str(),
            "254123456"
        );
    }

    #[test]
    fn test_separators_are_dropped_before_rules_apply() {
        assert_eq!(
            normalize_for_merge("(0) 712-345-678", DefaultCallingCode::Kenya).as_str(),
            "254712345678"
        );
        assert_eq!(
            normalize_for_merge("+234 801 234 5678", DefaultCallingCode::Kenya).as_str(),
            crate::phone::format("+234 801 234 5678")
        );
    }

    #[test]
    fn test_full_numbers_pass_through() {
        assert_eq!(
            normalize_for_merge("+254 712 345 678", DefaultCallingCode::Kenya).as_str(),
            "254712345678"
        );
        assert_eq!(
            normalize_for_merge("256712345678", DefaultCallingCode::Kenya).as_str(),
            "256712345678"
        );
        assert_eq!(normalize_for_merge("", DefaultCallingCode::Kenya).as_str(), "");
    }

    #[test]
    fn test_infer_default_code() {
        let fallback = DefaultCallingCode::Kenya;
        assert_eq!(DefaultCallingCode::infer("255712345678", fallback), DefaultCallingCode::Tanzania);
        assert_eq!(DefaultCallingCode::infer("2348012345678", fallback), DefaultCallingCode::Nigeria);
        assert_eq!(DefaultCallingCode::infer("0712345678", fallback), DefaultCallingCode::Kenya);
        // inference looks at the raw string, so a leading '+' hides the prefix
        assert_eq!(DefaultCallingCode::infer("+255712345678", fallback), DefaultCallingCode::Kenya);
        assert_eq!(
            DefaultCallingCode::infer("0712345678", DefaultCallingCode::Tanzania),
            DefaultCallingCode::Tanzania
        );
    }

    #[test]
    fn test_parse_default_code() {
        assert_eq!("254".parse::<DefaultCallingCode>().unwrap(), DefaultCallingCode::Kenya);
        assert_eq!("+234".parse::<DefaultCallingCode>().unwrap(), DefaultCallingCode::Nigeria);
        assert!("256".parse::<DefaultCallingCode>().is_err());
    }
}
