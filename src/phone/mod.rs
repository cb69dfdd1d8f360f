//! Phone Number Validation
//!
//! Decides whether a user-supplied phone string is acceptable and reduces it
//! to canonical digits.
//!
//! Formatting and validation are deliberately separate: [`format`] always
//! succeeds, [`validate`] may reject. Callers that must refuse unsupported
//! numbers call [`validate`] (or [`check`] for the reason) before formatting.
//!
//! Local numbers with a leading `0` are NOT expanded here. That convention
//! belongs to card generation only, see [`crate::vcard::normalize_for_merge`].

pub mod rules;

pub use rules::{rule_for, CountryRule, COUNTRY_RULES};

use contact_types::NormalizedNumber;

use crate::error::PhoneRejection;

/// Validator over a calling-code table
#[derive(Debug, Clone, Copy)]
pub struct PhoneNormalizer {
    rules: &'static [CountryRule],
}

impl PhoneNormalizer {
    /// Normalizer over the built-in allow-list
    pub const fn new() -> Self {
        Self {
            rules: COUNTRY_RULES,
        }
    }

    /// Normalizer over a custom table.
    ///
    /// Lookup is first-match, so the table's calling codes must be prefix-free.
    pub const fn with_rules(rules: &'static [CountryRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [CountryRule] {
        self.rules
    }

    /// Accept or reject a raw number. Never fails on malformed input.
    pub fn validate(&self, raw: &str) -> bool {
        self.check(raw).is_ok()
    }

    /// Like [`validate`](Self::validate), but reports why a number was rejected
    /// and which rule accepted it.
    pub fn check(&self, raw: &str) -> Result<&'static CountryRule, PhoneRejection> {
        let digits = format(raw);
        if digits.is_empty() {
            return Err(PhoneRejection::NoDigits);
        }

        let rule = rule_for(self.rules, &digits)
            .ok_or_else(|| PhoneRejection::UnsupportedCountry {
                digits: digits.clone(),
            })?;

        if !rule.allows_length(digits.len()) {
            return Err(PhoneRejection::InvalidLength {
                calling_code: rule.calling_code,
                length: digits.len(),
                expected: rule.allowed_lengths,
            });
        }

        Ok(rule)
    }

    /// Digits-only form of `raw`
    pub fn format(&self, raw: &str) -> String {
        format(raw)
    }
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate against the built-in table
pub fn validate(raw: &str) -> bool {
    PhoneNormalizer::new().validate(raw)
}

/// Check against the built-in table, with a rejection reason
pub fn check(raw: &str) -> Result<&'static CountryRule, PhoneRejection> {
    PhoneNormalizer::new().check(raw)
}

/// Strip every character that is not an ASCII digit. Total and idempotent.
pub fn format(raw: &str) -> String {
    NormalizedNumber::from_raw(raw).into_inner()
}
