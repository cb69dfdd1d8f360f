//! Supported calling codes and their expected digit lengths.
//!
//! The table is policy: a number is only accepted when it starts with one of
//! these calling codes and its total digit count (calling code included) is
//! one of the allowed lengths.

use serde::Serialize;

/// One row of the calling-code allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryRule {
    /// Calling code without the leading `+`
    pub calling_code: &'static str,
    /// Country name, for diagnostics only
    pub country: &'static str,
    /// Allowed total digit counts, calling code included
    pub allowed_lengths: &'static [usize],
}

impl CountryRule {
    pub const fn new(
        calling_code: &'static str,
        country: &'static str,
        allowed_lengths: &'static [usize],
    ) -> Self {
        Self {
            calling_code,
            country,
            allowed_lengths,
        }
    }

    /// Whether `digits` starts with this rule's calling code
    pub fn matches_prefix(&self, digits: &str) -> bool {
        digits.starts_with(self.calling_code)
    }

    /// Whether a total digit count is allowed for this calling code
    pub fn allows_length(&self, length: usize) -> bool {
        self.allowed_lengths.contains(&length)
    }
}

/// Calling codes must stay prefix-free; see `test_calling_codes_are_prefix_free`.
pub const COUNTRY_RULES: &[CountryRule] = &[
    CountryRule::new("254", "Kenya", &[12]),
    CountryRule::new("255", "Tanzania", &[12]),
    CountryRule::new("256", "Uganda", &[12]),
    CountryRule::new("250", "Rwanda", &[12]),
    CountryRule::new("257", "Burundi", &[12]),
    CountryRule::new("234", "Nigeria", &[13]),
    CountryRule::new("263", "Zimbabwe", &[12]),
    CountryRule::new("52", "Mexico", &[11, 12]),
];

/// Find the rule whose calling code prefixes `digits`.
///
/// `digits` must already be stripped of everything but ASCII digits.
pub fn rule_for<'a>(rules: &'a [CountryRule], digits: &str) -> Option<&'a CountryRule> {
    rules.iter().find(|rule| rule.matches_prefix(digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calling_codes_are_prefix_free() {
        for (i, a) in COUNTRY_RULES.iter().enumerate() {
            for (j, b) in COUNTRY_RULES.iter().enumerate() {
                if i != j {
                    assert!(
                        !b.calling_code.starts_with(a.calling_code),
                        "+{} is a prefix of +{}",
                        a.calling_code,
                        b.calling_code
                    );
                }
            }
        }
    }

    #[test]
    fn test_rule_lookup() {
        assert_eq!(rule_for(COUNTRY_RULES, "254712345678").unwrap().country, "Kenya");
        assert_eq!(rule_for(COUNTRY_RULES, "5215512345678").unwrap().country, "Mexico");
        assert!(rule_for(COUNTRY_RULES, "447911123456").is_none());
        assert!(rule_for(COUNTRY_RULES, "").is_none());
    }

    #[test]
    fn test_allowed_lengths() {
        let mexico = rule_for(COUNTRY_RULES, "52").unwrap();
        assert!(mexico.allows_length(11));
        assert!(mexico.allows_length(12));
        assert!(!mexico.allows_length(13));
    }
}
