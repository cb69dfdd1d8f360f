//! Contact Types - Foundation Data Structures
//!
//! Pure data structures shared by the card generator, the registration
//! helpers and the `nx_vcf` binary. Nothing in here knows about calling-code
//! policy or the vCard format; those rules live in the `nx-vcf` crate.
//!
//! ## Contents
//!
//! - [`Contact`] - one registered person as exported by the remote API
//! - [`ContactList`] - either JSON shape the API returns for a contact listing
//! - [`NormalizedNumber`] - digits-only phone number used for equality
//!
//! ## Rules
//!
//! 1. **NO POLICY** - Only data structures and trivial accessors
//! 2. **NO WORKSPACE DEPENDENCIES**
//! 3. **SERIALIZABLE** - All types support serde

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONTACT
// ============================================================================

/// A contact record supplied by the caller.
///
/// `phone_number` is expected to carry a country calling code already, but
/// may still contain `+`, spaces or punctuation until it is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, arbitrary Unicode
    pub name: String,
    /// Raw phone number as stored by the API
    pub phone_number: String,
    /// Optional URL carried through verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Contact {
    /// Create a contact without a link
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            link: None,
        }
    }

    /// Attach a link to the contact
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// The link, if present and non-empty
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty())
    }
}

// ============================================================================
// CONTACT LIST
// ============================================================================

/// A contact listing as returned by the remote API.
///
/// The public endpoints return a bare array while the admin listing wraps it
/// as `{ "contacts": [...] }`; both deserialize into the same list. Any other
/// object (an API error body, say) is rejected rather than read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactList {
    contacts: Vec<Contact>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContactListRepr {
    Bare(Vec<Contact>),
    Wrapped { contacts: Vec<Contact> },
}

impl<'de> Deserialize<'de> for ContactList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let contacts = match ContactListRepr::deserialize(deserializer)? {
            ContactListRepr::Bare(contacts) => contacts,
            ContactListRepr::Wrapped { contacts } => contacts,
        };
        Ok(Self { contacts })
    }
}

impl ContactList {
    /// Wrap an existing vector of contacts
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Parse a JSON contact export (either shape)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn into_inner(self) -> Vec<Contact> {
        self.contacts
    }
}

impl From<Vec<Contact>> for ContactList {
    fn from(contacts: Vec<Contact>) -> Self {
        Self::new(contacts)
    }
}

impl<'a> IntoIterator for &'a ContactList {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}

// ============================================================================
// NORMALIZED NUMBER
// ============================================================================

/// Canonical phone number: ASCII digits only, no leading `+`, no separators.
///
/// Two contacts are duplicates exactly when their normalized numbers are
/// byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    /// Build from a string, dropping every character that is not an ASCII digit
    pub fn from_raw(raw: &str) -> Self {
        Self(raw.chars().filter(char::is_ascii_digit).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number with a leading trunk `0` removed, if it has one
    pub fn without_trunk_prefix(&self) -> Option<Self> {
        self.0.strip_prefix('0').map(|rest| Self(rest.to_string()))
    }

    /// Prepend a calling code. Non-digit characters in `code` are dropped.
    pub fn with_calling_code(&self, code: &str) -> Self {
        let mut digits: String = code.chars().filter(char::is_ascii_digit).collect();
        digits.push_str(&self.0);
        Self(digits)
    }

    /// Number in international notation (`+` followed by the digits)
    pub fn international(&self) -> String {
        format!("+{}", self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
