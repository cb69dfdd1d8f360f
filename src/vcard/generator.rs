//! vCard document generation
//!
//! Turns a contact listing into one vCard 3.0 block per distinct number.
//! The first contact seen for a canonical number wins; later duplicates are
//! dropped without being merged or reported.

use std::collections::HashSet;
use std::fmt;

use contact_types::{Contact, NormalizedNumber};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::merge::{normalize_for_merge, DefaultCallingCode};

/// Suffix appended to every formatted name
pub const DEFAULT_NAME_SUFFIX: &str = " 🔥";

/// Options controlling card output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOptions {
    /// Decorative suffix appended to the `FN` field
    pub name_suffix: String,
    /// Calling code assumed for local numbers without a `255`/`234` prefix
    pub fallback_code: DefaultCallingCode,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            fallback_code: DefaultCallingCode::Kenya,
        }
    }
}

/// Generated vCard text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDocument {
    text: String,
    cards: usize,
}

impl CardDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of card blocks in the document
    pub fn card_count(&self) -> usize {
        self.cards
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for CardDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CardDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Builds deduplicated vCard documents from contact lists
#[derive(Debug, Clone, Default)]
pub struct ContactCardGenerator {
    options: CardOptions,
}

impl ContactCardGenerator {
    /// Generator with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CardOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    /// Canonical number for a stored contact number, inferring the default
    /// calling code from the raw prefix.
    pub fn canonical_number(&self, raw: &str) -> NormalizedNumber {
        let default_code = DefaultCallingCode::infer(raw, self.options.fallback_code);
        normalize_for_merge(raw, default_code)
    }

    /// Generate the document. Never fails; empty input gives an empty document.
    pub fn generate<'a, I>(&self, contacts: I) -> CardDocument
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        let mut seen: HashSet<NormalizedNumber> = HashSet::new();
        let mut document = CardDocument::default();
        let mut skipped = 0usize;

        for contact in contacts {
            let number = self.canonical_number(&contact.phone_number);

            if seen.contains(&number) {
                debug!(number = %number, name = %contact.name, "Skipping duplicate contact");
                skipped += 1;
                continue;
            }

            self.write_card(&mut document.text, contact, &number);
            document.cards += 1;
            seen.insert(number);
        }

        info!(
            cards = document.cards,
            duplicates = skipped,
            "Generated vCard document"
        );

        document
    }

    fn write_card(&self, out: &mut String, contact: &Contact, number: &NormalizedNumber) {
        out.push_str("BEGIN:VCARD\n");
        out.push_str("VERSION:3.0\n");
        out.push_str(&format!("FN:{}{}\n", contact.name, self.options.name_suffix));
        out.push_str(&format!("N:{};;;;\n", contact.name));
        out.push_str(&format!("TEL;TYPE=CELL:{}\n", number.international()));
        if let Some(link) = contact.link() {
            out.push_str(&format!("URL:{}\n", link));
        }
        out.push_str("END:VCARD\n");
    }
}

/// Generate with default options
pub fn generate(contacts: &[Contact]) -> CardDocument {
    ContactCardGenerator::new().generate(contacts)
}
