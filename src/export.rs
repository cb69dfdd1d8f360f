//! Contact export
//!
//! Reads a JSON contact listing, generates the vCard document and saves it
//! into the configured output directory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use contact_types::ContactList;
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::vcard::{try_deliver, ContactCardGenerator, DirectorySaveHost};

/// Outcome of an export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Where the document was saved
    pub path: PathBuf,
    /// Contacts in the input listing
    pub contacts: usize,
    /// Cards written after deduplication
    pub cards: usize,
}

impl ExportSummary {
    pub fn duplicates(&self) -> usize {
        self.contacts - self.cards
    }
}

/// Parse a contact listing (bare array or `{ "contacts": [...] }`)
pub fn read_contacts<R: Read>(reader: R) -> Result<ContactList> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_contacts_file(path: &Path) -> Result<ContactList> {
    let file = File::open(path)?;
    read_contacts(BufReader::new(file))
}

/// Generate and save a document for `contacts` using `config`.
///
/// Unlike [`crate::vcard::deliver`], a failed save is returned to the caller.
pub fn export_to_dir(config: &AppConfig, contacts: &ContactList) -> Result<ExportSummary> {
    let generator = ContactCardGenerator::with_options(config.card_options());
    let document = generator.generate(contacts);

    let host = DirectorySaveHost::new(&config.output_dir);
    try_deliver(&host, document.as_str(), Some(config.filename.as_str()))?;

    let summary = ExportSummary {
        path: host.target_path(&config.filename),
        contacts: contacts.len(),
        cards: document.card_count(),
    };
    info!(
        path = %summary.path.display(),
        cards = summary.cards,
        duplicates = summary.duplicates(),
        "Exported contacts"
    );
    Ok(summary)
}
