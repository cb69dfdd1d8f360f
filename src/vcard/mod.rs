//! vCard Export
//!
//! Deduplicated vCard 3.0 generation from contact listings, and hand-off of
//! the generated document to a save host.
//!
//! ## Pipeline
//!
//! ```text
//! &[Contact] -> canonical_number (merge.rs) -> dedup + write (generator.rs) -> deliver (deliver.rs)
//! ```
//!
//! Generation is pure and fully testable; delivery is the only I/O.

pub mod deliver;
pub mod generator;
pub mod merge;

pub use deliver::{
    deliver, try_deliver, Blob, DirectorySaveHost, SaveHost, DEFAULT_FILENAME, VCARD_MIME_TYPE,
};
pub use generator::{generate, CardDocument, CardOptions, ContactCardGenerator, DEFAULT_NAME_SUFFIX};
pub use merge::{normalize_for_merge, DefaultCallingCode};
