//! NX-VCF - Contact Verification Export
//!
//! Library side of the NUTTERX verification front-end: phone validation for
//! the registration form and vCard export of the registered contacts. All
//! persistence and business rules live behind the remote API; this crate
//! only shapes data on either side of it.
//!
//! ## Flow
//!
//! Raw form input -> [`registration::Registration::prepare`] (phone validation)
//! -> remote API -> contact export ([`ContactList`]) ->
//! [`vcard::ContactCardGenerator::generate`] -> [`vcard::deliver`]
//!
//! ## Quick Start
//!
//! ```rust
//! use nx_vcf::{phone, vcard, Contact};
//!
//! assert!(phone::validate("+254 712 345 678"));
//!
//! let contacts = vec![
//!     Contact::new("Asha", "0712345678"),
//!     Contact::new("Asha again", "254712345678"),
//! ];
//! let document = vcard::generate(&contacts);
//! assert_eq!(document.card_count(), 1);
//! assert!(document.as_str().contains("TEL;TYPE=CELL:+254712345678"));
//! ```

// Core error handling
pub mod error;

// Configuration from the environment
pub mod config;

// Phone validation against the calling-code allow-list
pub mod phone;

// vCard generation and delivery
pub mod export;
pub mod vcard;

// Registration form shaping, throttle and progress
pub mod progress;
pub mod registration;
pub mod throttle;

pub use config::AppConfig;
pub use contact_types::{Contact, ContactList, NormalizedNumber};
pub use error::{ConfigError, DeliveryError, Error, PhoneRejection, RegistrationError, Result};
pub use export::{export_to_dir, ExportSummary};
pub use phone::{CountryRule, PhoneNormalizer, COUNTRY_RULES};
pub use progress::RegistrationProgress;
pub use registration::Registration;
pub use throttle::SubmissionThrottle;
pub use vcard::{CardDocument, CardOptions, ContactCardGenerator, DefaultCallingCode};
