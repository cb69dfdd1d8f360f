//! Registration form shaping
//!
//! Turns raw form input into the payload the remote registration endpoint
//! accepts. Sending it is the caller's business.

use contact_types::Contact;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistrationError;
use crate::phone::PhoneNormalizer;

/// A validated registration, serialized as the API request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Trimmed display name
    pub name: String,
    /// Digits only, calling code included
    pub phone_number: String,
    /// Support link; the form always sends an empty one
    #[serde(default)]
    pub link: String,
}

impl Registration {
    /// Validate and shape form input with the built-in calling-code table
    pub fn prepare(name: &str, phone: &str) -> Result<Self, RegistrationError> {
        Self::prepare_with(&PhoneNormalizer::new(), name, phone)
    }

    /// Validate and shape form input with a specific normalizer
    pub fn prepare_with(
        normalizer: &PhoneNormalizer,
        name: &str,
        phone: &str,
    ) -> Result<Self, RegistrationError> {
        let name = name.trim();
        let phone = phone.trim();

        if name.is_empty() {
            return Err(RegistrationError::MissingField { field: "name" });
        }
        if phone.is_empty() {
            return Err(RegistrationError::MissingField {
                field: "phone_number",
            });
        }

        let rule = normalizer.check(phone)?;
        debug!(country = rule.country, "Registration phone accepted");

        Ok(Self {
            name: name.to_string(),
            phone_number: normalizer.format(phone),
            link: String::new(),
        })
    }

    /// The registration as a contact record
    pub fn into_contact(self) -> Contact {
        Contact {
            name: self.name,
            phone_number: self.phone_number,
            link: Some(self.link).filter(|l| !l.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhoneRejection;

    #[test]
    fn test_prepare_trims_and_formats() {
        let registration = Registration::prepare("  Asha Wanjiru ", " +254 712-345-678 ").unwrap();

        assert_eq!(registration.name, "Asha Wanjiru");
        assert_eq!(registration.phone_number, "254712345678");
        assert_eq!(registration.link, "");
    }

    #[test]
    fn test_prepare_requires_both_fields() {
        assert_eq!(
            Registration::prepare("   ", "254712345678"),
            Err(RegistrationError::MissingField { field: "name" })
        );
        assert_eq!(
            Registration::prepare("Asha", ""),
            Err(RegistrationError::MissingField {
                field: "phone_number"
            })
        );
    }

    #[test]
    fn test_prepare_rejects_unsupported_numbers() {
        let err = Registration::prepare("Asha", "0712345678").unwrap_err();
        assert_eq!(
            err,
            RegistrationError::InvalidPhone(PhoneRejection::UnsupportedCountry {
                digits: "0712345678".to_string()
            })
        );
    }

    #[test]
    fn test_request_body_shape() {
        let registration = Registration::prepare("Asha", "254712345678").unwrap();
        let body = serde_json::to_value(&registration).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "name": "Asha",
                "phone_number": "254712345678",
                "link": ""
            })
        );
    }

    #[test]
    fn test_into_contact_drops_empty_link() {
        let contact = Registration::prepare("Asha", "254712345678")
            .unwrap()
            .into_contact();

        assert_eq!(contact, Contact::new("Asha", "254712345678"));
    }
}
