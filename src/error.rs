//! Error handling for the contact export library
//!
//! Error types using thiserror. Phone validation itself never errors (it
//! answers with a bool, or a [`PhoneRejection`] when a reason is wanted);
//! these types cover the edges around it.

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a phone number failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneRejection {
    #[error("phone number contains no digits")]
    NoDigits,

    #[error("unsupported country calling code in '{digits}'")]
    UnsupportedCountry { digits: String },

    #[error("invalid length {length} for calling code +{calling_code}, expected {expected:?}")]
    InvalidLength {
        calling_code: &'static str,
        length: usize,
        expected: &'static [usize],
    },
}

/// Registration form errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Name and phone number required")]
    MissingField { field: &'static str },

    #[error("Invalid phone number. Include country code (e.g., 2547...) and use a supported country: {0}")]
    InvalidPhone(#[from] PhoneRejection),

    #[error("Please wait {retry_after_secs}s before submitting again")]
    Throttled { retry_after_secs: u64 },
}

/// Errors raised by a save host while handing a document off
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to stage document in {dir}: {source}")]
    Staging {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filename '{filename}': {reason}")]
    InvalidFilename { filename: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
