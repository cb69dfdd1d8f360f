//! Configuration
//!
//! Read from `NX_VCF_*` environment variables with built-in defaults. Binaries
//! load a `.env` file first (`dotenvy`); the library only reads variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `NX_VCF_TARGET_COUNT` | 150 |
//! | `NX_VCF_FILENAME` | `nutterx_contacts.vcf` |
//! | `NX_VCF_NAME_SUFFIX` | ` 🔥` |
//! | `NX_VCF_RATE_LIMIT_MS` | 5000 |
//! | `NX_VCF_FALLBACK_CODE` | 254 |
//! | `NX_VCF_OUTPUT_DIR` | `.` |

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::progress::DEFAULT_TARGET_COUNT;
use crate::throttle::{SubmissionThrottle, DEFAULT_DELAY_MS, MAX_DELAY_MS};
use crate::vcard::{CardOptions, DefaultCallingCode, DEFAULT_FILENAME, DEFAULT_NAME_SUFFIX};

pub const ENV_TARGET_COUNT: &str = "NX_VCF_TARGET_COUNT";
pub const ENV_FILENAME: &str = "NX_VCF_FILENAME";
pub const ENV_NAME_SUFFIX: &str = "NX_VCF_NAME_SUFFIX";
pub const ENV_RATE_LIMIT_MS: &str = "NX_VCF_RATE_LIMIT_MS";
pub const ENV_FALLBACK_CODE: &str = "NX_VCF_FALLBACK_CODE";
pub const ENV_OUTPUT_DIR: &str = "NX_VCF_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registrations needed before the export unlocks
    pub target_count: u64,
    /// Suggested filename for exported documents
    pub filename: String,
    /// Suffix appended to every card's formatted name
    pub name_suffix: String,
    /// Minimum gap between registration submissions
    pub rate_limit_ms: i64,
    /// Calling code assumed for local numbers
    pub fallback_code: DefaultCallingCode,
    /// Directory exports are saved into
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            filename: DEFAULT_FILENAME.to_string(),
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            rate_limit_ms: DEFAULT_DELAY_MS,
            fallback_code: DefaultCallingCode::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TARGET_COUNT) {
            config.target_count = parse(ENV_TARGET_COUNT, &value)?;
        }
        if let Some(value) = lookup(ENV_FILENAME) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_FILENAME,
                    value,
                    reason: "filename must not be empty".to_string(),
                });
            }
            config.filename = value;
        }
        if let Some(value) = lookup(ENV_NAME_SUFFIX) {
            config.name_suffix = value;
        }
        if let Some(value) = lookup(ENV_RATE_LIMIT_MS) {
            let delay: i64 = parse(ENV_RATE_LIMIT_MS, &value)?;
            if !(0..=MAX_DELAY_MS).contains(&delay) {
                return Err(ConfigError::InvalidValue {
                    key: ENV_RATE_LIMIT_MS,
                    value,
                    reason: format!("delay must be between 0 and {} ms", MAX_DELAY_MS),
                });
            }
            config.rate_limit_ms = delay;
        }
        if let Some(value) = lookup(ENV_FALLBACK_CODE) {
            config.fallback_code = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_FALLBACK_CODE,
                value: value.clone(),
                reason: "expected one of 254, 255, 234".to_string(),
            })?;
        }
        if let Some(value) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(value);
        }

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn card_options(&self) -> CardOptions {
        CardOptions {
            name_suffix: self.name_suffix.clone(),
            fallback_code: self.fallback_code,
        }
    }

    pub fn throttle(&self) -> SubmissionThrottle {
        SubmissionThrottle::new(self.rate_limit_ms)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
