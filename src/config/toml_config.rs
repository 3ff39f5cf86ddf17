use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "booking.toml";
pub const DEFAULT_BOOKING_PATH: &str = "/api/bookings";
pub const DEFAULT_CONTACT_PATH: &str = "/api/contact";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub booking_path: Option<String>,
    pub contact_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Configuration for a service given only on the command line.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        Self {
            service: ServiceConfig {
                base_url: base_url.into(),
                booking_path: None,
                contact_path: None,
                timeout_seconds: None,
            },
            logging: None,
        }
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("service.base_url", &self.service.base_url)?;
        validation::validate_url_path("service.booking_path", self.booking_path())?;
        validation::validate_url_path("service.contact_path", self.contact_path())?;
        validation::validate_range(
            "service.timeout_seconds",
            self.timeout_seconds(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.service
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn booking_path(&self) -> &str {
        self.service
            .booking_path
            .as_deref()
            .unwrap_or(DEFAULT_BOOKING_PATH)
    }

    fn contact_path(&self) -> &str {
        self.service
            .contact_path
            .as_deref()
            .unwrap_or(DEFAULT_CONTACT_PATH)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
