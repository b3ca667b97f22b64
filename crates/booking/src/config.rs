//! # Booking Configuration Module
//!
//! Configuration for the booking service is read from environment
//! variables, with defaults where sensible.
//!
//! ## Environment Variables
//!
//! - `CLINIC_STORAGE_KEY`: key the appointment collection is stored under
//!   (default: "appointments")
//! - `LOG_LEVEL`: logging level (default: "info")

use eyre::{bail, Result};
use std::env;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Storage key the serialized appointment collection lives under
    pub storage_key: String,

    /// Log level for the application
    pub log_level: Level,
}

impl BookingConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CLINIC_STORAGE_KEY` is set to a blank value.
    pub fn from_env() -> Result<Self> {
        let storage_key =
            env::var("CLINIC_STORAGE_KEY").unwrap_or_else(|_| "appointments".to_string());
        if storage_key.trim().is_empty() {
            bail!("CLINIC_STORAGE_KEY must not be blank");
        }

        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            storage_key,
            log_level,
        })
    }
}
