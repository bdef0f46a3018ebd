// src/config.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::periods::Granularity;

fn default_report_filename() -> String {
    "report.json".to_string()
}

/// Tool configuration, loaded from a local TOML file. CLI flags may
/// override the credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the compliance server.
    pub server_url: String,
    /// Keycloak-style token endpoint.
    pub auth_url: String,
    pub client_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Number of calendar months to report on. Mutually exclusive with
    /// `history_days`; six months when neither is set.
    #[serde(default)]
    pub history_months: Option<u32>,
    /// Number of single-day periods to report on.
    #[serde(default)]
    pub history_days: Option<u32>,
    #[serde(default = "default_report_filename")]
    pub report_filename: String,
}

impl Config {
    /// Loads and parses the configuration file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Config` if it fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ReportError::io(e, path))?;
        toml::from_str(&raw)
            .map_err(|e| ReportError::Config(format!("{}: {e}", path.display())))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if required URLs are missing, if both timeline
    /// settings are given, or if the timeline is empty.
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() || self.auth_url.is_empty() {
            return Err(ReportError::Config(
                "server_url and auth_url must both be set".to_string(),
            ));
        }
        if self.history_months.is_some() && self.history_days.is_some() {
            return Err(ReportError::Config(
                "history_months and history_days are mutually exclusive".to_string(),
            ));
        }
        if self.history_months == Some(0) || self.history_days == Some(0) {
            return Err(ReportError::Config(
                "the timeline must cover at least one period".to_string(),
            ));
        }
        Ok(())
    }

    /// Timeline length and granularity. Defaults to six months.
    #[must_use]
    pub fn timeline(&self) -> (u32, Granularity) {
        if let Some(days) = self.history_days {
            (days, Granularity::Days)
        } else {
            (self.history_months.unwrap_or(6), Granularity::Months)
        }
    }
}

/// Optional allow-list mapping organization name to the project names to
/// fetch. An empty or missing list means "fetch everything the user can
/// see".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Includes(BTreeMap<String, Vec<String>>);

impl Includes {
    /// Loads an includes file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Config` if it fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ReportError::io(e, path))?;
        toml::from_str(&raw)
            .map_err(|e| ReportError::Config(format!("{}: {e}", path.display())))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this organization/project pair should be fetched.
    #[must_use]
    pub fn allows(&self, org: &str, project: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        self.0
            .get(org)
            .map_or(false, |projects| projects.iter().any(|p| p == project))
    }
}
