//! Settings loading.
//!
//! Connection settings can come from a config file, from environment
//! variables prefixed `INCIDENTWATCH_`, or from command line flags.
//! Flags win over the environment, which wins over the file.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Connection and session settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Base URL of the ticket API.
    pub url: Option<String>,
    /// Bearer token sent with every API request.
    pub token: Option<String>,
    /// Role name: admin, user, or viewer.
    pub role: Option<String>,
}

impl Settings {
    /// Load settings from an optional config file and the environment.
    ///
    /// `INCIDENTWATCH_URL`, `INCIDENTWATCH_TOKEN` and `INCIDENTWATCH_ROLE`
    /// override values from the file.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("INCIDENTWATCH"))
            .build()
            .context("failed to load settings")?;

        config.try_deserialize().context("invalid settings")
    }

    /// Fold command-line values over loaded settings.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        token: Option<String>,
        role: Option<String>,
    ) -> Self {
        if url.is_some() {
            self.url = url;
        }
        if token.is_some() {
            self.token = token;
        }
        if role.is_some() {
            self.role = role;
        }
        self
    }
}
