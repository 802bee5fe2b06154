// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Platform CLI configuration
//!
//! Reads the session saved by the platform CLI (`~/.cf/config.json`): the API
//! endpoint, access token, and the targeted organization and space.
//!
//! # Discovery
//!
//! 1. Explicit path (`--config` / `NETPOL_CF_CONFIG`), fatal if unreadable
//! 2. `$CF_HOME/.cf/config.json`
//! 3. `~/.cf/config.json`
//!
//! Environment overrides are applied afterwards:
//! `NETPOL_API_ENDPOINT`, `NETPOL_ACCESS_TOKEN`, `NETPOL_SKIP_SSL_VALIDATION`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::platform::PlatformError;
use crate::domain::space::SpaceRef;

/// A targeted organization or space as saved by the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFields {
    #[serde(rename = "GUID", default)]
    pub guid: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl TargetFields {
    fn is_set(&self) -> bool {
        !self.guid.is_empty() && !self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// API endpoint, e.g. `https://api.example.com`
    #[serde(rename = "Target", default)]
    pub api_endpoint: String,

    #[serde(rename = "AccessToken", default)]
    pub access_token: String,

    #[serde(rename = "SSLDisabled", default)]
    pub skip_ssl_validation: bool,

    #[serde(rename = "OrganizationFields", default)]
    pub organization: TargetFields,

    #[serde(rename = "SpaceFields", default)]
    pub space: TargetFields,
}

impl PlatformConfig {
    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read platform config {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse platform config {:?}", path))
    }

    /// Locate the CLI config file
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("CF_HOME") {
            let path = PathBuf::from(home).join(".cf").join("config.json");
            if path.exists() {
                return Some(path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".cf").join("config.json");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = if let Some(path) = cli_path {
            tracing::info!("Loading platform configuration from explicit path: {:?}", path);
            Self::from_json_file(&path)?
        } else if let Some(path) = Self::discover_config() {
            tracing::info!("Loading platform configuration from discovered path: {:?}", path);
            Self::from_json_file(&path)?
        } else {
            tracing::warn!("No platform CLI configuration found. Using environment only.");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NETPOL_API_ENDPOINT") {
            tracing::info!("Environment override: NETPOL_API_ENDPOINT={}", val);
            self.api_endpoint = val;
        }

        if let Ok(val) = std::env::var("NETPOL_ACCESS_TOKEN") {
            tracing::info!("Environment override: NETPOL_ACCESS_TOKEN=<redacted>");
            self.access_token = val;
        }

        if let Ok(val) = std::env::var("NETPOL_SKIP_SSL_VALIDATION") {
            match val.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => {
                    tracing::info!("Environment override: NETPOL_SKIP_SSL_VALIDATION=true");
                    self.skip_ssl_validation = true;
                }
                "false" | "0" | "no" | "off" => {
                    tracing::info!("Environment override: NETPOL_SKIP_SSL_VALIDATION=false");
                    self.skip_ssl_validation = false;
                }
                _ => {
                    tracing::warn!(
                        "Ignoring invalid NETPOL_SKIP_SSL_VALIDATION value '{}'",
                        val
                    );
                }
            }
        }
    }

    /// Ensure there is enough to talk to the platform
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.api_endpoint.trim().is_empty() {
            return Err(PlatformError::Config(
                "No API endpoint set. Use 'cf login' or set NETPOL_API_ENDPOINT".to_string(),
            ));
        }
        if self.access_token.trim().is_empty() {
            return Err(PlatformError::Config(
                "Not logged in. Use 'cf login' or set NETPOL_ACCESS_TOKEN".to_string(),
            ));
        }
        Ok(())
    }

    /// Targeted organization GUID, if any
    pub fn organization_guid(&self) -> Option<&str> {
        self.organization
            .is_set()
            .then_some(self.organization.guid.as_str())
    }

    /// The targeted space
    pub fn current_space(&self) -> Result<SpaceRef, PlatformError> {
        if !self.space.is_set() {
            return Err(PlatformError::Config(
                "No space targeted. Use 'cf target -s SPACE'".to_string(),
            ));
        }
        Ok(SpaceRef::new(self.space.name.clone(), self.space.guid.clone()))
    }

    /// Authorization header value, adding the `bearer` scheme when missing
    pub fn authorization(&self) -> String {
        let token = self.access_token.trim();
        if token
            .get(..7)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer "))
        {
            token.to_string()
        } else {
            format!("bearer {}", token)
        }
    }
}
