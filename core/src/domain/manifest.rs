// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Network policy manifest
//!
//! The user-authored YAML file listing the policies to add:
//!
//! ```yaml
//! network-policies:
//!   - src: frontend
//!     dest: backend
//!     dest-space: services
//!     ports: 8080-8080
//!     protocol: tcp
//! ```
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Manifest loading and per-entry validation

use serde::Deserialize;
use std::path::Path;

use crate::domain::error::ApplyError;

/// Protocol used when a declaration does not name one
pub const DEFAULT_PROTOCOL: &str = "tcp";

/// Ordered list of policy declarations, read-only after load
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(rename = "network-policies")]
    pub policies: Vec<PolicyDeclaration>,
}

/// One source/destination/ports/protocol entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyDeclaration {
    #[serde(rename = "src", default)]
    pub source_app: String,

    #[serde(rename = "src-space", default)]
    pub source_space: Option<String>,

    #[serde(rename = "dest", default)]
    pub dest_app: String,

    #[serde(rename = "dest-space", default)]
    pub dest_space: Option<String>,

    #[serde(default)]
    pub ports: String,

    #[serde(default)]
    pub protocol: Option<String>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ApplyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ApplyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            policies = manifest.policies.len(),
            "Loaded network policy manifest"
        );
        Ok(manifest)
    }

    /// Parse manifest from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ApplyError> {
        serde_yaml::from_str(yaml).map_err(|e| ApplyError::Parse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl PolicyDeclaration {
    /// Check that src, dest and ports are all present
    pub fn validate(&self) -> Result<(), ApplyError> {
        let missing: Vec<&str> = [
            ("src", &self.source_app),
            ("dest", &self.dest_app),
            ("ports", &self.ports),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApplyError::Validation(format!(
                "src, dest and ports are all required (missing: {})",
                missing.join(", ")
            )))
        }
    }

    /// Source space name, if one was given
    pub fn source_space(&self) -> Option<&str> {
        non_empty(self.source_space.as_deref())
    }

    /// Destination space name, if one was given
    pub fn dest_space(&self) -> Option<&str> {
        non_empty(self.dest_space.as_deref())
    }

    /// Protocol, falling back to tcp
    pub fn protocol(&self) -> &str {
        non_empty(self.protocol.as_deref()).unwrap_or(DEFAULT_PROTOCOL)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
