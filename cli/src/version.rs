// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Version banner
//!
//! Release builds set `NETPOL_RELEASE_VERSION` at compile time; anything else
//! reports itself as a development build.

pub const BINARY_NAME: &str = "apply-network-policies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub release: Option<String>,
}

impl VersionInfo {
    /// Version supplied by the build
    pub fn from_build() -> Self {
        Self::new(option_env!("NETPOL_RELEASE_VERSION"))
    }

    pub fn new(release: Option<&str>) -> Self {
        Self {
            release: release
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| v.trim_start_matches('v').to_string()),
        }
    }

    pub fn banner(&self) -> String {
        match &self.release {
            Some(version) => format!("{} v{}", BINARY_NAME, version),
            None => format!("{} (development)", BINARY_NAME),
        }
    }
}
