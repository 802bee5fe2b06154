// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Identity Resolver
//!
//! Maps human-readable space and application names to platform identifiers.
//!
//! - **Layer:** Application
//! - **Collaborators:** Domain `PlatformClient`
//!
//! Lookups are neither cached nor batched: every application lookup is one
//! platform query, so identifiers are always current.

use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::error::ApplyError;
use crate::domain::platform::PlatformClient;
use crate::domain::space::{ApplicationId, Space, SpaceIndex};

/// Response body of the filtered application query
#[derive(Debug, Deserialize)]
struct ApplicationList {
    resources: Vec<ApplicationResource>,
}

#[derive(Debug, Deserialize)]
struct ApplicationResource {
    guid: String,
}

#[derive(Clone)]
pub struct IdentityResolver {
    platform: Arc<dyn PlatformClient>,
}

impl IdentityResolver {
    pub fn new(platform: Arc<dyn PlatformClient>) -> Self {
        Self { platform }
    }

    /// List every visible space once and index it by name
    pub async fn resolve_spaces(&self) -> Result<SpaceIndex, ApplyError> {
        let spaces = self.platform.list_spaces().await?;
        let index = SpaceIndex::from_spaces(spaces);
        debug!(spaces = index.len(), "Indexed spaces");
        Ok(index)
    }

    /// Resolve an application name within a space to exactly one identifier
    pub async fn resolve_application(
        &self,
        space: &Space,
        app_name: &str,
    ) -> Result<ApplicationId, ApplyError> {
        let body = self
            .platform
            .query_applications(space.guid.as_str(), app_name)
            .await?;

        let list: ApplicationList = serde_json::from_str(&body).map_err(|e| {
            ApplyError::Parse(format!(
                "Failed to parse application lookup response for '{}': {}",
                app_name, e
            ))
        })?;

        match list.resources.as_slice() {
            [app] => {
                debug!(app = app_name, space = %space.name, guid = %app.guid, "Resolved application");
                Ok(ApplicationId(app.guid.clone()))
            }
            matches => Err(ApplyError::Resolution(format!(
                "Could not find unique application called '{}' in space '{}' ({} matches)",
                app_name,
                space.name,
                matches.len()
            ))),
        }
    }
}
