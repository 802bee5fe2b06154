// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Apply Network Policies Use Case
//!
//! Application service that turns a manifest into policy API calls.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Drive resolution, request building and submission
//! - **Collaborators:**
//!   - Domain: Manifest, PolicyDeclaration, PolicyRequest, SpaceIndex
//!   - Application: IdentityResolver
//!   - Infrastructure (via trait): PlatformClient
//!
//! # Flow
//!
//! 1. Fetch the current space and the space listing once
//! 2. For each declaration, in manifest order:
//!    1. Validate src, dest and ports
//!    2. Resolve source and destination spaces
//!    3. Resolve source and destination application identifiers
//!    4. Build the single-policy request
//!    5. Submit it (skipped in dry-run mode)
//! 3. Return a summary
//!
//! # Error Handling
//!
//! The first error aborts the run. Policies submitted before the failing
//! entry stay in place.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::resolver::IdentityResolver;
use crate::domain::error::ApplyError;
use crate::domain::manifest::{Manifest, PolicyDeclaration};
use crate::domain::platform::PlatformClient;
use crate::domain::policy::PolicyRequest;
use crate::domain::space::{Space, SpaceIndex, SpaceRef};

/// Progress hooks for a manifest run
#[async_trait]
pub trait PolicyObserver: Send + Sync {
    /// Called once the endpoints' spaces are known, before any app lookup
    async fn on_policy_started(&self, target: &PolicyTarget);

    /// Called after the platform accepted a policy
    async fn on_policy_applied(&self, target: &PolicyTarget, ack: &PolicyAck);

    /// Called instead of submission in dry-run mode
    async fn on_policy_planned(&self, target: &PolicyTarget, request: &PolicyRequest);
}

/// Human-readable endpoints of the policy being applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTarget {
    pub source_app: String,
    pub source_space: String,
    pub dest_app: String,
    pub dest_space: String,
}

/// Platform acknowledgement: the raw response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyAck {
    pub response: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Resolve and build every policy without submitting
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub planned: usize,
}

/// Per-run lookup state: the current space and the space index
#[derive(Debug, Clone)]
pub struct ApplyContext {
    pub current_space: SpaceRef,
    pub spaces: SpaceIndex,
}

impl ApplyContext {
    /// Resolve an optional space name. Absent names mean the current space.
    pub fn space(&self, name: Option<&str>) -> Result<&Space, ApplyError> {
        match name {
            None => Ok(&self.current_space),
            Some(name) => self.spaces.get(name).ok_or_else(|| {
                ApplyError::Resolution(format!("Space '{}' not found", name))
            }),
        }
    }
}

pub struct PolicyApplier {
    platform: Arc<dyn PlatformClient>,
    resolver: IdentityResolver,
    options: ApplyOptions,
}

impl PolicyApplier {
    pub fn new(platform: Arc<dyn PlatformClient>, options: ApplyOptions) -> Self {
        Self {
            resolver: IdentityResolver::new(platform.clone()),
            platform,
            options,
        }
    }

    /// Fetch the current space and index every visible space
    pub async fn prepare(&self) -> Result<ApplyContext, ApplyError> {
        let current_space = self.platform.current_space().await?;
        let spaces = self.resolver.resolve_spaces().await?;
        info!(
            current_space = %current_space.name,
            spaces = spaces.len(),
            "Prepared policy application context"
        );
        Ok(ApplyContext {
            current_space,
            spaces,
        })
    }

    /// Apply every declaration in manifest order, stopping at the first error
    pub async fn apply_manifest(
        &self,
        manifest: &Manifest,
        observer: &dyn PolicyObserver,
    ) -> Result<ApplySummary, ApplyError> {
        if manifest.is_empty() {
            warn!("Manifest declares no network policies");
            return Ok(ApplySummary::default());
        }

        let context = self.prepare().await?;
        let mut summary = ApplySummary::default();

        for (index, declaration) in manifest.policies.iter().enumerate() {
            match self.apply(index, declaration, &context, observer).await {
                Ok(Some(_)) => summary.applied += 1,
                Ok(None) => summary.planned += 1,
                Err(e) => {
                    warn!(entry = index, kind = e.kind(), "Aborting manifest: {}", e);
                    return Err(e);
                }
            }
        }

        info!(
            applied = summary.applied,
            planned = summary.planned,
            "Finished applying manifest"
        );
        Ok(summary)
    }

    /// Apply one declaration. Returns `None` when the submission was skipped
    /// for a dry run.
    pub async fn apply(
        &self,
        index: usize,
        declaration: &PolicyDeclaration,
        context: &ApplyContext,
        observer: &dyn PolicyObserver,
    ) -> Result<Option<PolicyAck>, ApplyError> {
        declaration.validate()?;

        let source_space = context.space(declaration.source_space())?;
        let dest_space = context.space(declaration.dest_space())?;

        let target = PolicyTarget {
            source_app: declaration.source_app.clone(),
            source_space: source_space.name.clone(),
            dest_app: declaration.dest_app.clone(),
            dest_space: dest_space.name.clone(),
        };
        observer.on_policy_started(&target).await;

        let source_guid = self
            .resolver
            .resolve_application(source_space, &declaration.source_app)
            .await?;
        let dest_guid = self
            .resolver
            .resolve_application(dest_space, &declaration.dest_app)
            .await?;

        let request = PolicyRequest::build(&source_guid, &dest_guid, declaration)?;

        if self.options.dry_run {
            debug!(entry = index, "Dry run, skipping submission");
            observer.on_policy_planned(&target, &request).await;
            return Ok(None);
        }

        let response = self.platform.submit_policies(&request).await?;
        debug!(entry = index, "Policy submitted");

        let ack = PolicyAck { response };
        observer.on_policy_applied(&target, &ack).await;
        Ok(Some(ack))
    }
}
