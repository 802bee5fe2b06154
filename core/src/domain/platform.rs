// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Platform
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Capability interface onto the hosting platform's APIs

// Platform Client Domain Interface (Anti-Corruption Layer)
//
// The apply pipeline only ever talks to the platform through this trait.
// The HTTP implementation lives in infrastructure/cloud_controller.rs.

use async_trait::async_trait;

use crate::domain::policy::PolicyRequest;
use crate::domain::space::{Space, SpaceRef};

/// Capabilities the apply pipeline needs from the platform
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// The space the caller currently targets
    async fn current_space(&self) -> Result<SpaceRef, PlatformError>;

    /// Every space visible to the caller
    async fn list_spaces(&self) -> Result<Vec<Space>, PlatformError>;

    /// Raw response body of an application query filtered by name and space
    async fn query_applications(
        &self,
        space_guid: &str,
        app_name: &str,
    ) -> Result<String, PlatformError>;

    /// Submit a policy request, returning the raw response body
    async fn submit_policies(&self, request: &PolicyRequest) -> Result<String, PlatformError>;
}

/// Errors surfaced by a platform client
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Platform API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid platform response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
