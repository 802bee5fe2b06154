// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Policy declarations, spaces, wire payloads and the platform interface

pub mod error;
pub mod manifest;
pub mod platform;
pub mod policy;
pub mod space;

pub use error::ApplyError;
pub use manifest::{Manifest, PolicyDeclaration};
pub use platform::{PlatformClient, PlatformError};
pub use policy::{PolicyRequest, PortRange, WirePolicy};
pub use space::{ApplicationId, Space, SpaceId, SpaceIndex, SpaceRef};
