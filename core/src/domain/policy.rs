// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Wire policies
//!
//! The JSON body accepted by the policy API:
//!
//! ```json
//! {"policies": [{"destination": {"id": "...", "ports": {"start": 8080, "end": 8080},
//!   "protocol": "tcp"}, "source": {"id": "..."}}]}
//! ```
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Port range parsing and request construction

use serde::{Deserialize, Serialize};

use crate::domain::error::ApplyError;
use crate::domain::manifest::PolicyDeclaration;
use crate::domain::space::ApplicationId;

const KNOWN_PROTOCOLS: [&str; 3] = ["tcp", "udp", "icmp"];

/// Top-level request envelope for the policy API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRequest {
    pub policies: Vec<WirePolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePolicy {
    pub destination: Destination,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub ports: PortRange,
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
}

/// Inclusive port bounds, serialized as `{"start": .., "end": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    #[serde(rename = "start")]
    pub from: u16,
    #[serde(rename = "end")]
    pub to: u16,
}

impl PortRange {
    /// Parse `"<from>-<to>"`, splitting on the first `-`.
    ///
    /// Reversed ranges are accepted as written.
    pub fn parse(ports: &str) -> Result<Self, ApplyError> {
        let (from, to) = ports.split_once('-').ok_or_else(|| {
            ApplyError::Format(format!("'{}' is not of the form <from>-<to>", ports))
        })?;

        let range = Self {
            from: parse_port(ports, from)?,
            to: parse_port(ports, to)?,
        };

        if range.from > range.to {
            tracing::warn!(ports, "Port range is reversed, submitting as written");
        }

        Ok(range)
    }
}

fn parse_port(ports: &str, part: &str) -> Result<u16, ApplyError> {
    part.trim().parse::<u16>().map_err(|e| {
        ApplyError::Format(format!("'{}' has an invalid port '{}': {}", ports, part, e))
    })
}

impl WirePolicy {
    /// Build the wire form of a declaration from its resolved endpoints
    pub fn build(
        source: &ApplicationId,
        destination: &ApplicationId,
        declaration: &PolicyDeclaration,
    ) -> Result<Self, ApplyError> {
        let ports = PortRange::parse(&declaration.ports)?;
        let protocol = declaration.protocol();
        if !KNOWN_PROTOCOLS.contains(&protocol) {
            tracing::warn!(protocol, "Unrecognised protocol, passing through unchanged");
        }

        Ok(Self {
            destination: Destination {
                id: destination.to_string(),
                ports,
                protocol: protocol.to_string(),
            },
            source: Source {
                id: source.to_string(),
            },
        })
    }
}

impl PolicyRequest {
    /// Wrap a single policy in the request envelope
    pub fn single(policy: WirePolicy) -> Self {
        Self {
            policies: vec![policy],
        }
    }

    /// Build a single-policy request for a declaration
    pub fn build(
        source: &ApplicationId,
        destination: &ApplicationId,
        declaration: &PolicyDeclaration,
    ) -> Result<Self, ApplyError> {
        WirePolicy::build(source, destination, declaration).map(Self::single)
    }

    pub fn to_json(&self) -> Result<String, ApplyError> {
        serde_json::to_string(self).map_err(|e| ApplyError::Parse(e.to_string()))
    }
}
