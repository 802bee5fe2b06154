// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Spaces and platform identifiers
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Name-to-identifier index for spaces

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Platform identifier of a space
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(pub String);

/// Platform identifier of an application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl SpaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A space as returned by the platform's space listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub guid: SpaceId,
    pub name: String,
}

impl Space {
    pub fn new(name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            guid: SpaceId(guid.into()),
            name: name.into(),
        }
    }
}

/// Reference to a space by both name and identifier (e.g. the targeted space)
pub type SpaceRef = Space;

/// Spaces keyed by name, built once per run
#[derive(Debug, Clone, Default)]
pub struct SpaceIndex {
    by_name: HashMap<String, Space>,
}

impl SpaceIndex {
    /// Index a space listing by name. Later duplicates replace earlier ones.
    pub fn from_spaces(spaces: impl IntoIterator<Item = Space>) -> Self {
        let by_name = spaces
            .into_iter()
            .map(|space| (space.name.clone(), space))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&Space> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
