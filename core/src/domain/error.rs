// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Apply errors
//!
//! Every failure in the pipeline aborts the run, so a single enum covers the
//! whole taxonomy and callers only need to report it.

use std::path::PathBuf;

use crate::domain::platform::PlatformError;

/// Errors raised while loading, resolving, building or submitting policies
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Resolution(String),

    #[error("Invalid port range: {0}")]
    Format(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl ApplyError {
    /// Short name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApplyError::Io { .. } => "io",
            ApplyError::Parse(_) => "parse",
            ApplyError::Validation(_) => "validation",
            ApplyError::Resolution(_) => "resolution",
            ApplyError::Format(_) => "format",
            ApplyError::Platform(_) => "platform",
        }
    }
}
