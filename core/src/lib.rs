// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Network policy core
//!
//! Turns a declarative network policy manifest into platform API calls.
//!
//! # Architecture
//!
//! - **Domain:** manifest, spaces, wire policies, the platform capability trait
//! - **Application:** identity resolution and the apply use case
//! - **Infrastructure:** platform CLI configuration and the HTTP adapter

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
