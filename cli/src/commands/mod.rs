// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the network policy CLI

pub mod apply;

pub use self::apply::ApplyCommand;
