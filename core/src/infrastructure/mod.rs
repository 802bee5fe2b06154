// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod cf_config;
pub mod cloud_controller;

pub use cf_config::{PlatformConfig, TargetFields};
pub use cloud_controller::CloudControllerClient;
