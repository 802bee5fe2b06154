// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod apply_policies;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export use cases for convenience
pub use apply_policies::{
    ApplyContext, ApplyOptions, ApplySummary, PolicyAck, PolicyApplier, PolicyObserver,
    PolicyTarget,
};
pub use resolver::IdentityResolver;
