// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Apply command
//!
//! Loads the manifest, connects to the platform with the CLI's saved session
//! and adds every declared policy in order.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use netpol_core::application::{ApplyOptions, ApplySummary, PolicyApplier, PolicyObserver};
use netpol_core::infrastructure::{CloudControllerClient, PlatformConfig};
use netpol_core::{Manifest, PlatformClient};

use crate::reporter::ConsoleReporter;

#[derive(Debug, Clone)]
pub struct ApplyCommand {
    pub manifest: PathBuf,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
}

pub async fn execute(command: ApplyCommand) -> Result<()> {
    let manifest = Manifest::from_yaml_file(&command.manifest)?;

    let config = PlatformConfig::load_or_default(command.config.clone())
        .context("Failed to load platform configuration")?;
    let client = CloudControllerClient::new(config)?;

    let reporter = ConsoleReporter::stdout();
    let result = run(&manifest, Arc::new(client), command.dry_run, &reporter).await;
    let written = reporter.finish();
    let summary = result?;
    written.context("Failed to write progress output")?;

    print_summary(&summary, command.dry_run);
    Ok(())
}

/// Apply a loaded manifest through any platform client
pub async fn run(
    manifest: &Manifest,
    platform: Arc<dyn PlatformClient>,
    dry_run: bool,
    observer: &dyn PolicyObserver,
) -> Result<ApplySummary> {
    tracing::info!(policies = manifest.len(), dry_run, "Applying network policies");

    let applier = PolicyApplier::new(platform, ApplyOptions { dry_run });
    let summary = applier.apply_manifest(manifest, observer).await?;
    Ok(summary)
}

fn print_summary(summary: &ApplySummary, dry_run: bool) {
    if dry_run {
        println!(
            "{}",
            format!("✓ {} network policies resolved (dry run)", summary.planned).green()
        );
    } else if summary.applied == 0 {
        println!("{}", "No network policies declared".yellow());
    } else {
        println!(
            "{}",
            format!("✓ {} network policies applied", summary.applied).green()
        );
    }
}
