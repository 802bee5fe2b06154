// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # apply-network-policies
//!
//! Adds container-to-container network policies declared in a YAML manifest.
//!
//! ```bash
//! apply-network-policies network-policies.yml
//! apply-network-policies --dry-run network-policies.yml
//! apply-network-policies --version
//! ```
//!
//! The platform endpoint, token and targeted space come from the platform
//! CLI's saved session (`~/.cf/config.json`). Every run is an add-only pass:
//! existing policies are never diffed, updated or removed.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::PathBuf;

use apply_network_policies::commands::{self, ApplyCommand};
use apply_network_policies::version::VersionInfo;

/// Exit status when the manifest path is missing
const EXIT_USAGE: i32 = 2;
/// Exit status when applying the manifest failed
const EXIT_FAILURE: i32 = 1;

/// Manage network policies declaratively
#[derive(Parser)]
#[command(name = "apply-network-policies")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to the network policies manifest (YAML)
    #[arg(value_name = "MANIFEST")]
    manifest: Option<PathBuf>,

    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Path to the platform CLI config.json (overrides discovery)
    #[arg(long, env = "NETPOL_CF_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolve and print policies without submitting them
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "NETPOL_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.version {
        println!("{}", VersionInfo::from_build().banner());
        return Ok(());
    }

    init_logging(&cli.log_level)?;

    let Some(manifest) = cli.manifest else {
        Cli::command().print_help()?;
        eprintln!();
        eprintln!("{}", "YAML file path is needed".red());
        std::process::exit(EXIT_USAGE);
    };

    let command = ApplyCommand {
        manifest,
        config: cli.config,
        dry_run: cli.dry_run,
    };

    if let Err(err) = commands::apply::execute(command).await {
        eprintln!("{} {:#}", "Error applying network policies:".red().bold(), err);
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
