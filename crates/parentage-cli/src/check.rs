//! # Check Subcommand
//!
//! Runs the parent rule against an aggregator and its module tree.
//!
//! Exit codes: 0 when every module declares the right parent (or the root
//! is not an aggregator), 1 on the first load, resolution, or mismatch
//! failure.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use parentage_tree::{load_root_descriptor, ParentRule, ProjectContext, RuleConfig};

/// Arguments for the `parentage check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Root descriptor file, or the directory holding it.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Descriptor file name expected in every module directory.
    #[arg(long)]
    pub file_name: Option<String>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, config: Option<&Path>) -> Result<u8> {
    let rule_config = crate::load_config(config, args.file_name.as_deref())?;
    check_path(&args.path, rule_config)
}

fn check_path(path: &Path, rule_config: RuleConfig) -> Result<u8> {
    let rule = ParentRule::new(rule_config);
    let descriptor = match load_root_descriptor(path, rule.config()) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    // Coordinates of a non-container may depend on ancestors that are not
    // on disk, so the artifact type is checked before resolving them.
    if !rule.applies_to(&descriptor.packaging) {
        println!(
            "SKIP: {} is a {} artifact, not {}",
            descriptor,
            descriptor.packaging,
            rule.config().container_artifact_type
        );
        return Ok(0);
    }

    let result = ProjectContext::from_descriptor(descriptor, rule.config())
        .and_then(|ctx| Ok((rule.check(&ctx)?, ctx)));
    match result {
        Ok((Some(report), ctx)) => {
            println!(
                "OK: {} module(s) checked across {} container(s) under {}",
                report.modules_checked,
                report.containers_visited,
                ctx.identity
            );
            Ok(0)
        }
        Ok((None, ctx)) => {
            println!(
                "SKIP: {} is a {} artifact, not {}",
                ctx.identity,
                ctx.artifact_type,
                rule.config().container_artifact_type
            );
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
