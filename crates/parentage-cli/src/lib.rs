//! # parentage-cli — Command-Line Interface
//!
//! Provides the `parentage` binary, meant to run as a build step.
//!
//! ## Subcommands
//!
//! - `parentage check`: walk a module tree and fail on the first module
//!   whose declared parent is wrong.
//! - `parentage show`: print a descriptor's effective coordinates and the
//!   parent its modules must declare.
//!
//! ```bash
//! parentage check
//! parentage -v check path/to/aggregator
//! parentage --config parentage.yaml show modules/api --json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the checks themselves.
//! - Handlers delegate to `parentage-tree`; no tree logic lives here.

pub mod check;
pub mod show;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use parentage_tree::RuleConfig;

/// Build the rule configuration from an optional config file and an
/// optional descriptor file name override.
pub fn load_config(config: Option<&Path>, file_name: Option<&str>) -> Result<RuleConfig> {
    let mut rule_config = match config {
        Some(path) => RuleConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RuleConfig::default(),
    };
    if let Some(name) = file_name {
        rule_config = rule_config.with_descriptor_file_name(name);
        rule_config
            .validate()
            .map_err(|detail| anyhow!("invalid --file-name: {detail}"))?;
    }
    tracing::debug!(?rule_config, "resolved rule configuration");
    Ok(rule_config)
}
