//! # Show Subcommand
//!
//! Prints what the checker sees for one descriptor: its effective
//! coordinates after inheritance, the parent it declares, and, for
//! containers, the parent its modules must declare.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use parentage_core::ParentIdentity;
use parentage_tree::validation::{expected_parent_for_children, is_container};
use parentage_tree::{ProjectContext, RuleConfig};

/// Arguments for the `parentage show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Descriptor file, or the directory holding it.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Descriptor file name expected in every module directory.
    #[arg(long)]
    pub file_name: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// What `show` reports about a descriptor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorSummary {
    pub path: PathBuf,
    pub effective: ParentIdentity,
    pub packaging: String,
    pub declared_parent: Option<ParentIdentity>,
    /// Only for containers.
    pub expected_for_modules: Option<ParentIdentity>,
    pub modules: Vec<String>,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs, config: Option<&Path>) -> Result<u8> {
    let rule_config = crate::load_config(config, args.file_name.as_deref())?;
    let summary = summarize(&args.path, &rule_config)?;

    if args.json {
        let out = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{out}");
    } else {
        println!("{}", summary.path.display());
        println!("  effective:   {}", summary.effective);
        println!("  packaging:   {}", summary.packaging);
        match &summary.declared_parent {
            Some(parent) => println!("  parent:      {parent}"),
            None => println!("  parent:      (none)"),
        }
        if let Some(expected) = &summary.expected_for_modules {
            println!("  modules must declare: {expected}");
            for module in &summary.modules {
                println!("    - {module}");
            }
        }
    }
    Ok(0)
}

/// Resolve a descriptor into a [`DescriptorSummary`].
pub fn summarize(path: &Path, rule_config: &RuleConfig) -> Result<DescriptorSummary> {
    let ctx = ProjectContext::from_descriptor_file(path, rule_config)
        .with_context(|| format!("failed to resolve {}", path.display()))?;

    let expected_for_modules = if is_container(&ctx.descriptor, rule_config) {
        Some(expected_parent_for_children(
            &ctx.base_dir,
            &ctx.descriptor,
            rule_config,
        )?)
    } else {
        None
    };

    Ok(DescriptorSummary {
        path: ctx.descriptor.path.clone(),
        declared_parent: ctx.descriptor.declared_parent().cloned(),
        packaging: ctx.descriptor.packaging.clone(),
        modules: ctx.descriptor.modules.clone(),
        effective: ctx.identity,
        expected_for_modules,
    })
}
