//! # Module Tree Validation
//!
//! Walks a container descriptor's declared modules depth-first, in the
//! order they are declared, and checks that every module names its
//! container as parent:
//!
//! ```text
//! root (pom)           expects children to declare  com.acme:root:1.0
//! ├── core             declares com.acme:root:1.0   ok
//! └── services (pom)   declares com.acme:root:1.0   ok
//!     │                expects children to declare  com.acme:services:1.0
//!     └── api          declares com.acme:root:1.0   MISMATCH (artifactId)
//! ```
//!
//! The expected identity for a container's children is the container's own
//! `(groupId, artifactId, version)`, with `groupId` and `version` resolved
//! through its parent chain when it leaves them to inheritance.
//!
//! The walk keeps an explicit stack rather than recursing, loads each module
//! only when it is reached, and stops at the first error. Only containers
//! are descended into; a leaf descriptor's `modules` list is ignored.

use std::path::{Path, PathBuf};

use serde::Serialize;

use parentage_core::{Descriptor, IdentityField, ParentIdentity};

use crate::config::RuleConfig;
use crate::error::{CheckResult, MismatchError};
use crate::parser::load_descriptor;
use crate::resolve::effective_identity;
use crate::rule::ProjectContext;

/// Summary of a successful walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeReport {
    /// Modules whose declared parent was checked.
    pub modules_checked: usize,
    /// Containers whose modules were walked, the starting descriptor included.
    pub containers_visited: usize,
}

/// Expected parent seeded from the host's current project.
pub fn root_expected_parent(ctx: &ProjectContext) -> ParentIdentity {
    ctx.identity.clone()
}

/// Whether `descriptor` aggregates modules.
pub fn is_container(descriptor: &Descriptor, config: &RuleConfig) -> bool {
    descriptor.packaging == config.container_packaging
}

/// The parent identity every module of `descriptor` must declare.
pub fn expected_parent_for_children(
    directory: &Path,
    descriptor: &Descriptor,
    config: &RuleConfig,
) -> CheckResult<ParentIdentity> {
    effective_identity(directory, descriptor, &config.descriptor_file_name)
}

/// Exact comparison of a declared parent against the expected one.
pub fn validate_parent_identity(
    descriptor: &Path,
    declared: Option<&ParentIdentity>,
    expected: &ParentIdentity,
) -> Result<(), MismatchError> {
    let fields = match declared {
        Some(declared) => declared.differing_fields(expected),
        None => IdentityField::ALL.to_vec(),
    };
    if fields.is_empty() {
        return Ok(());
    }
    Err(MismatchError {
        descriptor: descriptor.to_path_buf(),
        declared: declared.cloned(),
        expected: expected.clone(),
        fields,
    })
}

/// Check `descriptor`'s declared parent against `expected`, then walk its
/// modules if it is a container.
pub fn validate_subtree(
    directory: &Path,
    descriptor: Descriptor,
    expected: ParentIdentity,
    config: &RuleConfig,
) -> CheckResult<TreeReport> {
    walk(directory, descriptor, Some(expected), config)
}

/// Walk the modules of the host's current project.
///
/// The root's own declared parent is not checked; only its descendants are.
pub fn validate_tree(ctx: &ProjectContext, config: &RuleConfig) -> CheckResult<TreeReport> {
    tracing::debug!(
        root = %ctx.descriptor.path.display(),
        expected = %root_expected_parent(ctx),
        "validating module tree"
    );
    walk(&ctx.base_dir, ctx.descriptor.clone(), None, config)
}

struct Visit {
    directory: PathBuf,
    /// `None` until the module is reached and loaded.
    descriptor: Option<Descriptor>,
    expected: Option<ParentIdentity>,
}

fn walk(
    directory: &Path,
    descriptor: Descriptor,
    expected: Option<ParentIdentity>,
    config: &RuleConfig,
) -> CheckResult<TreeReport> {
    let file_name = config.descriptor_file_name.as_str();
    let mut report = TreeReport::default();
    let mut stack = vec![Visit {
        directory: directory.to_path_buf(),
        descriptor: Some(descriptor),
        expected,
    }];

    while let Some(visit) = stack.pop() {
        let descriptor = match visit.descriptor {
            Some(descriptor) => descriptor,
            None => load_descriptor(&visit.directory, file_name)?,
        };

        if let Some(expected) = &visit.expected {
            tracing::debug!(
                module = %descriptor.path.display(),
                declared = ?descriptor.declared_parent().map(ToString::to_string),
                "validating module"
            );
            validate_parent_identity(&descriptor.path, descriptor.declared_parent(), expected)?;
            report.modules_checked += 1;
        }

        if !is_container(&descriptor, config) {
            if !descriptor.modules.is_empty() {
                tracing::debug!(
                    descriptor = %descriptor.path.display(),
                    packaging = %descriptor.packaging,
                    "ignoring modules of non-container descriptor"
                );
            }
            continue;
        }

        let children_expected = expected_parent_for_children(&visit.directory, &descriptor, config)?;
        tracing::info!(
            container = %descriptor.path.display(),
            expected = %children_expected,
            modules = descriptor.modules.len(),
            "parent module"
        );
        report.containers_visited += 1;

        for module in descriptor.modules.iter().rev() {
            stack.push(Visit {
                directory: visit.directory.join(module),
                descriptor: None,
                expected: Some(children_expected.clone()),
            });
        }
    }

    Ok(report)
}
