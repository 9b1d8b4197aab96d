//! Effective-value resolution.
//!
//! A descriptor may leave `groupId` or `version` to inheritance. The
//! effective value is the first one found walking up the descriptor's own
//! parent chain, loading each ancestor from disk:
//!
//! ```text
//! leaf/pom.xml      (no groupId)  --parent-->  ../pom.xml
//! mid/pom.xml       (no groupId)  --parent-->  ../pom.xml
//! root/pom.xml      groupId=com.acme           <- found
//! ```
//!
//! The walk ends with a value, a [`ResolutionError`] (an ancestor without a
//! parent block, or a relative path that leads back to a directory already
//! visited), or the [`LoadError`](crate::error::LoadError) of an ancestor
//! that could not be read.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use parentage_core::{Descriptor, IdentityField, ParentIdentity, ParentReference};

use crate::error::{CheckResult, ResolutionError};
use crate::parser::load_descriptor;

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Directory holding the parent's descriptor.
///
/// A declared relative path points at the parent's descriptor *file*; its
/// trailing `file_name` segment is stripped to get the directory. A relative
/// path that does not end with `file_name` is taken to be a directory
/// already. Without a relative path the parent lives in `..`.
pub fn parent_directory(
    directory: &Path,
    parent: Option<&ParentReference>,
    file_name: &str,
) -> PathBuf {
    let Some(relative) = parent.and_then(|p| p.relative_path.as_deref()) else {
        return directory.join("..");
    };
    let relative = relative.trim_end_matches(SEPARATORS);
    match relative.strip_suffix(file_name) {
        Some("") => directory.to_path_buf(),
        Some(prefix) if prefix.ends_with(SEPARATORS) => directory.join(prefix),
        _ => directory.join(relative),
    }
}

/// Effective `groupId` of `descriptor`, which lives in `directory`.
pub fn effective_group_id(
    directory: &Path,
    descriptor: &Descriptor,
    file_name: &str,
) -> CheckResult<String> {
    effective_field(directory, descriptor, file_name, IdentityField::GroupId)
}

/// Effective `version` of `descriptor`, which lives in `directory`.
pub fn effective_version(
    directory: &Path,
    descriptor: &Descriptor,
    file_name: &str,
) -> CheckResult<String> {
    effective_field(directory, descriptor, file_name, IdentityField::Version)
}

/// The descriptor's own coordinates with inherited fields resolved.
pub fn effective_identity(
    directory: &Path,
    descriptor: &Descriptor,
    file_name: &str,
) -> CheckResult<ParentIdentity> {
    let group_id = effective_group_id(directory, descriptor, file_name)?;
    let version = effective_version(directory, descriptor, file_name)?;
    ParentIdentity::new(group_id, descriptor.artifact_id.clone(), version).map_err(|e| {
        ResolutionError::InvalidIdentity {
            descriptor: descriptor.path.clone(),
            source: e,
        }
        .into()
    })
}

fn local_value(descriptor: &Descriptor, field: IdentityField) -> Option<&str> {
    match field {
        IdentityField::GroupId => descriptor.group_id.as_deref(),
        IdentityField::ArtifactId => Some(descriptor.artifact_id.as_str()),
        IdentityField::Version => descriptor.version.as_deref(),
    }
}

fn effective_field(
    directory: &Path,
    descriptor: &Descriptor,
    file_name: &str,
    field: IdentityField,
) -> CheckResult<String> {
    if let Some(value) = local_value(descriptor, field) {
        return Ok(value.to_string());
    }

    let mut visited: HashSet<PathBuf> = HashSet::new();
    visited.insert(directory_key(directory));

    let mut folder = directory.to_path_buf();
    let mut parent = descriptor.parent.clone();
    loop {
        let Some(reference) = parent else {
            return Err(ResolutionError::Exhausted {
                field,
                descriptor: descriptor.path.clone(),
            }
            .into());
        };

        folder = parent_directory(&folder, Some(&reference), file_name);
        if !visited.insert(directory_key(&folder)) {
            return Err(ResolutionError::Cycle {
                field,
                descriptor: descriptor.path.clone(),
                directory: folder,
            }
            .into());
        }

        let ancestor = load_descriptor(&folder, file_name)?;
        if let Some(value) = local_value(&ancestor, field) {
            tracing::debug!(
                %field,
                value,
                descriptor = %descriptor.path.display(),
                from = %ancestor.path.display(),
                "inherited value"
            );
            return Ok(value.to_string());
        }
        parent = ancestor.parent;
    }
}

/// Identity of a directory for the visited set: canonical when it exists.
fn directory_key(directory: &Path) -> PathBuf {
    std::fs::canonicalize(directory).unwrap_or_else(|_| directory.to_path_buf())
}
