//! # Project Descriptors
//!
//! In-memory form of one loaded project-descriptor file. A descriptor may
//! omit its `groupId` and `version` and inherit them from its parent chain,
//! so both are optional here; resolving the effective value is the tree
//! crate's job, not this one's.
//!
//! Descriptors are plain values: built once by the loader, never mutated,
//! dropped once the traversal step that loaded them completes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::identity::ParentIdentity;

/// Packaging assumed when a descriptor does not declare one.
pub const DEFAULT_PACKAGING: &str = "jar";

/// A declared `<parent>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    /// The identity the descriptor claims as its parent.
    pub identity: ParentIdentity,
    /// Path to the parent's descriptor file, relative to this descriptor's
    /// directory. `None` means the conventional `..`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

/// One loaded project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// File the descriptor was loaded from.
    pub path: PathBuf,
    /// Own `groupId`; `None` when inherited from the parent chain.
    pub group_id: Option<String>,
    /// Own `artifactId`, always declared.
    pub artifact_id: String,
    /// Own `version`; `None` when inherited from the parent chain.
    pub version: Option<String>,
    /// Packaging kind; [`DEFAULT_PACKAGING`] when undeclared.
    pub packaging: String,
    /// The declared `<parent>` block, if any.
    pub parent: Option<ParentReference>,
    /// Declared sub-module paths, relative to this descriptor's directory,
    /// in declaration order.
    pub modules: Vec<String>,
}

impl Descriptor {
    /// The parent identity this descriptor declares, if any.
    pub fn declared_parent(&self) -> Option<&ParentIdentity> {
        self.parent.as_ref().map(|p| &p.identity)
    }

    /// Directory containing the descriptor file.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

impl fmt::Display for Descriptor {
    /// `groupId:artifactId:packaging:version`, with `?` for fields the
    /// descriptor leaves to inheritance.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id.as_deref().unwrap_or("?"),
            self.artifact_id,
            self.packaging,
            self.version.as_deref().unwrap_or("?"),
        )
    }
}
