#![deny(missing_docs)]

//! # parentage-tree — Module Tree Parent Checks
//!
//! Loads project descriptors from disk and verifies that every module of a
//! multi-module tree declares the parent the tree structure implies.
//!
//! - **Loader** ([`parser`]): one descriptor file in, one [`Descriptor`]
//!   out. Maven POM XML, YAML and JSON layouts.
//! - **Resolver** ([`resolve`]): effective `groupId`/`version` through the
//!   parent chain, and the relative-path convention for finding a parent.
//! - **Validator** ([`validation`]): declared-order depth-first walk that
//!   stops at the first mismatch.
//! - **Rule** ([`rule`]): the surface a build host calls.
//!
//! ## Crate Policy
//!
//! - Depends only on `parentage-core` internally.
//! - Descriptors are loaded fresh on every visit; nothing is cached.
//! - The first error aborts the walk; errors are never collected.
//!
//! [`Descriptor`]: parentage_core::Descriptor

pub mod config;
pub mod error;
pub mod parser;
pub mod resolve;
pub mod rule;
pub mod validation;

// Re-export primary types.
pub use config::RuleConfig;
pub use error::{CheckError, CheckResult, ConfigError, LoadError, MismatchError, ResolutionError};
pub use parser::{load_default, load_descriptor, DescriptorFormat, DEFAULT_DESCRIPTOR_FILE_NAME};
pub use rule::{load_root_descriptor, EnforcerRule, ParentRule, ProjectContext};
pub use validation::{validate_subtree, validate_tree, TreeReport};
