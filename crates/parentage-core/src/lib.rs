#![deny(missing_docs)]

//! # parentage-core — Foundational Types
//!
//! Defines the value types shared by every crate in the workspace: the
//! parent identity triple a module must declare, and the in-memory form
//! of a loaded project descriptor. Nothing here touches the filesystem.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `parentage-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Value types derive `Debug`, `Clone`, and implement `Serialize`.

pub mod descriptor;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use descriptor::{Descriptor, ParentReference, DEFAULT_PACKAGING};
pub use error::CoreError;
pub use identity::{IdentityField, ParentIdentity};
