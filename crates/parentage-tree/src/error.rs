//! Tree-walk error types.
//!
//! Every failure carries the descriptor path or directory it concerns so a
//! single message is enough to locate the offending module in a large tree.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use parentage_core::{IdentityField, ParentIdentity};

/// A descriptor file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The descriptor file does not exist.
    #[error("descriptor not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The descriptor file exists but could not be read.
    #[error("failed to read descriptor {path}: {source}")]
    Io {
        /// Descriptor file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// XML parsing failed.
    #[error("failed to parse XML descriptor {path}: {source}")]
    XmlParse {
        /// Descriptor file.
        path: PathBuf,
        /// Underlying XML error.
        source: quick_xml::de::DeError,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        /// Descriptor file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        /// Descriptor file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Well-formed, but not a usable descriptor.
    #[error("malformed descriptor {path}: {detail}")]
    Malformed {
        /// Descriptor file.
        path: PathBuf,
        /// What is wrong with it.
        detail: String,
    },

    /// No parser is registered for the file extension.
    #[error("unsupported descriptor format: {path} (expected .xml, .yaml, .yml or .json)")]
    UnsupportedFormat {
        /// Descriptor file.
        path: PathBuf,
    },
}

/// An inherited field could not be resolved through the parent chain.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The chain ended without any descriptor supplying the field.
    #[error("failed to resolve {field} for {descriptor}: no ancestor declares it")]
    Exhausted {
        /// Field being resolved.
        field: IdentityField,
        /// Descriptor the resolution started from.
        descriptor: PathBuf,
    },

    /// The parent chain led back to a directory already visited.
    #[error("failed to resolve {field} for {descriptor}: parent chain revisits {directory}")]
    Cycle {
        /// Field being resolved.
        field: IdentityField,
        /// Descriptor the resolution started from.
        descriptor: PathBuf,
        /// Directory reached a second time.
        directory: PathBuf,
    },

    /// A value was found but it cannot form a parent identity.
    ///
    /// The loader never yields blank coordinates, so only a [`Descriptor`]
    /// built by hand (e.g. by a host) reaches this.
    ///
    /// [`Descriptor`]: parentage_core::Descriptor
    #[error("invalid coordinates for {descriptor}: {source}")]
    InvalidIdentity {
        /// Descriptor whose coordinates were resolved.
        descriptor: PathBuf,
        /// Why the identity was rejected.
        source: parentage_core::CoreError,
    },
}

/// A module declares a parent other than the one its container expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchError {
    /// Descriptor whose declaration is wrong.
    pub descriptor: PathBuf,
    /// What the descriptor declares; `None` when it has no parent block.
    pub declared: Option<ParentIdentity>,
    /// What the enclosing container requires.
    pub expected: ParentIdentity,
    /// Components that differ. All of them when nothing is declared.
    pub fields: Vec<IdentityField>,
}

impl fmt::Display for MismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields.iter().map(|field| field.as_str()).collect();
        match &self.declared {
            Some(declared) => write!(
                f,
                "parent for <{}> is <{}> but must be <{}> (differs in {})",
                self.descriptor.display(),
                declared,
                self.expected,
                fields.join(", "),
            ),
            None => write!(
                f,
                "parent for <{}> is not declared but must be <{}>",
                self.descriptor.display(),
                self.expected,
            ),
        }
    }
}

impl std::error::Error for MismatchError {}

/// The configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid YAML or has unknown keys.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A value is unusable.
    #[error("invalid config {path}: {detail}")]
    Invalid {
        /// Config file.
        path: PathBuf,
        /// Which value and why.
        detail: String,
    },
}

/// Top-level error for a parent check. The first one raised aborts the walk.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A descriptor could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An inherited coordinate could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A module declares the wrong parent.
    #[error(transparent)]
    Mismatch(#[from] MismatchError),

    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for parent checks.
pub type CheckResult<T> = Result<T, CheckError>;
