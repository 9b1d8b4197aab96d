//! Descriptor loading.
//!
//! Reads one descriptor file and parses it into a [`Descriptor`]. The
//! format is picked from the file extension:
//!
//! - `.xml`: Maven POM (`<project>` with `<parent>` and `<modules>`), via
//!   `quick-xml`'s serde deserializer.
//! - `.yaml` / `.yml`: the same fields as a YAML mapping, via `serde_yaml`.
//! - `.json`: the same fields as a JSON object, via `serde_json`.
//!
//! Each call opens the file, reads it fully, and releases the handle before
//! parsing. Nothing is cached: the walker loads a descriptor again every
//! time it needs one.

use std::path::Path;

use serde::Deserialize;

use parentage_core::{Descriptor, IdentityField, ParentIdentity, ParentReference, DEFAULT_PACKAGING};

use crate::error::LoadError;

/// Conventional descriptor file name.
pub const DEFAULT_DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// On-disk encoding of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    /// Maven POM.
    Xml,
    /// YAML manifest.
    Yaml,
    /// JSON manifest.
    Json,
}

impl DescriptorFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xml" => Some(DescriptorFormat::Xml),
            "yaml" | "yml" => Some(DescriptorFormat::Yaml),
            "json" => Some(DescriptorFormat::Json),
            _ => None,
        }
    }
}

/// Load `directory/file_name` as a descriptor.
///
/// `file_name` may itself contain path segments (`child/pom.xml`).
pub fn load_descriptor(directory: &Path, file_name: &str) -> Result<Descriptor, LoadError> {
    let path = directory.join(file_name);
    tracing::debug!(path = %path.display(), "loading descriptor");
    load_descriptor_file(&path)
}

/// Load `directory/pom.xml`.
pub fn load_default(directory: &Path) -> Result<Descriptor, LoadError> {
    load_descriptor(directory, DEFAULT_DESCRIPTOR_FILE_NAME)
}

/// Load a descriptor from an explicit file path.
pub fn load_descriptor_file(path: &Path) -> Result<Descriptor, LoadError> {
    let format = DescriptorFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = read_source(path)?;
    parse_descriptor(&content, format, path)
}

/// Parse descriptor text that was read from `path`.
pub fn parse_descriptor(
    content: &str,
    format: DescriptorFormat,
    path: &Path,
) -> Result<Descriptor, LoadError> {
    let raw = match format {
        DescriptorFormat::Xml => {
            let project: XmlProject =
                quick_xml::de::from_str(content).map_err(|e| LoadError::XmlParse {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            project.into_raw()
        }
        DescriptorFormat::Yaml => {
            let project: ManifestProject =
                serde_yaml::from_str(content).map_err(|e| LoadError::YamlParse {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            project.into_raw()
        }
        DescriptorFormat::Json => {
            let project: ManifestProject =
                serde_json::from_str(content).map_err(|e| LoadError::JsonParse {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            project.into_raw()
        }
    };
    raw.into_descriptor(path)
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParent {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    relative_path: Option<String>,
}

/// POM layout: modules are wrapped in `<modules><module>..</module></modules>`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct XmlProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
    parent: Option<RawParent>,
    #[serde(default)]
    modules: XmlModules,
}

#[derive(Debug, Default, Deserialize)]
struct XmlModules {
    #[serde(default)]
    module: Vec<String>,
}

/// YAML/JSON layout: modules are a plain list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
    parent: Option<RawParent>,
    #[serde(default)]
    modules: Vec<String>,
}

struct RawDescriptor {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    packaging: Option<String>,
    parent: Option<RawParent>,
    modules: Vec<String>,
}

impl XmlProject {
    fn into_raw(self) -> RawDescriptor {
        RawDescriptor {
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            version: self.version,
            packaging: self.packaging,
            parent: self.parent,
            modules: self.modules.module,
        }
    }
}

impl ManifestProject {
    fn into_raw(self) -> RawDescriptor {
        RawDescriptor {
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            version: self.version,
            packaging: self.packaging,
            parent: self.parent,
            modules: self.modules,
        }
    }
}

/// Trimmed value, or `None` for absent and blank (`<version/>`) elements.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawDescriptor {
    fn into_descriptor(self, path: &Path) -> Result<Descriptor, LoadError> {
        let malformed = |detail: String| LoadError::Malformed {
            path: path.to_path_buf(),
            detail,
        };

        let artifact_id =
            present(self.artifact_id).ok_or_else(|| malformed("missing artifactId".to_string()))?;

        let parent = match self.parent {
            Some(raw) => {
                let group_id = present(raw.group_id);
                let artifact_id = present(raw.artifact_id);
                let version = present(raw.version);
                let missing: Vec<&str> = [
                    (IdentityField::GroupId, &group_id),
                    (IdentityField::ArtifactId, &artifact_id),
                    (IdentityField::Version, &version),
                ]
                .iter()
                .filter(|(_, value)| value.is_none())
                .map(|(field, _)| field.as_str())
                .collect();
                match (group_id, artifact_id, version) {
                    (Some(g), Some(a), Some(v)) => {
                        let identity = ParentIdentity::new(g, a, v)
                            .map_err(|e| malformed(format!("parent: {e}")))?;
                        Some(ParentReference {
                            identity,
                            relative_path: present(raw.relative_path),
                        })
                    }
                    _ => {
                        return Err(malformed(format!(
                            "parent block missing {}",
                            missing.join(", ")
                        )))
                    }
                }
            }
            None => None,
        };

        let mut modules = Vec::with_capacity(self.modules.len());
        for module in self.modules {
            match present(Some(module)) {
                Some(m) => modules.push(m),
                None => return Err(malformed("empty module path".to_string())),
            }
        }

        Ok(Descriptor {
            path: path.to_path_buf(),
            group_id: present(self.group_id),
            artifact_id,
            version: present(self.version),
            packaging: present(self.packaging).unwrap_or_else(|| DEFAULT_PACKAGING.to_string()),
            parent,
            modules,
        })
    }
}
