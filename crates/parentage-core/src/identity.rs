//! # Parent Identity
//!
//! The `(groupId, artifactId, version)` triple a module declares to name
//! its logical parent. Two identities are equal when all three components
//! are byte-for-byte equal; there is no version-range or semantic-version
//! matching.
//!
//! ## Invariant
//!
//! Every component is non-empty. The only constructor, [`ParentIdentity::new`],
//! enforces this, and deserialization goes through the same check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One component of a parent identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityField {
    /// `groupId`
    GroupId,
    /// `artifactId`
    ArtifactId,
    /// `version`
    Version,
}

impl IdentityField {
    /// All components, in comparison order.
    pub const ALL: [IdentityField; 3] = [
        IdentityField::GroupId,
        IdentityField::ArtifactId,
        IdentityField::Version,
    ];

    /// The descriptor element name for this component.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::GroupId => "groupId",
            IdentityField::ArtifactId => "artifactId",
            IdentityField::Version => "version",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity a module must declare as its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawIdentity")]
pub struct ParentIdentity {
    group_id: String,
    artifact_id: String,
    version: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIdentity {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl TryFrom<RawIdentity> for ParentIdentity {
    type Error = CoreError;

    fn try_from(raw: RawIdentity) -> Result<Self, Self::Error> {
        ParentIdentity::new(raw.group_id, raw.artifact_id, raw.version)
    }
}

impl ParentIdentity {
    /// Build an identity, rejecting empty components.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let identity = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        };
        for field in IdentityField::ALL {
            if identity.get(field).is_empty() {
                return Err(CoreError::EmptyComponent { field });
            }
        }
        Ok(identity)
    }

    /// The group component.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The artifact component.
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// The version component.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Access a component by field.
    pub fn get(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::GroupId => &self.group_id,
            IdentityField::ArtifactId => &self.artifact_id,
            IdentityField::Version => &self.version,
        }
    }

    /// Components that differ from `other`, in [`IdentityField::ALL`] order.
    ///
    /// Empty iff the identities are equal.
    pub fn differing_fields(&self, other: &ParentIdentity) -> Vec<IdentityField> {
        IdentityField::ALL
            .into_iter()
            .filter(|field| self.get(*field) != other.get(*field))
            .collect()
    }
}

impl fmt::Display for ParentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn acme_root() -> ParentIdentity {
        ParentIdentity::new("com.acme", "root", "1.0").unwrap()
    }

    #[test]
    fn new_rejects_each_empty_component() {
        assert_eq!(
            ParentIdentity::new("", "root", "1.0"),
            Err(CoreError::EmptyComponent {
                field: IdentityField::GroupId
            })
        );
        assert_eq!(
            ParentIdentity::new("com.acme", "", "1.0"),
            Err(CoreError::EmptyComponent {
                field: IdentityField::ArtifactId
            })
        );
        assert_eq!(
            ParentIdentity::new("com.acme", "root", ""),
            Err(CoreError::EmptyComponent {
                field: IdentityField::Version
            })
        );
    }

    #[test]
    fn display_uses_colon_coordinates() {
        assert_eq!(acme_root().to_string(), "com.acme:root:1.0");
    }

    #[test]
    fn differing_fields_reports_version_only() {
        let other = ParentIdentity::new("com.acme", "root", "1.1").unwrap();
        assert_eq!(
            acme_root().differing_fields(&other),
            vec![IdentityField::Version]
        );
    }

    #[test]
    fn differing_fields_reports_all_in_order() {
        let other = ParentIdentity::new("org.other", "base", "2.0").unwrap();
        assert_eq!(
            acme_root().differing_fields(&other),
            IdentityField::ALL.to_vec()
        );
    }

    #[test]
    fn comparison_is_exact_not_semantic() {
        let other = ParentIdentity::new("com.acme", "root", "1.0.0").unwrap();
        assert_ne!(acme_root(), other);
        let cased = ParentIdentity::new("com.Acme", "root", "1.0").unwrap();
        assert_eq!(
            acme_root().differing_fields(&cased),
            vec![IdentityField::GroupId]
        );
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let json = serde_json::to_value(acme_root()).unwrap();
        assert_eq!(json["groupId"], "com.acme");
        assert_eq!(json["artifactId"], "root");
        assert_eq!(json["version"], "1.0");
    }

    #[test]
    fn deserialize_rejects_empty_component() {
        let result: Result<ParentIdentity, _> = serde_json::from_str(
            r#"{"groupId":"com.acme","artifactId":"root","version":""}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn field_names_match_descriptor_elements() {
        assert_eq!(IdentityField::GroupId.to_string(), "groupId");
        assert_eq!(IdentityField::ArtifactId.to_string(), "artifactId");
        assert_eq!(IdentityField::Version.to_string(), "version");
    }

    fn component() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9._-]{1,16}"
    }

    proptest! {
        /// Every populated identity equals itself with no differing fields.
        #[test]
        fn identity_is_reflexive(g in component(), a in component(), v in component()) {
            let id = ParentIdentity::new(g, a, v).unwrap();
            prop_assert!(id.differing_fields(&id.clone()).is_empty());
            prop_assert_eq!(&id, &id.clone());
        }

        /// Differing fields are empty exactly when the identities are equal.
        #[test]
        fn differing_fields_agree_with_eq(
            a in (component(), component(), component()),
            b in (component(), component(), component()),
        ) {
            let x = ParentIdentity::new(a.0, a.1, a.2).unwrap();
            let y = ParentIdentity::new(b.0, b.1, b.2).unwrap();
            prop_assert_eq!(x.differing_fields(&y).is_empty(), x == y);
        }
    }
}
