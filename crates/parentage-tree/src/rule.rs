//! # Host Rule Surface
//!
//! A build host drives the check through [`EnforcerRule`], handing over a
//! [`ProjectContext`] that describes the project currently being built.
//! [`ParentRule`] is the parent-identity rule.
//!
//! The rule only applies to aggregator projects: when the host reports any
//! other artifact type the rule succeeds without touching the filesystem.
//! Its outcome depends on files the host does not track, so it is never
//! cacheable.

use std::path::{Path, PathBuf};

use parentage_core::{Descriptor, ParentIdentity};

use crate::config::RuleConfig;
use crate::error::CheckResult;
use crate::parser::load_descriptor_file;
use crate::resolve::effective_identity;
use crate::validation::{validate_tree, TreeReport};

/// The project a host is currently building.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Coordinates of the current project.
    pub identity: ParentIdentity,
    /// Artifact type the host reports for it (`pom` for aggregators).
    pub artifact_type: String,
    /// Its loaded descriptor.
    pub descriptor: Descriptor,
    /// Directory holding the descriptor.
    pub base_dir: PathBuf,
}

impl ProjectContext {
    /// Build a context from a descriptor file, or a directory holding one,
    /// the way a host would: inherited coordinates resolved, artifact type
    /// taken from the packaging.
    pub fn from_descriptor_file(path: &Path, config: &RuleConfig) -> CheckResult<Self> {
        let descriptor = load_root_descriptor(path, config)?;
        Self::from_descriptor(descriptor, config)
    }

    /// Build a context from an already loaded descriptor, resolving its
    /// inherited coordinates through the parent chain.
    pub fn from_descriptor(descriptor: Descriptor, config: &RuleConfig) -> CheckResult<Self> {
        let base_dir = descriptor.directory().to_path_buf();
        let identity = effective_identity(&base_dir, &descriptor, &config.descriptor_file_name)?;
        Ok(Self {
            identity,
            artifact_type: descriptor.packaging.clone(),
            descriptor,
            base_dir,
        })
    }
}

/// Load the descriptor at `path`, or `path/<descriptor file name>` when
/// `path` is a directory. Nothing beyond that one file is read.
pub fn load_root_descriptor(path: &Path, config: &RuleConfig) -> CheckResult<Descriptor> {
    let file = if path.is_dir() {
        path.join(&config.descriptor_file_name)
    } else {
        path.to_path_buf()
    };
    Ok(load_descriptor_file(&file)?)
}

/// A build-time rule a host can execute.
pub trait EnforcerRule {
    /// Run the rule. An error fails the host's build.
    fn execute(&self, ctx: &ProjectContext) -> CheckResult<()>;

    /// Whether the host may reuse a previous result.
    fn is_cacheable(&self) -> bool;

    /// Whether a cached result from `cached` is still valid.
    fn is_result_valid(&self, cached: &dyn EnforcerRule) -> bool;

    /// Key under which a host would cache the result.
    fn cache_id(&self) -> String;
}

/// Checks that every module of an aggregator declares it as parent.
#[derive(Debug, Clone, Default)]
pub struct ParentRule {
    config: RuleConfig,
}

impl ParentRule {
    /// Create a rule with the given configuration.
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// The configuration this rule runs with.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Whether the rule runs for a project of `artifact_type`.
    ///
    /// This is the only short-circuit: a host can ask before resolving the
    /// project's coordinates, which may need ancestors that are not on disk.
    pub fn applies_to(&self, artifact_type: &str) -> bool {
        artifact_type == self.config.container_artifact_type
    }

    /// Run the check. `None` when the project is not an aggregator.
    pub fn check(&self, ctx: &ProjectContext) -> CheckResult<Option<TreeReport>> {
        if !self.applies_to(&ctx.artifact_type) {
            tracing::debug!(
                artifact_type = %ctx.artifact_type,
                "Skipping non {} artifact.",
                self.config.container_artifact_type
            );
            return Ok(None);
        }
        let report = validate_tree(ctx, &self.config)?;
        tracing::info!(
            project = %ctx.identity,
            modules_checked = report.modules_checked,
            containers_visited = report.containers_visited,
            "module parents validated"
        );
        Ok(Some(report))
    }
}

impl EnforcerRule for ParentRule {
    fn execute(&self, ctx: &ProjectContext) -> CheckResult<()> {
        self.check(ctx).map(|_| ())
    }

    fn is_cacheable(&self) -> bool {
        false
    }

    fn is_result_valid(&self, _cached: &dyn EnforcerRule) -> bool {
        false
    }

    fn cache_id(&self) -> String {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;

    fn write(dir: &Path, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("pom.xml"), content).unwrap();
    }

    fn aggregator(dir: &Path) {
        write(
            dir,
            "<project><groupId>com.acme</groupId><artifactId>root</artifactId>\
             <version>1.0</version><packaging>pom</packaging>\
             <modules><module>child</module></modules></project>",
        );
    }

    #[test]
    fn context_from_directory_uses_packaging_as_artifact_type() {
        let tmp = tempfile::tempdir().unwrap();
        aggregator(tmp.path());
        let ctx = ProjectContext::from_descriptor_file(tmp.path(), &RuleConfig::default()).unwrap();
        assert_eq!(ctx.artifact_type, "pom");
        assert_eq!(ctx.identity.to_string(), "com.acme:root:1.0");
        assert_eq!(ctx.base_dir, tmp.path());
    }

    #[test]
    fn context_from_file_path() {
        let tmp = tempfile::tempdir().unwrap();
        aggregator(tmp.path());
        let ctx = ProjectContext::from_descriptor_file(
            &tmp.path().join("pom.xml"),
            &RuleConfig::default(),
        )
        .unwrap();
        assert_eq!(ctx.descriptor.artifact_id, "root");
    }

    #[test]
    fn non_aggregator_is_skipped_without_io() {
        let ctx = ProjectContext {
            identity: ParentIdentity::new("com.acme", "lib", "1.0").unwrap(),
            artifact_type: "jar".to_string(),
            descriptor: Descriptor {
                path: PathBuf::from("/nonexistent/pom.xml"),
                group_id: Some("com.acme".to_string()),
                artifact_id: "lib".to_string(),
                version: Some("1.0".to_string()),
                packaging: "pom".to_string(),
                parent: None,
                modules: vec!["missing".to_string()],
            },
            base_dir: PathBuf::from("/nonexistent"),
        };
        let rule = ParentRule::default();
        assert_eq!(rule.check(&ctx).unwrap(), None);
        assert!(rule.execute(&ctx).is_ok());
    }

    #[test]
    fn aggregator_with_missing_module_fails() {
        let tmp = tempfile::tempdir().unwrap();
        aggregator(tmp.path());
        let ctx = ProjectContext::from_descriptor_file(tmp.path(), &RuleConfig::default()).unwrap();
        let err = ParentRule::default().execute(&ctx).unwrap_err();
        assert!(matches!(err, CheckError::Load(_)));
    }

    #[test]
    fn aggregator_with_valid_module_reports() {
        let tmp = tempfile::tempdir().unwrap();
        aggregator(tmp.path());
        write(
            &tmp.path().join("child"),
            "<project><parent><groupId>com.acme</groupId><artifactId>root</artifactId>\
             <version>1.0</version></parent><artifactId>child</artifactId></project>",
        );
        let ctx = ProjectContext::from_descriptor_file(tmp.path(), &RuleConfig::default()).unwrap();
        let report = ParentRule::default().check(&ctx).unwrap().unwrap();
        assert_eq!(report.modules_checked, 1);
    }

    #[test]
    fn applies_only_to_container_artifact_type() {
        let rule = ParentRule::default();
        assert!(rule.applies_to("pom"));
        assert!(!rule.applies_to("jar"));
        let custom = ParentRule::new(RuleConfig {
            container_artifact_type: "aggregate".to_string(),
            ..RuleConfig::default()
        });
        assert!(custom.applies_to("aggregate"));
        assert!(!custom.applies_to("pom"));
    }

    #[test]
    fn root_descriptor_loads_without_resolving_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let app = tmp.path().join("app");
        // Parent lives in a remote repository, not on disk.
        write(
            &app,
            "<project><parent><groupId>org.springframework.boot</groupId>\
             <artifactId>spring-boot-starter-parent</artifactId><version>3.2.0</version>\
             <relativePath/></parent><artifactId>app</artifactId></project>",
        );
        let config = RuleConfig::default();
        let descriptor = load_root_descriptor(&app, &config).unwrap();
        assert_eq!(descriptor.packaging, "jar");
        assert!(!ParentRule::new(config.clone()).applies_to(&descriptor.packaging));
        assert!(matches!(
            ProjectContext::from_descriptor(descriptor, &config).unwrap_err(),
            CheckError::Load(_)
        ));
    }

    #[test]
    fn rule_is_never_cacheable() {
        let rule = ParentRule::default();
        assert!(!rule.is_cacheable());
        assert!(!rule.is_result_valid(&ParentRule::default()));
        assert_eq!(rule.cache_id(), "0");
    }
}
