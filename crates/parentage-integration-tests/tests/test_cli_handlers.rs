//! CLI handlers driven against trees on disk, with and without a config file.

use std::path::Path;

use parentage_cli::check::{run_check, CheckArgs};
use parentage_cli::load_config;
use parentage_cli::show::summarize;

fn write(path: &Path, content: &str) {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn json_tree(root: &Path, child_version: &str) {
    write(
        &root.join("module.json"),
        r#"{"groupId":"io.example","artifactId":"suite","version":"3.1","packaging":"pom","modules":["core"]}"#,
    );
    write(
        &root.join("core/module.json"),
        &format!(
            r#"{{"artifactId":"core","parent":{{"groupId":"io.example","artifactId":"suite","version":"{child_version}"}}}}"#
        ),
    );
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_json_tree_with_file_name_flag() {
    let tmp = tempfile::tempdir().unwrap();
    json_tree(tmp.path(), "3.1");
    let args = CheckArgs {
        path: tmp.path().to_path_buf(),
        file_name: Some("module.json".to_string()),
    };
    assert_eq!(run_check(&args, None).unwrap(), 0);
}

#[test]
fn check_json_tree_with_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    json_tree(tmp.path(), "3.0");
    let config = tmp.path().join("parentage.yaml");
    write(&config, "descriptor_file_name: module.json\n");

    let args = CheckArgs {
        path: tmp.path().to_path_buf(),
        file_name: None,
    };
    assert_eq!(run_check(&args, Some(&config)).unwrap(), 1);
}

#[test]
fn check_with_invalid_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("parentage.yaml");
    write(&config, "descriptor_file_name: nested/pom.xml\n");

    let args = CheckArgs {
        path: tmp.path().to_path_buf(),
        file_name: None,
    };
    assert!(run_check(&args, Some(&config)).is_err());
}

#[test]
fn file_name_flag_overrides_config() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("parentage.yaml");
    write(&config, "descriptor_file_name: module.yaml\n");

    let loaded = load_config(Some(&config), Some("build.json")).unwrap();
    assert_eq!(loaded.descriptor_file_name, "build.json");
    assert_eq!(loaded.container_packaging, "pom");
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn summary_of_inheriting_module_as_json() {
    let tmp = tempfile::tempdir().unwrap();
    json_tree(tmp.path(), "3.1");
    let config = load_config(None, Some("module.json")).unwrap();

    let summary = summarize(&tmp.path().join("core"), &config).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["effective"]["groupId"], "io.example");
    assert_eq!(json["effective"]["version"], "3.1");
    assert_eq!(json["declaredParent"]["artifactId"], "suite");
    assert_eq!(json["packaging"], "jar");
    assert!(json["expectedForModules"].is_null());
}
