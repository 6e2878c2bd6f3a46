//! Integration tests for the configuration system.
//!
//! This test suite validates the complete workflow: file discovery,
//! merging, environment variable handling and validation, and then building
//! restriction sets and traversal specs from the result.
//!
//! Tests that modify environment variables are marked with `#[serial]`
//! because environment variables are process-global.

mod common;

use common::{relative_names, TreeFixture};
use pathward::config::{Config, ConfigBuilder, RestrictionConfig};
use pathward::{Error, PathResolver, RestrictionSet, TraversalEngine, TraversalSpec};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Writes `pathward.yaml` into `dir`.
fn write_project_config(dir: &std::path::Path, yaml: &str) {
    fs::write(dir.join("pathward.yaml"), yaml).unwrap();
}

#[test]
fn test_config_drives_a_traversal() {
    let tree = TreeFixture::uploads();
    let project = tree.dir("project");
    let data_dir = tree.dir("home");
    write_project_config(
        &project,
        &format!(
            "restrictions:\n  label: photos\n  paths:\n    - path: {}\n      write: true\n\
             traversal:\n  recurse: true\n  extension_allow: [JPG]\n  skip:\n    - {}\n",
            tree.path("uploads").display(),
            tree.path("uploads/2024/raw").display(),
        ),
    );

    let config = ConfigBuilder::new()
        .with_working_dir(&project)
        .with_data_dir(&data_dir)
        .skip_env()
        .build()
        .unwrap();

    let restrictions = RestrictionSet::from_config(&config.restrictions.unwrap()).unwrap();
    assert_eq!(restrictions.label(), "photos");

    let spec = TraversalSpec::from_config([tree.path("uploads")], &config.traversal.unwrap());
    let mut seen = Vec::new();
    TraversalEngine::new(&restrictions)
        .run(&spec, |path| {
            seen.push(path.to_path_buf());
            Ok(())
        })
        .unwrap();

    assert_eq!(
        relative_names(tree.root(), &seen),
        vec!["uploads/2024/trip.jpg", "uploads/photo.JPG"]
    );
}

#[test]
fn test_local_config_adds_restricted_paths() {
    let tree = TreeFixture::uploads();
    let project = tree.dir("project");
    let data_dir = tree.dir("home");
    write_project_config(
        &project,
        &format!("restrictions:\n  paths:\n    - {}\n", tree.path("uploads").display()),
    );
    fs::write(
        project.join("pathward.local.yaml"),
        format!(
            "restrictions:\n  paths:\n    - path: {}\n      write: true\n",
            tree.path("private").display()
        ),
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .with_working_dir(&project)
        .with_data_dir(&data_dir)
        .skip_env()
        .build()
        .unwrap();
    let set = RestrictionSet::from_config(&config.restrictions.unwrap()).unwrap();

    assert_eq!(set.label(), "default");
    assert_eq!(set.entries().len(), 2);
    assert!(set.check_write(tree.path("uploads/photo.JPG")).is_err());
    assert!(set.check_write(tree.path("private/secret.txt")).is_ok());
}

#[test]
fn test_unknown_fields_are_rejected() {
    let tree = TreeFixture::new();
    let project = tree.dir("project");
    let data_dir = tree.dir("home");
    write_project_config(&project, "traversal:\n  recursive: true\n");

    let result = ConfigBuilder::new()
        .with_working_dir(&project)
        .with_data_dir(&data_dir)
        .skip_env()
        .build();

    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_allow_all_with_paths_fails_validation() {
    let result = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config {
            restrictions: Some(RestrictionConfig {
                allow_all: Some(true),
                paths: Some(vec![pathward::config::RestrictedPath {
                    path: PathBuf::from("/srv"),
                    write: false,
                }]),
                ..Default::default()
            }),
            ..Default::default()
        })
        .build();

    match result {
        Err(Error::Validation { field, .. }) => assert_eq!(field, "restrictions.allow_all"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let tree = TreeFixture::new();
    let project = tree.dir("project");
    let data_dir = tree.dir("home");
    fs::write(
        data_dir.join("config.yaml"),
        "max_symlink_depth: 8\ntraversal:\n  follow_hidden: false\n  extension_deny: [exe]\n",
    )
    .unwrap();

    env::set_var("PATHWARD_FOLLOW_HIDDEN", "true");
    env::set_var("PATHWARD_EXTENSION_DENY", "bat");
    env::set_var("PATHWARD_MAX_SYMLINK_DEPTH", "4");

    let result = ConfigBuilder::new()
        .with_working_dir(&project)
        .with_data_dir(&data_dir)
        .build();

    env::remove_var("PATHWARD_FOLLOW_HIDDEN");
    env::remove_var("PATHWARD_EXTENSION_DENY");
    env::remove_var("PATHWARD_MAX_SYMLINK_DEPTH");

    let config = result.unwrap();
    assert_eq!(config.max_symlink_depth, Some(4));
    let traversal = config.traversal.unwrap();
    assert_eq!(traversal.follow_hidden, Some(true));
    assert_eq!(traversal.extension_deny.unwrap(), vec!["exe", "bat"]);

    let resolver = PathResolver::new().with_max_symlink_depth(config.max_symlink_depth.unwrap());
    assert_eq!(resolver.max_symlink_depth(), 4);
}

#[test]
#[serial]
fn test_invalid_environment_value() {
    env::set_var("PATHWARD_FOLLOW_SYMLINKS", "sometimes");
    let result = ConfigBuilder::new().skip_files().build();
    env::remove_var("PATHWARD_FOLLOW_SYMLINKS");

    match result {
        Err(Error::Validation { field, .. }) => assert_eq!(field, "PATHWARD_FOLLOW_SYMLINKS"),
        other => panic!("expected validation error, got {other:?}"),
    }
}
