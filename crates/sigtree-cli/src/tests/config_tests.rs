use super::*;
use sigtree_solver::{Relation, TypeRelationshipResolver};
use std::fs;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_config_fields() {
    let config = parse_config(
        r#"{
            "root": "java.lang.Object",
            "hierarchy": {
                "java.lang.Integer": ["java.lang.Number"]
            }
        }"#,
    )
    .unwrap();
    assert_eq!(config.root.as_deref(), Some("java.lang.Object"));
    assert_eq!(
        config.hierarchy.get("java.lang.Integer"),
        Some(&vec!["java.lang.Number".to_string()])
    );
    assert!(config.extends.is_none());
}

#[test]
fn test_parse_config_defaults() {
    let config = parse_config("{}").unwrap();
    assert_eq!(config, HierarchyConfig::default());
}

#[test]
fn test_parse_config_rejects_unknown_fields() {
    assert!(parse_config(r#"{ "hierachy": {} }"#).is_err());
    assert!(parse_config("not json").is_err());
}

#[test]
fn test_into_graph() {
    let config = parse_config(
        r#"{
            "root": "Object",
            "hierarchy": {
                "Integer": ["Number"],
                "Number": ["Serializable"]
            }
        }"#,
    )
    .unwrap();
    let graph = config.into_graph();
    assert!(graph.is_derived_from("Integer", "Serializable"));
    assert_eq!(
        graph.relate("Object", "Integer"),
        Ok(Relation::LeftAncestorOfRight)
    );
    assert_eq!(graph.relate("Integer", "Number"), Ok(Relation::RightAncestorOfLeft));
}

#[test]
fn test_load_config_follows_extends() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "base.json",
        r#"{
            "root": "Object",
            "hierarchy": { "Integer": ["Number"], "String": ["CharSequence"] }
        }"#,
    );
    let child = write(
        temp.path(),
        "sigtree.json",
        r#"{
            "extends": "./base",
            "hierarchy": { "Integer": ["Comparable"] }
        }"#,
    );

    let config = load_config(&child).unwrap();
    assert_eq!(config.root.as_deref(), Some("Object"));
    assert!(config.extends.is_none());
    // The child's entry replaces the base entry for the same name.
    assert_eq!(
        config.hierarchy.get("Integer"),
        Some(&vec!["Comparable".to_string()])
    );
    assert_eq!(
        config.hierarchy.get("String"),
        Some(&vec!["CharSequence".to_string()])
    );
}

#[test]
fn test_child_root_overrides_base_root() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "base.json", r#"{ "root": "Object" }"#);
    let child = write(
        temp.path(),
        "child.json",
        r#"{ "extends": "base.json", "root": "Any" }"#,
    );
    assert_eq!(load_config(&child).unwrap().root.as_deref(), Some("Any"));
}

#[test]
fn test_load_config_detects_extends_cycle() {
    let temp = TempDir::new().unwrap();
    let a = write(temp.path(), "a.json", r#"{ "extends": "b" }"#);
    write(temp.path(), "b.json", r#"{ "extends": "a" }"#);

    let err = load_config(&a).unwrap_err();
    assert!(format!("{err:#}").contains("cycle"));
}

#[test]
fn test_load_config_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = load_config(&temp.path().join("absent.json")).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config"));
}

#[test]
fn test_find_config_walks_up() {
    let temp = TempDir::new().unwrap();
    let config = write(temp.path(), CONFIG_FILE_NAME, "{}");
    let nested = temp.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_config(&nested), Some(config));
}

#[test]
fn test_find_config_none() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("empty");
    fs::create_dir_all(&nested).unwrap();
    // Ancestors of the temp dir may hold a config on a developer machine,
    // so only check that a hit is never inside the empty tree.
    if let Some(found) = find_config(&nested) {
        assert!(!found.starts_with(&nested));
    }
}
