use super::*;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HIERARCHY: &str = r#"{
    "root": "Object",
    "hierarchy": {
        "Integer": ["Number"],
        "Number": [],
        "String": [],
        "Boolean": []
    }
}"#;

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(crate::config::CONFIG_FILE_NAME), HIERARCHY).unwrap();
    temp
}

fn run_cli(cwd: &Path, argv: &[&str]) -> (Result<ExitStatus>, String) {
    let args = CliArgs::parse_from(std::iter::once("sigtree").chain(argv.iter().copied()));
    let mut out = Vec::new();
    let status = run(&args, cwd, &mut out);
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn test_parse_prints_canonical_form() {
    let temp = TempDir::new().unwrap();
    let (status, out) = run_cli(temp.path(), &["parse", " Map< K ,List<V>> "]);
    assert_eq!(status.unwrap(), ExitStatus::Success);
    assert_eq!(out, "Map<K, List<V>>\n");
}

#[test]
fn test_parse_json_snapshot() {
    let temp = TempDir::new().unwrap();
    let (status, out) = run_cli(temp.path(), &["parse", "--json", "A<B>"]);
    assert_eq!(status.unwrap(), ExitStatus::Success);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["name"], "A");
    assert_eq!(value["children"][0]["name"], "B");
}

#[test]
fn test_parse_malformed_descriptor_is_an_error() {
    let temp = TempDir::new().unwrap();
    let (status, out) = run_cli(temp.path(), &["parse", "A<B,C"]);
    let err = status.unwrap_err();
    assert!(format!("{err:#}").contains("invalid descriptor `A<B,C`"));
    assert!(out.is_empty());
}

#[test]
fn test_compare_prints_grade() {
    let temp = workspace();
    let cases = [
        ("F<Object, Boolean>", "F<Integer, Boolean>", "1"),
        ("F<Integer, Boolean>", "F<Object, Boolean>", "2"),
        ("F<Object, Boolean>", "F<String, Object>", "3"),
        ("F<String, Boolean>", "F<Integer, Boolean>", "-1"),
        ("F<Integer>", "F<Integer>", "0"),
    ];
    for (left, right, expected) in cases {
        let (status, out) = run_cli(temp.path(), &["compare", left, right]);
        assert_eq!(status.unwrap(), ExitStatus::Success, "{left} vs {right}");
        assert_eq!(out.trim(), expected, "{left} vs {right}");
    }
}

#[test]
fn test_compare_strict_failure_reports_divergence() {
    let temp = workspace();
    let (status, out) = run_cli(
        temp.path(),
        &["compare", "--strict", "F<Boolean, Object>", "F<Boolean, Integer>"],
    );
    assert_eq!(status.unwrap(), ExitStatus::Failure);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "1");
    assert!(lines[1].starts_with("error: type `F` does not match `F`"));
    assert_eq!(lines[2], "  first difference: `Object` vs `Integer` at parameter 1");
}

#[test]
fn test_compare_strict_success() {
    let temp = workspace();
    let (status, out) = run_cli(temp.path(), &["compare", "--strict", "F<Integer>", "F<Integer>"]);
    assert_eq!(status.unwrap(), ExitStatus::Success);
    assert_eq!(out, "0\n");
}

#[test]
fn test_compare_json_report() {
    let temp = workspace();
    let (status, out) = run_cli(
        temp.path(),
        &["compare", "--strict", "--json", "F<Number>", "F<Integer>"],
    );
    assert_eq!(status.unwrap(), ExitStatus::Failure);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["grade"], 1);
    assert_eq!(value["left"], "F<Number>");
    assert_eq!(value["divergence"]["sourceType"], "Number");
    assert_eq!(value["divergence"]["targetType"], "Integer");
    assert_eq!(value["divergence"]["path"], serde_json::json!([0]));
    assert!(value["error"].as_str().unwrap().contains("does not match"));
}

#[test]
fn test_compare_json_omits_error_when_not_strict() {
    let temp = workspace();
    let (_, out) = run_cli(temp.path(), &["compare", "--json", "A", "A"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["grade"], 0);
    assert!(value.get("error").is_none());
    assert!(value.get("divergence").is_none());
}

#[test]
fn test_compare_uses_explicit_config() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("types");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("java.json"), r#"{ "hierarchy": { "Integer": ["Number"] } }"#).unwrap();

    let (status, out) = run_cli(
        temp.path(),
        &["compare", "-c", "types/java.json", "Number", "Integer"],
    );
    assert_eq!(status.unwrap(), ExitStatus::Success);
    assert_eq!(out.trim(), "1");
}

#[test]
fn test_compare_missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let (status, _) = run_cli(temp.path(), &["compare", "-c", "absent.json", "A", "B"]);
    assert!(status.is_err());
}

#[test]
fn test_load_resolver_finds_config_in_ancestor() {
    let temp = workspace();
    let nested: PathBuf = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    let graph = load_resolver(None, &nested).unwrap();
    assert!(graph.is_derived_from("Integer", "Number"));
}

#[test]
fn test_find_first_matching_child() {
    let temp = TempDir::new().unwrap();
    let (status, out) = run_cli(
        temp.path(),
        &["find", "Map<java.lang.String, List<java.lang.Integer>>", "List|Set"],
    );
    assert_eq!(status.unwrap(), ExitStatus::Success);
    assert_eq!(out, "List<java.lang.Integer>\n");
}

#[test]
fn test_find_does_not_match_grandchildren() {
    let temp = TempDir::new().unwrap();
    let (status, out) = run_cli(temp.path(), &["find", "A<B<C>>", "C"]);
    assert_eq!(status.unwrap(), ExitStatus::Failure);
    assert!(out.is_empty());
}

#[test]
fn test_find_invalid_pattern_is_an_error() {
    let temp = TempDir::new().unwrap();
    let (status, _) = run_cli(temp.path(), &["find", "A<B>", "("]);
    let err = status.unwrap_err();
    assert!(format!("{err:#}").contains("invalid name pattern"));
}

#[test]
fn test_exit_status_codes() {
    assert_eq!(ExitStatus::Success.code(), 0);
    assert_eq!(ExitStatus::Failure.code(), 1);
}
