//! Remote fixture and suite document discovery.

mod common;

use std::path::PathBuf;

use common::{integer_suite, write_json, write_raw};
use jsonschema_conformance::error::{ErrorKind, LoadError};
use jsonschema_conformance::suite::{load_remotes, load_suite_file, FileWalk, SuiteFiles};
use serde_json::json;

// ---------------------------------------------------------------------------
// Remote fixtures
// ---------------------------------------------------------------------------

#[test]
fn remotes_are_collected_at_any_depth() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_json(root, "integer.json", &json!({ "type": "integer" }));
    write_json(root, "subSchemas.json", &json!({ "definitions": {} }));
    write_json(root, "folder/folderInteger.json", &json!({ "type": "integer" }));
    write_json(root, "nested/deeper/name.json", &json!({ "$id": "http://localhost:1234/name.json" }));

    let remotes = load_remotes(root).unwrap();
    assert_eq!(remotes.len(), 4, "Every JSON file must be collected, directories skipped");
    assert!(!remotes.is_empty());

    let paths: Vec<PathBuf> = remotes
        .iter()
        .map(|remote| remote.path.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        paths,
        ["folder/folderInteger.json", "integer.json", "nested/deeper/name.json", "subSchemas.json"]
            .iter()
            .map(PathBuf::from)
            .collect::<Vec<_>>(),
        "Remotes keep walk order"
    );
    assert!(remotes
        .values()
        .any(|v| v.get("$id") == Some(&json!("http://localhost:1234/name.json"))));
}

#[test]
fn empty_remote_root_yields_empty_collection() {
    let tmp = tempfile::tempdir().unwrap();
    let remotes = load_remotes(tmp.path()).unwrap();
    assert!(remotes.is_empty());
}

#[test]
fn unparsable_remote_aborts_the_load() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_json(root, "good.json", &json!({ "type": "string" }));
    write_raw(root, "bad.json", "{ not json");

    let err = load_remotes(root).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.path(), root.join("bad.json"));
}

#[test]
fn missing_remote_root_is_a_filesystem_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = load_remotes(tmp.path().join("absent")).unwrap_err();
    assert!(
        matches!(err, LoadError::Filesystem { .. }),
        "Expected filesystem error, got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Walk order
// ---------------------------------------------------------------------------

#[test]
fn walk_visits_files_in_name_order_depth_first() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_raw(root, "b.json", "[]");
    write_raw(root, "a.json", "[]");
    write_raw(root, "optional/format/date.json", "[]");
    write_raw(root, "optional/bignum.json", "[]");
    write_raw(root, "z.json", "[]");

    let rel: Vec<PathBuf> = FileWalk::new(root)
        .map(|p| p.unwrap().strip_prefix(root).unwrap().to_path_buf())
        .collect();

    let expected: Vec<PathBuf> = [
        "a.json",
        "b.json",
        "optional/bignum.json",
        "optional/format/date.json",
        "z.json",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    assert_eq!(rel, expected);
}

#[cfg(unix)]
#[test]
fn walk_does_not_follow_directory_symlinks() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_raw(root, "a.json", "[]");
    write_raw(root, "real/b.json", "[]");
    std::os::unix::fs::symlink(root, root.join("loop")).unwrap();
    std::os::unix::fs::symlink(root.join("a.json"), root.join("z.json")).unwrap();

    let rel: Vec<PathBuf> = FileWalk::new(root)
        .map(|p| p.unwrap().strip_prefix(root).unwrap().to_path_buf())
        .collect();

    let expected: Vec<PathBuf> = ["a.json", "real/b.json", "z.json"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(rel, expected, "File symlinks are yielded, directory symlinks skipped");

    let elsewhere = tempfile::tempdir().unwrap();
    let alias = elsewhere.path().join("suite");
    std::os::unix::fs::symlink(root.join("real"), &alias).unwrap();
    let through_alias: Vec<PathBuf> = FileWalk::new(&alias).map(|p| p.unwrap()).collect();
    assert_eq!(through_alias, vec![alias.join("b.json")], "A symlinked root is still walked");
}

// ---------------------------------------------------------------------------
// Suite documents
// ---------------------------------------------------------------------------

#[test]
fn suite_file_parses_groups_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    let mut suite = integer_suite();
    suite.as_array_mut().unwrap().push(json!({
        "description": "second group",
        "schema": true,
        "tests": []
    }));
    write_json(root, "type.json", &suite);

    let file = load_suite_file(&root.join("type.json")).unwrap();
    assert_eq!(file.path, root.join("type.json"));
    assert_eq!(file.groups.len(), 2);
    assert_eq!(file.groups[0].description, "integer type");
    assert_eq!(file.groups[0].schema, json!({ "type": "integer" }));
    assert_eq!(file.groups[0].tests.len(), 2);
    assert_eq!(file.groups[0].tests[0].data, json!(5));
    assert!(file.groups[0].tests[0].valid);
    assert!(!file.groups[0].tests[1].valid);
    assert_eq!(file.groups[1].description, "second group");
    assert!(file.groups[1].tests.is_empty());
}

#[test]
fn malformed_suite_file_is_isolated_to_that_file() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_json(root, "a.json", &integer_suite());
    write_raw(root, "b.json", "[{\"description\": ");
    write_json(root, "c.json", &json!([{ "description": "wrong shape" }]));
    write_json(root, "d.json", &integer_suite());

    let results: Vec<_> = SuiteFiles::new(root).collect();
    assert_eq!(results.len(), 4, "Every file must yield exactly one item");

    assert!(results[0].is_ok());
    let b = results[1].as_ref().unwrap_err();
    assert_eq!(b.kind(), ErrorKind::Parse);
    assert_eq!(b.path(), root.join("b.json"));
    let c = results[2].as_ref().unwrap_err();
    assert_eq!(c.kind(), ErrorKind::Parse, "Missing schema/tests fields are a parse error");
    assert!(results[3].is_ok(), "Files after a broken one must still load");
}

#[test]
fn missing_suite_root_yields_one_error() {
    let tmp = tempfile::tempdir().unwrap();
    let results: Vec<_> = SuiteFiles::new(tmp.path().join("absent")).collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap_err().kind(), ErrorKind::Filesystem);
}
