//! Drives the `tubegraph` binary end to end. Every run uses a fresh temp
//! directory as its working directory so no stray `tubegraph.toml` leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CRAWL: &str = r#"[
    {
        "id": "a1",
        "title": "First video",
        "duration": 1076,
        "likes": 93179,
        "dislikes": 3374,
        "pubdate": "2016-08-14",
        "mult": 0.5,
        "channel": "chan",
        "recommendations": ["b1", "b2"]
    },
    { "id": "b1", "title": "Second video" }
]"#;

fn workspace(input: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("crawl.json"), input).expect("failed to write input");
    dir
}

fn tubegraph(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tubegraph"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("TUBEGRAPH_GEXF__INDENT")
        .env_remove("TUBEGRAPH_GEXF__CREATOR")
        .env_remove("TUBEGRAPH_GEXF__DESCRIPTION")
        .env_remove("TUBEGRAPH_LOG__LEVEL")
        .output()
        .expect("failed to execute tubegraph")
}

#[test]
fn test_missing_filename_exits_1_without_output() {
    let dir = workspace(CRAWL);
    let output = tubegraph(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No filename provided!"));
}

#[test]
fn test_empty_filename_counts_as_missing() {
    let dir = workspace(CRAWL);
    let output = tubegraph(dir.path(), &["--filename="]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No filename provided!"));
}

#[test]
fn test_malformed_id_is_passed_through() {
    let dir = workspace(r#"[{"id": true, "recommendations": ["x"]}, {"id": "b"}]"#);
    let output = tubegraph(dir.path(), &["--filename=crawl.json"]);

    assert_eq!(output.status.code(), Some(0));
    let xml = String::from_utf8(output.stdout).unwrap();
    assert!(xml.contains(r#"<node id="true"/>"#));
    assert!(xml.contains(r#"<edge id="true-x-0" source="true" target="x"/>"#));
}

#[test]
fn test_converts_crawl_to_gexf() {
    let dir = workspace(CRAWL);
    let output = tubegraph(dir.path(), &["--filename=crawl.json"]);

    assert_eq!(output.status.code(), Some(0));
    let xml = String::from_utf8(output.stdout).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<graph mode="static" defaultedgetype="directed">"#));
    assert!(xml.contains(r#"<node id="a1" label="First video">"#));
    assert!(xml.contains(r#"<attvalue for="likes" value="93179"/>"#));
    assert!(xml.contains(r#"<edge id="a1-b1-0" source="a1" target="b1"/>"#));
    assert!(xml.contains(r#"<edge id="a1-b2-1" source="a1" target="b2"/>"#));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let dir = workspace(CRAWL);
    let first = tubegraph(dir.path(), &["--filename=crawl.json"]);
    let second = tubegraph(dir.path(), &["--filename=crawl.json"]);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = workspace(CRAWL);
    let output = tubegraph(dir.path(), &["--filename=absent.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_malformed_json_is_fatal() {
    let dir = workspace(r#"[{"id": "a1", "#);
    let output = tubegraph(dir.path(), &["--filename=crawl.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_file_switches_to_compact_output() {
    let dir = workspace(CRAWL);
    fs::write(
        dir.path().join("tubegraph.toml"),
        "[gexf]\nindent = 0\ncreator = \"crawler\"\n",
    )
    .unwrap();

    let output = tubegraph(dir.path(), &["--filename=crawl.json"]);
    assert!(output.status.success());

    let xml = String::from_utf8(output.stdout).unwrap();
    assert_eq!(xml.lines().count(), 1);
    assert!(xml.contains("<meta><creator>crawler</creator></meta>"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let dir = workspace(CRAWL);
    let output = Command::new(env!("CARGO_BIN_EXE_tubegraph"))
        .arg("--filename=crawl.json")
        .current_dir(dir.path())
        .env("RUST_LOG", "debug")
        .output()
        .expect("failed to execute tubegraph");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<?xml"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("built recommendation graph"));
}
