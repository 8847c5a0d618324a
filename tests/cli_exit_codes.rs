mod common;

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use common::{hero_selection, selection_json};
use serde_json::Value;
use tempfile::TempDir;

fn d2c(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_d2c"));
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_selection(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write selection");
    path.to_str().expect("utf-8 path").to_string()
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().last().expect("stdout line");
    serde_json::from_str(line).expect("json envelope")
}

#[test]
fn generate_exits_zero_with_envelope() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));

    let output = d2c(dir.path())
        .args(["generate", "--input", &input])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(0));

    let body = stdout_json(&output);
    assert_eq!(body["mode"], "generate");
    assert_eq!(body["code"]["componentUsage"]["Button"], 2);
    assert!(body["code"]["markup"]
        .as_str()
        .unwrap_or_default()
        .contains("<SectionHeader"));
}

#[test]
fn generate_writes_component_source_to_output() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));
    let target = dir.path().join("Hero.tsx");

    let status = d2c(dir.path())
        .args(["generate", "--input", &input, "--output"])
        .arg(&target)
        .status()
        .expect("run d2c");
    assert_eq!(status.code(), Some(0));

    let source = std::fs::read_to_string(&target).expect("read output");
    assert!(source.starts_with("import { Button } from \"@/components/Button\";\n"));
    assert!(source.contains("<Button label=\"Get started\""));
}

#[test]
fn empty_selection_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "empty.json", "[]");

    let output = d2c(dir.path())
        .args(["generate", "--input", &input])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["mode"], "no-selection");
}

#[test]
fn malformed_input_exits_two_with_input_category() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "bad.json", "{\"nodes\": 3}");

    let output = d2c(dir.path())
        .args(["generate", "--input", &input])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(2));

    let body = stdout_json(&output);
    assert_eq!(body["mode"], "error");
    assert_eq!(body["error"]["category"], "input");
}

#[test]
fn bad_disable_value_exits_two_with_hint() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));

    let output = d2c(dir.path())
        .args(["generate", "--input", &input, "--disable", "hero-fade"])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(2));

    let body = stdout_json(&output);
    assert!(body["error"]["remediation"]
        .as_str()
        .unwrap_or_default()
        .contains("NODE_ID:KIND"));
}

#[test]
fn disable_turns_off_one_suggestion() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));

    let output = d2c(dir.path())
        .args(["generate", "--input", &input, "--disable", "header:scroll-heading"])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(0));

    let body = stdout_json(&output);
    let markup = body["code"]["markup"].as_str().unwrap_or_default();
    assert!(!markup.contains("scroll-heading"));
    let header = body["code"]["animations"]
        .as_array()
        .and_then(|list| list.iter().find(|a| a["nodeId"] == "header"))
        .expect("header suggestion");
    assert_eq!(header["enabled"], false);
}

#[test]
fn invalid_config_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));
    let cfg_path = dir.path().join("d2c.toml");
    std::fs::write(&cfg_path, "[colors]\nexact_threshold = 20.0\n").expect("write config");

    let output = d2c(dir.path())
        .args(["generate", "--input", &input, "--config"])
        .arg(&cfg_path)
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["error"]["category"], "config");
}

#[test]
fn context_prints_raw_document() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));

    let output = d2c(dir.path())
        .args(["context", "--input", &input])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Design context"));
    assert!(stdout.contains("## Detected components"));
}

#[test]
fn context_format_json_wraps_document_in_envelope() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));

    let output = d2c(dir.path())
        .args(["context", "--input", &input, "--format", "json"])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(0));

    let body = stdout_json(&output);
    assert_eq!(body["mode"], "context");
    assert_eq!(body["input"], input.as_str());
    let context = body["context"].as_str().expect("context string");
    assert!(context.starts_with("# Design context"));
    assert!(context.contains("## Detected components"));
}

#[test]
fn detect_threshold_flag_overrides_config() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_selection(&dir, "hero.json", &selection_json(&hero_selection()));

    let output = d2c(dir.path())
        .args(["detect", "--input", &input, "--threshold", "100"])
        .output()
        .expect("run d2c");
    assert_eq!(output.status.code(), Some(0));

    let body = stdout_json(&output);
    assert_eq!(body["mode"], "detect");
    assert_eq!(body["threshold"], 100);
    assert_eq!(body["components"].as_array().map(Vec::len), Some(0));
}

#[test]
fn generate_reads_stdin_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let mut child = d2c(dir.path())
        .arg("generate")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn d2c");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(selection_json(&hero_selection()).as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["input"], "-");
}

#[test]
fn watch_collapses_a_burst_into_one_result() {
    let dir = TempDir::new().expect("tempdir");
    let mut child = d2c(dir.path())
        .args(["watch", "--debounce-ms", "200"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn d2c");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        let line = selection_json(&hero_selection());
        for _ in 0..3 {
            writeln!(stdin, "{line}").expect("write line");
        }
    }
    let output = child.wait_with_output().expect("wait");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let envelopes: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0]["mode"], "generate");
    assert_eq!(envelopes[0]["input"], "stdin");
}

#[test]
fn watch_toggle_applies_to_the_selection_sent_before_it() {
    let dir = TempDir::new().expect("tempdir");
    let mut child = d2c(dir.path())
        .args(["watch", "--debounce-ms", "5000"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn d2c");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        writeln!(stdin, "{}", selection_json(&hero_selection())).expect("write selection");
        writeln!(
            stdin,
            r#"{{"toggle":{{"nodeId":"header","kind":"scroll-heading","enabled":false}}}}"#
        )
        .expect("write toggle");
    }
    let output = child.wait_with_output().expect("wait");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let envelopes: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(envelopes.len(), 2, "{stdout}");
    assert!(envelopes.iter().all(|e| e["mode"] == "generate"));

    let first = envelopes[0]["code"]["markup"].as_str().expect("markup");
    let second = envelopes[1]["code"]["markup"].as_str().expect("markup");
    assert!(first.contains("data-animate=\"scroll-heading\""));
    assert!(!second.contains("data-animate=\"scroll-heading\""));
    let header = envelopes[1]["code"]["animations"]
        .as_array()
        .and_then(|list| list.iter().find(|a| a["nodeId"] == "header"))
        .expect("header suggestion");
    assert_eq!(header["enabled"], false);
}
