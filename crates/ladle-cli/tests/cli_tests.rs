//! End-to-end tests against the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

const ENVELOPE: &str = r#"{"object":"list","results":[{"id":"a","name":"One"},{"id":"b","name":"Two"}],"has_more":false}"#;

fn ladle() -> Command {
    Command::cargo_bin("ladle").unwrap()
}

#[test]
fn test_default_output_is_pretty_json_with_meta() {
    ladle()
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fetched_count\": 2"))
        .stdout(predicate::str::contains("\"object\": \"list\""));
}

#[test]
fn test_ndjson_results_only_streams_lines() {
    ladle()
        .args(["--format", "ndjson", "--results-only"])
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout("{\"id\":\"a\",\"name\":\"One\"}\n{\"id\":\"b\",\"name\":\"Two\"}\n");
}

#[test]
fn test_table_renders_aligned_columns() {
    ladle()
        .args(["--format", "table"])
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout("ID  NAME\na   One\nb   Two\n");
}

#[test]
fn test_query_aliases_expand() {
    ladle()
        .args(["--compact", "-q", ".res[0].id"])
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout("\"a\"\n");
}

#[test]
fn test_escaped_negation_warns_but_succeeds() {
    ladle()
        .args(["--compact", "-q", r#"[.results[] | select(.id \!= "a") | .id]"#])
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout("[\"b\"]\n")
        .stderr(predicate::str::contains("rewrote"));
}

#[test]
fn test_sort_and_limit_shape_results() {
    ladle()
        .args([
            "--results-only",
            "--compact",
            "--sort-by",
            "name",
            "--descending",
            "--limit",
            "1",
        ])
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout("[{\"id\":\"b\",\"name\":\"Two\"}]\n");
}

#[test]
fn test_query_file_loads_expression() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.jq");
    std::fs::write(&path, "[.results[] | .id]\n").unwrap();

    ladle()
        .args(["--compact", "--query-file"])
        .arg(&path)
        .write_stdin(ENVELOPE)
        .assert()
        .success()
        .stdout("[\"a\",\"b\"]\n");
}

#[test]
fn test_reads_input_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("response.json");
    std::fs::write(&path, ENVELOPE).unwrap();

    ladle()
        .args(["--format", "table"])
        .arg(&path)
        .assert()
        .success()
        .stdout("ID  NAME\na   One\nb   Two\n");
}

#[test]
fn test_table_with_fields_is_rejected_before_output() {
    ladle()
        .args(["--format", "table", "--fields", "id"])
        .write_stdin(ENVELOPE)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("table output"));
}

#[test]
fn test_invalid_input_reports_parse_error() {
    ladle()
        .write_stdin("not json at all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input is not valid JSON"));
}

#[test]
fn test_fail_empty_exits_nonzero() {
    ladle()
        .arg("--fail-empty")
        .write_stdin(r#"{"object":"list","results":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No results"));
}

#[test]
fn test_query_and_query_file_conflict() {
    ladle()
        .args(["--query", ".", "--query-file", "anything.jq"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_descending_requires_sort_by() {
    ladle()
        .arg("--descending")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sort-by"));
}

#[test]
fn test_broken_query_reports_hint() {
    ladle()
        .args(["-q", "select(.archived"])
        .write_stdin(ENVELOPE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid query"))
        .stderr(predicate::str::contains("hint"));
}
