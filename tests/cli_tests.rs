use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_pgdiag(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pgdiag"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("failed to run pgdiag with args {:?}: {e}", args));

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for pgdiag")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const SYNTAX_ERROR: &str =
    r#"{"severity":"ERROR","code":"42601","message":"syntax error at or near \"FORM\"","position":"10"}"#;

#[test]
fn renders_cursor_block_and_query_echo() {
    let output = run_pgdiag(&["-q", "SELECT * FORM t", "-v", "default"], SYNTAX_ERROR);

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "ERROR:  syntax error at or near \"FORM\"\n\
             LINE 1: SELECT * FORM t\n\
             {}^\n\
             QUERY:  {{ text: \"SELECT * FORM t\" }}\n",
            " ".repeat(17)
        )
    );
}

#[test]
fn hide_query_drops_the_echo() {
    let output = run_pgdiag(
        &["-q", "SELECT * FORM t", "-v", "terse", "--hide-query"],
        SYNTAX_ERROR,
    );

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "ERROR:  syntax error at or near \"FORM\"\n");
}

#[test]
fn position_flag_prints_line_and_column() {
    let output = run_pgdiag(
        &["-q", "SELECT 1;\nSELECT * FORM t", "--position"],
        r#"{"message":"m","position":20}"#,
    );

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "2:10\n");
}

#[test]
fn position_flag_without_query_fails() {
    let output = run_pgdiag(&["--position"], r#"{"message":"m","position":20}"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Error: error has no position inside a known query"),
        "stderr:\n{}",
        stderr(&output)
    );
}

#[test]
fn non_object_input_exits_with_error() {
    let output = run_pgdiag(&[], r#""x""#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("Error: diagnostic fields must be a JSON object"),
        "stderr:\n{}",
        stderr(&output)
    );
}

#[test]
fn invalid_json_exits_with_error() {
    let output = run_pgdiag(&[], "{not json");

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Error: input is not valid JSON"),
        "stderr:\n{}",
        stderr(&output)
    );
}

#[test]
fn array_input_prints_summary_and_every_report() {
    let input = r#"[
        {"severity":"ERROR","message":"a"},
        {"severity":"WARNING","message":"b"},
        {"severity":"ERROR","message":"c"}
    ]"#;
    let output = run_pgdiag(&["-v", "default"], input);

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Found 2 errors and 1 warning.\n\nERROR:  a\n\nWARNING:  b\n\nERROR:  c\n"
    );
}

#[test]
fn array_input_respects_max_reports() {
    let input = r#"[{"message":"a"},{"message":"b"},{"message":"c"}]"#;
    let output = run_pgdiag(&["--max-reports", "1"], input);

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("a\n"), "stdout:\n{}", text);
    assert!(!text.contains("\nb\n"), "stdout:\n{}", text);
    assert!(text.ends_with("... and 2 more reports not shown.\n"), "stdout:\n{}", text);
}

#[test]
fn position_flag_rejects_array_input() {
    let output = run_pgdiag(&["--position"], r#"[{"message":"a"}]"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("--position needs a single error object"),
        "stderr:\n{}",
        stderr(&output)
    );
}
