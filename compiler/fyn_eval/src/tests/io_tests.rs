//! Output, line input and file operators.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use super::{interpreter, output, output_with_input, run_err};
use crate::errors::EvalErrorKind;
use crate::value::Value;

// ─── Output ───

#[test]
fn put_line_prints_display_text_per_line() {
    assert_eq!(output("\"hi\"o"), "hi\n");
    assert_eq!(output("(1(2 3))o"), "1\n2\n3\n");
    assert_eq!(output("()o"), "\n");
    assert_eq!(output("\"a\n\"o"), "a\n");
}

#[test]
fn print_writes_display_text_without_a_newline() {
    assert_eq!(output("\"hi\"O 3O"), "hi3");
    assert_eq!(output("(1 \"a\")O"), "[1, \"a\"]");
}

#[test]
fn show_writes_canonical_text() {
    assert_eq!(output("\"hi\"p"), "\"hi\"\n");
    assert_eq!(output("_5P (1 2)P"), "_5(1 2)");
}

#[test]
fn show_stack_leaves_the_stack_alone() {
    let mut interp = interpreter("");
    interp.run_source("1\"a\".:S").unwrap();
    assert_eq!(interp.output(), "1\n\"a\"\n");
    assert_eq!(interp.stack(), &[Value::int(1), Value::string("a")]);
}

// ─── Line Input ───

#[test]
fn read_line_drops_the_line_ending() {
    let mut interp = interpreter("abc\r\nrest\n");
    interp.run_source(".r").unwrap();
    assert_eq!(interp.stack(), &[Value::string("abc")]);
}

#[test]
fn read_line_with_prompt_prints_it_first() {
    let mut interp = interpreter("Ada\n");
    interp.run_source("\"name? \"..r").unwrap();
    assert_eq!(interp.output(), "name? ");
    assert_eq!(interp.stack(), &[Value::string("Ada")]);
}

#[test]
fn raw_read_keeps_the_newline() {
    let mut interp = interpreter("x\ny\n");
    interp.run_source(".R ..R").unwrap();
    assert_eq!(interp.stack(), &[Value::string("x"), Value::string("y\n")]);
}

#[test]
fn reading_past_the_end_fails() {
    assert!(matches!(run_err(".R").kind, EvalErrorKind::Io { .. }));
    assert!(matches!(run_err(".r").kind, EvalErrorKind::Io { .. }));
}

#[test]
fn run_line_executes_input_as_code() {
    let mut interp = interpreter("1 2+\n");
    interp.run_source(":R").unwrap();
    assert_eq!(interp.stack(), &[Value::int(3)]);
}

#[test]
fn run_lines_calls_the_block_after_each_line() {
    assert_eq!(output_with_input("{p}::R", "1\n2 3+\n"), "1\n5\n");
}

// ─── Files ───

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fyn-eval-{}-{name}", std::process::id()))
}

fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display().to_string().replace('"', "\"\""))
}

#[test]
fn write_then_read_a_file() {
    let path = scratch_path("round.txt");
    let mut interp = interpreter("");
    interp
        .run_source(&format!("\"hello\" {0}.w {0}:r", quoted(&path)))
        .unwrap();
    assert_eq!(interp.stack(), &[Value::string("hello")]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn load_runs_a_file_in_place() {
    let path = scratch_path("load.fyn");
    std::fs::write(&path, "{d*}.&Q 1 2+").unwrap();
    let mut interp = interpreter("");
    interp.run_source(&format!("{}.l Q", quoted(&path))).unwrap();
    assert_eq!(interp.stack(), &[Value::int(9)]);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_files_are_io_errors() {
    let path = scratch_path("missing.txt");
    let err = run_err(&format!("{}:r", quoted(&path)));
    assert!(matches!(err.kind, EvalErrorKind::Io { .. }));
}

#[test]
fn paths_must_be_strings() {
    assert!(matches!(
        run_err("5:r").kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}
