//! Program-level tests: whole Fynyl snippets run through an [`Interpreter`]
//! with buffered output and scripted input.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod io_tests;
mod operators_tests;

use crate::errors::EvalError;
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;
use crate::value::Value;

fn interpreter(input: &str) -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .scripted_input(input)
        .seed(7)
        .build()
}

/// Final stack of `source`, bottom first.
fn run(source: &str) -> Vec<Value> {
    let mut interp = interpreter("");
    interp.run_source(source).unwrap();
    interp.stack().to_vec()
}

fn run_err(source: &str) -> EvalError {
    interpreter("").run_source(source).unwrap_err()
}

/// Everything `source` printed, given `input` on stdin.
fn output_with_input(source: &str, input: &str) -> String {
    let mut interp = interpreter(input);
    interp.run_source(source).unwrap();
    interp.output()
}

fn output(source: &str) -> String {
    output_with_input(source, "")
}

fn ints(ns: &[i64]) -> Value {
    Value::array(ns.iter().map(|&n| Value::int(n)).collect())
}

fn strs(items: &[&str]) -> Value {
    Value::array(items.iter().map(|s| Value::string(*s)).collect())
}
