#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::compile::compile;
use crate::errors::EvalErrorKind;
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

fn interpreter() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .seed_variables(false)
        .build()
}

fn run(source: &str) -> Vec<Value> {
    let mut interp = interpreter();
    interp.run_source(source).unwrap();
    interp.stack().to_vec()
}

fn ints(ns: &[i64]) -> Value {
    Value::array(ns.iter().map(|&n| Value::int(n)).collect())
}

#[test]
fn symbols_round_trip() {
    for symbol in fyn_lexer::META_SYMBOLS {
        let kind = MetaKind::from_symbol(symbol).unwrap();
        assert_eq!(kind.symbol(), symbol);
    }
    assert_eq!(MetaKind::from_symbol("q"), None);
}

// ─── Fold ───

#[test]
fn fold_seed_follows_the_function_text() {
    assert_eq!(fold_seed(&compile("+").unwrap()), Some(Value::int(0)));
    assert_eq!(fold_seed(&compile(" * ").unwrap()), Some(Value::int(1)));
    assert_eq!(fold_seed(&compile("-").unwrap()), None);
    assert_eq!(fold_seed(&compile("+1").unwrap()), None);
}

#[test]
fn fold_with_addition_seeds_zero() {
    assert_eq!(run("(1 2 3 4)f+"), vec![Value::int(10)]);
    assert_eq!(run("()f+"), vec![Value::int(0)]);
}

#[test]
fn fold_with_multiplication_seeds_one() {
    assert_eq!(run("(1 2 3 4)f*"), vec![Value::int(24)]);
    assert_eq!(run("()f*"), vec![Value::int(1)]);
}

#[test]
fn unseeded_fold_starts_from_the_first_element() {
    assert_eq!(run("(10 1 2)f-"), vec![Value::int(7)]);
    assert_eq!(run("(5)f-"), vec![Value::int(5)]);
}

#[test]
fn unseeded_fold_of_nothing_pushes_nothing() {
    assert_eq!(run("()f-"), Vec::<Value>::new());
}

// ─── Map, Each, Zip, Table ───

#[test]
fn map_applies_to_each_element() {
    assert_eq!(run("(1 2 3)m{d*}"), vec![ints(&[1, 4, 9])]);
}

#[test]
fn map_wraps_a_bare_operator() {
    assert_eq!(run("(1 2)m_"), vec![ints(&[-1, -2])]);
}

#[test]
fn each_runs_for_effect_only() {
    let mut interp = interpreter();
    interp.run_source("(1 2).m{p}").unwrap();
    assert!(interp.stack().is_empty());
    assert_eq!(interp.output(), "1\n2\n");
}

#[test]
fn zip_truncates_to_the_shorter_array() {
    assert_eq!(run("(1 2 3)(10 20)z+"), vec![ints(&[11, 22])]);
}

#[test]
fn table_pairs_every_element() {
    assert_eq!(
        run("(1 2)(10 20)t+"),
        vec![Value::array(vec![ints(&[11, 21]), ints(&[12, 22])])]
    );
}

#[test]
fn callbacks_see_only_their_arguments() {
    let mut interp = interpreter();
    let err = interp.run_source("9(1 2)m{+}").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::StackUnderflow { .. }));
}

// ─── Broadcast ───

#[test]
fn binary_broadcast_zips_nested_arrays() {
    assert_eq!(
        run("((1 2)3)((4 5)6)v+"),
        vec![Value::array(vec![ints(&[5, 7]), Value::int(9)])]
    );
}

#[test]
fn binary_broadcast_spreads_a_scalar() {
    assert_eq!(
        run("5(1(2 3))v+"),
        vec![Value::array(vec![Value::int(6), ints(&[7, 8])])]
    );
    assert_eq!(run("(1 2)10v*"), vec![ints(&[10, 20])]);
}

#[test]
fn unary_broadcast_keeps_the_nesting() {
    assert_eq!(
        run("((1 2)(3))V_"),
        vec![Value::array(vec![ints(&[-1, -2]), ints(&[-3])])]
    );
    assert_eq!(run("4V_"), vec![Value::int(-4)]);
}

#[test]
fn broadcast_unary_reaches_every_leaf() {
    let nested = Value::array(vec![Value::int(1), ints(&[2, 3])]);
    let mut seen = Vec::new();
    let result = broadcast_unary(&nested, &mut |leaf| {
        seen.push(leaf.clone());
        Ok(Value::Bool(true))
    })
    .unwrap();
    assert_eq!(seen, vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(
        result,
        Value::array(vec![
            Value::Bool(true),
            Value::array(vec![Value::Bool(true), Value::Bool(true)]),
        ])
    );
}

// ─── Operands ───

#[test]
fn dynamic_operand_is_popped_from_the_stack() {
    assert_eq!(run("(1 2 3){d*}m~"), vec![ints(&[1, 4, 9])]);
    assert_eq!(run("(1 2)\"1+\"m~"), vec![ints(&[2, 3])]);
}

#[test]
fn dynamic_operand_must_be_callable() {
    let mut interp = interpreter();
    let err = interp.run_source("(1 2)5m~").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NotCallable { .. }));
}

#[test]
fn missing_operand_is_malformed() {
    let mut interp = interpreter();
    let err = interp.run_source("(1)m").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::MalformedProgram { .. }));
}

#[test]
fn non_array_input_is_a_type_mismatch() {
    let mut interp = interpreter();
    let err = interp.run_source("5m_").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}
