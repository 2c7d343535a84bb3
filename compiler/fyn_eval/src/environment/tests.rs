#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().map(|&n| Value::int(n)).collect()
}

#[test]
fn pop2_returns_second_then_top() {
    let mut stack = Stack::from_vec(ints(&[1, 2, 3]));
    let (a, b) = stack.pop2().unwrap();
    assert_eq!((a, b), (Value::int(2), Value::int(3)));
    assert_eq!(stack.as_slice(), &ints(&[1])[..]);
}

#[test]
fn underflow_is_reported_not_defaulted() {
    let mut stack = Stack::from_vec(ints(&[1]));
    let err = stack.pop2().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackUnderflow { needed: 2, found: 1 });
    assert_eq!(stack.len(), 1);

    let err = stack.pop_n(3).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackUnderflow { needed: 3, found: 1 });
    assert!(Stack::new().pop().is_err());
}

#[test]
fn pop_n_keeps_order() {
    let mut stack = Stack::from_vec(ints(&[1, 2, 3, 4]));
    assert_eq!(stack.pop_n(3).unwrap(), ints(&[2, 3, 4]));
    assert_eq!(stack.pop_n(0).unwrap(), ints(&[]));
}

#[test]
fn peek_nth_counts_from_the_top() {
    let stack = Stack::from_vec(ints(&[1, 2]));
    assert_eq!(stack.peek_nth(0).unwrap(), &Value::int(2));
    assert_eq!(stack.peek_nth(1).unwrap(), &Value::int(1));
    assert!(stack.peek_nth(2).is_err());
}

#[test]
fn seeded_environment_binds_letters() {
    let env = Env::seeded();
    assert_eq!(env.variable("A"), Some(&Value::string("ABCDEFGHIJKLMNOPQRSTUVWXYZ")));
    assert_eq!(env.variable("h"), Some(&Value::string("")));
    assert_eq!(env.variable("H"), Some(&Value::string(" ")));
    assert!(Env::new().variable("A").is_none());
}

#[test]
fn isolated_environment_does_not_write_back() {
    let mut outer = Env::seeded();
    outer.stack.push(Value::int(9));
    let mut inner = outer.isolated(ints(&[1, 2]));
    inner.set_variable(Arc::from("x"), Value::int(5));
    inner.set_variable(Arc::from("A"), Value::int(0));

    assert_eq!(inner.stack.as_slice(), &ints(&[1, 2])[..]);
    assert_eq!(inner.variable("x"), Some(&Value::int(5)));
    assert!(outer.variable("x").is_none());
    assert_eq!(outer.variable("A"), Some(&Value::string("ABCDEFGHIJKLMNOPQRSTUVWXYZ")));
    assert_eq!(outer.stack.as_slice(), &ints(&[9])[..]);
}

#[test]
fn isolated_environment_sees_bindings_at_call_time() {
    let mut outer = Env::new();
    outer.set_variable(Arc::from("x"), Value::int(1));
    let inner = outer.isolated(Vec::new());
    outer.set_variable(Arc::from("x"), Value::int(2));
    assert_eq!(inner.variable("x"), Some(&Value::int(1)));
}
