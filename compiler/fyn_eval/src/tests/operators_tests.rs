//! Built-in operators run as whole programs.

use pretty_assertions::assert_eq;

use super::{ints, run, run_err, strs};
use crate::errors::EvalErrorKind;
use crate::value::Value;

// ─── Arithmetic ───

#[test]
fn integer_division_floors() {
    assert_eq!(run("7 2/"), vec![Value::int(3)]);
    assert_eq!(run("_7 2/"), vec![Value::int(-4)]);
    assert_eq!(run("_7 2%"), vec![Value::int(1)]);
    assert_eq!(run("7 _2%"), vec![Value::int(-1)]);
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(matches!(run_err("1 0/").kind, EvalErrorKind::DivisionByZero));
    assert!(matches!(run_err("1 0%").kind, EvalErrorKind::DivisionByZero));
}

#[test]
fn powers_stay_exact() {
    assert_eq!(run("2 100^")[0].canonical(), "1267650600228229401496703205376");
    assert_eq!(run("2 _1^")[0].canonical(), "1/2");
}

#[test]
fn mixed_arithmetic_promotes() {
    assert_eq!(run("1 2g+"), vec![Value::Float(3.0)]);
    assert_eq!(run("\"1/3\"G 1+")[0].canonical(), "4/3");
}

#[test]
fn split_and_chunk() {
    assert_eq!(run("\"a b  c\" \" \"/"), vec![strs(&["a", "b", "c"])]);
    assert_eq!(run("\"abc\" \"\"/"), vec![strs(&["a", "b", "c"])]);
    assert_eq!(
        run("(1 2 3 4 5)2/"),
        vec![Value::array(vec![ints(&[1, 2, 3]), ints(&[4, 5])])]
    );
}

#[test]
fn multiply_repeats_blocks_strings_and_arrays() {
    assert_eq!(run("0{1+}3*"), vec![Value::int(3)]);
    assert_eq!(run("0 3{1+}*"), vec![Value::int(3)]);
    assert_eq!(run("0{1+}_2*"), vec![Value::int(0)]);
    assert_eq!(run("\"ab\"3*"), vec![Value::string("ababab")]);
    assert_eq!(run("(1(2 3))\"-\"*"), vec![Value::string("1-2-3")]);
}

#[test]
fn negate_reverse_and_abs() {
    assert_eq!(run("3_"), vec![Value::int(-3)]);
    assert_eq!(run("\"abc\"_"), vec![Value::string("cba")]);
    assert_eq!(run("(1 2)_"), vec![ints(&[2, 1])]);
    assert_eq!(run("_5|"), vec![Value::int(5)]);
}

#[test]
fn predecessor_and_successor() {
    assert_eq!(run("4[ 4]"), vec![Value::int(3), Value::int(5)]);
    assert_eq!(run("\"Az\"]"), vec![Value::string("Ba")]);
}

#[test]
fn imaginary_unit() {
    assert_eq!(run("1i")[0].canonical(), "1i");
    assert_eq!(run("_2i")[0].canonical(), "_2i");
    assert_eq!(run("1i d*")[0].canonical(), "-1+0i");
}

#[test]
fn numeric_conversions() {
    assert_eq!(run("\"12abc\"I"), vec![Value::int(12)]);
    assert_eq!(run("\"2.5\"g"), vec![Value::Float(2.5)]);
    assert_eq!(run("\"x\"g"), vec![Value::Float(0.0)]);
    assert_eq!(run("5g")[0].canonical(), "5.0");
}

// ─── Comparison ───

#[test]
fn equality_is_numeric_across_the_tower() {
    assert_eq!(run("2 2g="), vec![Value::Bool(true)]);
    assert_eq!(run("1 2="), vec![Value::Bool(false)]);
    assert_eq!(run("1 2:="), vec![Value::Bool(true)]);
    assert_eq!(run("(1 2)(1 2)="), vec![Value::Bool(true)]);
    assert_eq!(run("\"1\" 1="), vec![Value::Bool(false)]);
}

#[test]
fn ordered_comparisons() {
    assert_eq!(
        run("1 2< 2 2:< 3 2> 2 3:>"),
        vec![
            Value::Bool(true),
            Value::Bool(true),
            Value::Bool(true),
            Value::Bool(false),
        ]
    );
    assert_eq!(run("\"a\" \"b\"<"), vec![Value::Bool(true)]);
    assert!(matches!(
        run_err("1 \"a\"<").kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn min_and_max() {
    assert_eq!(run("3 5.>"), vec![Value::int(5)]);
    assert_eq!(run("3 5.<"), vec![Value::int(3)]);
    assert_eq!(run("(1 2)(1 3).<"), vec![ints(&[1, 2])]);
}

#[test]
fn truthiness() {
    assert_eq!(
        run("0b \"x\"b ()b 0g b"),
        vec![
            Value::Bool(false),
            Value::Bool(true),
            Value::Bool(false),
            Value::Bool(false),
        ]
    );
}

// ─── Stack Shape ───

#[test]
fn duplicate_top_and_second() {
    assert_eq!(run("1 2d"), ints_stack(&[1, 2, 2]));
    assert_eq!(run("1 2y"), ints_stack(&[1, 2, 1]));
}

#[test]
fn swap_and_reverse() {
    assert_eq!(run("1 2~"), ints_stack(&[2, 1]));
    assert_eq!(run("1 2 3._"), ints_stack(&[3, 2, 1]));
}

#[test]
fn dropping() {
    assert_eq!(run("1 2 3$"), ints_stack(&[1, 2]));
    assert_eq!(run("1 2 3 1.$"), ints_stack(&[1, 2]));
    assert_eq!(run("1 2 3 4 5 2:$"), ints_stack(&[1, 2]));
    assert_eq!(run("1 2 _1:$"), ints_stack(&[]));
    assert_eq!(run("1 2 3C"), ints_stack(&[]));
}

#[test]
fn keeping() {
    assert_eq!(run("1 2 3.I"), ints_stack(&[3]));
    assert_eq!(run("1 2 3 2:I"), ints_stack(&[2, 3]));
}

#[test]
fn pairing_and_packing() {
    assert_eq!(run("1 2,"), vec![ints(&[1, 2])]);
    assert_eq!(run("1 2 3 2.,"), vec![Value::int(1), ints(&[2, 3])]);
}

#[test]
fn stack_shape_underflow() {
    for source in ["d", "1y", "1~", "1 2 3 5.$", "1 5:I", "$"] {
        assert!(
            matches!(run_err(source).kind, EvalErrorKind::StackUnderflow { .. }),
            "{source}"
        );
    }
}

fn ints_stack(ns: &[i64]) -> Vec<Value> {
    ns.iter().map(|&n| Value::int(n)).collect()
}

// ─── Sequences ───

#[test]
fn text_and_templates() {
    assert_eq!(run("1;"), vec![Value::string("1")]);
    assert_eq!(run("(1 \"a\");"), vec![Value::string("[1, \"a\"]")]);
    assert_eq!(run("3 4\"%0+%1\"2:%"), vec![Value::string("3+4")]);
}

#[test]
fn characters_and_digits() {
    assert_eq!(run("65c \"hi\"c"), vec![Value::string("A"), Value::string("h")]);
    assert_eq!(run("\"ab\"D"), vec![strs(&["a", "b"])]);
    assert_eq!(run("123D"), vec![ints(&[1, 2, 3])]);
}

#[test]
fn joining() {
    assert_eq!(run("(\"a\" \"b\")j"), vec![Value::string("ab")]);
    assert_eq!(run("(1 2)\", \"j"), vec![Value::string("1, 2")]);
    assert!(matches!(
        run_err("(1 2)3j").kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn splat_spreads_onto_the_stack() {
    assert_eq!(run("0(1 2)M"), ints_stack(&[0, 1, 2]));
}

#[test]
fn ranges() {
    assert_eq!(run("3r"), vec![ints(&[1, 2, 3])]);
    assert_eq!(run("0r"), vec![ints(&[])]);
    assert_eq!(run("2 4R"), vec![ints(&[2, 3, 4])]);
    assert_eq!(run("\"a\" \"c\"R"), vec![strs(&["a", "b", "c"])]);
    assert_eq!(run("3Z \"ab\"Z"), vec![ints(&[0, 1, 2]), ints(&[0, 1])]);
    assert_eq!(run("\"2.5\"G Z"), vec![ints(&[0, 1, 2])]);
}

#[test]
fn string_ranges_match_successor_order() {
    assert_eq!(run("\"a\" \"b!\"R s"), vec![Value::int(702)]);
    assert_eq!(
        run("\"Z\" \"a\"R"),
        vec![strs(&["Z", "[", "\\", "]", "^", "_", "`", "a"])]
    );
}

#[test]
fn sizes() {
    assert_eq!(run("123s"), vec![Value::int(3)]);
    assert_eq!(run("\"abc\"s"), vec![Value::int(3)]);
    assert_eq!(run("{}s"), vec![Value::Float(f64::INFINITY)]);
}

#[test]
fn sum_and_transpose() {
    assert_eq!(run("(1 2 3)S ()S"), ints_stack(&[6, 0]));
    assert_eq!(
        run("((1 2)(3 4))T"),
        vec![Value::array(vec![ints(&[1, 3]), ints(&[2, 4])])]
    );
}

#[test]
fn broadcast_indexing() {
    assert_eq!(run("(10 20 30)(0 _1)u"), vec![ints(&[10, 30])]);
    assert_eq!(run("(10 20 30)1u"), vec![Value::int(20)]);
    assert_eq!(
        run("\"abc\"((2)1)u"),
        vec![Value::array(vec![strs(&["c"]), Value::string("b")])]
    );
}

#[test]
fn bases() {
    assert_eq!(run("6 2x"), vec![ints(&[1, 1, 0])]);
    assert_eq!(run("(1 1 0)2X"), vec![Value::int(6)]);
}

// ─── Randomness ───

#[test]
fn random_picks_stay_in_range() {
    let stack = run("(1 2 3)? 5? 0?");
    assert!(matches!(&stack[0], Value::Int(n) if (1..=3).contains(&i64::try_from(n).unwrap())));
    assert!(matches!(&stack[1], Value::Int(n) if (0..5).contains(&i64::try_from(n).unwrap())));
    assert!(matches!(stack[2], Value::Float(f) if (0.0..1.0).contains(&f)));
    for source in ["()?", "\"\"?"] {
        assert!(matches!(
            run_err(source).kind,
            EvalErrorKind::InvalidArgument { .. }
        ));
    }
}

#[test]
fn question_mark_on_a_block_is_a_conditional() {
    assert_eq!(run("1{\"yes\"}?"), vec![Value::string("yes")]);
    assert_eq!(run("0{\"yes\"}?"), Vec::<Value>::new());
}

#[test]
fn shuffle_keeps_the_elements() {
    let stack = run("(1 2 3 4).?");
    let mut items = stack[0].as_array().unwrap().to_vec();
    items.sort_by(|a, b| a.compare(b).unwrap());
    assert_eq!(items, ints_stack(&[1, 2, 3, 4]));
}
