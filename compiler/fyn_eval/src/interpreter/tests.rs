#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::print_handler::{buffer_handler, silent_handler};
use fyn_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn buffered() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

#[test]
fn runs_share_one_environment() {
    let mut interp = buffered();
    interp.run_source("1 2").unwrap();
    interp.run_source("+&x").unwrap();
    interp.run_source("x x*").unwrap();
    assert_eq!(interp.stack(), &[Value::int(9)]);
}

#[test]
fn seed_variables_are_installed_by_default() {
    let mut interp = buffered();
    interp.run_source("A h H").unwrap();
    assert_eq!(
        interp.stack(),
        &[
            Value::string("ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
            Value::string(""),
            Value::string(" "),
        ]
    );
}

#[test]
fn seed_variables_can_be_left_out() {
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .seed_variables(false)
        .build();
    assert!(interp.env().variable("A").is_none());
    // Without the binding, `h` is an unknown operator.
    interp.run_source("h").unwrap();
    assert!(interp.stack().is_empty());
    assert_eq!(interp.warnings()[0].code, ErrorCode::W6001);
}

#[test]
fn print_stack_is_canonical_bottom_first() {
    let mut interp = buffered();
    interp.run_source("_3 \"a\"\"b\" (1 2) 1 1=").unwrap();
    interp.print_stack();
    assert_eq!(interp.output(), "_3\n\"a\"\"b\"\n(1 2)\n1b\n");
}

#[test]
fn warnings_in_a_long_loop_stay_bounded() {
    let mut interp = buffered();
    interp.run_source("1000r .m{q}").unwrap();
    assert_eq!(interp.warnings().len(), crate::host::MAX_RETAINED_WARNINGS);
}

#[test]
fn warning_sink_sees_every_warning() {
    let count = Arc::new(AtomicUsize::new(0));
    let sink_count = Arc::clone(&count);
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .on_warning(move |_| {
            sink_count.fetch_add(1, Ordering::Relaxed);
        })
        .build();
    interp.run_source("1000r .m{q}").unwrap();
    assert_eq!(count.load(Ordering::Relaxed), 1000);
    assert!(interp.warnings().is_empty());
}

#[test]
fn output_collects_printed_text() {
    let mut interp = buffered();
    interp.run_source("\"hi\"o \"1.5\"G P").unwrap();
    assert_eq!(interp.output(), "hi\n3/2");
}

#[test]
fn scripted_input_feeds_line_operators() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .scripted_input("first\nsecond\n")
        .build();
    interp.run_source(".R ..R").unwrap();
    assert_eq!(
        interp.stack(),
        &[Value::string("first"), Value::string("second\n")]
    );
}

#[test]
fn seeded_randomness_repeats() {
    let roll = || {
        let mut interp = Interpreter::builder()
            .print_handler(silent_handler())
            .seed(42)
            .build();
        interp.run_source("1000? 1000? (1 2 3 4 5).?").unwrap();
        interp.stack().to_vec()
    };
    assert_eq!(roll(), roll());
}

#[test]
fn halt_is_an_error_value_carrying_the_code() {
    let mut interp = buffered();
    let err = interp.run_source("1 \"bye\"o E 2").unwrap_err();
    assert_eq!(err.halt, Some(crate::errors::Halt { code: 0, immediate: false }));
    assert_eq!(interp.stack(), &[Value::int(1)]);
    assert_eq!(interp.output(), "bye\n");

    let err = buffered().run_source("3.E").unwrap_err();
    assert_eq!(err.halt, Some(crate::errors::Halt { code: 3, immediate: true }));
}

#[test]
fn compile_errors_surface_before_running() {
    let mut interp = buffered();
    let err = interp.run_source("1 2&").unwrap_err();
    assert!(!err.is_halt());
    assert!(interp.stack().is_empty());
}
