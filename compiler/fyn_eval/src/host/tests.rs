#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::print_handler::buffer_handler;
use fyn_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn scripted(text: &str) -> Host {
    Host::new(buffer_handler(), InputSource::scripted(text), Some(7), None)
}

#[test]
fn scripted_lines_keep_their_newlines() {
    let host = scripted("one\ntwo");
    assert_eq!(host.read_line(None).unwrap().as_deref(), Some("one\n"));
    assert_eq!(host.read_line(None).unwrap().as_deref(), Some("two"));
    assert_eq!(host.read_line(None).unwrap(), None);
}

#[test]
fn prompt_goes_to_the_print_handler() {
    let host = scripted("x\n");
    host.read_line(Some("> ")).unwrap();
    assert_eq!(host.print().get_output(), "> ");
}

#[test]
fn seeded_randomness_is_reproducible() {
    let a = scripted("");
    let b = scripted("");
    let bound = BigInt::from(1000);
    let xs: Vec<BigInt> = (0..5).map(|_| a.random_below(&bound)).collect();
    let ys: Vec<BigInt> = (0..5).map(|_| b.random_below(&bound)).collect();
    assert_eq!(xs, ys);
    assert!(xs.iter().all(|x| *x >= BigInt::from(0) && *x < bound));
}

#[test]
fn random_float_is_in_unit_interval() {
    let host = scripted("");
    for _ in 0..100 {
        let f = host.random_float();
        assert!((0.0..1.0).contains(&f));
    }
}

#[test]
fn shuffle_keeps_elements() {
    let host = scripted("");
    let mut items: Vec<u32> = (0..20).collect();
    host.shuffle(&mut items);
    items.sort_unstable();
    assert_eq!(items, (0..20).collect::<Vec<_>>());
}

#[test]
fn warnings_are_collected() {
    let host = scripted("");
    host.warn(Diagnostic::warning(ErrorCode::W6001).with_message("unknown operator `Q`"));
    let warnings = host.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, ErrorCode::W6001);
}

#[test]
fn kept_warnings_are_capped() {
    let host = scripted("");
    for _ in 0..MAX_RETAINED_WARNINGS + 10 {
        host.warn(Diagnostic::warning(ErrorCode::W6001));
    }
    assert_eq!(host.warnings().len(), MAX_RETAINED_WARNINGS);
}

#[test]
fn sink_receives_warnings_instead_of_the_host() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink: WarningSink = Arc::new(move |diag: &Diagnostic| sink_seen.lock().push(diag.code));
    let host = Host::new(buffer_handler(), InputSource::scripted(""), Some(7), Some(sink));
    for _ in 0..3 {
        host.warn(Diagnostic::warning(ErrorCode::W6003));
    }
    assert_eq!(*seen.lock(), vec![ErrorCode::W6003; 3]);
    assert!(host.warnings().is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let host = scripted("");
    let err = host.read_file("/definitely/not/here.fyn").unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::E6008);
}

#[test]
fn files_round_trip() {
    let host = scripted("");
    let path = std::env::temp_dir().join(format!("fyn_host_{}.txt", std::process::id()));
    let path = path.to_string_lossy().into_owned();
    host.write_file(&path, "data").unwrap();
    assert_eq!(host.read_file(&path).unwrap(), "data");
    let _ = std::fs::remove_file(&path);
}
