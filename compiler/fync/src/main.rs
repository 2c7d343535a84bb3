//! Fynyl CLI
//!
//! Runs a program from a file, a command-line string or the bundled REPL
//! seed, then prints whatever is left on the stack.

use std::io::{IsTerminal, Stderr};
use std::process;
use std::sync::Once;

use fyn_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use fyn_diagnostic::Diagnostic;
use fyn_eval::Interpreter;
use parking_lot::Mutex;

/// Program run by `fyn -r`.
const REPL_SEED: &str = include_str!("../../../demos/repl.fyn");
const REPL_SEED_PATH: &str = "demos/repl.fyn";

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber when `RUST_LOG` is set.
///
/// `FYN_LOG_TREE=1` switches to indented call-tree output, which reads
/// better for nested block calls.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var_os("FYN_LOG_TREE").is_some();
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tree.then(|| {
                tracing_tree::HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
            }))
            .with((!tree).then(|| {
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
            }))
            .init();
    });
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage();
        process::exit(1);
    };

    let code = match command.as_str() {
        "-e" => {
            let Some(source) = args.get(2) else {
                eprintln!("Usage: fyn -e <code>");
                process::exit(1);
            };
            run_source("<-e>", source)
        }
        "-r" => run_source(REPL_SEED_PATH, REPL_SEED),
        "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: fyn lex <file>");
                process::exit(1);
            };
            lex_file(path)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-v" => {
            println!("fyn {}", env!("CARGO_PKG_VERSION"));
            0
        }
        flag if flag.starts_with('-') => {
            eprintln!("Unknown option: {flag}");
            eprintln!();
            print_usage();
            1
        }
        path => run_file(path),
    };
    process::exit(code);
}

fn print_usage() {
    println!("Fynyl interpreter");
    println!();
    println!("Usage: fyn <file> | fyn <command> [args]");
    println!();
    println!("Commands:");
    println!("  <file>         Run a Fynyl program and print the final stack");
    println!("  -e <code>      Run <code> given on the command line");
    println!("  -r             Start the line-at-a-time REPL");
    println!("  lex <file>     Tokenize and display tokens");
    println!("  -h, --help     Show this help message");
    println!("  -v, --version  Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG       Log filter, e.g. fyn_eval=debug (written to stderr)");
    println!("  FYN_LOG_TREE   Indent logs by call depth");
    println!();
    println!("Examples:");
    println!("  fyn prog.fyn");
    println!("  fyn -e '(1 2 3)f+'          # prints 6");
    println!("  fyn -e '\"hi\"o 1.E'         # prints hi, exits with 1");
}

fn read_file(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            None
        }
    }
}

fn run_file(path: &str) -> i32 {
    match read_file(path) {
        Some(source) => run_source(path, &source),
        None => 1,
    }
}

/// Run `source` and return the process exit code.
///
/// An immediate halt leaves straight from here, skipping the stack dump and
/// any buffered output. Warnings are reported as they happen.
fn run_source(path: &str, source: &str) -> i32 {
    tracing::debug!(path, bytes = source.len(), "running program");
    let warnings = Mutex::new(stderr_emitter(path, source));
    let mut interp = Interpreter::builder()
        .on_warning(move |diag| emit(&mut warnings.lock(), diag))
        .build();
    match interp.run_source(source) {
        Ok(()) => {
            interp.print_stack();
            0
        }
        Err(err) => match err.halt {
            Some(halt) if halt.immediate => process::exit(halt.code),
            Some(halt) => halt.code,
            None => {
                emit(&mut stderr_emitter(path, source), &err.to_diagnostic());
                1
            }
        },
    }
}

/// Emitter resolving labels to `path:line:col` within `source`.
fn stderr_emitter(path: &str, source: &str) -> TerminalEmitter<Stderr> {
    let is_tty = std::io::stderr().is_terminal();
    TerminalEmitter::with_color_mode(std::io::stderr(), ColorMode::Auto, is_tty)
        .with_source(path, source)
}

fn emit(emitter: &mut TerminalEmitter<Stderr>, diagnostic: &Diagnostic) {
    emitter.emit(diagnostic);
    emitter.flush();
}

/// Print the token stream, one token per line.
fn lex_file(path: &str) -> i32 {
    let Some(source) = read_file(path) else {
        return 1;
    };
    let tokens = fyn_lexer::lex(&source);
    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {token:?}");
    }
    0
}
