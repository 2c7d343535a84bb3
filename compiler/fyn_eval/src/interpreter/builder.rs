//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::Arc;

use fyn_diagnostic::Diagnostic;

use super::Interpreter;
use crate::environment::Env;
use crate::host::{Host, InputSource, WarningSink};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults match the `fyn` driver: stdout, stdin, an OS-seeded random
/// source and the `A`/`h`/`H` seed variables.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    input: Option<InputSource>,
    seed: Option<u64>,
    seed_variables: bool,
    warning_sink: Option<WarningSink>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            input: None,
            seed: None,
            seed_variables: true,
            warning_sink: None,
        }
    }

    /// Set the handler `o`, `p` and friends write through.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set where line input comes from.
    #[must_use]
    pub fn input(mut self, input: InputSource) -> Self {
        self.input = Some(input);
        self
    }

    /// Feed line input from `text` instead of stdin.
    #[must_use]
    pub fn scripted_input(self, text: &str) -> Self {
        self.input(InputSource::scripted(text))
    }

    /// Fix the random sequence behind `?` and `.?`.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether `A`, `h` and `H` start out bound.
    #[must_use]
    pub fn seed_variables(mut self, enabled: bool) -> Self {
        self.seed_variables = enabled;
        self
    }

    /// Route warnings to `sink` as they happen instead of keeping them on
    /// the interpreter.
    #[must_use]
    pub fn on_warning(mut self, sink: impl Fn(&Diagnostic) + Send + Sync + 'static) -> Self {
        self.warning_sink = Some(Arc::new(sink));
        self
    }

    pub fn build(self) -> Interpreter {
        let env = if self.seed_variables {
            Env::seeded()
        } else {
            Env::new()
        };
        let host = Host::new(
            self.print_handler.unwrap_or_else(stdout_handler),
            self.input.unwrap_or(InputSource::Stdin),
            self.seed,
            self.warning_sink,
        );
        Interpreter { env, host }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
