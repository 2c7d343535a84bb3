//! Top-level interpreter.
//!
//! An [`Interpreter`] owns the program's environment and host. Each call to
//! [`Interpreter::run_source`] compiles a text and runs it in place on that
//! environment, so successive runs share one stack and one set of bindings
//! the way a REPL session does.
//!
//! Use [`InterpreterBuilder`] to pick where output goes, where input comes
//! from and how randomness is seeded.

mod builder;

pub use builder::InterpreterBuilder;

use fyn_diagnostic::Diagnostic;
use fyn_ir::Block;

use crate::compile::compile;
use crate::environment::Env;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::machine::Machine;
use crate::value::Value;

/// A running Fynyl program.
pub struct Interpreter {
    env: Env,
    host: Host,
}

impl Interpreter {
    /// Interpreter writing to stdout and reading stdin, with the seed
    /// variables installed.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Compile `source` and run it on this interpreter's environment.
    pub fn run_source(&mut self, source: &str) -> EvalResult<()> {
        let program = compile(source)?;
        self.run_block(&program)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(items = program.len()))]
    pub fn run_block(&mut self, program: &Block) -> EvalResult<()> {
        let result = Machine::new(program.clone(), &mut self.env, &self.host).run();
        self.host.print().flush();
        result
    }

    /// The data stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        self.env.stack.as_slice()
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Write the stack through the print handler in canonical form, one
    /// value per line, bottom first.
    pub fn print_stack(&self) {
        for value in self.stack() {
            self.host.print().println(&value.canonical());
        }
        self.host.print().flush();
    }

    /// Output captured so far; empty unless printing to a buffer.
    pub fn output(&self) -> String {
        self.host.print().get_output()
    }

    /// Warnings raised so far, oldest first.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.host.warnings()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
