//! Fyn Eval - runtime for Fynyl programs.
//!
//! # Architecture
//!
//! - [`value`]: the closed `Value` sum type, the numeric tower and the two
//!   text renderings (canonical and display)
//! - [`machine`]: the stepping machine and the two call disciplines,
//!   in place and isolated
//! - `meta`: the `m .m z t f v V` combinators
//! - `operators`: the built-in operator table
//! - [`host`]: capabilities borrowed from outside (output, input, files,
//!   randomness, warnings)
//! - [`interpreter`]: the facade drivers and tests use
//!
//! Errors and halts travel through [`EvalResult`]; see [`errors`].

mod compile;
pub mod environment;
pub mod errors;
pub mod host;
pub mod interpreter;
mod literal;
pub mod machine;
mod meta;
mod operators;
mod print_handler;
pub mod value;

pub use compile::{callable, compile};
pub use environment::{Env, Stack};
pub use errors::{EvalError, EvalErrorKind, EvalResult, Halt};
pub use host::{Host, InputSource, WarningSink, MAX_RETAINED_WARNINGS};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use machine::{call_in_place, call_isolated, run_isolated, Machine};
pub use meta::{fold_seed, MetaKind};
pub use operators::Builtin;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{ComplexValue, Heap, Number, Real, Value};

#[cfg(test)]
mod tests;
