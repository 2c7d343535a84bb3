//! Diagnostic system for Fynyl programs.
//!
//! Every problem the toolchain reports, whether a malformed program, a
//! runtime failure or a tolerated oddity such as an unknown operator, is
//! turned into a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//! - notes with extra context
//!
//! Rendering is done by the emitters in [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
