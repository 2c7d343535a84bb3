//! Runtime error types.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the typed category; its `Display` produces the
//! message. Factory functions (e.g., [`stack_underflow`]) are the public way
//! to build errors and fill in both `kind` and `message`.
//!
//! # Halting
//!
//! `E` and `.E` stop the whole program from arbitrarily deep inside nested
//! calls. They travel the same `Result` channel as errors, marked by
//! [`EvalError::halt`], and the driver turns them into an exit code instead
//! of a report.

use std::fmt;
use std::sync::Arc;

use fyn_diagnostic::{Diagnostic, ErrorCode};
use fyn_ir::{Position, Span, Token};

use crate::value::Value;

/// Result of an operation that may push a value.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    StackUnderflow {
        needed: usize,
        found: usize,
    },
    TypeMismatch {
        op: String,
        operands: String,
    },
    DivisionByZero,
    IndexOutOfBounds {
        index: String,
        len: usize,
    },
    /// An isolated call finished with nothing on its stack.
    EmptyCallResult,
    NotCallable {
        type_name: String,
    },
    /// Detected while running, e.g. a meta-combinator with no operand.
    MalformedProgram {
        detail: String,
    },
    /// Program text handed to `e`, `F`, `.l` or `:R` failed to normalize.
    Parse {
        code: ErrorCode,
        message: String,
    },
    Io {
        detail: String,
    },
    InvalidArgument {
        op: String,
        detail: String,
    },
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::StackUnderflow { .. } => ErrorCode::E6001,
            Self::TypeMismatch { .. } => ErrorCode::E6002,
            Self::DivisionByZero => ErrorCode::E6003,
            Self::IndexOutOfBounds { .. } => ErrorCode::E6004,
            Self::EmptyCallResult => ErrorCode::E6005,
            Self::NotCallable { .. } => ErrorCode::E6006,
            Self::MalformedProgram { .. } => ErrorCode::E6007,
            Self::Parse { code, .. } => *code,
            Self::Io { .. } => ErrorCode::E6008,
            Self::InvalidArgument { .. } => ErrorCode::E6009,
            Self::Custom { .. } => ErrorCode::E6099,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackUnderflow { needed, found } => {
                let noun = if *needed == 1 { "value" } else { "values" };
                write!(f, "stack underflow: needed {needed} {noun}, found {found}")
            }
            Self::TypeMismatch { op, operands } => {
                write!(f, "`{op}` cannot be applied to {operands}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::EmptyCallResult => write!(f, "function call left an empty stack"),
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::MalformedProgram { detail } => write!(f, "malformed program: {detail}"),
            Self::Parse { message, .. } => write!(f, "{message}"),
            Self::Io { detail } => write!(f, "i/o error: {detail}"),
            Self::InvalidArgument { op, detail } => write!(f, "`{op}`: {detail}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Request to stop the program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Halt {
    pub code: i32,
    /// `.E`: skip flushing buffered output.
    pub immediate: bool,
}

/// Token a runtime error was raised at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub token: Arc<str>,
    pub span: Span,
    pub pos: Position,
}

impl Location {
    pub fn of(token: &Token) -> Self {
        Location {
            token: Arc::clone(&token.raw),
            span: token.span,
            pos: token.pos,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at {}", self.token, self.pos)
    }
}

/// Runtime error or halt signal.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Innermost token being executed when the error was raised.
    pub location: Option<Location>,
    /// Tokens of the enclosing calls, innermost first.
    pub backtrace: Vec<Location>,
    pub halt: Option<Halt>,
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            location: None,
            backtrace: Vec::new(),
            halt: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Record that the error passed through the step executing `token`.
    ///
    /// The first call sets the location; later calls come from enclosing
    /// calls and extend the backtrace.
    #[must_use]
    pub fn at(mut self, token: &Token) -> Self {
        if self.halt.is_some() {
            return self;
        }
        if self.location.is_none() {
            self.location = Some(Location::of(token));
        } else {
            self.backtrace.push(Location::of(token));
        }
        self
    }

    #[inline]
    pub fn is_halt(&self) -> bool {
        self.halt.is_some()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.error_code()).with_message(&self.message);
        if let Some(loc) = &self.location {
            diag = diag.with_label(loc.span, format!("while executing `{}`", loc.token));
        }
        for frame in &self.backtrace {
            diag = diag.with_note(format!("called from {frame}"));
        }
        for note in &self.notes {
            diag = diag.with_note(note);
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} (at {loc})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<fyn_parse::ParseError> for EvalError {
    fn from(err: fyn_parse::ParseError) -> Self {
        let mut out = EvalError::from_kind(EvalErrorKind::Parse {
            code: err.code,
            message: err.message,
        });
        out.location = Some(Location::of(&err.token));
        out.notes = err.notes;
        out
    }
}

// Stack Errors

#[cold]
pub fn stack_underflow(needed: usize, found: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackUnderflow { needed, found })
}

// Operand Errors

/// `op` has no behavior for these operand types.
#[cold]
pub fn type_mismatch(op: &str, operands: &[&Value]) -> EvalError {
    let operands = match operands {
        [] => "no operands".to_owned(),
        [one] => one.type_name().to_owned(),
        many => many
            .iter()
            .map(|v| v.type_name())
            .collect::<Vec<_>>()
            .join(" and "),
    };
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        op: op.to_owned(),
        operands,
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn index_out_of_bounds(index: impl fmt::Display, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        index: index.to_string(),
        len,
    })
}

#[cold]
pub fn invalid_argument(op: &str, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        op: op.to_owned(),
        detail: detail.into(),
    })
}

// Call Errors

#[cold]
pub fn empty_call_result() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyCallResult)
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name().to_owned(),
    })
}

#[cold]
pub fn malformed_program(detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedProgram {
        detail: detail.into(),
    })
}

// Host Errors

#[cold]
pub fn io_error(action: &str, err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        detail: format!("{action}: {err}"),
    })
}

#[cold]
pub fn end_of_input() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        detail: "end of input".to_owned(),
    })
}

// Control Flow

/// Stop the program with `code`.
#[cold]
pub fn halt(code: i32, immediate: bool) -> EvalError {
    let mut err = EvalError::new(format!("halt({code})"));
    err.halt = Some(Halt { code, immediate });
    err
}
