//! Built-in operators.
//!
//! [`Builtin`] is the closed table of operator symbols. Each variant's
//! behavior lives in one of the submodules, grouped by what it works on;
//! every implementation pops its operands, matches on their variants and
//! returns a type mismatch for anything it has no meaning for.
//!
//! In operand descriptions `a` is second from the top and `b` is the top.

mod arith;
mod compare;
mod control;
mod io;
mod sequence;
mod stack;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::errors::{invalid_argument, type_mismatch, EvalResult};
use crate::machine::Machine;
use crate::value::Value;

pub(crate) use arith::add_values;

/// Every built-in operator, named by what it does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Negate,
    Abs,
    Pred,
    Succ,
    TimesI,
    Cos,
    Acos,
    ToFloat,
    ToRational,
    ToInt,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Min,
    Max,
    Truthy,
    // Sequences
    Pair,
    Pack,
    ToText,
    Format,
    Chr,
    Chars,
    Join,
    Splat,
    Range,
    RangeBetween,
    Indices,
    Size,
    Sum,
    Transpose,
    Index,
    ToBase,
    FromBase,
    Random,
    Shuffle,
    // Stack shape
    ReverseStack,
    Drop,
    DropN,
    DropTo,
    Clear,
    Dup,
    Over,
    Swap,
    KeepTop,
    KeepN,
    // Control
    Not,
    Halt,
    HaltNow,
    Eval,
    ToBlock,
    Loop,
    While,
    WhileCond,
    // Input and output
    PutLine,
    Print,
    Show,
    ShowInline,
    ReadLine,
    ReadLinePrompt,
    ReadStdin,
    ReadStdinRaw,
    RunLine,
    RunLines,
    ReadFile,
    WriteFile,
    Load,
    ShowStack,
}

impl Builtin {
    pub const ALL: &'static [Builtin] = &[
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Mod,
        Builtin::Pow,
        Builtin::Negate,
        Builtin::Abs,
        Builtin::Pred,
        Builtin::Succ,
        Builtin::TimesI,
        Builtin::Cos,
        Builtin::Acos,
        Builtin::ToFloat,
        Builtin::ToRational,
        Builtin::ToInt,
        Builtin::Eq,
        Builtin::Ne,
        Builtin::Lt,
        Builtin::Le,
        Builtin::Gt,
        Builtin::Ge,
        Builtin::Min,
        Builtin::Max,
        Builtin::Truthy,
        Builtin::Pair,
        Builtin::Pack,
        Builtin::ToText,
        Builtin::Format,
        Builtin::Chr,
        Builtin::Chars,
        Builtin::Join,
        Builtin::Splat,
        Builtin::Range,
        Builtin::RangeBetween,
        Builtin::Indices,
        Builtin::Size,
        Builtin::Sum,
        Builtin::Transpose,
        Builtin::Index,
        Builtin::ToBase,
        Builtin::FromBase,
        Builtin::Random,
        Builtin::Shuffle,
        Builtin::ReverseStack,
        Builtin::Drop,
        Builtin::DropN,
        Builtin::DropTo,
        Builtin::Clear,
        Builtin::Dup,
        Builtin::Over,
        Builtin::Swap,
        Builtin::KeepTop,
        Builtin::KeepN,
        Builtin::Not,
        Builtin::Halt,
        Builtin::HaltNow,
        Builtin::Eval,
        Builtin::ToBlock,
        Builtin::Loop,
        Builtin::While,
        Builtin::WhileCond,
        Builtin::PutLine,
        Builtin::Print,
        Builtin::Show,
        Builtin::ShowInline,
        Builtin::ReadLine,
        Builtin::ReadLinePrompt,
        Builtin::ReadStdin,
        Builtin::ReadStdinRaw,
        Builtin::RunLine,
        Builtin::RunLines,
        Builtin::ReadFile,
        Builtin::WriteFile,
        Builtin::Load,
        Builtin::ShowStack,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Mod => "%",
            Builtin::Pow => "^",
            Builtin::Negate => "_",
            Builtin::Abs => "|",
            Builtin::Pred => "[",
            Builtin::Succ => "]",
            Builtin::TimesI => "i",
            Builtin::Cos => ".c",
            Builtin::Acos => ":c",
            Builtin::ToFloat => "g",
            Builtin::ToRational => "G",
            Builtin::ToInt => "I",
            Builtin::Eq => "=",
            Builtin::Ne => ":=",
            Builtin::Lt => "<",
            Builtin::Le => ":<",
            Builtin::Gt => ">",
            Builtin::Ge => ":>",
            Builtin::Min => ".<",
            Builtin::Max => ".>",
            Builtin::Truthy => "b",
            Builtin::Pair => ",",
            Builtin::Pack => ".,",
            Builtin::ToText => ";",
            Builtin::Format => ":%",
            Builtin::Chr => "c",
            Builtin::Chars => "D",
            Builtin::Join => "j",
            Builtin::Splat => "M",
            Builtin::Range => "r",
            Builtin::RangeBetween => "R",
            Builtin::Indices => "Z",
            Builtin::Size => "s",
            Builtin::Sum => "S",
            Builtin::Transpose => "T",
            Builtin::Index => "u",
            Builtin::ToBase => "x",
            Builtin::FromBase => "X",
            Builtin::Random => "?",
            Builtin::Shuffle => ".?",
            Builtin::ReverseStack => "._",
            Builtin::Drop => "$",
            Builtin::DropN => ".$",
            Builtin::DropTo => ":$",
            Builtin::Clear => "C",
            Builtin::Dup => "d",
            Builtin::Over => "y",
            Builtin::Swap => "~",
            Builtin::KeepTop => ".I",
            Builtin::KeepN => ":I",
            Builtin::Not => "!",
            Builtin::Halt => "E",
            Builtin::HaltNow => ".E",
            Builtin::Eval => "e",
            Builtin::ToBlock => "F",
            Builtin::Loop => "L",
            Builtin::While => "w",
            Builtin::WhileCond => "W",
            Builtin::PutLine => "o",
            Builtin::Print => "O",
            Builtin::Show => "p",
            Builtin::ShowInline => "P",
            Builtin::ReadLine => ".r",
            Builtin::ReadLinePrompt => "..r",
            Builtin::ReadStdin => ".R",
            Builtin::ReadStdinRaw => "..R",
            Builtin::RunLine => ":R",
            Builtin::RunLines => "::R",
            Builtin::ReadFile => ":r",
            Builtin::WriteFile => ".w",
            Builtin::Load => ".l",
            Builtin::ShowStack => ".:S",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Builtin> {
        Builtin::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }
}

impl Machine<'_> {
    pub(crate) fn apply_builtin(&mut self, op: Builtin) -> EvalResult<()> {
        tracing::trace!(op = op.symbol(), depth = self.env.stack.len(), "builtin");
        match op {
            Builtin::Add
            | Builtin::Sub
            | Builtin::Mul
            | Builtin::Div
            | Builtin::Mod
            | Builtin::Pow
            | Builtin::Negate
            | Builtin::Abs
            | Builtin::Pred
            | Builtin::Succ
            | Builtin::TimesI
            | Builtin::Cos
            | Builtin::Acos
            | Builtin::ToFloat
            | Builtin::ToRational
            | Builtin::ToInt => self.apply_arith(op),
            Builtin::Eq
            | Builtin::Ne
            | Builtin::Lt
            | Builtin::Le
            | Builtin::Gt
            | Builtin::Ge
            | Builtin::Min
            | Builtin::Max
            | Builtin::Truthy => self.apply_compare(op),
            Builtin::Pair
            | Builtin::Pack
            | Builtin::ToText
            | Builtin::Format
            | Builtin::Chr
            | Builtin::Chars
            | Builtin::Join
            | Builtin::Splat
            | Builtin::Range
            | Builtin::RangeBetween
            | Builtin::Indices
            | Builtin::Size
            | Builtin::Sum
            | Builtin::Transpose
            | Builtin::Index
            | Builtin::ToBase
            | Builtin::FromBase
            | Builtin::Random
            | Builtin::Shuffle => self.apply_sequence(op),
            Builtin::ReverseStack
            | Builtin::Drop
            | Builtin::DropN
            | Builtin::DropTo
            | Builtin::Clear
            | Builtin::Dup
            | Builtin::Over
            | Builtin::Swap
            | Builtin::KeepTop
            | Builtin::KeepN => self.apply_stack(op),
            Builtin::Not
            | Builtin::Halt
            | Builtin::HaltNow
            | Builtin::Eval
            | Builtin::ToBlock
            | Builtin::Loop
            | Builtin::While
            | Builtin::WhileCond => self.apply_control(op),
            Builtin::PutLine
            | Builtin::Print
            | Builtin::Show
            | Builtin::ShowInline
            | Builtin::ReadLine
            | Builtin::ReadLinePrompt
            | Builtin::ReadStdin
            | Builtin::ReadStdinRaw
            | Builtin::RunLine
            | Builtin::RunLines
            | Builtin::ReadFile
            | Builtin::WriteFile
            | Builtin::Load
            | Builtin::ShowStack => self.apply_io(op),
        }
    }

    /// Pop a non-negative integer count.
    pub(crate) fn pop_count(&mut self, op: Builtin) -> EvalResult<usize> {
        let value = self.env.stack.pop()?;
        count_of(op, &value)
    }

    pub(crate) fn pop_string(&mut self, op: Builtin) -> EvalResult<String> {
        match self.env.stack.pop()? {
            Value::Str(s) => Ok((*s).clone()),
            other => Err(type_mismatch(op.symbol(), &[&other])),
        }
    }
}

/// `value` as a non-negative count.
pub(crate) fn count_of(op: Builtin, value: &Value) -> EvalResult<usize> {
    let Value::Int(n) = value else {
        return Err(type_mismatch(op.symbol(), &[value]));
    };
    to_count(op, n)
}

pub(crate) fn to_count(op: Builtin, n: &BigInt) -> EvalResult<usize> {
    if n.is_negative() {
        return Err(invalid_argument(op.symbol(), format!("count {n} is negative")));
    }
    n.to_usize()
        .ok_or_else(|| invalid_argument(op.symbol(), format!("count {n} is too large")))
}
