//! The stepping machine.
//!
//! A [`Machine`] walks the items of one block with an instruction pointer.
//! It owns nothing but its position and its array-literal frames; the stack
//! and bindings belong to the [`Env`] it was handed, which is how the two
//! call disciplines differ:
//!
//! - [`call_in_place`] runs a block on the caller's `Env`
//! - [`call_isolated`] runs it on [`Env::isolated`] and returns the last
//!   value left on the callee's stack
//!
//! # Dispatch
//!
//! Per step, first match wins:
//!
//! 1. a pre-built block item is pushed
//! 2. a token naming a variable pushes its value
//! 3. a token naming a function calls it in place
//! 4. otherwise the token kind decides

use fyn_diagnostic::{Diagnostic, ErrorCode};
use fyn_ir::{Block, Item, Token, TokenKind};
use fyn_stack::ensure_sufficient_stack;

use crate::compile::callable;
use crate::environment::{Env, Stack};
use crate::errors::{empty_call_result, malformed_program, EvalResult};
use crate::host::Host;
use crate::literal;
use crate::operators::Builtin;
use crate::value::Value;

/// One running block.
pub struct Machine<'e> {
    program: Block,
    ip: usize,
    /// Stacks saved by `(`, restored by `)`.
    frames: Vec<Vec<Value>>,
    pub(crate) env: &'e mut Env,
    pub(crate) host: &'e Host,
}

impl<'e> Machine<'e> {
    pub fn new(program: Block, env: &'e mut Env, host: &'e Host) -> Self {
        Machine {
            program,
            ip: 0,
            frames: Vec::new(),
            env,
            host,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.ip < self.program.len()
    }

    #[inline]
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Step from the first item to the last.
    pub fn run(&mut self) -> EvalResult<()> {
        self.ip = 0;
        while self.is_running() {
            self.step()?;
        }
        if !self.frames.is_empty() {
            tracing::debug!(open = self.frames.len(), "dropping unclosed array frames");
            self.frames.clear();
        }
        Ok(())
    }

    /// Execute the item at the instruction pointer, then advance.
    pub fn step(&mut self) -> EvalResult<()> {
        let program = self.program.clone();
        let Some(item) = program.items().get(self.ip) else {
            return Ok(());
        };
        match item {
            Item::Block(block) => self.env.stack.push(Value::block(block.clone())),
            Item::Token(token) => self.step_token(token).map_err(|err| err.at(token))?,
        }
        self.ip += 1;
        Ok(())
    }

    /// Move past the current item and return the one after it.
    pub(crate) fn read_operand(&mut self) -> Option<Item> {
        self.ip += 1;
        self.program.items().get(self.ip).cloned()
    }

    fn step_token(&mut self, token: &Token) -> EvalResult<()> {
        if !matches!(token.kind, TokenKind::SetVar | TokenKind::SetFunc) {
            if let Some(value) = self.env.variable(token.raw()) {
                let value = value.clone();
                self.env.stack.push(value);
                return Ok(());
            }
            if let Some(block) = self.env.function(token.raw()).cloned() {
                return self.call_in_place(&block);
            }
        }

        match token.kind {
            TokenKind::Whitespace => Ok(()),
            TokenKind::ArrayStart => {
                let saved = self.env.stack.take();
                self.frames.push(saved);
                Ok(())
            }
            TokenKind::ArrayEnd => {
                let Some(mut saved) = self.frames.pop() else {
                    return Err(malformed_program("`)` without a matching `(`"));
                };
                saved.push(Value::array(self.env.stack.take()));
                self.env.stack.replace(saved);
                Ok(())
            }
            TokenKind::LiteralOrd
            | TokenKind::LiteralChar
            | TokenKind::LiteralNumber
            | TokenKind::LiteralString => {
                let value = literal::decode(token)?;
                self.env.stack.push(value);
                Ok(())
            }
            TokenKind::SetVar => {
                let value = self.env.stack.pop()?;
                self.env.set_variable(token.raw.clone(), value);
                Ok(())
            }
            TokenKind::SetFunc => {
                let value = self.env.stack.pop()?;
                let block = callable(&value)?;
                self.env.set_function(token.raw.clone(), block);
                Ok(())
            }
            TokenKind::Meta => self.apply_meta(token),
            TokenKind::Operator => match Builtin::from_symbol(token.raw()) {
                Some(op) => self.apply_builtin(op),
                None => {
                    self.warn(
                        ErrorCode::W6001,
                        format!("unknown operator `{}`", token.raw()),
                        token,
                    );
                    Ok(())
                }
            },
            TokenKind::BlockOpen | TokenKind::BlockClose => {
                self.warn(
                    ErrorCode::W6003,
                    format!("stray `{}` ignored", token.raw()),
                    token,
                );
                Ok(())
            }
        }
    }

    pub(crate) fn warn(&self, code: ErrorCode, message: String, token: &Token) {
        self.host.warn(
            Diagnostic::warning(code)
                .with_message(message)
                .with_label(token.span, "ignored"),
        );
    }

    // ─── Calls ───

    pub(crate) fn call_in_place(&mut self, block: &Block) -> EvalResult<()> {
        call_in_place(self.env, self.host, block)
    }

    pub(crate) fn call_isolated(&self, block: &Block, args: Vec<Value>) -> EvalResult<Value> {
        call_isolated(self.env, self.host, block, args)
    }

    pub(crate) fn run_isolated(&self, block: &Block, args: Vec<Value>) -> EvalResult<Stack> {
        run_isolated(self.env, self.host, block, args)
    }
}

/// Run `block` on the caller's own stack and bindings.
#[tracing::instrument(level = "trace", skip_all, fields(block = block.text()))]
pub fn call_in_place(env: &mut Env, host: &Host, block: &Block) -> EvalResult<()> {
    ensure_sufficient_stack(|| Machine::new(block.clone(), env, host).run())
}

/// Run `block` on a fresh stack holding `args` and a snapshot of the
/// bindings; the result is the last value it leaves.
pub fn call_isolated(env: &Env, host: &Host, block: &Block, args: Vec<Value>) -> EvalResult<Value> {
    run_isolated(env, host, block, args)?
        .pop()
        .map_err(|_| empty_call_result())
}

/// Like [`call_isolated`], but hands back whatever the callee left, empty
/// or not.
#[tracing::instrument(level = "trace", skip_all, fields(block = block.text(), args = args.len()))]
pub fn run_isolated(env: &Env, host: &Host, block: &Block, args: Vec<Value>) -> EvalResult<Stack> {
    let mut callee = env.isolated(args);
    ensure_sufficient_stack(|| Machine::new(block.clone(), &mut callee, host).run())?;
    Ok(callee.stack)
}
