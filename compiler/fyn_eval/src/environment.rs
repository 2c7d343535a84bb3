//! The data stack and the two binding namespaces.
//!
//! Variables and functions are separate maps keyed by token text. Both are
//! held behind `Arc` and written copy-on-write, which gives the two call
//! disciplines their meaning:
//!
//! - an in-place call runs against the caller's own [`Env`], so every push
//!   and every binding is visible afterwards
//! - an isolated call gets [`Env::isolated`]: a fresh stack and a snapshot of
//!   both maps. The snapshot shares storage until the callee binds
//!   something, at which point only the callee's copy changes

use std::sync::Arc;

use fyn_ir::Block;
use rustc_hash::FxHashMap;

use crate::errors::{stack_underflow, EvalResult};
use crate::value::Value;

/// Name → binding map, shared until written.
pub type Bindings<T> = Arc<FxHashMap<Arc<str>, T>>;

/// Data stack with underflow-checked pops.
#[derive(Clone, Default, Debug)]
pub struct Stack(Vec<Value>);

impl Stack {
    pub fn new() -> Self {
        Stack(Vec::new())
    }

    pub fn from_vec(values: Vec<Value>) -> Self {
        Stack(values)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn pop(&mut self) -> EvalResult<Value> {
        self.0.pop().ok_or_else(|| stack_underflow(1, 0))
    }

    /// Pop the top two as `(second, top)`.
    pub fn pop2(&mut self) -> EvalResult<(Value, Value)> {
        let found = self.0.len();
        if found < 2 {
            return Err(stack_underflow(2, found));
        }
        let b = self.0.pop();
        let a = self.0.pop();
        match (a, b) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(stack_underflow(2, found)),
        }
    }

    /// Pop the top `n`, oldest first.
    pub fn pop_n(&mut self, n: usize) -> EvalResult<Vec<Value>> {
        let found = self.0.len();
        if found < n {
            return Err(stack_underflow(n, found));
        }
        Ok(self.0.split_off(found - n))
    }

    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.0.last()
    }

    /// Value `depth` below the top (`0` is the top).
    pub fn peek_nth(&self, depth: usize) -> EvalResult<&Value> {
        let len = self.0.len();
        len.checked_sub(depth + 1)
            .and_then(|i| self.0.get(i))
            .ok_or_else(|| stack_underflow(depth + 1, len))
    }

    /// Move the whole stack out, leaving it empty.
    pub fn take(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.0)
    }

    pub fn replace(&mut self, values: Vec<Value>) {
        self.0 = values;
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.0.extend(values);
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

/// Stack plus bindings of one running program.
#[derive(Clone, Default, Debug)]
pub struct Env {
    pub stack: Stack,
    variables: Bindings<Value>,
    functions: Bindings<Block>,
}

impl Env {
    /// Empty environment with no bindings.
    pub fn new() -> Self {
        Env::default()
    }

    /// Top-level environment: `A` is the uppercase alphabet, `h` the empty
    /// string and `H` a single space.
    pub fn seeded() -> Self {
        let mut env = Env::new();
        env.set_variable(Arc::from("A"), Value::string("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        env.set_variable(Arc::from("h"), Value::string(""));
        env.set_variable(Arc::from("H"), Value::string(" "));
        env
    }

    /// Environment for an isolated call: `args` as the stack, bindings as
    /// they are right now.
    pub fn isolated(&self, args: Vec<Value>) -> Env {
        Env {
            stack: Stack::from_vec(args),
            variables: Arc::clone(&self.variables),
            functions: Arc::clone(&self.functions),
        }
    }

    #[inline]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    #[inline]
    pub fn function(&self, name: &str) -> Option<&Block> {
        self.functions.get(name)
    }

    pub fn set_variable(&mut self, name: Arc<str>, value: Value) {
        Arc::make_mut(&mut self.variables).insert(name, value);
    }

    pub fn set_function(&mut self, name: Arc<str>, block: Block) {
        Arc::make_mut(&mut self.functions).insert(name, block);
    }
}

#[cfg(test)]
mod tests;
