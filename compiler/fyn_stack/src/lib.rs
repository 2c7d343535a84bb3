//! Stack growth for deep recursion.
//!
//! Fynyl programs recurse on the host stack in three places: folding nested
//! `{...}` spans, calling blocks from blocks, and broadcasting (`v`/`V`) into
//! nested arrays. None of these has a depth limit of its own, so each
//! recursive step runs through [`ensure_sufficient_stack`], which moves onto
//! a freshly allocated segment when the current one runs low.
//!
//! On `wasm32` the call is a passthrough.

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
