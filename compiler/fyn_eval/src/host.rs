//! Capabilities the machine borrows from its surroundings.
//!
//! Operators never touch stdin, the filesystem or a random source directly;
//! they go through the [`Host`] the interpreter was built with. Tests swap
//! in scripted input, a buffer for output and a seeded generator.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use fyn_diagnostic::Diagnostic;
use num_bigint::{BigInt, RandBigInt};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::errors::{io_error, EvalResult};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Source of line input.
pub enum InputSource {
    Stdin,
    /// Pre-split lines, each keeping its trailing newline.
    Scripted(Mutex<VecDeque<String>>),
}

impl InputSource {
    pub fn scripted(text: &str) -> Self {
        InputSource::Scripted(Mutex::new(
            text.split_inclusive('\n').map(str::to_owned).collect(),
        ))
    }

    /// Next line including its newline, or `None` at end of input.
    pub fn read_line(&self) -> std::io::Result<Option<String>> {
        match self {
            InputSource::Stdin => {
                let mut line = String::new();
                let n = std::io::stdin().lock().read_line(&mut line)?;
                Ok((n > 0).then_some(line))
            }
            InputSource::Scripted(lines) => Ok(lines.lock().pop_front()),
        }
    }
}

/// Receives each warning as it is raised.
pub type WarningSink = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Warnings kept for [`Host::warnings`] when no sink is installed.
pub const MAX_RETAINED_WARNINGS: usize = 256;

/// Everything a running program can reach outside its own stack.
pub struct Host {
    print: SharedPrintHandler,
    input: InputSource,
    rng: Mutex<StdRng>,
    warnings: Mutex<Vec<Diagnostic>>,
    warning_sink: Option<WarningSink>,
}

impl Host {
    /// `seed` fixes the random sequence; `None` seeds from the OS.
    pub fn new(
        print: SharedPrintHandler,
        input: InputSource,
        seed: Option<u64>,
        warning_sink: Option<WarningSink>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Host {
            print,
            input,
            rng: Mutex::new(rng),
            warnings: Mutex::new(Vec::new()),
            warning_sink,
        }
    }

    #[inline]
    pub fn print(&self) -> &SharedPrintHandler {
        &self.print
    }

    // ─── Input ───

    /// Read one line, writing `prompt` first.
    pub fn read_line(&self, prompt: Option<&str>) -> EvalResult<Option<String>> {
        if let Some(prompt) = prompt {
            self.print.print(prompt);
        }
        self.print.flush();
        self.input
            .read_line()
            .map_err(|err| io_error("reading input", &err))
    }

    // ─── Files ───

    pub fn read_file(&self, path: &str) -> EvalResult<String> {
        tracing::debug!(path, "reading file");
        std::fs::read_to_string(path).map_err(|err| io_error(&format!("reading `{path}`"), &err))
    }

    pub fn write_file(&self, path: &str, contents: &str) -> EvalResult<()> {
        tracing::debug!(path, bytes = contents.len(), "writing file");
        std::fs::write(path, contents).map_err(|err| io_error(&format!("writing `{path}`"), &err))
    }

    // ─── Randomness ───

    /// Uniform integer in `[0, bound)`; `bound` must be positive.
    pub fn random_below(&self, bound: &BigInt) -> BigInt {
        self.rng.lock().gen_bigint_range(&BigInt::from(0), bound)
    }

    /// Uniform float in `[0, 1)`.
    pub fn random_float(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }

    /// Uniform index into a non-empty sequence of length `len`.
    pub fn random_index(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }

    pub fn shuffle<T>(&self, items: &mut [T]) {
        items.shuffle(&mut *self.rng.lock());
    }

    // ─── Warnings ───

    /// Hand `diagnostic` to the sink, or keep it for [`Host::warnings`].
    /// Past [`MAX_RETAINED_WARNINGS`] kept warnings, later ones are only
    /// traced.
    pub fn warn(&self, diagnostic: Diagnostic) {
        tracing::warn!(code = %diagnostic.code, "{}", diagnostic.message);
        if let Some(sink) = &self.warning_sink {
            sink(&diagnostic);
            return;
        }
        let mut warnings = self.warnings.lock();
        if warnings.len() < MAX_RETAINED_WARNINGS {
            warnings.push(diagnostic);
        }
    }

    /// Kept warnings, oldest first. Always empty with a sink installed.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.warnings.lock().clone()
    }
}

impl Default for Host {
    fn default() -> Self {
        Host::new(stdout_handler(), InputSource::Stdin, None, None)
    }
}

#[cfg(test)]
mod tests;
