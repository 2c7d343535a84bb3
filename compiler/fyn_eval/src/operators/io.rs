//! Operators that reach the host: output, line input and files.

use super::Builtin;
use crate::compile::{callable, compile};
use crate::errors::{end_of_input, invalid_argument, EvalResult};
use crate::machine::Machine;
use crate::value::Value;

impl Machine<'_> {
    pub(super) fn apply_io(&mut self, op: Builtin) -> EvalResult<()> {
        match op {
            Builtin::PutLine => {
                let text = self.env.stack.pop()?.puts_text();
                self.host.print().print(&text);
            }
            Builtin::Print => {
                let text = self.env.stack.pop()?.display();
                self.host.print().print(&text);
            }
            Builtin::Show => {
                let text = self.env.stack.pop()?.canonical();
                self.host.print().println(&text);
            }
            Builtin::ShowInline => {
                let text = self.env.stack.pop()?.canonical();
                self.host.print().print(&text);
            }
            Builtin::ReadLine => {
                let line = self.read_line(Some(""))?;
                self.env.stack.push(Value::string(chomp(&line)));
            }
            Builtin::ReadLinePrompt => {
                let prompt = self.env.stack.pop()?.display();
                let line = self.read_line(Some(&prompt))?;
                self.env.stack.push(Value::string(chomp(&line)));
            }
            Builtin::ReadStdin => {
                let line = self.read_line(None)?;
                self.env.stack.push(Value::string(chomp(&line)));
            }
            Builtin::ReadStdinRaw => {
                let line = self.read_line(None)?;
                self.env.stack.push(Value::string(line));
            }
            Builtin::RunLine => {
                let line = self.read_line(None)?;
                self.call_in_place(&compile(&line)?)?;
            }
            Builtin::RunLines => {
                let each = callable(&self.env.stack.pop()?)?;
                while let Some(line) = self.host.read_line(None)? {
                    self.call_in_place(&compile(&line)?)?;
                    self.call_in_place(&each)?;
                }
            }
            Builtin::ReadFile => {
                let path = self.pop_string(op)?;
                let contents = self.host.read_file(&path)?;
                self.env.stack.push(Value::string(contents));
            }
            Builtin::WriteFile => {
                let path = self.pop_string(op)?;
                let contents = self.env.stack.pop()?.display();
                self.host.write_file(&path, &contents)?;
            }
            Builtin::Load => {
                let path = self.pop_string(op)?;
                let source = self.host.read_file(&path)?;
                self.call_in_place(&compile(&source)?)?;
            }
            Builtin::ShowStack => {
                for value in self.env.stack.as_slice() {
                    self.host.print().println(&value.canonical());
                }
            }
            _ => return Err(invalid_argument(op.symbol(), "not an input/output operator")),
        }
        Ok(())
    }

    fn read_line(&self, prompt: Option<&str>) -> EvalResult<String> {
        self.host.read_line(prompt)?.ok_or_else(end_of_input)
    }
}

/// Drop one trailing line ending.
fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}
