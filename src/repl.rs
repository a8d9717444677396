use std::io;

use crate::{
    Error, Value,
    interpreter::{evaluator::core::Context, lexer::tokenize, parser::parse_program},
};

const BANNER: &str = "C## REPL. End with Ctrl-D.\n";
const PROMPT: &str = ">>> ";
const CONTINUATION_PROMPT: &str = "... ";

/// An interactive session.
///
/// Input arrives one line at a time and is buffered until it forms a complete
/// entry. Each entry is parsed as top-level items: its functions join the
/// session's function table and its statements run in the global frame, so
/// everything declared earlier stays visible. `Main` is never called
/// implicitly.
pub struct Repl {
    context: Context,
    buffer:  String,
}

impl Repl {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { context,
               buffer: String::new() }
    }

    /// Returns `true` while a partial entry is buffered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Feeds one line of input.
    ///
    /// The line is appended to the buffer. Once braces and parentheses
    /// balance and the entry ends with `;` or `}`, the buffer is evaluated and
    /// cleared. A blank line forces evaluation of whatever is pending.
    ///
    /// # Returns
    /// `None` while the entry is incomplete. Otherwise the evaluation result:
    /// the value of a trailing expression statement, if it is not `void`.
    ///
    /// # Example
    /// ```
    /// use cshs::{Value, interpreter::evaluator::core::Context, repl::Repl};
    ///
    /// let mut repl = Repl::new(Context::with_io(&b""[..], std::io::sink()));
    ///
    /// assert!(repl.feed_line("int Twice(int n) {").is_none());
    /// assert!(repl.feed_line("  return n * 2;").is_none());
    /// assert_eq!(repl.feed_line("}"), Some(Ok(None)));
    /// assert_eq!(repl.feed_line("Twice(21);"), Some(Ok(Some(Value::Int(42)))));
    /// ```
    pub fn feed_line(&mut self, line: &str) -> Option<Result<Option<Value>, Error>> {
        if line.trim().is_empty() {
            if !self.is_pending() {
                return None;
            }
        } else {
            self.buffer.push_str(line);
            self.buffer.push('\n');
            if !is_complete(&self.buffer) {
                return None;
            }
        }

        let source = std::mem::take(&mut self.buffer);
        Some(self.evaluate(&source))
    }

    /// Evaluates one complete entry in the session's context.
    pub fn evaluate(&mut self, source: &str) -> Result<Option<Value>, Error> {
        let tokens = tokenize(source)?;
        let program = parse_program(&tokens)?;

        self.context.load_program(&program.items);
        let value = self.context.execute_items(&program.items)?;
        tracing::debug!(items = program.items.len(), "evaluated repl entry");

        Ok(value.filter(|value| !value.is_unit()))
    }

    /// Runs the loop until the context's input is exhausted.
    ///
    /// Prompts, echoes and error reports are written to the context's output,
    /// interleaved with whatever the entries print themselves. An error ends
    /// the entry that raised it, never the session.
    pub fn run(mut self) -> io::Result<()> {
        self.context.write_raw(BANNER)?;

        loop {
            let prompt = if self.is_pending() { CONTINUATION_PROMPT } else { PROMPT };
            self.context.write_raw(prompt)?;

            let Some(line) = self.context.read_source_line()? else {
                break;
            };
            let result = self.feed_line(line.trim_end_matches(['\n', '\r']));
            self.report(result)?;
        }

        self.context.write_raw("\n")?;
        if self.is_pending() {
            let source = std::mem::take(&mut self.buffer);
            let result = self.evaluate(&source);
            self.report(Some(result))?;
        }
        Ok(())
    }

    fn report(&mut self, result: Option<Result<Option<Value>, Error>>) -> io::Result<()> {
        match result {
            Some(Ok(Some(value))) => self.context.write_raw(&format!("{value}\n")),
            Some(Err(e)) => {
                tracing::debug!(error = %e, "repl entry failed");
                self.context.write_raw(&format!("Error: {e}\n"))
            },
            Some(Ok(None)) | None => Ok(()),
        }
    }
}

/// Returns `true` if `buffer` holds a complete entry.
///
/// Brackets inside string literals and comments are ignored. An unterminated
/// `/* ... */` comment keeps the entry open.
fn is_complete(buffer: &str) -> bool {
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut in_comment = false;
    let mut last = None;
    let mut chars = buffer.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                },
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }
        if in_comment {
            if c == '*' && chars.next_if_eq(&'/').is_some() {
                in_comment = false;
            }
            continue;
        }
        match c {
            '/' if chars.next_if_eq(&'*').is_some() => {
                in_comment = true;
                continue;
            },
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&c| c != '\n').is_some() {}
                continue;
            },
            '"' => in_string = true,
            '{' | '(' => depth += 1,
            '}' | ')' => depth -= 1,
            _ => {},
        }
        if !c.is_whitespace() {
            last = Some(c);
        }
    }

    depth <= 0 && !in_string && !in_comment && matches!(last, Some(';' | '}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_balance_and_a_terminator() {
        assert!(is_complete("var x = 1;\n"));
        assert!(!is_complete("var x = 1\n"));
        assert!(!is_complete("void F() {\n"));
        assert!(!is_complete("Console.WriteLine(\n"));
        assert!(is_complete("void F() { }\n"));
    }

    #[test]
    fn brackets_in_strings_and_comments_do_not_count() {
        assert!(is_complete("Console.WriteLine(\"{\");\n"));
        assert!(is_complete("var x = 1; // {\n"));
        assert!(!is_complete("var s = \"abc;\n"));
    }

    #[test]
    fn block_comments_are_skipped() {
        assert!(is_complete("var x = 1; /* { */\n"));
        assert!(is_complete("/* ( */ var y = 2;\n"));
        assert!(!is_complete("var x = 1; /* }\n"));
        assert!(!is_complete("void F() { /* } */\n"));
        assert!(is_complete("var x = 1; /* a\nb */\n"));
    }
}
