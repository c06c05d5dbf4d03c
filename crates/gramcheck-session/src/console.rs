//! Line-based console abstraction.
//!
//! Wraps a `BufRead` input and a `Write` output behind small prompt
//! helpers. Reaching end of input while a prompt is pending is reported
//! as an error and ends the session; interactively that only happens on
//! ctrl-D.

use std::io::{self, BufRead, Write};

/// Column width for wrapped prose (summaries, intro sections).
pub const WRAP_WIDTH: usize = 70;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Print a `===` banner around a title.
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(60))?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "{}", "=".repeat(60))
    }

    /// Print a `---` divider with a title.
    pub fn divider(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", "-".repeat(60))?;
        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{}", "-".repeat(60))
    }

    /// Show a prompt (no trailing newline) and read one trimmed line.
    pub fn prompt(&mut self, msg: &str) -> io::Result<String> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Yes/no prompt: anything starting with 'y' or 'Y' counts as yes.
    pub fn yes_no(&mut self, msg: &str) -> io::Result<bool> {
        let answer = self.prompt(msg)?;
        Ok(answer.to_lowercase().starts_with('y'))
    }

    /// Wait for Enter, discarding whatever was typed.
    pub fn pause(&mut self, msg: &str) -> io::Result<()> {
        self.prompt(msg).map(|_| ())
    }
}

/// Greedy-wrap prose to `width` columns on whitespace. Words longer than
/// the width get a line of their own.
pub fn fill(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        if line_len == 0 {
            out.push_str(word);
            line_len = word.len();
        } else if line_len + 1 + word.len() > width {
            out.push('\n');
            out.push_str(word);
            line_len = word.len();
        } else {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + word.len();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn prompt_trims_the_line() {
        let mut c = console("  hello  \n");
        assert_eq!(c.prompt("? ").unwrap(), "hello");
    }

    #[test]
    fn prompt_on_closed_input_is_an_error() {
        let mut c = console("");
        assert!(c.prompt("? ").is_err());
    }

    #[test]
    fn yes_no_accepts_y_prefixes_only() {
        let mut c = console("Yes\nyep\nn\nmaybe\n");
        assert!(c.yes_no("? ").unwrap());
        assert!(c.yes_no("? ").unwrap());
        assert!(!c.yes_no("? ").unwrap());
        assert!(!c.yes_no("? ").unwrap());
    }

    #[test]
    fn fill_wraps_at_width() {
        let wrapped = fill("one two three four five", 9);
        assert_eq!(wrapped, "one two\nthree\nfour five");
        for line in wrapped.lines() {
            assert!(line.len() <= 9);
        }
    }

    #[test]
    fn fill_collapses_existing_whitespace() {
        assert_eq!(fill("a\n b   c", 70), "a b c");
    }
}
