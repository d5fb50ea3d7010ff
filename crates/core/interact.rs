use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

use log::trace;

/// The interactive input and output of the menu.
///
/// Input is read one line per prompt. End of input is reported as `None` so callers can stop
/// cleanly when driven from a pipe.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` without a trailing newline and reads the next line of input, without its
    /// line ending.
    pub fn user_input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            trace!("End of input reached");
            return Ok(None);
        }

        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Writes a single line of output.
    pub fn say<D: Display>(&mut self, line: D) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use std::io::Cursor;

    #[test]
    fn lines_are_returned_without_line_endings() {
        let mut console = Console::new(Cursor::new("dracula\r\n  en \n"), Vec::new());

        assert_eq!(Some("dracula".to_owned()), console.user_input("> ").unwrap());
        assert_eq!(Some("  en ".to_owned()), console.user_input("> ").unwrap());
        assert_eq!(None, console.user_input("> ").unwrap());

        assert_eq!(b"> > > ".to_vec(), console.into_output());
    }

    #[test]
    fn empty_line_is_not_end_of_input() {
        let mut console = Console::new(Cursor::new("\n"), Vec::new());

        assert_eq!(Some(String::new()), console.user_input("").unwrap());
        assert_eq!(None, console.user_input("").unwrap());
    }
}
