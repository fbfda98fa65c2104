//! JSON-lines output: one object per walk entry or explanation

use std::io::{self, Write};

use serde::Serialize;

use crate::walk::{Explanation, WalkEntry};

/// Writes each value as one compact JSON object per line.
pub struct JsonPrinter<W: Write> {
    out: W,
}

impl JsonPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `{"dirpath": ..., "dirnames": [...], "filenames": [...]}`
    pub fn print_entry(&mut self, entry: &WalkEntry) -> io::Result<()> {
        self.write_line(entry)
    }

    pub fn print_explanation(&mut self, explanation: &Explanation) -> io::Result<()> {
        self.write_line(explanation)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, value: &impl Serialize) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value).map_err(io::Error::other)?;
        writeln!(self.out)
    }
}
