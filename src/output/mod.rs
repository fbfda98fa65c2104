//! Rendering of walk results for the terminal

mod config;
mod json;

pub use config::OutputConfig;
pub use json::JsonPrinter;

use std::io;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::walk::{Explanation, WalkEntry};

/// Prints one path per line, directories with a trailing `/`.
pub struct PathPrinter<W: WriteColor> {
    config: OutputConfig,
    out: W,
}

impl PathPrinter<StandardStream> {
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(config, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> PathPrinter<W> {
    pub fn new(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn print_entry(&mut self, entry: &WalkEntry) -> io::Result<()> {
        if self.config.show_dirs {
            for dir in entry.dir_paths() {
                self.write_dir(&dir)?;
            }
        }
        for file in entry.file_paths() {
            writeln!(self.out, "{}", file.display())?;
        }
        Ok(())
    }

    /// `git check-ignore -v` style: `source:line:pattern<TAB>path`, with empty
    /// fields when no rule matched.
    pub fn print_explanation(&mut self, explanation: &Explanation) -> io::Result<()> {
        match &explanation.culprit {
            Some(culprit) => {
                let source = culprit
                    .source
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let color = if explanation.ignored {
                    Color::Red
                } else {
                    Color::Green
                };
                self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
                write!(self.out, "{}:{}:{}", source, culprit.line, culprit.pattern)?;
                self.out.reset()?;
            }
            None => write!(self.out, "::")?,
        }
        write!(self.out, "\t{}", explanation.path.display())?;
        if let Some(ancestor) = &explanation.ignored_ancestor {
            write!(self.out, " (inside ignored {}/)", ancestor.display())?;
        }
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_dir(&mut self, dir: &Path) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(self.out, "{}/", dir.display())?;
        self.out.reset()?;
        writeln!(self.out)
    }
}
