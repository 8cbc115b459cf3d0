//! # Console Output
//!
//! [`ConsoleOutput`] is the status channel shared by every timewolf tool. It
//! writes two kinds of lines:
//!
//! - **raw** lines to stdout ([`ConsoleOutput::std_out`]), used for data other
//!   programs consume;
//! - **formatted** lines to stderr ([`ConsoleOutput::std_err`],
//!   [`ConsoleOutput::verbose_out`]), shaped as
//!
//! ```text
//! [2024-05-01T13:37:00.123456] timewolf: collector - Copying disk image
//! ```
//!
//! Every call flushes its sink before returning, so lines from different
//! instances interleave at line granularity only.
//!
//! The writers are generic so tests can capture output in a `Vec<u8>`. The
//! program name is resolved once, when the value is built, and can be
//! overridden with [`ConsoleOutput::with_program_name`].

use crate::error::Result;
use chrono::Local;
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Basename of the running executable, as invoked.
///
/// Falls back to the package name when `argv[0]` is missing or has no file
/// name component.
pub fn program_name() -> String {
    let arg0 = std::env::args_os().next();
    arg0.as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

pub struct ConsoleOutput<O: Write = Stdout, E: Write = Stderr> {
    sender: String,
    verbose: bool,
    program: String,
    out: O,
    err: E,
}

impl ConsoleOutput {
    /// Creates an output bound to the process's stdout and stderr.
    pub fn new(sender: impl Into<String>, verbose: bool) -> Self {
        Self::with_writers(sender, verbose, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleOutput<O, E> {
    pub fn with_writers(sender: impl Into<String>, verbose: bool, out: O, err: E) -> Self {
        Self {
            sender: sender.into(),
            verbose,
            program: program_name(),
            out,
            err,
        }
    }

    pub fn with_program_name(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds `[<timestamp>] <program>: <sender> - <message>\n`.
    ///
    /// The timestamp is the local wall clock without an offset suffix.
    pub fn format_message(&self, message: &str) -> String {
        let timestamp = Local::now().naive_local().format(TIMESTAMP_FORMAT);
        format!(
            "[{}] {}: {} - {}\n",
            timestamp, self.program, self.sender, message
        )
    }

    /// Writes `message` followed by a newline to stdout, unformatted.
    pub fn std_out(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        Ok(())
    }

    /// Writes the formatted message to stderr, or terminates the process when
    /// `die` is set (see [`ConsoleOutput::die`]).
    pub fn std_err(&mut self, message: &str, die: bool) -> Result<()> {
        if die {
            self.die(message);
        }
        let formatted = self.format_message(message);
        self.err.write_all(formatted.as_bytes())?;
        self.err.flush()?;
        Ok(())
    }

    /// Same as `std_err(message, false)` when verbose, otherwise nothing.
    pub fn verbose_out(&mut self, message: &str) -> Result<()> {
        if self.verbose {
            self.std_err(message, false)?;
        }
        Ok(())
    }

    /// Reports the formatted message as the failure reason and exits with
    /// status 1.
    ///
    /// The reason goes to the process's real stderr, never to the configured
    /// error writer.
    pub fn die(&self, message: &str) -> ! {
        let formatted = self.format_message(message);
        let reason = formatted.trim_end_matches('\n');
        eprintln!("{}", reason);
        std::process::exit(1)
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}
