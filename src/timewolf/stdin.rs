//! Line-based `(path, name)` records read from standard input.
//!
//! Upstream tools pipe one record per line, `<path> <name>`, with any further
//! whitespace-separated tokens ignored. The reader is lazy and single pass:
//! iterating consumes the input, and the first malformed line ends it.

use crate::error::{Result, TimewolfError};
use std::io::{self, BufRead, StdinLock};

/// A path to an artifact (or processed artifact) and the name it goes by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathName {
    pub path: String,
    pub name: String,
}

impl PathName {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Parses one input line. Fewer than two tokens is malformed.
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut tokens = line.trim_end_matches('\n').split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(path), Some(name)) => Ok(Self::new(path, name)),
            _ => Err(TimewolfError::MalformedInput),
        }
    }
}

impl From<PathName> for (String, String) {
    fn from(pair: PathName) -> Self {
        (pair.path, pair.name)
    }
}

/// Iterator over the records of a buffered reader.
///
/// Yields `Err` once, for the first malformed line or read failure, and is
/// exhausted afterwards.
pub struct PathNames<R> {
    reader: R,
    buf: String,
    done: bool,
}

impl<R: BufRead> PathNames<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for PathNames<R> {
    type Item = Result<PathName>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        let item = match self.reader.read_line(&mut self.buf) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(_) => PathName::parse_line(&self.buf),
            Err(e) => Err(TimewolfError::Io(e)),
        };

        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

impl<R: BufRead> std::iter::FusedIterator for PathNames<R> {}

/// Reads records from the process's standard input.
pub fn read_from_stdin() -> PathNames<StdinLock<'static>> {
    PathNames::new(io::stdin().lock())
}
