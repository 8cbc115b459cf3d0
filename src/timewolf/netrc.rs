//! # `.netrc` Reader
//!
//! A small reader for the classic `.netrc` credential file:
//!
//! ```text
//! # comment lines run to the end of the line
//! machine evidence.example.com
//!     login analyst
//!     password "s3cret with spaces"
//!
//! default login anonymous password guest@
//!
//! macdef init
//! cd /pub
//! binary
//!
//! ```
//!
//! Tokens are separated by spaces, tabs and line breaks. A double-quoted token
//! may contain separators, and a backslash takes the next character literally
//! both inside and outside quotes. A `#` token starts a comment that runs to
//! the end of the line, also in the middle of an entry. A `macdef` body runs
//! from the line after its name up to the first empty line (or end of input).
//!
//! Lookups go through [`Netrc::authenticators`], which falls back to the
//! `default` entry when the host has no entry of its own.

use crate::error::{Result, TimewolfError};
use std::collections::HashMap;
use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

const NETRC_FILENAME: &str = ".netrc";

/// One `machine` (or `default`) entry. Missing fields are empty strings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Authenticator {
    pub login: String,
    pub account: String,
    pub password: String,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("login", &self.login)
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct Netrc {
    hosts: HashMap<String, Authenticator>,
    default: Option<Authenticator>,
    macros: HashMap<String, Vec<String>>,
}

impl Netrc {
    /// `~/.netrc` for the invoking user, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(NETRC_FILENAME))
    }

    /// Reads and parses `~/.netrc`, rejecting files other users can access.
    pub fn from_default_location() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| TimewolfError::Config("Could not determine home directory".into()))?;
        Self::load(&path, true)
    }

    /// Reads and parses the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(path.as_ref(), false)
    }

    pub(crate) fn load(path: &Path, check_permissions: bool) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let netrc = Self::parse(&content)?;
        if check_permissions && netrc.has_private_entries() {
            check_private(path)?;
        }
        Ok(netrc)
    }

    pub fn parse(input: &str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let mut netrc = Netrc::default();

        while let Some(token) = lexer.next_token() {
            let line = lexer.token_line;
            if token.starts_with('#') {
                lexer.skip_line();
                continue;
            }

            match token.as_str() {
                "machine" => {
                    let host = lexer
                        .next_token()
                        .filter(|name| !name.is_empty())
                        .ok_or_else(|| TimewolfError::netrc(line, "missing 'machine' name"))?;
                    let entry = parse_entry(&mut lexer)?;
                    netrc.hosts.insert(host, entry);
                }
                "default" => {
                    netrc.default = Some(parse_entry(&mut lexer)?);
                }
                "macdef" => {
                    let name = lexer
                        .next_token()
                        .filter(|name| !name.is_empty())
                        .ok_or_else(|| TimewolfError::netrc(line, "missing 'macdef' name"))?;
                    lexer.skip_line();
                    netrc.macros.insert(name, lexer.macro_body());
                }
                other => {
                    return Err(TimewolfError::netrc(
                        line,
                        format!("bad toplevel token '{}'", other),
                    ));
                }
            }
        }

        Ok(netrc)
    }

    /// Entry for `host`, falling back to the `default` entry.
    pub fn authenticators(&self, host: &str) -> Option<&Authenticator> {
        self.hosts.get(host).or(self.default.as_ref())
    }

    pub fn hosts(&self) -> impl Iterator<Item = (&str, &Authenticator)> {
        self.hosts.iter().map(|(host, entry)| (host.as_str(), entry))
    }

    pub fn default_entry(&self) -> Option<&Authenticator> {
        self.default.as_ref()
    }

    pub fn macros(&self) -> &HashMap<String, Vec<String>> {
        &self.macros
    }

    fn has_private_entries(&self) -> bool {
        self.hosts
            .values()
            .chain(self.default.iter())
            .any(|entry| entry.login != "anonymous")
    }
}

/// Reads `login`/`user`, `account` and `password` pairs until the next
/// top-level keyword or end of input. Comments inside an entry are skipped.
fn parse_entry(lexer: &mut Lexer<'_>) -> Result<Authenticator> {
    let mut entry = Authenticator::default();

    loop {
        let Some(token) = lexer.peek_token() else {
            return Ok(entry);
        };
        if token.starts_with('#') {
            lexer.next_token();
            lexer.skip_line();
            continue;
        }
        if matches!(token.as_str(), "machine" | "default" | "macdef") {
            return Ok(entry);
        }

        let token = lexer.next_token().unwrap_or_default();
        let line = lexer.token_line;
        let value = lexer.next_token().unwrap_or_default();
        match token.as_str() {
            "login" | "user" => entry.login = value,
            "account" => entry.account = value,
            "password" => entry.password = value,
            other => {
                return Err(TimewolfError::netrc(
                    line,
                    format!("bad follower token '{}'", other),
                ));
            }
        }
    }
}

/// Rejects a store that is not owned by the owner of the directory holding it
/// (the home directory for `~/.netrc`), or that group or other can access.
#[cfg(unix)]
fn check_private(path: &Path) -> Result<()> {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let metadata = fs::metadata(path)?;
    if let Some(dir) = path.parent() {
        let dir_owner = fs::metadata(dir)?.uid();
        if metadata.uid() != dir_owner {
            return Err(TimewolfError::netrc(
                0,
                format!(
                    "{} owner ({}) does not match the owner of {} ({})",
                    path.display(),
                    metadata.uid(),
                    dir.display(),
                    dir_owner
                ),
            ));
        }
    }

    if metadata.permissions().mode() & 0o077 != 0 {
        return Err(TimewolfError::netrc(
            0,
            format!(
                "{} access too permissive: access permissions must restrict access to only the owner",
                path.display()
            ),
        ));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_private(_path: &Path) -> Result<()> {
    Ok(())
}

/// Token separators. Other whitespace, such as U+00A0, is part of a token.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    token_line: usize,
    peeked: Option<(String, usize)>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            token_line: 1,
            peeked: None,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn peek_token(&mut self) -> Option<&String> {
        if self.peeked.is_none() {
            let token = self.read_token()?;
            self.peeked = Some((token, self.token_line));
        }
        self.peeked.as_ref().map(|(token, _)| token)
    }

    fn next_token(&mut self) -> Option<String> {
        if let Some((token, line)) = self.peeked.take() {
            self.token_line = line;
            return Some(token);
        }
        self.read_token()
    }

    fn read_token(&mut self) -> Option<String> {
        while self.chars.peek().is_some_and(|c| is_separator(*c)) {
            self.bump();
        }
        self.token_line = self.line;

        let mut token = String::new();
        match self.bump()? {
            '"' => {
                while let Some(c) = self.bump() {
                    match c {
                        '"' => break,
                        '\\' => token.extend(self.bump()),
                        c => token.push(c),
                    }
                }
            }
            first => {
                let mut c = first;
                loop {
                    if c == '\\' {
                        token.extend(self.bump());
                    } else {
                        token.push(c);
                    }
                    match self.chars.peek().copied() {
                        Some(next) if !is_separator(next) => {
                            c = next;
                            self.bump();
                        }
                        _ => break,
                    }
                }
            }
        }
        Some(token)
    }

    /// Discards input up to and including the next newline.
    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Collects lines up to the first empty line or end of input. A line of
    /// only spaces belongs to the body.
    fn macro_body(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let mut saw_any = false;
            while let Some(c) = self.bump() {
                saw_any = true;
                line.push(c);
                if c == '\n' {
                    break;
                }
            }
            if !saw_any || line.trim_end_matches(['\r', '\n']).is_empty() {
                return lines;
            }
            lines.push(line);
        }
    }
}
