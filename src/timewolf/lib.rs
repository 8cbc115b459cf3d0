//! # Timewolf Utilities
//!
//! Helper routines shared by forensic-acquisition tools: the pieces that sit
//! around an acquisition pipeline rather than inside it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                                │
//! │  - clap parsing, config loading, process exit codes          │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌────────────┬────────────┬────────────┬──────────────────────┐
//! │  console   │  stdin     │  timezone  │  credentials + netrc │
//! └────────────┴────────────┴────────────┴──────────────────────┘
//! ```
//!
//! The modules are independent of each other:
//!
//! - [`console`]: timestamped status and error lines ([`console::ConsoleOutput`])
//! - [`stdin`]: lazy `(path, name)` records read from standard input
//! - [`timezone`]: exact lookup in the bundled IANA zone table
//! - [`netrc`]: reader for the `.netrc` credential file format
//! - [`credentials`]: `.netrc` lookup with an interactive password fallback
//! - [`config`]: configuration file
//! - [`error`]: error types
//!
//! Only [`console::ConsoleOutput::die`] ends the process; everything else
//! returns a [`error::Result`].

pub mod config;
pub mod console;
pub mod credentials;
pub mod error;
pub mod netrc;
pub mod stdin;
pub mod timezone;

pub use console::ConsoleOutput;
pub use credentials::{get_credentials, CredentialResolver, Credentials, SecretPrompt};
pub use error::{Result, TimewolfError};
pub use stdin::{read_from_stdin, PathName};
pub use timezone::is_valid_timezone;
