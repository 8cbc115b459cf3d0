//! # CLI
//!
//! The only part of timewolf that parses arguments and decides exit codes.
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup (config + console) and per-command handlers
//! - `render`: line formatting for command output

mod commands;
mod render;
mod setup;

pub use commands::run;
