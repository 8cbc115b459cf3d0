//! The `timewolf` binary: a thin command-line client over the library.
//!
//! All parsing and dispatch lives in `cli/`; this file only runs it and turns
//! an error into exit status 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
