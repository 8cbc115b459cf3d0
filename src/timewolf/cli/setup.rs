use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "timewolf", bin_name = "timewolf", version)]
#[command(about = "Console, stdin, timezone and credential helpers for acquisition tooling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sender label for formatted messages
    #[arg(long, global = true, help_heading = "Options")]
    pub sender: Option<String>,

    /// Program name shown in formatted messages
    #[arg(long, global = true, help_heading = "Options")]
    pub program_name: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Credential store to use instead of ~/.netrc
    #[arg(long, global = true, help_heading = "Options")]
    pub netrc: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit a message through the console channel
    Say {
        message: String,

        /// Send a formatted line to stderr instead of raw stdout
        #[arg(long)]
        err: bool,

        /// Report the message as fatal and exit
        #[arg(long, conflicts_with = "verbose_only")]
        die: bool,

        /// Only emit when running verbose
        #[arg(long, conflicts_with = "err")]
        verbose_only: bool,
    },

    /// Check timezone names against the bundled zone table
    #[command(alias = "timezone")]
    Tz {
        /// Names to check (e.g. America/New_York)
        #[arg(required_unless_present = "list")]
        names: Vec<String>,

        /// Print every known timezone name
        #[arg(long)]
        list: bool,
    },

    /// Read `<path> <name>` records from stdin and echo them tab-separated
    Read,

    /// Resolve credentials for a host, printing only the username
    #[command(alias = "creds")]
    Credentials {
        /// Host to look up in the credential store
        host: String,

        /// Username to use when the store has no entry
        #[arg(short, long)]
        user: String,
    },

    /// Show the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_say_with_globals() {
        let cli = Cli::try_parse_from([
            "timewolf", "--sender", "collector", "-v", "say", "--err", "hello",
        ])
        .unwrap();

        assert_eq!(cli.sender.as_deref(), Some("collector"));
        assert!(cli.verbose);
        match cli.command {
            Commands::Say {
                message, err, die, ..
            } => {
                assert_eq!(message, "hello");
                assert!(err);
                assert!(!die);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_tz_requires_names_or_list() {
        assert!(Cli::try_parse_from(["timewolf", "tz"]).is_err());
        assert!(Cli::try_parse_from(["timewolf", "tz", "--list"]).is_ok());
        assert!(Cli::try_parse_from(["timewolf", "tz", "UTC", "Europe/Paris"]).is_ok());
    }

    #[test]
    fn test_credentials_requires_user() {
        assert!(Cli::try_parse_from(["timewolf", "credentials", "example.com"]).is_err());

        let cli =
            Cli::try_parse_from(["timewolf", "creds", "example.com", "--user", "bob"]).unwrap();
        match cli.command {
            Commands::Credentials { host, user } => {
                assert_eq!(host, "example.com");
                assert_eq!(user, "bob");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_die_conflicts_with_verbose_only() {
        assert!(
            Cli::try_parse_from(["timewolf", "say", "--die", "--verbose-only", "x"]).is_err()
        );
    }
}
