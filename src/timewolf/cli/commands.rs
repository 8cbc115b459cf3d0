//! Command dispatch for the `timewolf` binary.
//!
//! `run()` loads the configuration, applies command-line overrides, builds the
//! [`ConsoleOutput`] every handler writes through, and dispatches. Handlers
//! return errors to `main`, except where the console's fatal path is the
//! intended way out (malformed stdin, unknown timezones, `say --die`).

use super::render::{path_name_line, timezone_verdict};
use super::setup::{Cli, Commands};
use clap::Parser;
use timewolf::config::TimewolfConfig;
use timewolf::console::ConsoleOutput;
use timewolf::credentials::{CredentialResolver, TerminalPrompt};
use timewolf::error::{Result, TimewolfError};
use timewolf::stdin::read_from_stdin;
use timewolf::timezone::{all_timezones, is_valid_timezone};

struct AppContext {
    config: TimewolfConfig,
    console: ConsoleOutput,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Say {
            message,
            err,
            die,
            verbose_only,
        } => handle_say(&mut ctx, &message, err, die, verbose_only),
        Commands::Tz { names, list } => handle_tz(&mut ctx, &names, list),
        Commands::Read => handle_read(&mut ctx),
        Commands::Credentials { host, user } => handle_credentials(&mut ctx, &user, &host),
        Commands::Config => handle_config(&mut ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = TimewolfConfig::default_dir()?;
    let mut config = TimewolfConfig::load(&config_dir)?;

    if let Some(sender) = &cli.sender {
        config.sender = sender.clone();
    }
    if let Some(program_name) = &cli.program_name {
        config.program_name = Some(program_name.clone());
    }
    if let Some(netrc) = &cli.netrc {
        config.netrc_path = Some(netrc.clone());
    }
    config.verbose |= cli.verbose;

    let mut console = ConsoleOutput::new(config.sender.clone(), config.verbose);
    if let Some(program_name) = &config.program_name {
        console = console.with_program_name(program_name.clone());
    }
    console.verbose_out(&format!(
        "Using configuration directory {}",
        config_dir.display()
    ))?;

    Ok(AppContext { config, console })
}

fn handle_say(
    ctx: &mut AppContext,
    message: &str,
    err: bool,
    die: bool,
    verbose_only: bool,
) -> Result<()> {
    if verbose_only {
        ctx.console.verbose_out(message)
    } else if err || die {
        ctx.console.std_err(message, die)
    } else {
        ctx.console.std_out(message)
    }
}

fn handle_tz(ctx: &mut AppContext, names: &[String], list: bool) -> Result<()> {
    if list {
        for name in all_timezones() {
            ctx.console.std_out(name)?;
        }
    }

    let mut unknown = 0;
    for name in names {
        let valid = is_valid_timezone(name);
        if !valid {
            unknown += 1;
        }
        ctx.console.std_out(&timezone_verdict(name, valid))?;
    }

    if unknown > 0 {
        ctx.console
            .std_err(&format!("{} unknown timezone name(s)", unknown), true)?;
    }
    Ok(())
}

fn handle_read(ctx: &mut AppContext) -> Result<()> {
    let mut count = 0;
    for record in read_from_stdin() {
        match record {
            Ok(pair) => {
                ctx.console.std_out(&path_name_line(&pair))?;
                count += 1;
            }
            Err(e @ TimewolfError::MalformedInput) => {
                ctx.console.std_err(&e.to_string(), true)?;
            }
            Err(e) => return Err(e),
        }
    }
    ctx.console
        .verbose_out(&format!("Read {} record(s) from stdin", count))
}

fn handle_credentials(ctx: &mut AppContext, user: &str, host: &str) -> Result<()> {
    let mut resolver = CredentialResolver::new(TerminalPrompt)
        .with_prompt_text(ctx.config.password_prompt.clone());
    if let Some(path) = &ctx.config.netrc_path {
        resolver = resolver.with_netrc_path(path.clone());
    }

    if let Some(path) = resolver.netrc_path() {
        ctx.console
            .verbose_out(&format!("Looking up {} in {}", host, path.display()))?;
    }
    let credentials = resolver.get_credentials(user, host)?;
    ctx.console.std_out(&credentials.username)
}

fn handle_config(ctx: &mut AppContext) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&ctx.config)?;
    ctx.console.std_out(&rendered)
}
