//! # fivedraw CLI Library
//!
//! Command-line front end for the five-card-draw video poker engine.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive session (Enter to deal/draw, 1-5 to hold, +/- to bet)
//! - `deal`: Deal a single hand for inspection
//! - `eval`: Rank five cards given on the command line
//! - `paytable`: Show the paytable
//! - `cfg`: Display current configuration settings
//! - `rng`: Inspect the seeded RNG and deck order

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, FivedrawCli};
use commands::{
    PlayOptions, handle_cfg_command, handle_deal_command, handle_eval_command,
    handle_paytable_command, handle_play_command, handle_rng_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "deal", "eval", "paytable", "cfg", "rng"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["fivedraw", "deal", "--seed", "42"];
/// let code = fivedraw_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn std::io::BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match FivedrawCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_usage(e, out, err),
    };
    logging::init_logging(cli.verbose);
    tracing::debug!(command = cli.cmd.name(), "dispatching");

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play {
            seed,
            animate,
            speed,
            history,
        } => resolve_play_options(seed, animate, speed, history, err)
            .and_then(|opts| handle_play_command(opts, out, err, input)),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out, err),
        Commands::Paytable { bet } => handle_paytable_command(bet, out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        // already reported by the handler
        Err(CliError::InvalidInput(_)) | Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

/// Merge command-line flags over the resolved configuration.
fn resolve_play_options(
    seed: Option<u64>,
    animate: bool,
    speed: Option<u32>,
    history: Option<String>,
    err: &mut dyn Write,
) -> Result<PlayOptions, CliError> {
    let cfg = match config::load_with_sources() {
        Ok(r) => r.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    let speed = match validation::validate_speed(speed.unwrap_or(cfg.speed)) {
        Ok(s) => s,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };
    Ok(PlayOptions {
        seed: seed.or(cfg.seed),
        animate: animate || cfg.animate,
        speed,
        history: history.or(cfg.history),
    })
}

fn report_usage(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "fivedraw video poker");
            write_or_exit!(err, "Usage: fivedraw <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: fivedraw --help");
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn run_args(args: &[&str], input: &str) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let code = run_with_input(args, &mut out, &mut err, &mut stdin);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_cli_parses_every_subcommand() {
        let commands = vec![
            vec!["fivedraw", "play"],
            vec!["fivedraw", "play", "--seed", "1", "--animate", "--speed", "200"],
            vec!["fivedraw", "deal"],
            vec!["fivedraw", "eval", "AS", "KS", "QS", "JS", "10S"],
            vec!["fivedraw", "paytable"],
            vec!["fivedraw", "cfg"],
            vec!["fivedraw", "rng", "--seed", "3"],
            vec!["fivedraw", "--verbose", "deal"],
        ];
        for cmd_args in commands {
            let result = FivedrawCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn test_speed_range_is_enforced_by_clap() {
        assert!(FivedrawCli::try_parse_from(["fivedraw", "play", "--speed", "0"]).is_err());
        assert!(FivedrawCli::try_parse_from(["fivedraw", "play", "--speed", "1001"]).is_err());
        assert!(FivedrawCli::try_parse_from(["fivedraw", "play", "--speed", "1000"]).is_ok());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, _, err) = run_args(&["fivedraw", "bogus"], "");
        assert_eq!(code, exit_code::ERROR);
        for c in COMMANDS {
            assert!(err.contains(c));
        }
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, _) = run_args(&["fivedraw", "--help"], "");
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("Usage"));
    }

    #[test]
    #[serial]
    fn test_play_flags_override_config() {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var("FIVEDRAW_SEED", "5") };
        let mut err = Vec::new();
        let opts = resolve_play_options(Some(8), false, None, None, &mut err).unwrap();
        assert_eq!(opts.seed, Some(8));
        let opts = resolve_play_options(None, false, None, None, &mut err).unwrap();
        assert_eq!(opts.seed, Some(5));
        unsafe { std::env::remove_var("FIVEDRAW_SEED") };
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_failure_maps_to_error_exit_code() {
        let mut err = Vec::new();
        let mut stdin = Cursor::new(Vec::new());
        let code = run_with_input(["fivedraw", "deal", "--seed", "1"], &mut BrokenPipe, &mut err, &mut stdin);
        assert_eq!(code, exit_code::ERROR);
        assert!(String::from_utf8(err).unwrap().starts_with("Error: I/O error"));
    }

    #[test]
    fn test_eval_error_exit_code() {
        let (code, out, err) = run_args(&["fivedraw", "eval", "AS", "KS"], "");
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(err.contains("expected 5 cards"));
    }
}
