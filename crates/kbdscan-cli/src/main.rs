//! kbdscan CLI: show raw console keyboard scancodes.
//!
//! Switches the console on standard input to raw scancode mode, prints
//! every key press and release, and restores the console after five
//! seconds without a key event.

// CLI-specific lint allowances (CLI binary, not library)
#![allow(missing_docs)]
#![allow(clippy::print_stderr)] // CLI must print diagnostics to stderr
#![allow(clippy::exit)] // CLI uses exit codes

use clap::Parser;
use kbdscan::device::Console;
use kbdscan::error::{ErrorCode, USAGE_EXIT_CODE};
use kbdscan::model::{ScanConfig, DEFAULT_TIMEOUT};
use kbdscan::session::run_session;
use kbdscan::signal::TerminationListener;
use std::io;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Fixed log filter; logging is not configurable from the environment.
const LOG_FILTER: &str = "kbdscan=info,kbdscan_cli=info";

#[derive(Debug, Parser)]
#[command(
    name = "kbdscan",
    version,
    about = "Show raw console keyboard scancodes",
    long_about = long_about(),
    after_help = exit_codes_help()
)]
struct Cli {}

fn long_about() -> String {
    format!(
        "Show raw console keyboard scancodes.\n\n\
         Puts the console keyboard on standard input into raw scancode mode and \
         prints one line per key press or release. After {} seconds without a key \
         event, or on SIGINT/SIGTERM/SIGHUP, the original terminal settings and \
         keyboard mode are restored. Only works on a virtual console.",
        DEFAULT_TIMEOUT.as_secs()
    )
}

fn exit_codes_help() -> String {
    let mut help = format!(
        "Exit codes:\n  0 (success): timeout or termination signal\n  {USAGE_EXIT_CODE} (usage): invalid command line\n"
    );
    for code in ErrorCode::ALL {
        let info = code.info();
        help.push_str(&format!(
            "  {} ({}): {}\n",
            info.exit_code,
            code.as_str(),
            info.description
        ));
    }
    help
}

/// Configure miette's reporting based on whether stderr supports color.
fn configure_colors() {
    let use_color = supports_color::on(supports_color::Stream::Stderr).is_some();
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .color(use_color)
                .unicode(use_color)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(LOG_FILTER))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() {
    let _cli = Cli::parse();
    configure_colors();
    init_tracing();

    let mut console = Console::stdin();
    match TerminationListener::install() {
        Ok(listener) => console = console.with_termination(listener),
        Err(err) => warn!(error = %err, "termination signals will not restore the console"),
    }

    let report = {
        let stdout = io::stdout();
        let mut output = stdout.lock();
        run_session(console, &mut output, &ScanConfig::default())
    };

    let exit_code = report.exit_code();
    if let Err(err) = report.outcome {
        eprintln!("{:?}", miette::Report::new(err));
    }
    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn exit_codes_help_lists_every_code() {
        let help = exit_codes_help();
        for code in ErrorCode::ALL {
            assert!(help.contains(code.as_str()), "missing {}", code.as_str());
        }
        assert!(help.contains("2 (usage)"));
    }
}
