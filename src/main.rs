//! `sarissa-analyze` binary: assemble an analyze request from the command line.
//!
//! Failures are logged as `[ERROR] ...` and the process exits with 2 when
//! the request was rejected, 1 otherwise.

use std::error::Error;
use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, error};

use sarissa_analyze::cli::{AnalyzeArgs, execute_command, exit_code};

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// The error followed by its chain of causes, e.g. the syntax error behind
/// "Failed to parse request body".
fn describe(e: &dyn Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

fn main() {
    let args = AnalyzeArgs::parse();

    Builder::new()
        .filter_level(log_level(args.verbosity()))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        error!("{}", describe(&e));
        process::exit(exit_code(&e));
    }
}
