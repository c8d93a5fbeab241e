//! Command implementations for the sarissa-analyze CLI.

use std::fs;

use log::info;

use crate::analysis::AnalyzeRequest;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnalyzeConfig;
use crate::error::{AnalyzeError, Result};
use crate::rest::{RequestParams, RestAnalyzeAction, RestRequest};

/// Execute a CLI command.
pub fn execute_command(args: AnalyzeArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build_request(build_args.clone(), &args),
    }
}

/// Process exit status for a failed command: 2 when the request itself was
/// rejected, 1 for everything else (configuration, I/O, output).
pub fn exit_code(error: &AnalyzeError) -> i32 {
    if error.is_bad_request() { 2 } else { 1 }
}

/// Assemble an analyze request and print it.
fn build_request(args: BuildArgs, cli_args: &AnalyzeArgs) -> Result<()> {
    let request = assemble(&args, cli_args)?;
    output_result("Analyze request", &request, cli_args)
}

/// Assemble the request described by the command line.
pub fn assemble(args: &BuildArgs, cli_args: &AnalyzeArgs) -> Result<AnalyzeRequest> {
    let config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            AnalyzeConfig::from_file(path)?
        }
        None => AnalyzeConfig::default(),
    };
    let config = if args.strict {
        config.with_strict_field_matching(true)
    } else {
        config
    };

    let mut params = RequestParams::from_query_string(&args.query);
    if let Some(index) = &args.index {
        params = params.with_path_param("index", index.as_str());
    }

    let mut rest_request = RestRequest::new(params);
    if let Some(path) = &args.body {
        info!("Reading request body from: {}", path.display());
        rest_request = rest_request.with_body(fs::read(path)?);
    } else if let Some(body) = &args.body_text {
        rest_request = rest_request.with_body(body.as_str());
    }
    if let Some(content_type) = &args.content_type {
        rest_request = rest_request.with_content_type(content_type.as_str());
    }

    RestAnalyzeAction::new(config).prepare_request(&rest_request)
}
