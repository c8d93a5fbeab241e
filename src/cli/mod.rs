//! The `sarissa-analyze` command line: argument definitions, the `build`
//! command and result rendering.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{AnalyzeArgs, BuildArgs, Command, OutputFormat};
pub use commands::{assemble, execute_command, exit_code};
pub use output::{format_value, output_result};
