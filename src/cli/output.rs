//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{AnalyzeArgs, OutputFormat};
use crate::error::Result;

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &AnalyzeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Yaml => output_yaml(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &AnalyzeArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!("{}", "═".repeat(message.chars().count()));
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in &obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(&value)),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &AnalyzeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Output in YAML format.
fn output_yaml<T: Serialize>(result: &T, _args: &AnalyzeArgs) -> Result<()> {
    let yaml = serde_yaml::to_string(result)?;
    print!("{yaml}");
    Ok(())
}

/// Format a value on one line.
pub fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => value.to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}
