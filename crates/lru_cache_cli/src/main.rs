use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use lru_cache::{
    ExpectationMismatch, ReplayError, Script, ScriptError, parse_script, replay_with_mismatches,
    validate_script,
};
use serde_json::json;

#[derive(Parser)]
#[command(name = "lru-cache")]
#[command(version, about = "Validate and replay LRU cache operation scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Validate(ValidateArgs),
    Replay(ReplayArgs),
}

#[derive(Args)]
struct ValidateArgs {
    #[arg(short = 's', long)]
    script: PathBuf,
    #[arg(short = 'e', long, default_value = "text")]
    error_format: ErrorFormat,
}

#[derive(Args)]
struct ReplayArgs {
    #[arg(short = 's', long)]
    script: PathBuf,
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    #[arg(short = 'v', long)]
    validate: bool,
    #[arg(short = 'e', long, default_value = "text")]
    error_format: ErrorFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ErrorFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::Replay(args) => run_replay(args),
    };
    std::process::exit(exit_code);
}

fn run_validate(args: ValidateArgs) -> i32 {
    let script = match load_script(&args.script) {
        Ok(value) => value,
        Err(code) => return code,
    };

    match validate_script(&script) {
        Ok(()) => 0,
        Err(errors) => {
            emit_validation_errors(&errors, args.error_format);
            2
        }
    }
}

fn run_replay(args: ReplayArgs) -> i32 {
    let script = match load_script(&args.script) {
        Ok(value) => value,
        Err(code) => return code,
    };

    if args.validate {
        if let Err(errors) = validate_script(&script) {
            emit_validation_errors(&errors, args.error_format);
            return 2;
        }
    }

    let (output, mismatches) = match replay_with_mismatches(&script) {
        Ok(result) => result,
        Err(err) => {
            emit_replay_error(&err, args.error_format);
            return 3;
        }
    };

    let output_text = match serde_json::to_string(&output) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to serialize output JSON: {}", err);
            return 1;
        }
    };

    emit_mismatches(&mismatches, args.error_format);

    if let Some(path) = args.output {
        if let Err(err) = write_output(&path, &output_text) {
            eprintln!("failed to write output: {}", err);
            return 1;
        }
    } else {
        println!("{}", output_text);
    }

    if mismatches.is_empty() { 0 } else { 4 }
}

fn load_script(path: &Path) -> Result<Script, i32> {
    let yaml = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to read script: {}", err);
            return Err(1);
        }
    };

    match parse_script(&yaml) {
        Ok(script) => Ok(script),
        Err(err) => {
            eprintln!("failed to parse script: {}", err);
            Err(1)
        }
    }
}

fn write_output(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text.as_bytes())
}

fn emit_validation_errors(errors: &[ScriptError], format: ErrorFormat) {
    match format {
        ErrorFormat::Text => {
            for err in errors {
                let mut parts = Vec::new();
                parts.push(format!("E {}", err.code.as_str()));
                if let Some(path) = &err.path {
                    parts.push(format!("path={}", path));
                }
                parts.push(format!("msg=\"{}\"", err.message));
                eprintln!("{}", parts.join(" "));
            }
        }
        ErrorFormat::Json => {
            let values: Vec<_> = errors.iter().map(validation_error_json).collect();
            eprintln!("{}", serde_json::to_string(&values).unwrap_or_default());
        }
    }
}

fn validation_error_json(err: &ScriptError) -> serde_json::Value {
    let mut value = json!({
        "type": "validation",
        "code": err.code.as_str(),
        "message": err.message,
    });
    if let Some(path) = &err.path {
        value["path"] = json!(path);
    }
    value
}

fn emit_replay_error(err: &ReplayError, format: ErrorFormat) {
    match format {
        ErrorFormat::Text => {
            let mut parts = Vec::new();
            parts.push(format!("E {}", err.kind.as_str()));
            if let Some(path) = &err.path {
                parts.push(format!("path={}", path));
            }
            parts.push(format!("msg=\"{}\"", err.message));
            eprintln!("{}", parts.join(" "));
        }
        ErrorFormat::Json => {
            let mut value = json!({
                "type": "replay",
                "kind": err.kind.as_str(),
                "message": err.message,
            });
            if let Some(path) = &err.path {
                value["path"] = json!(path);
            }
            eprintln!("{}", serde_json::to_string(&vec![value]).unwrap_or_default());
        }
    }
}

fn emit_mismatches(mismatches: &[ExpectationMismatch], format: ErrorFormat) {
    if mismatches.is_empty() {
        return;
    }

    match format {
        ErrorFormat::Text => {
            for mismatch in mismatches {
                eprintln!(
                    "W ExpectationMismatch step={} path={} msg=\"{}\"",
                    mismatch.step, mismatch.path, mismatch.message
                );
            }
        }
        ErrorFormat::Json => {
            let values: Vec<_> = mismatches
                .iter()
                .map(|mismatch| {
                    json!({
                        "type": "mismatch",
                        "step": mismatch.step,
                        "path": mismatch.path,
                        "message": mismatch.message,
                    })
                })
                .collect();
            eprintln!("{}", serde_json::to_string(&values).unwrap_or_default());
        }
    }
}
