//! faceswap-check: verify a deployment before starting the server.
//!
//! Exits non-zero when any check fails.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use faceswap_cli::{init_tracing, run_checks, CheckOptions};
use faceswap_core::config::DEFAULT_STATIC_ROOT;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "faceswap-check")]
#[command(about = "Check that a face swap deployment is ready to run")]
struct Args {
    /// Directory holding generated, templates_gallery and user_uploads
    #[arg(long, env = "STATIC_ROOT", default_value = DEFAULT_STATIC_ROOT)]
    static_root: PathBuf,

    /// Path of the dotenv file the server loads
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Create missing static directories
    #[arg(long)]
    create: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let options = CheckOptions {
        static_root: args.static_root,
        env_file: args.env_file,
        create: args.create,
    };
    let report = run_checks(&options, |key| std::env::var(key).ok())?;

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&report).context("Serialize report")?;
            println!("{}", out);
        }
        OutputFormat::Text => print!("{}", report.render_text()),
    }

    Ok(if report.ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
