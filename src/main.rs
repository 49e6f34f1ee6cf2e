use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use labsight::{config, LabReportPipeline, SexCategory};

/// Summarize a plain-text lab report as JSON.
#[derive(Parser, Debug)]
#[command(name = "labsight", version, about)]
struct Cli {
    /// Report text file. Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Sex category used for reference ranges (male, female, all).
    #[arg(long, default_value = "all")]
    sex: SexCategory,

    /// Patient age in years (advisory only).
    #[arg(long)]
    age: Option<u32>,

    /// JSON rule file overriding the builtin tables.
    #[arg(long, env = config::RULES_ENV_VAR)]
    rules: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn read_report(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read report from stdin")?;
            Ok(text)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let rules = config::load_rules(cli.rules.as_deref()).context("failed to load rules")?;
    let report = read_report(cli.input.as_ref())?;

    let pipeline = LabReportPipeline::new(rules);
    let result = pipeline.run(&report, cli.sex, cli.age);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(result.is_success())
}

fn main() -> ExitCode {
    labsight::init_tracing();
    let cli = Cli::parse();
    tracing::debug!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
