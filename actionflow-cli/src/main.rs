use std::path::Path;
use std::process;
use std::time::Duration;

use actionflow::{Orchestrator, OrchestratorConfig, TraceFormat, TERMINATED_SUCCESSFULLY};
use actionflow_cli::cli::{Cli, Commands, DEFAULT_INPUTS};
use actionflow_cli::demo::run_demo;
use actionflow_cli::error::{handle_cli_result, CliResult};
use actionflow_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WORKFLOW_FAILED};
use actionflow_cli::samples::{Latency, Wiring};
use anyhow::Context;
use clap::CommandFactory;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {e}");
            process::exit(EXIT_ERROR);
        }
        process::exit(EXIT_SUCCESS);
    };

    let log_level = if cli.quiet {
        "error"
    } else if cli.debug {
        "debug"
    } else if cli.verbose {
        "trace"
    } else {
        "info"
    };

    // RUST_LOG takes precedence over the verbosity flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config_path = cli.config.as_deref();
    let result = match command {
        Commands::Run {
            format,
            max_delay_ms,
            seed,
            inputs,
        } => {
            tracing::debug!("Running demo workflow");
            run_workflow(config_path, format, max_delay_ms, seed, inputs)
        }
        Commands::Config => {
            tracing::debug!("Printing effective configuration");
            print_config(config_path)
        }
    };

    process::exit(handle_cli_result(result));
}

fn load_config(path: Option<&Path>) -> anyhow::Result<OrchestratorConfig> {
    match path {
        Some(path) => OrchestratorConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let config = OrchestratorConfig::from_env();
            config
                .validate()
                .context("Invalid configuration in ACTIONFLOW_* environment variables")?;
            Ok(config)
        }
    }
}

fn run_workflow(
    config_path: Option<&Path>,
    format: TraceFormat,
    max_delay_ms: u64,
    seed: Option<u64>,
    inputs: Vec<String>,
) -> CliResult<i32> {
    let config = load_config(config_path)?;
    let mut orchestrator =
        Orchestrator::with_config(config).context("Failed to create orchestrator")?;
    tracing::info!("Starting workflow run {}", orchestrator.run_id());

    let wiring = Wiring::new(Latency::new(Duration::from_millis(max_delay_ms), seed));
    let inputs = if inputs.is_empty() {
        DEFAULT_INPUTS.iter().map(|s| s.to_string()).collect()
    } else {
        inputs
    };

    let summary = run_demo(&mut orchestrator, &wiring, &inputs);
    let trace = orchestrator
        .render_history_as(format, summary.final_success)
        .context("Failed to render trace")?;

    print_trace(&trace, format);

    if summary.final_success {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_WORKFLOW_FAILED)
    }
}

fn print_trace(trace: &str, format: TraceFormat) {
    if format != TraceFormat::Text || !Cli::should_use_color() {
        println!("{trace}");
        return;
    }

    // Only the terminal line is coloured
    match trace.rsplit_once('\n') {
        Some((steps, terminal)) => {
            let terminal = if terminal == TERMINATED_SUCCESSFULLY {
                terminal.green()
            } else {
                terminal.red()
            };
            println!("{steps}\n{terminal}");
        }
        None => println!("{trace}"),
    }
}

fn print_config(config_path: Option<&Path>) -> CliResult<i32> {
    let config = load_config(config_path)?;
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
    print!("{yaml}");
    Ok(EXIT_SUCCESS)
}
