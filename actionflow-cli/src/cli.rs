use actionflow::TraceFormat;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::io;
use std::path::PathBuf;

/// Inputs the demo iterates over when none are given
pub const DEFAULT_INPUTS: [&str; 3] = ["alpha", "beta", "gamma"];

#[derive(Parser, Debug)]
#[command(name = "actionflow")]
#[command(version)]
#[command(about = "Run traced workflows of fallible actions")]
#[command(long_about = "
actionflow runs a demo workflow built from sample actions that succeed or
fail after a random delay, then prints the trace of every step.

Example usage:
  actionflow run                         # Run the demo and print a text trace
  actionflow run --format mermaid        # Print the trace as a Mermaid flowchart
  actionflow --config flow.yaml config   # Show the effective configuration
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// YAML configuration file (overrides ACTIONFLOW_* environment variables)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demo workflow and print its trace
    #[command(long_about = "
Runs the demo workflow: an action with input, a failing action matched to a
fallback, two chained binds, a branch, a secret lookup and an iteration over
the given inputs. The trace is printed to stdout.

Exits with 0 when the workflow terminates successfully and 1 otherwise.

Examples:
  actionflow run --max-delay-ms 0 --seed 42
  actionflow run --input one,two --format json
")]
    Run {
        /// Trace output format: text, mermaid or json
        #[arg(long, default_value_t = TraceFormat::Text, value_name = "FORMAT")]
        format: TraceFormat,

        /// Upper bound of the random delay each sample action sleeps for
        #[arg(long, default_value_t = 250, value_name = "MILLIS")]
        max_delay_ms: u64,

        /// Seed for the random delays
        #[arg(long)]
        seed: Option<u64>,

        /// Comma separated inputs for the iteration step
        #[arg(long = "input", value_delimiter = ',', value_name = "INPUTS")]
        inputs: Vec<String>,
    },
    /// Print the effective configuration as YAML
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::try_parse_from_args(["actionflow"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_run_defaults() {
        let cli = Cli::try_parse_from_args(["actionflow", "run"]).unwrap();
        match cli.command {
            Some(Commands::Run {
                format,
                max_delay_ms,
                seed,
                inputs,
            }) => {
                assert_eq!(format, TraceFormat::Text);
                assert_eq!(max_delay_ms, 250);
                assert_eq!(seed, None);
                assert!(inputs.is_empty());
            }
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_run_with_options() {
        let cli = Cli::try_parse_from_args([
            "actionflow",
            "run",
            "--format",
            "mermaid",
            "--max-delay-ms",
            "0",
            "--seed",
            "7",
            "--input",
            "one,two",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run {
                format,
                max_delay_ms,
                seed,
                inputs,
            }) => {
                assert_eq!(format, TraceFormat::Mermaid);
                assert_eq!(max_delay_ms, 0);
                assert_eq!(seed, Some(7));
                assert_eq!(inputs, ["one", "two"]);
            }
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_config_flag_is_global() {
        let cli = Cli::try_parse_from_args(["actionflow", "config", "--config", "flow.yaml"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Config)));
        assert_eq!(cli.config, Some(PathBuf::from("flow.yaml")));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from_args(["actionflow", "run", "--format", "dot"]);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unknown trace format 'dot'"));
    }

    #[test]
    fn test_cli_format_is_case_insensitive() {
        let cli = Cli::try_parse_from_args(["actionflow", "run", "--format", "JSON"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Run {
                format: TraceFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from_args(["actionflow", "--verbose", "run"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
