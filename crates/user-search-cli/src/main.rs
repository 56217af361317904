// crates/user-search-cli/src/main.rs
// ============================================================================
// Module: User Search CLI Entry Point
// Description: Command dispatcher for session scripts, catalog, and config.
// Purpose: Drive the form-state engine from the command line.
// Dependencies: clap, serde, serde_json, thiserror, user-search-{cli,config,core}
// ============================================================================

//! ## Overview
//! `user-search run` replays a JSON session script against an engine built
//! from configuration and prints a JSON report. `catalog` prints the effective
//! category-to-field mapping and `config` validates or prints configuration.
//! Inputs are untrusted: scripts and configs are size-limited before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use thiserror::Error;
use user_search_cli::Script;
use user_search_cli::ScriptReport;
use user_search_cli::run_script;
use user_search_cli::script::MAX_SCRIPT_BYTES;
use user_search_config::CONFIG_ENV_VAR;
use user_search_config::DEFAULT_CONFIG_NAME;
use user_search_config::UserSearchConfig;
use user_search_config::config_toml_example;
use user_search_core::FormEvent;
use user_search_core::FormEventSink;
use user_search_core::FormStateEngine;
use user_search_core::MemoryEventSink;
use user_search_core::TeeEventSink;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "user-search", disable_help_subcommand = true, version)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a session script and print the outcome.
    Run(RunCommand),
    /// Print the effective category catalog as JSON.
    Catalog(CatalogCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Session script path (JSON).
    #[arg(long, value_name = "PATH")]
    script: PathBuf,
    /// Optional config file path (defaults to user-search.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Include every form event in the report, alongside the configured sink.
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,
}

/// Arguments for the `catalog` command.
#[derive(Args, Debug)]
struct CatalogCommand {
    /// Optional config file path (defaults to user-search.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a user search configuration file.
    Validate(ConfigValidateCommand),
    /// Print an annotated configuration file.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to user-search.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// JSON document printed by `run`.
#[derive(Debug, Serialize)]
struct RunOutput {
    /// Script outcome.
    #[serde(flatten)]
    report: ScriptReport,
    /// Recorded events when tracing.
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<FormEvent>>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a printable message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::Catalog(command) => command_catalog(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let bytes = read_bytes_with_limit(&command.script, MAX_SCRIPT_BYTES).map_err(|err| {
        CliError::new(format!("failed to read script {}: {err}", command.script.display()))
    })?;
    let script = Script::from_json(&bytes).map_err(|err| CliError::new(err.to_string()))?;
    let config = load_config(command.config.as_deref())?;
    let catalog = config
        .build_catalog()
        .map_err(|err| CliError::new(format!("failed to build engine: {err}")))?;
    let validators = config.build_validators(&catalog);
    let configured = config
        .build_event_sink()
        .map_err(|err| CliError::new(format!("failed to open event sink: {err}")))?;
    let trace = command.trace.then(|| Arc::new(MemoryEventSink::new()));
    let sink: Arc<dyn FormEventSink> = match &trace {
        Some(memory) => {
            let traced: Arc<dyn FormEventSink> = memory.clone();
            Arc::new(TeeEventSink::new(vec![configured, traced]))
        }
        None => configured,
    };
    let mut engine =
        FormStateEngine::new(catalog).with_validators(validators).with_event_sink(sink);

    let report = run_script(&mut engine, &script);
    let passed = report.passed;
    let output = RunOutput {
        report,
        events: trace.map(|sink| sink.events()),
    };
    write_json(&output)?;
    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Catalog Command
// ============================================================================

/// Executes the `catalog` command.
fn command_catalog(command: &CatalogCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let catalog = config
        .build_catalog()
        .map_err(|err| CliError::new(format!("failed to build catalog: {err}")))?;
    write_json(&catalog)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => {
            write_stdout_line(config_toml_example().trim_end())
                .map_err(|err| CliError::new(output_error(&err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = UserSearchConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("Config valid").map_err(|err| CliError::new(output_error(&err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration, falling back to defaults when no file is in play.
///
/// Defaults apply only when no path was given, the environment override is
/// unset, and `user-search.toml` does not exist in the working directory.
fn load_config(path: Option<&Path>) -> CliResult<UserSearchConfig> {
    if path.is_none()
        && env::var_os(CONFIG_ENV_VAR).is_none()
        && !Path::new(DEFAULT_CONFIG_NAME).exists()
    {
        return Ok(UserSearchConfig::default());
    }
    UserSearchConfig::load(path).map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors raised while reading size-limited inputs.
#[derive(Debug, Error)]
enum ReadLimitError {
    /// Underlying I/O failure.
    #[error("{0}")]
    Io(std::io::Error),
    /// Input exceeds the configured limit.
    #[error("file exceeds size limit: {size} bytes (max {limit})")]
    TooLarge {
        /// Size encountered.
        size: u64,
        /// Maximum accepted size.
        limit: usize,
    },
}

/// Reads a file, refusing anything larger than `max_bytes`.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    write_stdout_line(&output).map_err(|err| CliError::new(output_error(&err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a stdout write failure.
fn output_error(error: &std::io::Error) -> String {
    format!("failed to write to stdout: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
