// crates/contact-book-cli/src/main.rs
// ============================================================================
// Module: Contact Book CLI Entry Point
// Description: Command dispatcher for serving, seeding, and config tasks.
// Purpose: Provide the `contact-book` binary.
// Dependencies: clap, contact-book-{core, config, store-sqlite, web}, rand, tokio
// ============================================================================

//! ## Overview
//! The `contact-book` binary serves the contact book over HTTP, seeds a
//! `SQLite` store with synthetic contacts, and validates or prints
//! configuration. All user-facing strings are routed through the message
//! catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use contact_book_cli::seed::DEFAULT_SEED_COUNT;
use contact_book_cli::seed::seed_contacts;
use contact_book_cli::t;
use contact_book_config::ContactBookConfig;
use contact_book_config::config_toml_example;
use contact_book_core::ContactRepository;
use contact_book_store_sqlite::SqliteContactStore;
use contact_book_web::ContactServer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contact-book", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the contact book HTTP server.
    Serve(ServeCommand),
    /// Insert synthetic contacts into the configured store.
    Seed(SeedCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to contact-book.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `seed` command.
#[derive(Args, Debug)]
struct SeedCommand {
    /// Optional config file path (defaults to contact-book.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of contacts to insert.
    #[arg(
        long,
        default_value_t = DEFAULT_SEED_COUNT,
        value_parser = clap::value_parser!(u32).range(1..=100_000)
    )]
    count: u32,
    /// Delete every existing contact and restart identifiers first.
    #[arg(long, action = ArgAction::SetTrue)]
    reset: bool,
    /// Fixed RNG seed for reproducible data.
    #[arg(long, value_name = "SEED")]
    rng_seed: Option<u64>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
    /// Print an annotated example config.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to contact-book.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
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
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Seed(command) => command_seed(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = ContactBookConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;

    let server = tokio::task::spawn_blocking(move || ContactServer::from_config(&config))
        .await
        .map_err(|err| {
            CliError::new(t!("serve.init_failed", error = format!("init join failed: {err}")))
        })?
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    write_stderr_line(&t!("serve.listening", bind = server.bind_addr()))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server.serve().await.map_err(|err| CliError::new(t!("serve.failed", error = err)))?;

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Seed Command
// ============================================================================

/// Executes the `seed` command.
fn command_seed(command: &SeedCommand) -> CliResult<ExitCode> {
    let config = ContactBookConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let Some(sqlite) = config.store.sqlite() else {
        return Err(CliError::new(t!("seed.memory_store")));
    };
    let path = sqlite.path.display().to_string();
    let store = SqliteContactStore::new(&sqlite)
        .map_err(|err| CliError::new(t!("seed.open_failed", path = path, error = err)))?;

    if command.reset {
        let removed =
            store.reset().map_err(|err| CliError::new(t!("seed.reset_failed", error = err)))?;
        write_stdout_line(&t!("seed.reset.ok", count = removed))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }

    let mut rng = command.rng_seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let repository = ContactRepository::new(store);
    let inserted = seed_contacts(&repository, command.count, &mut rng)
        .map_err(|err| CliError::new(t!("seed.failed", error = err)))?;
    write_stdout_line(&t!("seed.ok", count = inserted.len(), path = path))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = ContactBookConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the annotated example config.
fn command_config_example() -> CliResult<ExitCode> {
    let example = config_toml_example();
    std::io::stdout()
        .write_all(example.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

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

/// Formats a catalog output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
