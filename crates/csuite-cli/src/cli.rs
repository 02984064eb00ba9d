//! Argument parsing and command dispatch for the `cs` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::commands::{env as env_commands, secret as secret_commands};
use crate::error::CliResult;
use crate::logging::{self, LogFormat};

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code (0 success, 2 validation error, 3 failure).
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging(LogFormat::infer()) {
        eprintln!("error: {err:#}");
        return 3;
    }
    debug!(command = command_label(&cli.command), "dispatching command");

    match dispatch(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Env(env) => match env {
            EnvCommand::Show(args) => env_commands::handle_show(&args, cli.output),
            EnvCommand::Check(args) => env_commands::handle_check(&args),
            EnvCommand::Export(args) => env_commands::handle_export(&args),
        },
        Command::Secret(secret) => match secret {
            SecretCommand::Generate(args) => secret_commands::handle_generate(&args),
            SecretCommand::Check(args) => secret_commands::handle_check(&args),
        },
    }
}

#[derive(Parser)]
#[command(name = "cs", about = "Developer CLI for Contact Suite runtime environments")]
pub(crate) struct Cli {
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Resolve, check, or export the environment for a runtime mode.
    #[command(subcommand)]
    Env(EnvCommand),
    /// Generate or check JWT signing secrets.
    #[command(subcommand)]
    Secret(SecretCommand),
}

#[derive(Subcommand)]
pub(crate) enum EnvCommand {
    /// Build the environment mapping and render it.
    Show(EnvShowArgs),
    /// Validate the configuration without emitting a mapping.
    Check(EnvSelectArgs),
    /// Print managed variables as KEY=VALUE lines (unmasked).
    Export(EnvSelectArgs),
}

#[derive(Subcommand)]
pub(crate) enum SecretCommand {
    /// Generate a random secret suitable for prod-local mode.
    Generate(SecretGenerateArgs),
    /// Check a secret value (argument or ambient JWT_SECRET).
    Check(SecretCheckArgs),
}

/// Mode selection and overrides shared by the `env` subcommands.
#[derive(Args, Default)]
pub(crate) struct EnvSelectArgs {
    #[arg(long, value_enum, help = "Runtime mode to resolve")]
    pub(crate) mode: ModeArg,
    #[arg(long, value_enum, help = "Database backend (dev mode only)")]
    pub(crate) database: Option<DatabaseArg>,
    #[arg(long, help = "Require TLS (prod-local mode only)")]
    pub(crate) https: bool,
    #[arg(long, help = "JDBC URL override (dev mode with postgres)")]
    pub(crate) postgres_url: Option<String>,
    #[arg(long, help = "Username override (dev mode with postgres)")]
    pub(crate) postgres_username: Option<String>,
    #[arg(long, help = "Password override (dev mode with postgres)")]
    pub(crate) postgres_password: Option<String>,
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Extra variable applied last; wins over ambient and computed values"
    )]
    pub(crate) set: Vec<KeyValue>,
}

#[derive(Args, Default)]
pub(crate) struct EnvShowArgs {
    #[command(flatten)]
    pub(crate) select: EnvSelectArgs,
    #[arg(long, help = "Render the full mapping instead of just managed keys")]
    pub(crate) all: bool,
}

#[derive(Args, Default)]
pub(crate) struct SecretGenerateArgs {
    #[arg(
        long,
        default_value_t = 48,
        help = "Length of the generated secret (minimum 32)"
    )]
    pub(crate) length: usize,
}

#[derive(Args, Default)]
pub(crate) struct SecretCheckArgs {
    #[arg(help = "Secret value to check; reads ambient JWT_SECRET when omitted")]
    pub(crate) value: Option<String>,
}

/// Runtime mode flag values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    #[default]
    Dev,
    ProdLocal,
    CiLocal,
}

/// Database backend flag values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DatabaseArg {
    H2,
    Postgres,
}

/// Output format shared across commands.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One `KEY=VALUE` pair supplied via `--set`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyValue {
    pub(crate) key: String,
    pub(crate) value: String,
}

fn parse_key_value(input: &str) -> Result<KeyValue, String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| "expected format KEY=VALUE".to_string())?;
    if key.trim().is_empty() {
        return Err("variable name must not be empty".to_string());
    }
    Ok(KeyValue {
        key: key.trim().to_string(),
        value: value.to_string(),
    })
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Env(EnvCommand::Show(_)) => "env_show",
        Command::Env(EnvCommand::Check(_)) => "env_check",
        Command::Env(EnvCommand::Export(_)) => "env_export",
        Command::Secret(SecretCommand::Generate(_)) => "secret_generate",
        Command::Secret(SecretCommand::Check(_)) => "secret_check",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_value_accepts_pairs() {
        let pair = parse_key_value("FOO=bar").expect("pair should parse");
        assert_eq!(pair.key, "FOO");
        assert_eq!(pair.value, "bar");
    }

    #[test]
    fn parse_key_value_keeps_equals_in_value() {
        let pair = parse_key_value("URL=jdbc:postgresql://h/db?a=b").expect("pair should parse");
        assert_eq!(pair.value, "jdbc:postgresql://h/db?a=b");
    }

    #[test]
    fn parse_key_value_rejects_malformed_input() {
        assert!(parse_key_value("NOEQUALS").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn cli_parses_env_show_flags() {
        let cli = Cli::try_parse_from([
            "cs",
            "env",
            "show",
            "--mode",
            "prod-local",
            "--https",
            "--output",
            "json",
        ])
        .expect("args should parse");
        match cli.command {
            Command::Env(EnvCommand::Show(args)) => {
                assert_eq!(args.select.mode, ModeArg::ProdLocal);
                assert!(args.select.https);
                assert!(!args.all);
            }
            _ => panic!("expected env show"),
        }
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn cli_parses_set_pairs_in_order() {
        let cli = Cli::try_parse_from([
            "cs", "env", "export", "--mode", "dev", "--set", "A=1", "--set", "B=2",
        ])
        .expect("args should parse");
        match cli.command {
            Command::Env(EnvCommand::Export(args)) => {
                assert_eq!(
                    args.set,
                    vec![
                        KeyValue {
                            key: "A".to_string(),
                            value: "1".to_string()
                        },
                        KeyValue {
                            key: "B".to_string(),
                            value: "2".to_string()
                        },
                    ]
                );
            }
            _ => panic!("expected env export"),
        }
    }

    #[test]
    fn command_labels_are_stable() {
        let cli = Cli::try_parse_from(["cs", "secret", "generate"]).expect("args should parse");
        assert_eq!(command_label(&cli.command), "secret_generate");
    }
}
