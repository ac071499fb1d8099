/// CLI argument definitions via clap derive.
use clap::{Parser, Subcommand, ValueEnum};

use crate::plaid::DEFAULT_INSTITUTION_ID;

/// bank-connector — fetch and display Plaid sandbox transactions.
#[derive(Debug, Parser)]
#[command(
    name = "bank-connector",
    about = "Fetch and display bank transactions from Plaid's sandbox",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Print debug logs and request timings to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants for `fetch-transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned table with colored amounts and a summary.
    #[default]
    Table,
    /// Pretty-printed JSON document with transactions and summary.
    Json,
    /// One numbered line per transaction.
    List,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a sandbox access token for a test institution.
    Setup(SetupArgs),
    /// Fetch and display recent transactions.
    FetchTransactions(FetchArgs),
    /// Verify credentials and connectivity.
    TestConnection,
}

impl Command {
    /// The output format the command renders with.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Self::FetchTransactions(args) => args.format,
            Self::Setup(_) | Self::TestConnection => OutputFormat::Table,
        }
    }
}

/// Arguments for `bank-connector setup`.
#[derive(Debug, Parser)]
pub struct SetupArgs {
    /// Plaid institution ID (default: First Platypus Bank).
    #[arg(long, value_name = "ID", default_value = DEFAULT_INSTITUTION_ID)]
    pub institution_id: String,
}

/// Arguments for `bank-connector fetch-transactions`.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Number of days to look back from today.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..=730)
    )]
    pub days: u32,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::try_parse_from(["bank-connector", "fetch-transactions"]).unwrap();
        match cli.command {
            Command::FetchTransactions(args) => {
                assert_eq!(args.days, 30);
                assert_eq!(args.format, OutputFormat::Table);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_fetch_format_case_insensitive() {
        let cli =
            Cli::try_parse_from(["bank-connector", "fetch-transactions", "--format", "JSON"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::FetchTransactions(FetchArgs {
                format: OutputFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result =
            Cli::try_parse_from(["bank-connector", "fetch-transactions", "--format", "csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_days_out_of_range_rejected() {
        let result = Cli::try_parse_from(["bank-connector", "fetch-transactions", "--days", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_setup_default_institution() {
        let cli = Cli::try_parse_from(["bank-connector", "setup"]).unwrap();
        match cli.command {
            Command::Setup(args) => assert_eq!(args.institution_id, "ins_109508"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bank-connector", "test-connection", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::TestConnection));
    }
}
