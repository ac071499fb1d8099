/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod fetch_transactions;
pub mod setup;
pub mod test_connection;

use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::config::Config;
use crate::errors::BankError;
use crate::plaid::{HttpPlaidApi, TransactionClient};

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `BankError` on any command failure.
pub fn dispatch(command: &Command, config: &Config, ctx: &OutputCtx) -> Result<(), BankError> {
    // Settings the command needs are checked before any client is built.
    if matches!(command, Command::FetchTransactions(_)) {
        config.require_access_token()?;
    }

    let api = HttpPlaidApi::new(config)?;
    let client = TransactionClient::new(api, config);

    match command {
        Command::Setup(args) => setup::run(args, &client, ctx),
        Command::FetchTransactions(args) => fetch_transactions::run(args, &client, config, ctx),
        Command::TestConnection => test_connection::run(&client, config, ctx),
    }
}
