/// `setup` command: create a sandbox access token.
use crate::cli::OutputCtx;
use crate::cli::args::SetupArgs;
use crate::cli::output::write_status;
use crate::config::ACCESS_TOKEN_VAR;
use crate::errors::BankError;
use crate::plaid::{PlaidApi, TransactionClient};

/// Run `bank-connector setup`.
///
/// # Errors
///
/// Returns `BankError` outside the sandbox tier or if either Plaid call fails.
pub fn run<A: PlaidApi>(
    args: &SetupArgs,
    client: &TransactionClient<'_, A>,
    ctx: &OutputCtx,
) -> Result<(), BankError> {
    let timer = ctx.timer("create_sandbox_token");
    let token = client.create_sandbox_token(&args.institution_id)?;
    drop(timer);

    write_status(
        true,
        &format!("Created sandbox access token for {}", args.institution_id),
        ctx,
    );
    println!("Item ID: {}", token.item_id);
    println!();
    println!("Add this line to your .env file:");
    println!("{ACCESS_TOKEN_VAR}={}", token.access_token);
    println!();
    println!("Then run: {} fetch-transactions", env!("CARGO_PKG_NAME"));
    Ok(())
}
