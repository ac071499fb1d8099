/// `test-connection` command: verify credentials and connectivity.
use crate::cli::OutputCtx;
use crate::cli::output::write_status;
use crate::config::Config;
use crate::errors::BankError;
use crate::plaid::{ConnectionDetails, PlaidApi, TransactionClient};

/// Run `bank-connector test-connection`.
///
/// Prints a pass/fail line. A failed check is returned as the underlying error
/// so the process exits non-zero.
///
/// # Errors
///
/// Returns the `BankError` that made the check fail.
pub fn run<A: PlaidApi>(
    client: &TransactionClient<'_, A>,
    config: &Config,
    ctx: &OutputCtx,
) -> Result<(), BankError> {
    let timer = ctx.timer("test_connection");
    let report = client.test_connection(config.access_token.as_deref());
    drop(timer);

    let environment = report.environment;
    match report.outcome {
        Ok(details) => {
            write_status(true, &format!("Connection successful ({environment})"), ctx);
            println!();
            match details {
                ConnectionDetails::Item {
                    item_id,
                    institution_id,
                    available_products,
                    billed_products,
                } => {
                    println!(
                        "Institution ID: {}",
                        institution_id.as_deref().unwrap_or("unknown")
                    );
                    println!("Item ID: {item_id}");
                    println!("Billed products: {}", billed_products.join(", "));
                    println!("Available products: {}", available_products.join(", "));
                }
                ConnectionDetails::Institution {
                    institution_id,
                    name,
                    products,
                } => {
                    println!("Credentials accepted; no access token configured yet.");
                    println!("Institution: {name} ({institution_id})");
                    println!("Products: {}", products.join(", "));
                }
            }
            Ok(())
        }
        Err(err) => {
            write_status(false, &format!("Connection failed ({environment})"), ctx);
            Err(err)
        }
    }
}
