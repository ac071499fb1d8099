/// `fetch-transactions` command: fetch and render recent transactions.
use chrono::{Days, Local, NaiveDate};

use crate::cli::OutputCtx;
use crate::cli::OutputFormat;
use crate::cli::args::FetchArgs;
use crate::cli::output::{write_notice, write_transactions};
use crate::config::Config;
use crate::errors::BankError;
use crate::plaid::{PlaidApi, TransactionClient};

/// Inclusive range covering the last `days` days up to `today`.
///
/// # Errors
///
/// Returns `BankError::Configuration` if the range would underflow the calendar.
pub fn date_range(days: u32, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), BankError> {
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| BankError::Configuration(format!("--days {days} is out of range")))?;
    Ok((start, today))
}

/// Run `bank-connector fetch-transactions`.
///
/// An empty result prints a notice and succeeds.
///
/// # Errors
///
/// Returns `BankError` if no access token is configured or Plaid rejects the request.
pub fn run<A: PlaidApi>(
    args: &FetchArgs,
    client: &TransactionClient<'_, A>,
    config: &Config,
    ctx: &OutputCtx,
) -> Result<(), BankError> {
    let access_token = config.require_access_token()?;
    let (start_date, end_date) = date_range(args.days, Local::now().date_naive())?;
    tracing::info!(%start_date, %end_date, "fetching transactions");

    let timer = ctx.timer("fetch_transactions");
    let result = client.fetch_transactions(access_token, start_date, end_date);
    drop(timer);

    match result {
        Ok(transactions) => {
            let _render_timer = ctx.timer("render");
            write_transactions(&transactions, ctx);
            Ok(())
        }
        Err(err @ BankError::NoData { .. }) => {
            if ctx.format == OutputFormat::Json {
                write_transactions(&[], ctx);
            }
            write_notice(&err.to_string(), ctx);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::plaid::fake::FakeApi;

    fn config(access_token: Option<&str>) -> Config {
        Config {
            client_id: "cid".to_owned(),
            secret: "sec".to_owned(),
            environment: Environment::Sandbox,
            access_token: access_token.map(str::to_owned),
        }
    }

    fn args(format: OutputFormat) -> FetchArgs {
        FetchArgs { days: 30, format }
    }

    #[test]
    fn test_date_range_is_inclusive_lookback() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (start, end) = date_range(30, today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let cfg = config(None);
        let client = TransactionClient::new(FakeApi::with_amounts(&["1.00"], 10), &cfg);
        let ctx = OutputCtx::new(OutputFormat::Table, true, false);
        let err = run(&args(OutputFormat::Table), &client, &cfg, &ctx).unwrap_err();
        assert!(matches!(err, BankError::Configuration(_)));
        assert!(client_untouched(&client));
    }

    fn client_untouched(client: &TransactionClient<'_, FakeApi>) -> bool {
        client.api().offsets.borrow().is_empty()
    }

    #[test]
    fn test_empty_result_exits_cleanly() {
        let cfg = config(Some("access-sandbox-1"));
        let client = TransactionClient::new(FakeApi::with_amounts(&[], 10), &cfg);
        for format in [OutputFormat::Table, OutputFormat::List, OutputFormat::Json] {
            let ctx = OutputCtx::new(format, true, false);
            assert!(run(&args(format), &client, &cfg, &ctx).is_ok());
        }
    }

    #[test]
    fn test_renders_every_format() {
        let cfg = config(Some("access-sandbox-1"));
        let client = TransactionClient::new(FakeApi::with_amounts(&["45.23", "-500.00"], 10), &cfg);
        for format in [OutputFormat::Table, OutputFormat::List, OutputFormat::Json] {
            let ctx = OutputCtx::new(format, true, false);
            assert!(run(&args(format), &client, &cfg, &ctx).is_ok());
        }
    }

    #[test]
    fn test_api_failure_propagates() {
        let cfg = config(Some("access-expired"));
        let client = TransactionClient::new(FakeApi::rejecting("INVALID_ACCESS_TOKEN"), &cfg);
        let ctx = OutputCtx::new(OutputFormat::Table, true, false);
        let err = run(&args(OutputFormat::Table), &client, &cfg, &ctx).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
