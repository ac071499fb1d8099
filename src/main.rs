#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! bank-connector — fetch and display Plaid sandbox transactions.

mod cli;
mod commands;
mod config;
mod errors;
mod logging;
mod plaid;
mod transactions;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use config::Config;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    // Variables already in the environment take precedence over `.env`.
    // Loaded before the logger so `RUST_LOG` can come from the file.
    let dotenv = dotenvy::dotenv();
    logging::init(cli.debug);
    if let Err(err) = dotenv {
        if !err.not_found() {
            tracing::warn!(error = %err, "ignoring unreadable .env file");
        }
    }

    let ctx = OutputCtx::new(cli.command.output_format(), cli.no_color, cli.debug);
    colored::control::set_override(ctx.color);

    let result = Config::from_env().and_then(|config| {
        tracing::debug!(?config, "configuration loaded");
        commands::dispatch(&cli.command, &config, &ctx)
    });

    if let Err(err) = result {
        write_error(&ErrorOutput::from_bank_error(&err), ctx.format);
        std::process::exit(err.exit_code());
    }
}
