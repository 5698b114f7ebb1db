//! Command implementations for the csvdialect CLI
//!
//! Each command is implemented in its own module; helpers used by several of
//! them live in [`shared`].

pub mod cols;
pub mod dialects;
pub mod rows;
pub mod shared;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner for csvdialect
///
/// Initialises logging, then dispatches to the subcommand handler:
/// - `rows`: stream rows to stdout
/// - `cols`: print column names
/// - `dialects`: list registered dialects
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    shared::setup_logging(args.get_log_level())?;

    match args.command {
        Some(Commands::Rows(rows_args)) => {
            let stats = rows::run_rows(rows_args, cancellation_token).await?;
            debug!("Parse statistics: {:?}", stats);
            Ok(())
        }
        Some(Commands::Cols(cols_args)) => {
            cols::run_cols(cols_args, cancellation_token).await.map(|_| ())
        },
        Some(Commands::Dialects(dialects_args)) => {
            dialects::run_dialects(dialects_args).await.map(|_| ())
        }
        None => Err(Error::configuration("No command given")),
    }
}
