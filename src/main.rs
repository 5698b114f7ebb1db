use clap::{CommandFactory, Parser};
use csvdialect::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

/// Exit status for a run stopped by CTRL+C
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help
    if args.command.is_none() {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    // Create cancellation token for coordinating graceful shutdown
    let cancellation_token = CancellationToken::new();
    let shutdown_token = cancellation_token.clone();

    let result = runtime.block_on(async {
        // CTRL+C only cancels the token; commands stop on their own and
        // flush what they have
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    eprintln!("\nReceived CTRL+C, stopping");
                    shutdown_token.cancel();
                }
                Err(e) => eprintln!("Failed to install CTRL+C signal handler: {}", e),
            }
        });

        commands::run(args, cancellation_token.clone()).await
    });

    if let Err(error) = &result {
        eprintln!("Error: {:#}", error);
    }

    if cancellation_token.is_cancelled() {
        process::exit(EXIT_INTERRUPTED);
    }
    process::exit(if result.is_ok() { 0 } else { 1 });
}
