//! MRPC - list and upload Rich Presence icon assets.

mod cli;
mod notifier;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use mrpc_core::logging::{init_logging, log_dir, LogConfig};
use mrpc_core::{MrpcError, MrpcState};
use notifier::TerminalNotifier;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::new(log_dir());
    if let Some(filter) = &cli.log_filter {
        log_config = log_config.with_filter(filter);
    }
    let _logging_guard = init_logging(log_config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting mrpc");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "mrpc failed");
            let info = e.to_error_info();
            eprintln!("{}: {}", info.error_type, info.message);
            if let Some(hint) = info.hint {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), MrpcError> {
    let config = cli.config()?;
    let state = MrpcState::new(config)?.with_notifier(Arc::new(TerminalNotifier::new()));

    // Startup load, once per run
    state.start().await;

    match cli.command {
        Command::List => {}
        Command::Upload { files } => {
            // Each file is its own selection
            for file in &files {
                state.select_files(std::slice::from_ref(file)).await;
            }
        }
    }

    print!("{}", render::gallery(&state));
    Ok(())
}
