//! favroctl - Main entry point

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use favroctl::auth::{run_login_command, run_logout_command, run_whoami_command};
use favroctl::context::run_context_command;
use favroctl::{
    run_board_command, run_card_command, run_column_command, run_org_command, Cli, Command,
    FavroError, Runtime,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting favroctl v{}", env!("CARGO_PKG_VERSION"));

    let runtime = Runtime::from_cli(&cli, |name| std::env::var(name).ok());
    debug!(
        "Config file: {}, API root: {}",
        runtime.store.path().display(),
        runtime.settings.base_url
    );

    match run(&cli, &runtime).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code(e.as_ref()))
        }
    }
}

async fn run(cli: &Cli, runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Login(args) => run_login_command(runtime, args).await,
        Command::Logout => run_logout_command(runtime),
        Command::Whoami => run_whoami_command(runtime).await,
        Command::Org { action } => run_org_command(runtime, action).await,
        Command::Board { action } => run_board_command(runtime, action).await,
        Command::Column { action } => run_column_command(runtime, action).await,
        Command::Card { action } => run_card_command(runtime, action).await,
        Command::Context => run_context_command(runtime),
    }
}

/// 2 for authentication failures, 1 for everything else
fn exit_code(err: &(dyn std::error::Error + 'static)) -> u8 {
    match err.downcast_ref::<FavroError>() {
        Some(e) => e.exit_code() as u8,
        None => 1,
    }
}
