use clap::Parser;
use daily_budget::args::{Args, Command};
use daily_budget::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Add(add_args) => commands::add(Config::load(home)?, add_args.clone())?.print(),

        Command::Report => commands::report(Config::load(home)?)?.print(),

        Command::Export(export_args) => {
            commands::export(Config::load(home)?, export_args.clone())?.print()
        }

        Command::Form => {
            let config = Config::load(home)?;
            let stdin = std::io::stdin();
            commands::form(config, stdin.lock(), std::io::stdout())?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            let level = level.to_string().to_lowercase();
            EnvFilter::new(format!(
                "daily_budget={level},{}={level}",
                env!("CARGO_CRATE_NAME"),
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
