use std::process::ExitCode;

use clap::Parser;
use vialivre_icongen::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match vialivre_icongen::run(&cli) {
        Ok(report) => {
            log::info!("Wrote {}", report.names().join(", "));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
