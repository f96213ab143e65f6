use std::process::ExitCode;

use clap::Parser;
use log::error;

use council_report::cli::Cli;
use council_report::generate_report;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match generate_report(&cli.conversation_id, &cli.store, &cli.out_dir, cli.config()) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
