use clap::Parser;
use std::process;

use lunchplan::cli;
use lunchplan::cli::commands::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let data_dir = cli_args.data_dir.clone();
    let data_dir = data_dir.as_deref();

    let exit_code = match cli_args.command {
        Some(Commands::Init { no_seed }) => cli::init::run(no_seed, json_output, data_dir),
        Some(Commands::Tomorrow { check }) => cli::tomorrow::run(&check, json_output, data_dir),
        Some(Commands::Plan(cmd)) => cli::plan::run(cmd, json_output, data_dir),
        Some(Commands::Settings(cmd)) => cli::settings::run(cmd, json_output, data_dir),
        None => cli::launch::run(json_output, data_dir),
    };

    process::exit(exit_code);
}
