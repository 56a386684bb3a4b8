mod cli;
mod error;
mod fmt;
mod loader;
mod models;
mod rewards;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ReportCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Demo => cli::demo::run(),
        Commands::Report { command } => match command {
            ReportCommands::Rewards { file, format, year } => {
                cli::report::rewards(file, format, year)
            }
            ReportCommands::Monthly { file, format, year } => {
                cli::report::monthly(file, format, year)
            }
        },
        Commands::Export {
            file,
            format,
            year,
            output,
        } => cli::export::rewards(file, format, year, output),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
