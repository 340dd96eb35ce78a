mod bucketizer;
mod cli;
mod error;
mod fmt;
mod models;
mod pipeline;
mod reader;
mod renderer;
mod settings;
#[cfg(feature = "xlsx")]
mod xlsx;

use clap::{CommandFactory, Parser};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use cli::config::SettingsUpdate;
use cli::{Cli, Commands, ConfigCommands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            input_args,
        } => cli::convert::run(&input, output, format, &input_args),
        Commands::Preview {
            input,
            notes,
            input_args,
        } => cli::preview::run(&input, notes, &input_args),
        Commands::Buckets { input, input_args } => cli::buckets::run(&input, &input_args),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                encoding,
                delimiter,
                skip_header,
                date_column,
                amount_column,
                description_column,
                currency,
                note_author,
            } => cli::config::set(SettingsUpdate {
                encoding,
                delimiter,
                skip_header,
                date_column,
                amount_column,
                description_column,
                currency,
                note_author,
            }),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "daygrid", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
