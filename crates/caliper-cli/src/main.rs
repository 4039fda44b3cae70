//! Caliper CLI: the `caliper` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("caliper=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { json } => commands::catalog::run(json),

        Commands::Render {
            kind,
            config,
            document,
            json,
        } => commands::render::run(kind, config, document, json),

        Commands::Send {
            options,
            input,
            host,
            api_key,
            dry_run,
            json,
        } => commands::send::run(commands::send::Args {
            options,
            input,
            host,
            api_key,
            dry_run,
            json,
        }),
    }
}
