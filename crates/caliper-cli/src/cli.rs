use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "caliper",
    about = "Caliper: typed learning-analytics documents and a sensor to deliver them",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every entity, composite and event kind with its properties
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build one document from a configuration object and print it
    Render {
        /// Kind to build (e.g. Person, ViewEvent)
        #[arg(long, requires = "config", conflicts_with = "document")]
        kind: Option<String>,

        /// Path to a JSON configuration object for `--kind`
        #[arg(long, requires = "kind")]
        config: Option<String>,

        /// Path to a JSON document whose `type` names its kind
        #[arg(long)]
        document: Option<String>,

        /// Print only the canonical compact document
        #[arg(long)]
        json: bool,
    },

    /// Deliver a batch of documents through a sensor
    Send {
        /// Path to sensor options TOML (defaults apply when omitted)
        #[arg(long)]
        options: Option<String>,

        /// Path to JSONL input, one document per line
        #[arg(long)]
        input: String,

        /// Collector endpoint, overriding the options file
        #[arg(long)]
        host: Option<String>,

        /// Authorization header value, overriding the options file
        #[arg(long)]
        api_key: Option<String>,

        /// Build and print the envelope without contacting a collector
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
