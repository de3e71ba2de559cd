mod commands;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "qfixmap-cli")]
#[command(about = "QFix mapping command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve clothing-type and material strings against the mapping table
    Resolve {
        /// Breadcrumb or plain clothing-type string (e.g. "Dam > Jeans")
        #[arg(long)]
        clothing_type: String,
        /// Material composition string (e.g. "99% Bomull, 1% Elastan")
        #[arg(long, default_value = "")]
        material: String,
        /// Gender token as the source catalog spells it (e.g. "dam")
        #[arg(long, default_value = "")]
        gender: String,
        /// Source brand identifier
        #[arg(long, default_value = "")]
        brand: String,
        /// Print the resolved mapping as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Merge a scraped catalog with protocol rows, printing merged JSON
    Merge {
        /// JSON file holding an array of scraped product records
        #[arg(long)]
        scraper: PathBuf,
        /// JSON file holding an array of protocol product records
        #[arg(long)]
        protocol: PathBuf,
    },
    /// Resolve a catalog file and report every value that failed to map
    Unmapped {
        /// JSON file holding an array of catalog rows
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Logs go to stderr so JSON output stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = qfixmap_core::load_app_config_from_env()?;
    let resolver = qfixmap_resolve::Resolver::from_config(&config)?;

    match cli.command {
        Commands::Resolve {
            clothing_type,
            material,
            gender,
            brand,
            json,
        } => commands::run_resolve(&resolver, &clothing_type, &material, &gender, &brand, json),
        Commands::Merge { scraper, protocol } => commands::run_merge(&scraper, &protocol),
        Commands::Unmapped { catalog } => commands::run_unmapped(&resolver, &catalog),
    }
}
