mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio", about = "Static portfolio page generator")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render portfolio items and the gallery into the host page
    Build(commands::build::BuildArgs),
    /// Render only the portfolio items and modals
    Portfolio(commands::portfolio::PortfolioArgs),
    /// Render only the filter bar, gallery tiles and stylesheet
    Gallery(commands::gallery::GalleryArgs),
    /// Replay filter clicks and show which tiles stay visible
    Filter(commands::filter::FilterArgs),
    /// Load both documents and report problems
    Check(commands::check::CheckArgs),
    /// Print or save a default site config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Portfolio(args) => commands::portfolio::run(args),
        Commands::Gallery(args) => commands::gallery::run(args),
        Commands::Filter(args) => commands::filter::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
