use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use folio_core::consts::{DEFAULT_CONTAINER_ID, DEFAULT_PORTFOLIO_DATA};
use folio_core::io::SiteSource;
use folio_core::portfolio::PortfolioRenderer;
use folio_core::resize::ResizeOptions;

#[derive(Args)]
pub struct PortfolioArgs {
    /// Portfolio item document (JSON), relative to the root
    #[arg(default_value = DEFAULT_PORTFOLIO_DATA)]
    pub data: String,

    /// Site root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// JPEG quality of the resized thumbnails (1-100)
    #[arg(long, default_value_t = 85)]
    pub quality: u8,

    /// Write the fragment to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &PortfolioArgs) -> Result<()> {
    let options = ResizeOptions {
        quality: args.quality.clamp(1, 100),
        ..ResizeOptions::default()
    };
    let source = Arc::new(SiteSource::new(&args.root));
    let renderer = PortfolioRenderer::new(DEFAULT_CONTAINER_ID, source, options);

    let Some(markup) = renderer.load_portfolio_data(&args.data) else {
        bail!("Failed to load portfolio data from {}", args.data);
    };

    super::emit(&markup, args.output.as_deref())
}
