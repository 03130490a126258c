use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use folio_core::io::SiteSource;
use folio_core::site::build_site;
use indicatif::{ProgressBar, ProgressStyle};

use crate::summary;

#[derive(Args)]
pub struct BuildArgs {
    /// Site config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Site root directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Host page, relative to the root
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Output file, relative to the root
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Container width in pixels for the masonry layout pass
    #[arg(long)]
    pub layout_width: Option<u32>,

    /// Keep at most this many resized images in memory
    #[arg(long)]
    pub cache_capacity: Option<usize>,
}

pub fn run(args: &BuildArgs) -> Result<()> {
    let mut config = super::load_site_config(args.config.as_deref())?;
    if let Some(ref root) = args.root {
        config.root = root.clone();
    }
    if let Some(ref page) = args.page {
        config.page = page.clone();
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    if let Some(width) = args.layout_width {
        config.layout_width = width;
    }
    if args.cache_capacity.is_some() {
        config.cache_capacity = args.cache_capacity;
    }

    summary::print_site_summary(&config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Resizing images");

    let source = Arc::new(SiteSource::new(&config.root));
    let report = build_site(&config, source, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;

    pb.finish_with_message("Done");
    summary::print_build_report(&report);

    Ok(())
}
