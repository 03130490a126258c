use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use console::Style;
use folio_core::consts::{DEFAULT_GALLERY_CONFIG, DEFAULT_LAYOUT_WIDTH};
use folio_core::gallery::{load_config, GalleryController};
use folio_core::io::SiteSource;

#[derive(Args)]
pub struct FilterArgs {
    /// Gallery configuration (YAML), relative to the root
    #[arg(default_value = DEFAULT_GALLERY_CONFIG)]
    pub config: String,

    /// Site root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Filter button to click, in order (repeatable, e.g. --click web --click all)
    #[arg(long = "click", value_name = "FILTER")]
    pub clicks: Vec<String>,
}

pub fn run(args: &FilterArgs) -> Result<()> {
    let source = SiteSource::new(&args.root);
    let Some(config) = load_config(&source, &args.config) else {
        bail!("Failed to load gallery config from {}", args.config);
    };

    let mut controller = GalleryController::new(&config, DEFAULT_LAYOUT_WIDTH);
    for filter in &args.clicks {
        if !controller.click(filter) {
            eprintln!("Ignoring unknown filter '{filter}'");
        }
    }

    let active = Style::new().green().bold();
    let dim = Style::new().dim();

    let filters: Vec<&str> = controller.active_filters().iter().collect();
    println!("Active: {}", active.apply_to(filters.join(", ")));
    println!();

    for (item, tile) in config.items.iter().zip(controller.tiles()) {
        let line = format!("{:<30} [{}]", item.title, item.categories.join(", "));
        if tile.visible {
            println!("  {}", line);
        } else {
            println!("  {}", dim.apply_to(line));
        }
    }
    println!();
    println!(
        "{} of {} tiles visible",
        controller.visible_count(),
        controller.tiles().len()
    );

    Ok(())
}
