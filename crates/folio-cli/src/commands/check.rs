use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use folio_core::gallery::{GalleryConfig, GalleryController};
use folio_core::io::{AssetSource, SiteSource};
use folio_core::portfolio::PortfolioData;

use crate::summary;

#[derive(Args)]
pub struct CheckArgs {
    /// Site config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Site root directory
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Outcome of loading one document.
pub enum DocumentCheck<T> {
    Skipped,
    Failed(String),
    Loaded(T),
}

pub struct PortfolioCheck {
    pub items: usize,
    pub duplicate_modal_ids: Vec<String>,
}

pub struct GalleryCheck {
    pub categories: usize,
    pub items: usize,
    pub unknown_categories: Vec<(String, String)>,
    pub missing_images: usize,
}

pub struct CheckReport {
    pub portfolio: DocumentCheck<PortfolioCheck>,
    pub gallery: DocumentCheck<GalleryCheck>,
}

impl CheckReport {
    pub fn failures(&self) -> usize {
        matches!(self.portfolio, DocumentCheck::Failed(_)) as usize
            + matches!(self.gallery, DocumentCheck::Failed(_)) as usize
    }
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let mut config = super::load_site_config(args.config.as_deref())?;
    if let Some(ref root) = args.root {
        config.root = root.clone();
    }
    let source = SiteSource::new(&config.root);

    let portfolio = match config.portfolio_data {
        None => DocumentCheck::Skipped,
        Some(ref path) => match source
            .fetch_text(path)
            .and_then(|text| PortfolioData::from_json(&text))
        {
            Ok(data) => DocumentCheck::Loaded(PortfolioCheck {
                items: data.items.len(),
                duplicate_modal_ids: data
                    .duplicate_modal_ids()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }),
            Err(e) => DocumentCheck::Failed(format!("{path}: {e}")),
        },
    };

    let gallery = match config.gallery_config {
        None => DocumentCheck::Skipped,
        Some(ref path) => match source
            .fetch_text(path)
            .and_then(|text| GalleryConfig::from_yaml(&text))
        {
            Ok(gallery) => {
                let mut controller = GalleryController::new(&gallery, config.layout_width);
                DocumentCheck::Loaded(GalleryCheck {
                    categories: gallery.categories.len(),
                    items: gallery.items.len(),
                    unknown_categories: gallery
                        .unknown_category_refs()
                        .into_iter()
                        .map(|(file, cat)| (file.to_string(), cat.to_string()))
                        .collect(),
                    missing_images: controller.check_images(&source),
                })
            }
            Err(e) => DocumentCheck::Failed(format!("{path}: {e}")),
        },
    };

    let report = CheckReport { portfolio, gallery };
    summary::print_check_report(&config, &report);

    let failures = report.failures();
    if failures > 0 {
        bail!("{failures} document(s) failed to load");
    }
    Ok(())
}
