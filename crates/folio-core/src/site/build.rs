use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::gallery::render_gallery;
use crate::io::{AssetSource, HostPage};
use crate::portfolio::PortfolioRenderer;

use super::config::SiteConfig;

/// What a site build rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
    pub portfolio_rendered: bool,
    pub images_resized: usize,
    pub gallery_rendered: bool,
    pub gallery_tiles: usize,
    pub output: PathBuf,
}

/// Render both controllers into the host page and write the result.
///
/// The two controllers are independent: a document that fails to load (or
/// a container missing from the page) skips that controller only. Reading
/// the host page and writing the output are the only hard failures.
pub fn build_site(
    config: &SiteConfig,
    source: Arc<dyn AssetSource>,
    progress: impl Fn(usize, usize) + Sync,
) -> Result<BuildReport> {
    let page_path = config.page_path();
    let mut page = HostPage::new(std::fs::read_to_string(&page_path)?);
    info!(page = %page_path.display(), "Host page loaded");

    let mut report = BuildReport {
        output: config.output_path(),
        ..Default::default()
    };

    if let Some(ref data_path) = config.portfolio_data {
        let renderer = PortfolioRenderer::new(&config.container_id, source.clone(), config.resize)
            .with_cache_capacity(config.cache_capacity);
        if let Some(rendered) = renderer.load_portfolio_data_with_progress(data_path, &progress) {
            match renderer.inject(&mut page, &rendered.html) {
                Ok(()) => {
                    report.portfolio_rendered = true;
                    report.images_resized = rendered.images_resized;
                }
                Err(e) => warn!(error = %e, "Portfolio not rendered"),
            }
        }
    }

    if let Some(ref gallery_path) = config.gallery_config {
        if let Some(view) = render_gallery(source.as_ref(), gallery_path, config.layout_width) {
            match view.inject(&mut page) {
                Ok(()) => {
                    report.gallery_rendered = true;
                    report.gallery_tiles = view.controller.tiles().len();
                }
                Err(e) => warn!(error = %e, "Gallery not rendered"),
            }
        }
    }

    if let Some(parent) = report.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&report.output, page.to_html()?)?;
    info!(output = %report.output.display(), "Page written");

    Ok(report)
}
