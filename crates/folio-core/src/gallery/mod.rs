//! Gallery, filter and layout controller.
//!
//! Builds the filter bar and gallery tiles from the gallery configuration,
//! tracks multi-select category filtering and lays tiles out as masonry.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod filter;
pub mod markup;
pub mod masonry;

use tracing::{info, warn};

use crate::consts::{FILTER_CONTAINER_CLASS, GALLERY_CLASS};
use crate::error::Result;
use crate::io::{AssetSource, HostPage, Selector};
use crate::markup::{render_fragment, Element};

pub use config::{load_config, GalleryConfig, GalleryItem, GallerySettings};
pub use controller::{GalleryController, GalleryTile};
pub use filter::ActiveFilterSet;
pub use markup::{
    gallery_stylesheet, generate_filter_buttons, generate_gallery_items, LightboxOptions,
};

/// Everything one gallery render produces.
pub struct GalleryView {
    pub config: GalleryConfig,
    pub controller: GalleryController,
    pub lightbox: Option<Element>,
}

impl GalleryView {
    pub fn filter_bar_markup(&self) -> String {
        render_fragment(&self.controller.render_buttons())
    }

    pub fn gallery_markup(&self) -> String {
        render_fragment(&self.controller.render_tiles())
    }

    /// Tile width rules plus, when laid out, container sizing.
    pub fn stylesheet(&self) -> String {
        let mut css = gallery_stylesheet(&self.config);
        if let Some(layout_css) = self.controller.layout_stylesheet() {
            css.push_str(&layout_css);
        }
        css
    }

    /// Fill `.filter-container` and `.gallery`, add the stylesheet to the
    /// head and the lightbox options (if enabled) to the body.
    pub fn inject(&self, page: &mut HostPage) -> Result<()> {
        let filter_bar = Selector::Class(FILTER_CONTAINER_CLASS.into());
        let gallery = Selector::Class(GALLERY_CLASS.into());

        page.replace_inner(&filter_bar, &self.filter_bar_markup())?;
        page.replace_inner(&gallery, &self.gallery_markup())?;
        page.append_to("head", &markup::style_element(&self.stylesheet()).render())?;
        if let Some(ref script) = self.lightbox {
            page.append_to("body", &script.render())?;
        }
        Ok(())
    }
}

/// Load the configuration and build the gallery: filter bar, tiles,
/// filtering, lightbox options and masonry layout. Returns `None`, having
/// rendered nothing, when the configuration cannot be loaded.
pub fn render_gallery(
    source: &dyn AssetSource,
    config_path: &str,
    container_width: u32,
) -> Option<GalleryView> {
    let config = load_config(source, config_path)?;

    let mut controller = GalleryController::new(&config, container_width);
    let fell_back = controller.check_images(source);
    if fell_back > 0 {
        warn!(count = fell_back, "Gallery images replaced with placeholder");
    }

    let lightbox = if config.settings.lightbox_enabled {
        match markup::lightbox_script(&LightboxOptions::default()) {
            Ok(script) => Some(script),
            Err(e) => {
                warn!(error = %e, "Error configuring lightbox");
                None
            }
        }
    } else {
        None
    };

    controller.initialize_masonry_layout(&config, source);
    info!(tiles = controller.tiles().len(), "Gallery rendered");

    Some(GalleryView {
        config,
        controller,
        lightbox,
    })
}
