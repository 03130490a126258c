use serde::Serialize;
use tracing::warn;

use crate::consts::{FILTER_ALL, MOBILE_BREAKPOINT_PX, PLACEHOLDER_IMAGE};
use crate::error::Result;
use crate::markup::{Element, Node};

use super::config::{GalleryConfig, GalleryItem, GallerySettings};

/// Inline error handler that swaps in the placeholder once and then
/// detaches itself, so a missing placeholder cannot loop.
pub fn placeholder_onerror() -> String {
    format!("this.onerror=null;this.src='{PLACEHOLDER_IMAGE}';")
}

/// Source of a gallery image with a one-shot placeholder fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFallback {
    src: String,
    fell_back: bool,
}

impl ImageFallback {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            fell_back: false,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    /// Handle a load failure. Swaps to the placeholder the first time and
    /// returns `true`; later failures (of the placeholder itself) are ignored.
    pub fn on_error(&mut self) -> bool {
        if self.fell_back {
            return false;
        }
        warn!(src = %self.src, "Failed to load image");
        self.src = PLACEHOLDER_IMAGE.to_string();
        self.fell_back = true;
        true
    }
}

/// `video/<extension>` for a media filename.
pub fn video_mime_type(filename: &str) -> String {
    let ext = filename.rsplit('.').next().unwrap_or(filename);
    format!("video/{ext}")
}

/// Tile width in pixels: one column, or two when featured.
pub fn tile_width(item: &GalleryItem, settings: &GallerySettings) -> u32 {
    let column = settings.masonry.column_width;
    if item.featured {
        column.saturating_mul(2)
    } else {
        column
    }
}

/// Filter bar content: "All" (active) then one button per category.
pub fn generate_filter_buttons(config: &GalleryConfig) -> Vec<Element> {
    let mut buttons = Vec::with_capacity(config.categories.len() + 1);
    buttons.push(
        Element::new("button")
            .class("filter-btn active")
            .attr("data-filter", FILTER_ALL)
            .text("All"),
    );
    buttons.extend(config.categories.iter().map(|category| {
        Element::new("button")
            .class("filter-btn")
            .attr("data-filter", &category.id)
            .attr("title", &category.description)
            .text(&category.label)
    }));
    buttons
}

/// One tile per item, in document order.
pub fn generate_gallery_items(config: &GalleryConfig) -> Vec<Element> {
    config
        .items
        .iter()
        .map(|item| gallery_tile(item, &config.settings))
        .collect()
}

fn fill_parent(el: Element) -> Element {
    el.style("position", "absolute")
        .style("top", "0")
        .style("left", "0")
        .style("width", "100%")
        .style("height", "100%")
}

pub fn gallery_tile(item: &GalleryItem, settings: &GallerySettings) -> Element {
    let mut tile = Element::new("div").class("gallery-item");
    if item.featured {
        tile.add_class("featured");
    }
    let tile = tile
        .attr("data-categories", item.categories.join(" "))
        .style("width", format!("{}px", tile_width(item, settings)));

    let ratio = item.aspect_ratio(settings);
    let frame = Element::new("div")
        .style("position", "relative")
        .style("width", "100%")
        .style("padding-bottom", format!("{}%", ratio * 100.0));

    let media = if item.is_video() {
        let video = Element::new("video")
            .attr("controls", "")
            .style("width", "100%")
            .style("height", "100%")
            .style("object-fit", "cover")
            .child(
                Element::new("source")
                    .attr("src", item.media_path())
                    .attr("type", video_mime_type(&item.filename)),
            );
        fill_parent(Element::new("div")).child(video)
    } else {
        let img = Element::new("img")
            .attr("src", item.media_path())
            .attr("alt", &item.title)
            .attr("loading", "lazy")
            .attr("onerror", placeholder_onerror())
            .style("width", "100%")
            .style("height", "100%")
            .style("object-fit", "cover");
        fill_parent(
            Element::new("a")
                .attr("href", item.media_path())
                .attr("data-lightbox", "gallery")
                .attr("data-title", &item.title),
        )
        .child(img)
    };

    tile.child(frame.child(media))
}

/// Width rules for tiles, collapsing to full width on narrow viewports.
pub fn gallery_stylesheet(config: &GalleryConfig) -> String {
    let masonry = &config.settings.masonry;
    format!(
        "
.gallery-item {{
    width: {base}px;
    margin-bottom: {gutter}px;
}}

.gallery-item.featured {{
    width: {featured}px;
}}

@media (max-width: {breakpoint}px) {{
    .gallery-item,
    .gallery-item.featured {{
        width: 100%;
    }}
}}
",
        base = masonry.column_width,
        gutter = masonry.gutter,
        featured = masonry.column_width.saturating_mul(2),
        breakpoint = MOBILE_BREAKPOINT_PX,
    )
}

pub fn style_element(css: &str) -> Element {
    Element::new("style").child(Node::raw(css))
}

/// Options handed to the lightbox library.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightboxOptions {
    pub resize_duration: u32,
    pub wrap_around: bool,
    pub album_label: String,
    pub fit_images_in_viewport: bool,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            resize_duration: 200,
            wrap_around: true,
            album_label: "Image %1 of %2".into(),
            fit_images_in_viewport: true,
        }
    }
}

pub fn lightbox_script(options: &LightboxOptions) -> Result<Element> {
    let json = serde_json::to_string(options)?;
    Ok(Element::new("script").child(Node::raw(format!("lightbox.option({json});"))))
}
