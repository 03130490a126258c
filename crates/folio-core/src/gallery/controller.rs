use std::io::Cursor;
use std::time::Instant;

use image::ImageReader;
use tracing::{debug, info};

use crate::consts::MOBILE_BREAKPOINT_PX;
use crate::error::Result;
use crate::io::AssetSource;
use crate::markup::{Element, Node};

use super::config::GalleryConfig;
use super::debounce::ResizeDebouncer;
use super::filter::ActiveFilterSet;
use super::markup::{generate_filter_buttons, generate_gallery_items, ImageFallback};
use super::masonry::{Layout, LayoutTile, MasonryLayout, MasonryOptions};

/// A gallery tile and the state the controller tracks for it.
#[derive(Clone, Debug)]
pub struct GalleryTile {
    pub element: Element,
    pub categories: Vec<String>,
    pub featured: bool,
    /// Frame height over width.
    pub aspect_ratio: f64,
    pub visible: bool,
    /// `None` for video tiles.
    pub image: Option<ImageFallback>,
}

/// Owns the filter bar, the tiles, the active filter set and the optional
/// masonry layout of one gallery view.
#[derive(Clone, Debug)]
pub struct GalleryController {
    buttons: Vec<Element>,
    tiles: Vec<GalleryTile>,
    filters: ActiveFilterSet,
    column_width: u32,
    container_width: u32,
    masonry: Option<MasonryLayout>,
    debouncer: ResizeDebouncer,
    images_checked: bool,
}

impl GalleryController {
    /// Build the filter bar and tiles for `config`, laid out (once masonry
    /// is initialised) in a container `container_width` pixels wide.
    pub fn new(config: &GalleryConfig, container_width: u32) -> Self {
        let tiles = generate_gallery_items(config)
            .into_iter()
            .zip(&config.items)
            .map(|(element, item)| GalleryTile {
                element,
                categories: item.categories.clone(),
                featured: item.featured,
                aspect_ratio: item.aspect_ratio(&config.settings),
                visible: true,
                image: (!item.is_video()).then(|| ImageFallback::new(item.media_path())),
            })
            .collect();

        Self {
            buttons: generate_filter_buttons(config),
            tiles,
            filters: ActiveFilterSet::new(),
            column_width: config.settings.masonry.column_width,
            container_width,
            masonry: None,
            debouncer: ResizeDebouncer::default(),
            images_checked: false,
        }
    }

    pub fn buttons(&self) -> &[Element] {
        &self.buttons
    }

    pub fn tiles(&self) -> &[GalleryTile] {
        &self.tiles
    }

    pub fn active_filters(&self) -> &ActiveFilterSet {
        &self.filters
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    pub fn masonry(&self) -> Option<&MasonryLayout> {
        self.masonry.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.masonry.as_ref().map(MasonryLayout::current)
    }

    /// `(filter key, active)` for every button in bar order.
    pub fn button_states(&self) -> Vec<(&str, bool)> {
        self.buttons
            .iter()
            .filter_map(|b| Some((b.get_attr("data-filter")?, b.has_class("active"))))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.visible).count()
    }

    /// Handle a click on the filter button with key `filter`.
    ///
    /// Returns `false` (and changes nothing) when no button has that key.
    pub fn click(&mut self, filter: &str) -> bool {
        if !self
            .buttons
            .iter()
            .any(|b| b.get_attr("data-filter") == Some(filter))
        {
            return false;
        }

        self.filters.click(filter);
        for button in &mut self.buttons {
            let active = button
                .get_attr("data-filter")
                .is_some_and(|key| self.filters.contains(key));
            if active {
                button.add_class("active");
            } else {
                button.remove_class("active");
            }
        }

        for tile in &mut self.tiles {
            tile.visible = self.filters.matches(&tile.categories);
            tile.element = std::mem::take(&mut tile.element)
                .style("display", if tile.visible { "block" } else { "none" });
        }
        debug!(
            active = ?self.filters.iter().collect::<Vec<_>>(),
            visible = self.visible_count(),
            "Filters applied"
        );

        self.relayout();
        true
    }

    /// Load every gallery image once. Images that fail to load switch to
    /// the placeholder. Returns how many fell back.
    pub fn check_images(&mut self, source: &dyn AssetSource) -> usize {
        let mut fell_back = 0;
        for tile in &mut self.tiles {
            let Some(ref mut image) = tile.image else {
                continue;
            };
            if image.fell_back() {
                continue;
            }
            if let Err(e) = read_dimensions(source, image.src()) {
                debug!(src = image.src(), error = %e, "Image did not load");
                if image.on_error() {
                    if let Some(img) = tile.element.find_mut("img") {
                        img.set_attr("src", image.src());
                    }
                    fell_back += 1;
                }
            }
        }
        self.images_checked = true;
        fell_back
    }

    /// No-op unless masonry is enabled. Otherwise waits for every image to
    /// load, then builds the layout engine and runs the initial pass.
    pub fn initialize_masonry_layout(&mut self, config: &GalleryConfig, source: &dyn AssetSource) {
        let settings = &config.settings.masonry;
        if !settings.enabled {
            return;
        }
        if !self.images_checked {
            self.check_images(source);
        }

        self.masonry = Some(MasonryLayout::new(MasonryOptions {
            column_width: settings.column_width as f64,
            gutter: settings.gutter as f64,
            fit_width: true,
        }));
        self.relayout();
        if let Some(layout) = self.layout() {
            info!(
                columns = layout.columns,
                height = layout.height,
                "Masonry layout initialised"
            );
        }
    }

    /// Record a window resize; the relayout happens on a later
    /// [`poll_resize`](Self::poll_resize).
    pub fn on_resize(&mut self, width: u32, now: Instant) {
        self.debouncer.on_resize(width, now);
    }

    /// Run the debounced relayout if it is due. Returns `true` if it ran.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        let Some(width) = self.debouncer.poll(now) else {
            return false;
        };
        self.container_width = width;
        self.relayout();
        true
    }

    fn layout_inputs(&self) -> Vec<LayoutTile> {
        let collapsed = self.container_width <= MOBILE_BREAKPOINT_PX;
        self.tiles
            .iter()
            .map(|tile| {
                let width_px = if collapsed {
                    self.container_width
                } else if tile.featured {
                    self.column_width.saturating_mul(2)
                } else {
                    self.column_width
                };
                let width = width_px as f64;
                LayoutTile {
                    width,
                    height: width * tile.aspect_ratio,
                    visible: tile.visible,
                }
            })
            .collect()
    }

    fn relayout(&mut self) {
        if self.masonry.is_none() {
            return;
        }
        let inputs = self.layout_inputs();
        let width = self.container_width as f64;
        if let Some(ref mut masonry) = self.masonry {
            masonry.layout(width, &inputs);
        }
    }

    pub fn render_buttons(&self) -> Vec<Node> {
        self.buttons.iter().cloned().map(Node::from).collect()
    }

    /// Tiles with their current visibility and, once laid out, positions.
    pub fn render_tiles(&self) -> Vec<Node> {
        let layout = self.layout();
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                let mut element = tile.element.clone();
                if let Some(p) = layout.and_then(|l| l.placement(index)) {
                    element = element
                        .style("position", "absolute")
                        .style("left", format!("{}px", p.x))
                        .style("top", format!("{}px", p.y));
                }
                Node::from(element)
            })
            .collect()
    }

    /// Container sizing for the current layout.
    pub fn layout_stylesheet(&self) -> Option<String> {
        let layout = self.layout()?;
        Some(format!(
            "
.gallery {{
    position: relative;
    width: {width}px;
    height: {height}px;
    margin: 0 auto;
}}

@media (max-width: {breakpoint}px) {{
    .gallery {{
        width: auto;
        height: auto;
    }}

    .gallery-item {{
        position: static !important;
    }}
}}
",
            width = layout.width,
            height = layout.height,
            breakpoint = MOBILE_BREAKPOINT_PX,
        ))
    }
}

fn read_dimensions(source: &dyn AssetSource, src: &str) -> Result<(u32, u32)> {
    let bytes = source.fetch(src)?;
    let dims = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dims)
}
