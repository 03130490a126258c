use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::io::{AssetSource, HostPage, Selector};
use crate::markup::{render_fragment, Element, Node};
use crate::resize::{resize_to_data_url, ImageCache, ResizeOptions};

use super::types::{PortfolioData, PortfolioItem};

/// Container content produced from one portfolio document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPortfolio {
    pub html: String,
    /// Distinct images that resized successfully in this render.
    pub images_resized: usize,
}

/// Renders portfolio items into the container with the configured id.
pub struct PortfolioRenderer {
    container: Selector,
    source: Arc<dyn AssetSource>,
    options: ResizeOptions,
    cache: ImageCache,
}

impl PortfolioRenderer {
    pub fn new(container_id: &str, source: Arc<dyn AssetSource>, options: ResizeOptions) -> Self {
        Self {
            container: Selector::Id(container_id.to_string()),
            source,
            options,
            cache: ImageCache::new(),
        }
    }

    /// Bound the image cache. `None` keeps it unbounded.
    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache = ImageCache::with_capacity(capacity);
        self
    }

    pub fn container(&self) -> &Selector {
        &self.container
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Resize `src` onto the canvas and return it as a JPEG data URL.
    ///
    /// A source seen before (exact string match) is answered from the cache
    /// without fetching. Failures are logged and returned, never retried.
    pub fn resize_image(&self, src: &str) -> Result<Arc<str>> {
        if let Some(hit) = self.cache.get(src) {
            debug!(src, "Image cache hit");
            return Ok(hit);
        }

        let data_url = self
            .source
            .fetch(src)
            .and_then(|bytes| resize_to_data_url(&bytes, &self.options))
            .inspect_err(|e| warn!(src, error = %e, "Error loading image"))?;

        debug!(src, "Image resized");
        Ok(self.cache.insert(src, data_url))
    }

    /// Card markup for one item, with its image resized.
    pub fn generate_portfolio_item(&self, item: &PortfolioItem) -> Result<Element> {
        let resized = self.resize_image(&item.image)?;
        Ok(item_card(item, &resized))
    }

    /// Modal markup for one item.
    ///
    /// The modal shows the full-size original; the resize still runs (a
    /// cache hit after the card) so a broken image fails both the same way.
    pub fn generate_modal(&self, item: &PortfolioItem) -> Result<Element> {
        self.resize_image(&item.image)?;
        Ok(item_modal(item))
    }

    /// Rows of two cards in input order, then one modal per item.
    pub fn generate_portfolio(&self, data: &PortfolioData) -> Vec<Node> {
        self.generate_portfolio_with_progress(data, |_, _| {})
    }

    /// Like [`generate_portfolio`](Self::generate_portfolio), reporting
    /// `(images_done, images_total)` as resizes complete.
    ///
    /// Distinct images are resized in parallel; markup is assembled
    /// afterwards in document order. An item whose image fails keeps its
    /// original image URL and the rest of the page renders normally.
    pub fn generate_portfolio_with_progress(
        &self,
        data: &PortfolioData,
        progress: impl Fn(usize, usize) + Sync,
    ) -> Vec<Node> {
        self.assemble(data, &progress).0
    }

    /// Portfolio nodes plus the number of distinct images that resized.
    fn assemble(
        &self,
        data: &PortfolioData,
        progress: &(impl Fn(usize, usize) + Sync),
    ) -> (Vec<Node>, usize) {
        let resized = self.resize_all(&data.items, progress);
        let images_resized = resized.values().filter(|r| r.is_some()).count();

        let mut nodes = Vec::with_capacity(data.items.len().div_ceil(2) + data.items.len());
        for pair in data.items.chunks(2) {
            let row = Element::new("div")
                .class("row row-0-gutter")
                .children(pair.iter().map(|item| {
                    let src = resized
                        .get(item.image.as_str())
                        .cloned()
                        .flatten()
                        .unwrap_or_else(|| Arc::from(item.image.as_str()));
                    Node::from(item_card(item, &src))
                }));
            nodes.push(row.into());
        }
        nodes.extend(data.items.iter().map(|item| Node::from(item_modal(item))));
        (nodes, images_resized)
    }

    fn resize_all<'a>(
        &self,
        items: &'a [PortfolioItem],
        progress: &(impl Fn(usize, usize) + Sync),
    ) -> HashMap<&'a str, Option<Arc<str>>> {
        let mut sources: Vec<&str> = Vec::with_capacity(items.len());
        for item in items {
            if !sources.contains(&item.image.as_str()) {
                sources.push(&item.image);
            }
        }

        let total = sources.len();
        let done = AtomicUsize::new(0);
        sources
            .into_par_iter()
            .map(|src| {
                let result = self.resize_image(src).ok();
                progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
                (src, result)
            })
            .collect()
    }

    /// Fetch and parse the portfolio document, returning the rendered
    /// container content. Any fetch or parse failure is logged and yields
    /// `None`.
    pub fn load_portfolio_data(&self, path: &str) -> Option<String> {
        self.load_portfolio_data_with_progress(path, |_, _| {})
            .map(|rendered| rendered.html)
    }

    pub fn load_portfolio_data_with_progress(
        &self,
        path: &str,
        progress: impl Fn(usize, usize) + Sync,
    ) -> Option<RenderedPortfolio> {
        let data = match self
            .source
            .fetch_text(path)
            .and_then(|text| PortfolioData::from_json(&text))
        {
            Ok(data) => data,
            Err(e) => {
                warn!(path, error = %e, "Error loading portfolio data");
                return None;
            }
        };
        info!(items = data.items.len(), "Portfolio data loaded");
        let (nodes, images_resized) = self.assemble(&data, &progress);
        Some(RenderedPortfolio {
            html: render_fragment(&nodes),
            images_resized,
        })
    }

    /// Replace the container's entire content with `markup`.
    pub fn inject(&self, page: &mut HostPage, markup: &str) -> Result<()> {
        page.replace_inner(&self.container, markup)
    }

    /// Load, render and inject in one step. Returns `Ok(false)` when the
    /// document could not be loaded, in which case the page is untouched.
    pub fn render_page(&self, page: &mut HostPage, path: &str) -> Result<bool> {
        match self.load_portfolio_data(path) {
            Some(markup) => {
                self.inject(page, &markup)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Card shown in the portfolio grid.
pub fn item_card(item: &PortfolioItem, image_src: &str) -> Element {
    let caption = Element::new("figcaption")
        .child(Element::new("h2").text(&item.title))
        .child(Element::new("p").text(&item.description))
        .child(
            Element::new("a")
                .attr("href", "#")
                .attr("data-toggle", "modal")
                .attr("data-target", format!("#{}", item.modal_id))
                .text("View more"),
        );

    let figure = Element::new("figure")
        .class("effect-bubba")
        .child(
            Element::new("img")
                .class("img-responsive")
                .attr("src", image_src)
                .attr("alt", &item.title),
        )
        .child(caption);

    Element::new("div").class("col-md-6 col-0-gutter").child(
        Element::new("div")
            .class("ot-portfolio-item")
            .child(figure),
    )
}

/// Modal opened by the card's "View more" link.
pub fn item_modal(item: &PortfolioItem) -> Element {
    let label_id = format!("{}-label", item.modal_id);

    let header = Element::new("div")
        .class("modal-header")
        .child(
            Element::new("button")
                .class("close")
                .attr("type", "button")
                .attr("data-dismiss", "modal")
                .attr("aria-label", "Close")
                .child(
                    Element::new("span")
                        .attr("aria-hidden", "true")
                        .child(Node::raw("&times;")),
                ),
        )
        .child(
            Element::new("h4")
                .class("modal-title")
                .attr("id", &label_id)
                .text(&item.title),
        );

    let works = Element::new("div").class("modal-works").children(
        item.categories
            .iter()
            .map(|c| Element::new("span").text(c).into()),
    );

    let body = Element::new("div")
        .class("modal-body")
        .child(
            Element::new("img")
                .class("img-responsive")
                .attr("src", &item.image)
                .attr("alt", &item.title),
        )
        .child(works)
        .child(Element::new("p").text(&item.description));

    let footer = Element::new("div").class("modal-footer").child(
        Element::new("button")
            .class("btn btn-default")
            .attr("type", "button")
            .attr("data-dismiss", "modal")
            .text("Close"),
    );

    Element::new("div")
        .class("modal fade")
        .attr("id", &item.modal_id)
        .attr("tabindex", "-1")
        .attr("role", "dialog")
        .attr("aria-labelledby", &label_id)
        .child(
            Element::new("div")
                .class("modal-dialog")
                .attr("role", "document")
                .child(
                    Element::new("div")
                        .class("modal-content")
                        .child(header)
                        .child(body)
                        .child(footer),
                ),
        )
}
