#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use folio_core::error::{FolioError, Result};
use folio_core::io::AssetSource;
use folio_core::portfolio::PortfolioItem;
use image::{ImageFormat, Rgb, RgbImage};

/// In-memory asset source that records every fetch.
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
    fetches: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(location.to_string(), bytes.into());
        self
    }

    pub fn fetch_count(&self, location: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|l| *l == location)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.fetches.lock().unwrap().push(location.to_string());
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| FolioError::Fetch {
                location: location.to_string(),
                reason: "not found".into(),
            })
    }
}

/// Encode a solid-colour PNG.
pub fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

pub fn item(n: usize) -> PortfolioItem {
    PortfolioItem {
        image: format!("img/{n}.png"),
        title: format!("Project {n}"),
        description: format!("About project {n}"),
        modal_id: format!("modal-{n}"),
        categories: vec!["Web".into(), "Branding".into()],
    }
}

/// Source holding `img/0.png` .. `img/{count-1}.png`.
pub fn source_with_images(count: usize) -> MemorySource {
    (0..count).fold(MemorySource::new(), |src, n| {
        src.with(&format!("img/{n}.png"), png_bytes(40, 30, [200, 40, 40]))
    })
}

pub const HOST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Portfolio</title>
</head>
<body>
<section id="portfolio">
  <div id="portfolio-container"><p>Loading…</p></div>
</section>
<section id="gallery">
  <div class="filter-container"></div>
  <div class="gallery"></div>
</section>
</body>
</html>
"#;

pub const GALLERY_YAML: &str = r#"
categories:
  - id: web
    label: Web
    description: Websites and apps
  - id: print
    label: Print
    description: Posters and books
  - id: motion
    label: Motion
    description: Video work
items:
  - filename: site.png
    title: A site
    type: image
    categories: [web]
  - filename: poster.png
    title: A poster
    type: image
    categories: [print, web]
    featured: true
    dimensions:
      width: 600
      height: 900
  - filename: reel.mp4
    title: Showreel
    type: video
    categories: [motion]
  - filename: missing.png
    title: Lost
    type: image
    categories: [print]
settings:
  masonry:
    enabled: true
    columnWidth: 300
    gutter: 20
  defaultImageWidth: 400
  defaultImageHeight: 300
  lightboxEnabled: true
"#;

/// Source with the gallery config and all gallery media except `missing.png`.
pub fn gallery_source() -> MemorySource {
    MemorySource::new()
        .with("portfolio-config.yml", GALLERY_YAML)
        .with("portfolio/site.png", png_bytes(40, 30, [10, 10, 10]))
        .with("portfolio/poster.png", png_bytes(20, 30, [10, 10, 10]))
        .with("portfolio/reel.mp4", vec![0u8; 16])
}
