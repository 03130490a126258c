use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CONTAINER_ID, DEFAULT_GALLERY_CONFIG, DEFAULT_LAYOUT_WIDTH, DEFAULT_PORTFOLIO_DATA,
};
use crate::error::Result;
use crate::resize::ResizeOptions;

/// Site build settings, usually read from `folio.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory documents and media are resolved against.
    pub root: PathBuf,
    /// Host page, relative to `root`.
    pub page: PathBuf,
    /// Where the finished page is written, relative to `root`.
    pub output: PathBuf,
    /// Portfolio item document; omit to skip the item renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_data: Option<String>,
    /// Gallery configuration; omit to skip the gallery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_config: Option<String>,
    pub container_id: String,
    /// Maximum number of resized images kept; unbounded when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
    /// Container width for the static masonry pass.
    pub layout_width: u32,
    pub resize: ResizeOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            page: PathBuf::from("index.html"),
            output: PathBuf::from("dist/index.html"),
            portfolio_data: Some(DEFAULT_PORTFOLIO_DATA.to_string()),
            gallery_config: Some(DEFAULT_GALLERY_CONFIG.to_string()),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            cache_capacity: None,
            layout_width: DEFAULT_LAYOUT_WIDTH,
            resize: ResizeOptions::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn page_path(&self) -> PathBuf {
        self.root.join(&self.page)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}
