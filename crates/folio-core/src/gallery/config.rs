use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::{FILTER_ALL, MEDIA_PREFIX};
use crate::error::Result;
use crate::io::AssetSource;

/// The gallery configuration document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<GalleryItem>,
    #[serde(default)]
    pub settings: GallerySettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: MediaType,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub featured: bool,
}

impl GalleryItem {
    /// Location of the media file relative to the page.
    pub fn media_path(&self) -> String {
        format!("{MEDIA_PREFIX}{}", self.filename)
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaType::Video
    }

    /// Frame size: explicit dimensions where set (non-zero), else defaults.
    pub fn frame_size(&self, settings: &GallerySettings) -> (u32, u32) {
        let dims = self.dimensions.unwrap_or(Dimensions {
            width: 0,
            height: 0,
        });
        let width = if dims.width > 0 {
            dims.width
        } else {
            settings.default_image_width
        };
        let height = if dims.height > 0 {
            dims.height
        } else {
            settings.default_image_height
        };
        (width, height)
    }

    /// Frame height as a fraction of its width.
    pub fn aspect_ratio(&self, settings: &GallerySettings) -> f64 {
        let (width, height) = self.frame_size(settings);
        if width == 0 {
            return 1.0;
        }
        height as f64 / width as f64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GallerySettings {
    pub masonry: MasonrySettings,
    pub default_image_width: u32,
    pub default_image_height: u32,
    pub lightbox_enabled: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            masonry: MasonrySettings::default(),
            default_image_width: 400,
            default_image_height: 300,
            lightbox_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MasonrySettings {
    pub enabled: bool,
    /// Base tile width in pixels; featured tiles are twice as wide.
    pub column_width: u32,
    pub gutter: u32,
}

impl Default for MasonrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            column_width: 300,
            gutter: 20,
        }
    }
}

impl GalleryConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// `(item filename, category id)` pairs naming a category that is not
    /// declared. Not enforced; reported by `folio check`.
    pub fn unknown_category_refs(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .flat_map(|item| {
                item.categories
                    .iter()
                    .filter(|c| {
                        c.as_str() != FILTER_ALL && !self.categories.iter().any(|k| &k.id == *c)
                    })
                    .map(move |c| (item.filename.as_str(), c.as_str()))
            })
            .collect()
    }
}

/// Fetch and parse the gallery configuration. Failures are logged and
/// yield `None`.
pub fn load_config(source: &dyn AssetSource, path: &str) -> Option<GalleryConfig> {
    match source
        .fetch_text(path)
        .and_then(|text| GalleryConfig::from_yaml(&text))
    {
        Ok(config) => {
            info!(
                categories = config.categories.len(),
                items = config.items.len(),
                "Gallery config loaded"
            );
            Some(config)
        }
        Err(e) => {
            warn!(path, error = %e, "Error loading configuration");
            None
        }
    }
}
