use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    #[error("Invalid portfolio data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid gallery config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid site config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No element matching `{0}` in host page")]
    ElementNotFound(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
