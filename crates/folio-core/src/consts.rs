/// Width of the off-screen canvas portfolio images are drawn onto.
pub const CANVAS_WIDTH: u32 = 800;

/// Height of the off-screen canvas portfolio images are drawn onto.
pub const CANVAS_HEIGHT: u32 = 600;

/// JPEG quality (1-100) used for resized portfolio images.
pub const JPEG_QUALITY: u8 = 85;

/// Prefix of every generated image data URL.
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Filter key of the catch-all "All" button.
pub const FILTER_ALL: &str = "all";

/// Path prefix gallery media filenames are resolved under.
pub const MEDIA_PREFIX: &str = "portfolio/";

/// Image shown when a gallery image fails to load.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";

/// Viewport width at or below which gallery tiles collapse to full width.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Delay between the last window resize and the masonry relayout.
pub const RESIZE_DEBOUNCE_MS: u64 = 250;

/// Default container id targeted by the portfolio item renderer.
pub const DEFAULT_CONTAINER_ID: &str = "portfolio-container";

/// Default location of the portfolio item document.
pub const DEFAULT_PORTFOLIO_DATA: &str = "portfolio-configuration.json";

/// Default location of the gallery configuration document.
pub const DEFAULT_GALLERY_CONFIG: &str = "portfolio-config.yml";

/// Class of the filter bar element in the host page.
pub const FILTER_CONTAINER_CLASS: &str = "filter-container";

/// Class of the gallery element in the host page.
pub const GALLERY_CLASS: &str = "gallery";

/// Container width used for the static masonry pass when none is configured.
pub const DEFAULT_LAYOUT_WIDTH: u32 = 1170;

/// Request timeout for remote assets.
pub const REMOTE_TIMEOUT_SECS: u64 = 30;
