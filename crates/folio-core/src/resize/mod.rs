pub mod cache;
pub mod cover;

pub use cache::ImageCache;
pub use cover::{
    cover_placement, draw_cover, resize_to_data_url, CoverPlacement, ResizeOptions, SourceCrop,
};
