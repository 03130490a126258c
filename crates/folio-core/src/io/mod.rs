pub mod host;
pub mod source;

pub use host::{HostPage, Selector};
pub use source::{AssetSource, FsSource, SiteSource};
