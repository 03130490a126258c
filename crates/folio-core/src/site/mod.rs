//! Whole-site build: both controllers rendered into one host page.

mod build;
pub mod config;

pub use build::{build_site, BuildReport};
pub use config::SiteConfig;
