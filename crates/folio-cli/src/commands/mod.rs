pub mod build;
pub mod check;
pub mod config;
pub mod filter;
pub mod gallery;
pub mod portfolio;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_core::site::SiteConfig;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SITE_CONFIG: &str = "folio.toml";

/// Load the site config from `path`, else `./folio.toml` if present, else defaults.
pub fn load_site_config(path: Option<&Path>) -> Result<SiteConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SITE_CONFIG);
            if !fallback.exists() {
                return Ok(SiteConfig::default());
            }
            fallback
        }
    };
    debug!(path = %path.display(), "Loading site config");
    SiteConfig::load(&path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Write `contents` to `output`, or print it when no output is given.
pub fn emit(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved to {}", path.display());
        }
        None => print!("{contents}"),
    }
    Ok(())
}
