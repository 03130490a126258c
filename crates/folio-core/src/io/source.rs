use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FolioError, Result};

/// Where configuration documents and images are fetched from.
///
/// Locations are the strings found in configuration documents: relative
/// paths resolved against a site root, or absolute `http(s)://` URLs.
pub trait AssetSource: Send + Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;

    fn fetch_text(&self, location: &str) -> Result<String> {
        let bytes = self.fetch(location)?;
        String::from_utf8(bytes).map_err(|e| FolioError::Fetch {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads assets from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a page-relative location against the root.
    pub fn resolve(&self, location: &str) -> PathBuf {
        let relative = location.trim_start_matches("./").trim_start_matches('/');
        self.root.join(relative)
    }
}

impl AssetSource for FsSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.resolve(location);
        debug!(path = %path.display(), "Reading asset");
        std::fs::read(&path).map_err(|e| FolioError::Fetch {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Fetches `http(s)://` locations with a blocking client.
#[cfg(feature = "remote")]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpSource {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FolioError::Fetch {
                location: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "remote")]
impl AssetSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let fetch_err = |reason: String| FolioError::Fetch {
            location: location.to_string(),
            reason,
        };
        debug!(url = location, "Fetching remote asset");
        let response = self
            .client
            .get(location)
            .send()
            .map_err(|e| fetch_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {}", status.as_u16())));
        }
        let bytes = response.bytes().map_err(|e| fetch_err(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Site-wide source: local paths from the site root, URLs over HTTP when
/// the `remote` feature is enabled.
pub struct SiteSource {
    local: FsSource,
    #[cfg(feature = "remote")]
    remote: Option<HttpSource>,
}

impl SiteSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            local: FsSource::new(root),
            #[cfg(feature = "remote")]
            remote: HttpSource::new(crate::consts::REMOTE_TIMEOUT_SECS).ok(),
        }
    }

    pub fn root(&self) -> &Path {
        self.local.root()
    }
}

impl AssetSource for SiteSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if !is_remote(location) {
            return self.local.fetch(location);
        }
        #[cfg(feature = "remote")]
        {
            if let Some(ref http) = self.remote {
                return http.fetch(location);
            }
        }
        Err(FolioError::Fetch {
            location: location.to_string(),
            reason: "remote assets are not enabled".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_strips_page_relative_prefixes() {
        let src = FsSource::new("/site");
        assert_eq!(src.resolve("./img/a.jpg"), PathBuf::from("/site/img/a.jpg"));
        assert_eq!(src.resolve("/img/a.jpg"), PathBuf::from("/site/img/a.jpg"));
        assert_eq!(src.resolve("img/a.jpg"), PathBuf::from("/site/img/a.jpg"));
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = FsSource::new(dir.path());
        let err = src.fetch("nope.json").unwrap_err();
        assert!(matches!(err, FolioError::Fetch { .. }), "got: {err}");
    }

    #[cfg(not(feature = "remote"))]
    #[test]
    fn remote_location_without_feature_fails() {
        let src = SiteSource::new("/site");
        assert!(src.fetch("https://example.com/a.jpg").is_err());
    }
}
