use crate::domain::ports::ContentSource;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Serves documents from a directory standing in for the site root.
#[derive(Debug, Clone)]
pub struct FileSource {
    base_path: PathBuf,
}

impl FileSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Root-absolute locations resolve against the base directory too;
    /// locations escaping it are refused.
    pub fn resolve(&self, location: &str) -> Result<PathBuf> {
        let relative = Path::new(location.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(SiteError::LocationError {
                location: location.to_string(),
                reason: "location escapes the content directory".to_string(),
            });
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.resolve(location)?;
        tracing::debug!("Reading {}", path.display());
        Ok(tokio::fs::read(path).await?)
    }
}
