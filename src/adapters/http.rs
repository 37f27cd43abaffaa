use crate::domain::ports::ContentSource;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use url::Url;

/// Fetches documents relative to a base URL, the way a page resolves
/// relative and root-absolute paths against its own address.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).map_err(|e| SiteError::LocationError {
            location: base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base,
            client: Client::new(),
        })
    }

    pub fn resolve(&self, location: &str) -> Result<Url> {
        self.base
            .join(location)
            .map_err(|e| SiteError::LocationError {
                location: location.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let url = self.resolve(location)?;
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status for {}: {}", location, status);
        if !status.is_success() {
            return Err(SiteError::StatusError {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn resolves_relative_and_absolute_locations() {
        let source = HttpSource::new("https://example.com/site/index.html").unwrap();
        assert_eq!(
            source.resolve("content/skills.json").unwrap().as_str(),
            "https://example.com/site/content/skills.json"
        );
        assert_eq!(
            source.resolve("./content/skills.json").unwrap().as_str(),
            "https://example.com/site/content/skills.json"
        );
        assert_eq!(
            source.resolve("/content/projects.json").unwrap().as_str(),
            "https://example.com/content/projects.json"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(
            HttpSource::new("not a url"),
            Err(SiteError::LocationError { .. })
        ));
    }

    #[tokio::test]
    async fn sends_no_cache_and_maps_error_status() {
        let server = MockServer::start();
        let ok = server.mock(|when, then| {
            when.method(GET)
                .path("/content/skills.json")
                .header("cache-control", "no-cache");
            then.status(200).body(r#"["Rust"]"#);
        });
        let missing = server.mock(|when, then| {
            when.method(GET).path("/content/gone.json");
            then.status(404);
        });

        let source = HttpSource::new(&server.url("/")).unwrap();
        let body = source.fetch("content/skills.json").await.unwrap();
        assert_eq!(body, br#"["Rust"]"#.to_vec());

        let err = source.fetch("content/gone.json").await.unwrap_err();
        assert!(matches!(err, SiteError::StatusError { status: 404, .. }));

        ok.assert();
        missing.assert();
    }
}
