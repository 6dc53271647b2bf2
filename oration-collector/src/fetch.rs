use async_trait::async_trait;
use oration_http::{HttpClient, HttpError, RequestOpts};
use url::Url;

/// Source of raw HTML pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<String, HttpError>;
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &Url) -> Result<String, HttpError> {
        self.get_text(
            url.as_str(),
            RequestOpts {
                allow_absolute: true,
            },
        )
        .await
    }
}
