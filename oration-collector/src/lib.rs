//! Speech collection from the archive's listing and document pages.
//!
//! - [`listing`]: year links on the listing page
//! - [`document`]: text and speaker from one document page
//! - [`fetch`]: the [`PageFetcher`] seam, implemented for [`oration_http::HttpClient`]
//!
//! [`Collector::scrape`] walks every discovered year one page at a time,
//! pausing [`POLITENESS_DELAY`] between requests, and writes the surviving
//! records in one go at the end.

pub mod document;
pub mod fetch;
pub mod listing;

use std::path::PathBuf;
use std::time::Duration;

use oration_common::{io, OrationError, Result, SpeechRecord};
use url::Url;

pub use document::{parse_document, Document};
pub use fetch::PageFetcher;
pub use listing::{parse_listing, ListingEntry};

/// Fixed pause between document requests.
pub const POLITENESS_DELAY: Duration = Duration::from_secs(1);

/// Counts from one scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    pub discovered: usize,
    pub saved: usize,
    /// Documents whose fetch failed outright.
    pub failed: usize,
    /// Documents fetched but without any speech text.
    pub empty: usize,
    pub output_path: PathBuf,
}

pub struct Collector<F> {
    fetcher: F,
    listing_url: Url,
    output_path: PathBuf,
}

impl<F: PageFetcher> Collector<F> {
    pub fn new(fetcher: F, listing_url: Url, output_path: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            listing_url,
            output_path: output_path.into(),
        }
    }

    /// Fetch the listing page and return its year links.
    ///
    /// A failure here is fatal to the run.
    pub async fn discover(&self) -> Result<Vec<ListingEntry>> {
        let html = self
            .fetcher
            .fetch_page(&self.listing_url)
            .await
            .map_err(|e| OrationError::Listing(format!("{}: {e}", self.listing_url)))?;
        let entries = parse_listing(&html, &self.listing_url);
        tracing::info!(url = %self.listing_url, count = entries.len(), "Found {} speeches.", entries.len());
        Ok(entries)
    }

    /// Fetch and parse one document page.
    pub async fn fetch_document(&self, url: &Url) -> Result<Document> {
        let html = self
            .fetcher
            .fetch_page(url)
            .await
            .map_err(|e| OrationError::Document {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(parse_document(&html))
    }

    /// Discover, download every document in page order, and write the
    /// records with text to the output path.
    ///
    /// Individual document failures are logged and skipped; only a listing
    /// failure or an unwritable output aborts the run, in which case nothing
    /// is written.
    pub async fn scrape(&self) -> Result<ScrapeReport> {
        let entries = self.discover().await?;
        let total = entries.len();

        let mut records = Vec::with_capacity(total);
        let mut failed = 0;
        let mut empty = 0;

        for (ix, entry) in entries.iter().enumerate() {
            if ix > 0 {
                tokio::time::sleep(POLITENESS_DELAY).await;
            }
            tracing::info!(
                index = ix + 1,
                total,
                year = %entry.year,
                "Downloading: ({}/{}) Year: {}",
                ix + 1,
                total,
                entry.year
            );

            let doc = match self.fetch_document(&entry.url).await {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(year = %entry.year, url = %entry.url, error = %e, "Failed to download {}", entry.year);
                    failed += 1;
                    continue;
                }
            };

            match doc.text {
                Some(text) => records.push(SpeechRecord {
                    year: entry.year.clone(),
                    url: entry.url.to_string(),
                    speaker: doc.speaker,
                    text: Some(text),
                }),
                None => {
                    tracing::warn!(year = %entry.year, url = %entry.url, "No text found for {}", entry.year);
                    empty += 1;
                }
            }
        }

        io::write_json_pretty(&self.output_path, &records)?;
        tracing::info!(
            discovered = total,
            saved = records.len(),
            failed,
            empty,
            path = %self.output_path.display(),
            "Saved {} speeches to {}.",
            records.len(),
            self.output_path.display()
        );

        Ok(ScrapeReport {
            discovered: total,
            saved: records.len(),
            failed,
            empty,
            output_path: self.output_path.clone(),
        })
    }
}
