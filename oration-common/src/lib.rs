//! Common types and utilities shared across Oration crates.
//!
//! This crate defines the record types exchanged between the collector and
//! the sampler, the shared error type, JSON file helpers, and observability
//! setup. It stays dependency-light so every crate in the workspace can pull
//! it in.
//!
//! # Overview
//!
//! - [`SpeechRecord`]: one scraped speech, as written by the collector
//! - [`SampleRecord`]: one sentence-bounded excerpt, as written by the sampler
//! - [`SampleStats`]: aggregate word-count statistics over a sample set
//! - [`io`]: atomic pretty-printed JSON reads/writes
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`OrationError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use oration_common::SpeechRecord;
//!
//! let record = SpeechRecord::new("1913", "https://example.org/1913", "Woodrow Wilson", "Gentlemen.");
//! assert_eq!(record.year_number(), Some(1913));
//! ```
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod io;
pub mod observability;

/// Speaker name used when a document page carries no recognisable title.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// A single speech as produced by the collector.
///
/// `speaker` is written under its own name but older files label it
/// `president`; both spellings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRecord {
    /// Four-digit year, kept as text exactly as it appeared on the listing.
    pub year: String,
    pub url: String,
    #[serde(alias = "president")]
    pub speaker: String,
    /// Plain text of the speech. Absent when extraction failed upstream.
    #[serde(default)]
    pub text: Option<String>,
}

impl SpeechRecord {
    pub fn new(
        year: impl Into<String>,
        url: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            url: url.into(),
            speaker: speaker.into(),
            text: Some(text.into()),
        }
    }

    /// Numeric year, or `None` when the stored value is not a 4-digit numeral.
    pub fn year_number(&self) -> Option<u16> {
        if self.year.len() == 4 && self.year.bytes().all(|b| b.is_ascii_digit()) {
            self.year.parse().ok()
        } else {
            None
        }
    }
}

/// One excerpt drawn from a speech chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub speaker: String,
    pub year: String,
    pub url: String,
    /// Zero or more complete sentences. Empty when no sentence fit the budget.
    pub sample: String,
    /// Whitespace-delimited token count of `sample`.
    pub word_count: usize,
}

impl SampleRecord {
    /// Build a record whose `word_count` is derived from `sample`.
    pub fn new(
        speaker: impl Into<String>,
        year: impl Into<String>,
        url: impl Into<String>,
        sample: impl Into<String>,
    ) -> Self {
        let sample = sample.into();
        let word_count = sample.split_whitespace().count();
        Self {
            speaker: speaker.into(),
            year: year.into(),
            url: url.into(),
            sample,
            word_count,
        }
    }
}

/// Aggregate word-count statistics over a set of samples.
///
/// ```rust
/// use oration_common::{SampleRecord, SampleStats};
///
/// let samples = vec![
///     SampleRecord::new("A", "1901", "u", "One two three."),
///     SampleRecord::new("A", "1901", "u", "Four."),
/// ];
/// let stats = SampleStats::from_samples(&samples);
/// assert_eq!(stats.count, 2);
/// assert_eq!(stats.min, Some(1));
/// assert_eq!(stats.max, Some(3));
/// assert!((stats.mean - 2.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SampleStats {
    pub count: usize,
    pub total_words: usize,
    pub mean: f64,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl SampleStats {
    pub fn from_samples(samples: &[SampleRecord]) -> Self {
        let total_words: usize = samples.iter().map(|s| s.word_count).sum();
        let mean = if samples.is_empty() {
            0.0
        } else {
            total_words as f64 / samples.len() as f64
        };
        Self {
            count: samples.len(),
            total_words,
            mean,
            min: samples.iter().map(|s| s.word_count).min(),
            max: samples.iter().map(|s| s.word_count).max(),
        }
    }
}

/// Error types used across the Oration system.
#[derive(thiserror::Error, Debug)]
pub enum OrationError {
    /// The listing page could not be fetched or yielded nothing usable.
    #[error("listing page unavailable: {0}")]
    Listing(String),

    /// A single document failed to download or parse.
    #[error("document fetch failed for {url}: {message}")]
    Document { url: String, message: String },

    /// Reading or writing a data file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file did not contain the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias for results that use [`OrationError`].
pub type Result<T> = std::result::Result<T, OrationError>;
