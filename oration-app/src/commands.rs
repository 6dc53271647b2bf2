//! Glue between the loaded config and the collector / sampler crates.

use std::time::Duration;

use anyhow::{Context, Result};
use oration_collector::{Collector, ScrapeReport};
use oration_config::{CollectorSettings, SamplerSettings};
use oration_http::HttpClient;
use oration_sampler::{GroupFilter, SampleReport, SamplingOptions};
use url::Url;

use crate::cli::SampleArgs;

pub async fn collect(settings: &CollectorSettings) -> Result<ScrapeReport> {
    let listing_url = Url::parse(&settings.listing_url)
        .with_context(|| format!("invalid listing url {:?}", settings.listing_url))?;

    let mut client = HttpClient::new(listing_url.as_str())?
        .with_timeout(Duration::from_secs(settings.request_timeout_secs));
    if let Some(agent) = &settings.user_agent {
        client = client.with_user_agent(agent)?;
    }

    let collector = Collector::new(client, listing_url, &settings.output_path);
    Ok(collector.scrape().await?)
}

pub fn sample(settings: &SamplerSettings, args: &SampleArgs) -> Result<SampleReport> {
    let filter = GroupFilter::new(settings.exclusions.iter().cloned(), settings.min_year);
    let options = sampling_options(settings, args);
    tracing::info!(
        input = %settings.input_path.display(),
        word_budget = options.word_budget,
        emit_empty = options.emit_empty,
        "sampler.start"
    );
    oration_sampler::run(&settings.input_path, &settings.output_dir, &filter, &options)
        .with_context(|| format!("sampling {}", settings.input_path.display()))
}

/// CLI flags win over config.
fn sampling_options(settings: &SamplerSettings, args: &SampleArgs) -> SamplingOptions {
    SamplingOptions {
        word_budget: args.chunk_size.unwrap_or(settings.default_chunk_size),
        target_chunks: settings.target_chunks,
        emit_empty: settings.emit_empty_samples && !args.skip_empty,
    }
}

pub fn collect_summary(report: &ScrapeReport) -> String {
    format!(
        "Saved {} of {} speeches to {}",
        report.saved,
        report.discovered,
        report.output_path.display()
    )
}

pub fn sample_summary(report: &SampleReport) -> String {
    let stats = &report.stats;
    let or_dash = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    [
        format!("Samples saved to {}", report.output_path.display()),
        format!("Total samples: {}", stats.count),
        format!("Average word count: {:.2}", stats.mean),
        format!("Minimum word count: {}", or_dash(stats.min)),
        format!("Maximum word count: {}", or_dash(stats.max)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use oration_common::{SampleStats, SpeechRecord, io};
    use std::path::PathBuf;

    fn settings_in(dir: &std::path::Path) -> SamplerSettings {
        SamplerSettings {
            input_path: dir.join("speeches.json"),
            output_dir: dir.join("samples"),
            ..SamplerSettings::default()
        }
    }

    #[test]
    fn flags_override_config() {
        let settings = SamplerSettings::default();
        let args = SampleArgs {
            chunk_size: Some(75),
            skip_empty: true,
        };
        let options = sampling_options(&settings, &args);
        assert_eq!(options.word_budget, 75);
        assert!(!options.emit_empty);
        assert_eq!(options.target_chunks, settings.target_chunks);
    }

    #[test]
    fn config_applies_without_flags() {
        let settings = SamplerSettings {
            default_chunk_size: 120,
            emit_empty_samples: false,
            ..SamplerSettings::default()
        };
        let options = sampling_options(&settings, &SampleArgs::default());
        assert_eq!(options.word_budget, 120);
        assert!(!options.emit_empty);
    }

    #[test]
    fn sample_writes_budget_named_file() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings_in(tmp.path());
        let records = vec![
            SpeechRecord::new("1933", "u1", "Franklin D. Roosevelt", "Excluded speech."),
            SpeechRecord::new("1961", "u2", "John F. Kennedy", "We observe today. Not a victory."),
        ];
        io::write_json_pretty(&settings.input_path, &records).unwrap();

        let args = SampleArgs {
            chunk_size: Some(10),
            skip_empty: false,
        };
        let report = sample(&settings, &args).unwrap();
        assert_eq!(
            report.output_path,
            tmp.path().join("samples").join("speech_samples_10.json")
        );
        assert!(report.output_path.exists());
        assert_eq!(report.speakers, 1);
    }

    #[test]
    fn sample_reports_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let err = sample(&settings_in(tmp.path()), &SampleArgs::default()).unwrap_err();
        assert!(format!("{err:#}").contains("speeches.json"));
    }

    #[test]
    fn summaries_format_stats() {
        let report = SampleReport {
            output_path: PathBuf::from("samples/speech_samples_200.json"),
            speakers: 2,
            speeches: 3,
            stats: SampleStats {
                count: 3,
                total_words: 10,
                mean: 10.0 / 3.0,
                min: Some(2),
                max: Some(5),
            },
            skipped_empty: 0,
            escalated: 0,
        };
        let text = sample_summary(&report);
        assert!(text.starts_with("Samples saved to samples/speech_samples_200.json"));
        assert!(text.contains("Average word count: 3.33"));
        assert!(text.contains("Minimum word count: 2"));
        assert!(text.contains("Maximum word count: 5"));

        let empty = SampleReport {
            stats: SampleStats::default(),
            ..report
        };
        assert!(sample_summary(&empty).contains("Minimum word count: -"));

        let scrape = ScrapeReport {
            discovered: 4,
            saved: 3,
            failed: 1,
            empty: 0,
            output_path: PathBuf::from("out.json"),
        };
        assert_eq!(collect_summary(&scrape), "Saved 3 of 4 speeches to out.json");
    }
}
