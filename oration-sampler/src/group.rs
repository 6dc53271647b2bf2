//! Per-speaker grouping of collected speeches.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use oration_common::{io, Result, SpeechRecord};

/// A speech kept for sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedSpeech {
    pub year: String,
    pub url: String,
    pub text: String,
}

/// Which records survive grouping.
#[derive(Debug, Clone)]
pub struct GroupFilter {
    pub exclusions: HashSet<String>,
    /// Earliest year kept, inclusive.
    pub min_year: u16,
}

impl GroupFilter {
    pub fn new<I, S>(exclusions: I, min_year: u16) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclusions: exclusions.into_iter().map(Into::into).collect(),
            min_year,
        }
    }
}

/// Speaker -> speeches, both in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SpeechGroup {
    speakers: IndexMap<String, Vec<GroupedSpeech>>,
}

impl SpeechGroup {
    pub fn push(&mut self, speaker: &str, speech: GroupedSpeech) {
        match self.speakers.get_mut(speaker) {
            Some(list) => list.push(speech),
            None => {
                self.speakers.insert(speaker.to_string(), vec![speech]);
            }
        }
    }

    pub fn speeches_for(&self, speaker: &str) -> Option<&[GroupedSpeech]> {
        self.speakers.get(speaker).map(Vec::as_slice)
    }

    pub fn speakers(&self) -> impl Iterator<Item = &str> {
        self.speakers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GroupedSpeech])> {
        self.speakers
            .iter()
            .map(|(name, speeches)| (name.as_str(), speeches.as_slice()))
    }

    /// Number of distinct speakers.
    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    pub fn speech_count(&self) -> usize {
        self.speakers.values().map(Vec::len).sum()
    }
}

/// Read the collector's output file and group it by speaker.
pub fn load_and_group(path: &Path, filter: &GroupFilter) -> Result<SpeechGroup> {
    let records: Vec<SpeechRecord> = io::read_json(path)?;
    tracing::info!(path = %path.display(), records = records.len(), "sampler.input.loaded");
    Ok(group_records(records, filter))
}

/// Group already-loaded records, dropping excluded speakers, early years and
/// records without text.
pub fn group_records<I>(records: I, filter: &GroupFilter) -> SpeechGroup
where
    I: IntoIterator<Item = SpeechRecord>,
{
    let mut group = SpeechGroup::default();
    for record in records {
        if filter.exclusions.contains(&record.speaker) {
            tracing::debug!(speaker = %record.speaker, year = %record.year, "sampler.skip.excluded");
            continue;
        }
        let Some(year) = record.year_number() else {
            tracing::warn!(speaker = %record.speaker, year = %record.year, url = %record.url, "sampler.skip.bad_year");
            continue;
        };
        if year < filter.min_year {
            continue;
        }
        let Some(text) = record.text else {
            tracing::warn!(speaker = %record.speaker, year = %record.year, "sampler.skip.no_text");
            continue;
        };
        group.push(
            &record.speaker,
            GroupedSpeech {
                year: record.year,
                url: record.url,
                text,
            },
        );
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> GroupFilter {
        GroupFilter::new(["Zachary Taylor", "Franklin D. Roosevelt"], 1900)
    }

    #[test]
    fn preserves_speaker_and_speech_order() {
        let records = vec![
            SpeechRecord::new("1913", "u1", "Woodrow Wilson", "a"),
            SpeechRecord::new("1902", "u2", "Theodore Roosevelt", "b"),
            SpeechRecord::new("1914", "u3", "Woodrow Wilson", "c"),
        ];
        let group = group_records(records, &filter());

        assert_eq!(
            group.speakers().collect::<Vec<_>>(),
            vec!["Woodrow Wilson", "Theodore Roosevelt"]
        );
        let wilson = group.speeches_for("Woodrow Wilson").unwrap();
        assert_eq!(wilson.iter().map(|s| s.url.as_str()).collect::<Vec<_>>(), vec!["u1", "u3"]);
        assert_eq!(group.speech_count(), 3);
    }

    #[test]
    fn excluded_speakers_are_dropped_regardless_of_year() {
        let records = vec![
            SpeechRecord::new("1850", "u", "Zachary Taylor", "..."),
            SpeechRecord::new("1941", "u", "Franklin D. Roosevelt", "..."),
        ];
        assert!(group_records(records, &filter()).is_empty());
    }

    #[test]
    fn year_threshold_is_inclusive() {
        let records = vec![
            SpeechRecord::new("1899", "early", "William McKinley", "x"),
            SpeechRecord::new("1900", "boundary", "William McKinley", "y"),
        ];
        let group = group_records(records, &filter());
        let speeches = group.speeches_for("William McKinley").unwrap();
        assert_eq!(speeches.len(), 1);
        assert_eq!(speeches[0].url, "boundary");
    }

    #[test]
    fn records_without_text_or_with_bad_years_are_skipped() {
        let mut no_text = SpeechRecord::new("1950", "u", "Harry S. Truman", "");
        no_text.text = None;
        let bad_year = SpeechRecord::new("19x0", "u", "Harry S. Truman", "t");
        let group = group_records(vec![no_text, bad_year], &filter());
        assert!(group.is_empty());
    }

    #[test]
    fn loads_legacy_president_key_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("speeches.json");
        std::fs::write(
            &path,
            r#"[{"year":"1901","president":"Theodore Roosevelt","text":"To the Senate.","url":"u"}]"#,
        )
        .unwrap();

        let group = load_and_group(&path, &filter()).unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(
            group.speeches_for("Theodore Roosevelt").unwrap()[0].text,
            "To the Senate."
        );
    }
}
