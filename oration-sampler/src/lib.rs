//! Per-speaker excerpt sampling over collected speeches.
//!
//! The pipeline, for every speaker in first-seen order:
//!
//! 1. [`num_chunks_for`] decides how many chunks each of their speeches is
//!    cut into, so a speaker with many speeches contributes about as many
//!    chunks as one with few.
//! 2. [`split_into_chunks`] cuts each speech into equal word runs.
//! 3. [`excerpt`] keeps the leading whole sentences of each run that fit the
//!    word budget.
//!
//! ```
//! use oration_common::SpeechRecord;
//! use oration_sampler::{generate_samples, group_records, GroupFilter, SamplingOptions};
//!
//! let records = vec![SpeechRecord::new("1901", "u", "T. Roosevelt", "We meet. Times change.")];
//! let group = group_records(records, &GroupFilter::new(Vec::<String>::new(), 1900));
//! let batch = generate_samples(&group, &SamplingOptions::with_word_budget(200));
//! assert!(batch.samples.iter().all(|s| s.speaker == "T. Roosevelt"));
//! ```

pub mod chunk;
pub mod excerpt;
pub mod group;

use std::path::{Path, PathBuf};

use oration_common::{io, Result, SampleRecord, SampleStats};

pub use chunk::{num_chunks_for, split_into_chunks, DEFAULT_TARGET_CHUNKS};
pub use excerpt::{
    excerpt, sentence_bounded_excerpt, split_sentences, Excerpt, BUDGET_ESCALATION_STEP,
};
pub use group::{group_records, load_and_group, GroupFilter, GroupedSpeech, SpeechGroup};

pub const DEFAULT_WORD_BUDGET: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingOptions {
    /// Words allowed per excerpt before sentences are cut off.
    pub word_budget: usize,
    /// Chunk allowance per speaker, see [`num_chunks_for`].
    pub target_chunks: usize,
    /// Keep records whose excerpt came out empty.
    pub emit_empty: bool,
}

impl SamplingOptions {
    pub fn with_word_budget(word_budget: usize) -> Self {
        Self {
            word_budget,
            ..Self::default()
        }
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            word_budget: DEFAULT_WORD_BUDGET,
            target_chunks: DEFAULT_TARGET_CHUNKS,
            emit_empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    pub samples: Vec<SampleRecord>,
    pub stats: SampleStats,
    /// Empty excerpts left out because `emit_empty` was off.
    pub skipped_empty: usize,
    /// Excerpts whose opening sentence needed a widened budget.
    pub escalated: usize,
}

/// Draw excerpts from every speech in `group`.
pub fn generate_samples(group: &SpeechGroup, options: &SamplingOptions) -> SampleBatch {
    let mut samples = Vec::new();
    let mut skipped_empty = 0;
    let mut escalated = 0;

    for (speaker, speeches) in group.iter() {
        let num_chunks = num_chunks_for(speeches.len(), options.target_chunks);
        tracing::debug!(%speaker, speeches = speeches.len(), num_chunks, "sampler.speaker");

        for speech in speeches {
            for chunk in split_into_chunks(&speech.text, num_chunks) {
                let e = excerpt(&chunk, options.word_budget);
                if e.escalations > 0 {
                    escalated += 1;
                }
                match sample_for(speaker, speech, e, options.emit_empty) {
                    Some(sample) => samples.push(sample),
                    None => skipped_empty += 1,
                }
            }
        }
    }

    let stats = SampleStats::from_samples(&samples);
    SampleBatch {
        samples,
        stats,
        skipped_empty,
        escalated,
    }
}

/// Wrap an excerpt as a record, or `None` when it is empty and empties are
/// not emitted. Chunks always hold at least one word, so only a blank chunk
/// can produce an empty excerpt.
fn sample_for(
    speaker: &str,
    speech: &GroupedSpeech,
    excerpt: Excerpt,
    emit_empty: bool,
) -> Option<SampleRecord> {
    if excerpt.text.is_empty() && !emit_empty {
        return None;
    }
    Some(SampleRecord::new(
        speaker,
        speech.year.as_str(),
        speech.url.as_str(),
        excerpt.text,
    ))
}

/// `<output_dir>/speech_samples_<word_budget>.json`
pub fn sample_output_path(output_dir: &Path, word_budget: usize) -> PathBuf {
    output_dir.join(format!("speech_samples_{word_budget}.json"))
}

/// Outcome of a full sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub output_path: PathBuf,
    pub speakers: usize,
    pub speeches: usize,
    pub stats: SampleStats,
    pub skipped_empty: usize,
    pub escalated: usize,
}

/// Load, group, sample and write in one pass. The output file is replaced
/// atomically, and `output_dir` is created when missing.
pub fn run(
    input_path: &Path,
    output_dir: &Path,
    filter: &GroupFilter,
    options: &SamplingOptions,
) -> Result<SampleReport> {
    let group = load_and_group(input_path, filter)?;
    let batch = generate_samples(&group, options);

    io::ensure_dir(output_dir)?;
    let output_path = sample_output_path(output_dir, options.word_budget);
    io::write_json_pretty(&output_path, &batch.samples)?;

    tracing::info!(
        path = %output_path.display(),
        speakers = group.len(),
        samples = batch.stats.count,
        mean_words = batch.stats.mean,
        min_words = ?batch.stats.min,
        max_words = ?batch.stats.max,
        skipped_empty = batch.skipped_empty,
        escalated = batch.escalated,
        "sampler.run.complete"
    );

    Ok(SampleReport {
        output_path,
        speakers: group.len(),
        speeches: group.speech_count(),
        stats: batch.stats,
        skipped_empty: batch.skipped_empty,
        escalated: batch.escalated,
    })
}
