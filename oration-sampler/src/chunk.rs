//! Word-level chunking and the per-speaker chunk allowance.

/// Chunks shared across all of one speaker's speeches.
pub const DEFAULT_TARGET_CHUNKS: usize = 52;

/// Split `text` into at most `num_chunks` runs of equal word length.
///
/// The run length is `max(1, words / num_chunks)`. Runs past the
/// `num_chunks`-th are discarded, so when the word count does not divide
/// evenly the last `words % num_chunks` words never reach any chunk.
///
/// ```
/// use oration_sampler::split_into_chunks;
///
/// let chunks = split_into_chunks("a b c d e f g", 3);
/// assert_eq!(chunks, vec!["a b", "c d", "e f"]); // "g" is dropped
/// ```
pub fn split_into_chunks(text: &str, num_chunks: usize) -> Vec<String> {
    if num_chunks == 0 {
        return Vec::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let chunk_size = (words.len() / num_chunks).max(1);
    words
        .chunks(chunk_size)
        .take(num_chunks)
        .map(|run| run.join(" "))
        .collect()
}

/// Chunks to draw from each speech of a speaker who gave `speech_count`
/// speeches: `floor(target / speech_count) + 1`.
///
/// Never below one, and never increasing as `speech_count` grows.
///
/// ```
/// use oration_sampler::num_chunks_for;
///
/// assert_eq!(num_chunks_for(1, 52), 53);
/// assert_eq!(num_chunks_for(4, 52), 14);
/// assert_eq!(num_chunks_for(100, 52), 1);
/// ```
pub fn num_chunks_for(speech_count: usize, target_chunks: usize) -> usize {
    target_chunks / speech_count.max(1) + 1
}
