//! Sentence-bounded excerpts.

use std::sync::LazyLock;

use regex::Regex;

/// Words added to the budget per round when the opening sentence overflows it.
pub const BUDGET_ESCALATION_STEP: usize = 10;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary regex"));

/// An excerpt plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub word_count: usize,
    /// Budget rounds needed before the opening sentence fit. Zero when the
    /// caller's budget was enough.
    pub escalations: usize,
}

/// Split on `.`, `!` or `?` followed by whitespace. The terminator stays with
/// its sentence; blank fragments are dropped.
///
/// ```
/// use oration_sampler::split_sentences;
///
/// assert_eq!(split_sentences("Yes. No! Why? ok"), vec!["Yes.", "No!", "Why?", "ok"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        // terminators are ASCII, so +1 stays on a char boundary
        push_non_blank(&mut sentences, &text[start..m.start() + 1]);
        start = m.end();
    }
    push_non_blank(&mut sentences, &text[start..]);
    sentences
}

fn push_non_blank<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        out.push(fragment);
    }
}

/// Leading whole sentences of `text` totalling at most `word_budget` words.
///
/// See [`excerpt`] for the rules; this returns only the text.
///
/// ```
/// use oration_sampler::sentence_bounded_excerpt;
///
/// assert_eq!(sentence_bounded_excerpt("A. B. C.", 1), "A.");
/// assert_eq!(sentence_bounded_excerpt("the end. of it all.", 5), "The end. of it all.");
/// ```
pub fn sentence_bounded_excerpt(text: &str, word_budget: usize) -> String {
    excerpt(text, word_budget).text
}

/// Accumulate leading sentences while the running word count stays within
/// `word_budget`, stopping at the first sentence that would overflow it.
///
/// When even the opening sentence overflows, the budget is widened by
/// [`BUDGET_ESCALATION_STEP`] per round until that sentence fits, and the
/// excerpt is that sentence alone. This takes exactly
/// `ceil(overflow / BUDGET_ESCALATION_STEP)` rounds, so the loop always ends.
/// Only text without any sentence (empty or whitespace) gives an empty excerpt.
///
/// The result is trimmed and its first character upper-cased; nothing else
/// about its casing changes.
pub fn excerpt(text: &str, word_budget: usize) -> Excerpt {
    let sentences = split_sentences(text);

    let mut taken: Vec<&str> = Vec::new();
    let mut used = 0usize;
    for sentence in &sentences {
        let n = sentence.split_whitespace().count();
        if used + n > word_budget {
            break;
        }
        taken.push(*sentence);
        used += n;
    }

    let mut escalations = 0;
    if let Some(first) = sentences.first().filter(|_| taken.is_empty()) {
        let n = first.split_whitespace().count();
        let mut budget = word_budget;
        // ends once budget >= n; saturation keeps it from wrapping
        while n > budget {
            budget = budget.saturating_add(BUDGET_ESCALATION_STEP);
            escalations += 1;
        }
        tracing::trace!(
            word_budget,
            escalated_budget = budget,
            sentence_words = n,
            "excerpt.budget.escalated"
        );
        taken.push(*first);
        used = n;
    }

    Excerpt {
        text: capitalize_first(&taken.join(" ")),
        word_count: used,
        escalations,
    }
}

fn capitalize_first(s: &str) -> String {
    let s = s.trim();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
