use crate::model::Answer;
use regex::Regex;
use std::sync::OnceLock;

// A run of text closed by one or more terminators, or trailing text with none.
const SENTENCE_PATTERN: &str = r"[^.?!]*[.?!]+|[^.?!]+";

static SENTENCE_RE: OnceLock<Regex> = OnceLock::new();

fn sentence_re() -> &'static Regex {
    SENTENCE_RE.get_or_init(|| Regex::new(SENTENCE_PATTERN).expect("sentence pattern is valid"))
}

/// Split text on `.`, `?` and `!`, keeping the terminator with its sentence.
/// Fragments are trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    sentence_re()
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flatten the comments of a question's answers into sentences, in answer order.
/// Answers without a comment contribute nothing.
pub fn segment_comments(answers: &[Answer]) -> Vec<String> {
    answers
        .iter()
        .filter_map(|a| a.comment.as_deref())
        .flat_map(split_sentences)
        .collect()
}
