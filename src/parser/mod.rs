mod sentences;

pub use sentences::{segment_comments, split_sentences};
