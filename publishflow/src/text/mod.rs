//! Text shaping helpers: tag normalization and the summary word cap.

mod summary;
mod tags;

pub use summary::{cap_25w, cap_words, word_count, SUMMARY_WORD_LIMIT};
pub use tags::{
    normalize_tag, normalize_tags, pad_with_placeholders, FILLER_TAG, PLACEHOLDER_TAG, TAG_COUNT,
};
