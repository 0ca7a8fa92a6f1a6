//! Tag normalization.
//!
//! Every stage ends up with exactly [`TAG_COUNT`] tags that are lowercase,
//! hyphenated and unique, in first-seen order.

/// Number of tags every stage carries.
pub const TAG_COUNT: usize = 3;

/// Filler used when fewer than [`TAG_COUNT`] tags survive normalization.
pub const FILLER_TAG: &str = "topic";

/// Filler the Planner and Reviewer use before normalization when the model
/// supplied too few tags.
pub const PLACEHOLDER_TAG: &str = "placeholder-tag";

/// Fixed synonym table, keyed by the hyphenated form.
///
/// The spaced keys never match once spaces are replaced, but are kept so the
/// table reads the same as the canonical list it was taken from.
const SYNONYMS: &[(&str, &str)] = &[
    ("deep learning", "deep-learning"),
    ("deep-learning", "deep-learning"),
    ("llms", "large-language-models"),
    ("datascience", "data-science"),
    ("datcloud", "datacloud"),
    ("ml ops", "mlops"),
    ("ml-ops", "mlops"),
];

/// Normalizes a single raw tag: trim, lowercase, spaces to hyphens, then an
/// exact-match synonym lookup.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    let tag = raw.trim().to_lowercase().replace(' ', "-");
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == tag)
        .map_or(tag, |(_, to)| (*to).to_string())
}

/// Maps raw tags to exactly [`TAG_COUNT`] canonical tags.
///
/// Empty tags are skipped, duplicates dropped and input past the third
/// accepted tag ignored. Short lists are padded with `topic`, then
/// `topic-2`, `topic-3`, skipping any filler already present so the result
/// never holds duplicates.
///
/// # Examples
///
/// ```
/// use publishflow::text::normalize_tags;
///
/// let tags = normalize_tags(&["LLMs", "LLMs", "data science"]);
/// assert_eq!(tags, vec!["large-language-models", "data-science", "topic"]);
/// ```
#[must_use]
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(TAG_COUNT);

    for raw in tags {
        let tag = normalize_tag(raw.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
        if out.len() == TAG_COUNT {
            break;
        }
    }

    let mut suffix = 1;
    while out.len() < TAG_COUNT {
        let filler = if suffix == 1 {
            FILLER_TAG.to_string()
        } else {
            format!("{FILLER_TAG}-{suffix}")
        };
        suffix += 1;
        if !out.contains(&filler) {
            out.push(filler);
        }
    }

    out
}

/// Truncates a raw tag list to [`TAG_COUNT`] entries and pads it with
/// [`PLACEHOLDER_TAG`], without normalizing.
#[must_use]
pub fn pad_with_placeholders(tags: Option<Vec<String>>) -> Vec<String> {
    let mut tags = tags.unwrap_or_default();
    tags.truncate(TAG_COUNT);
    while tags.len() < TAG_COUNT {
        tags.push(PLACEHOLDER_TAG.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_tags_well_formed;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_tag_basic() {
        assert_eq!(normalize_tag("  Machine Learning "), "machine-learning");
        assert_eq!(normalize_tag("LLMs"), "large-language-models");
        assert_eq!(normalize_tag("DataScience"), "data-science");
        assert_eq!(normalize_tag("datcloud"), "datacloud");
        assert_eq!(normalize_tag("ML Ops"), "mlops");
        assert_eq!(normalize_tag("Deep Learning"), "deep-learning");
    }

    #[test]
    fn test_synonym_lookup_is_exact_match() {
        assert_eq!(normalize_tag("llms-in-production"), "llms-in-production");
        assert_eq!(normalize_tag("big datascience"), "big-datascience");
    }

    #[test]
    fn test_normalize_tags_dedupes_and_pads() {
        let tags = normalize_tags(&["LLMs", "LLMs", "data science"]);
        assert_eq!(tags, vec!["large-language-models", "data-science", "topic"]);
    }

    #[test]
    fn test_normalize_tags_stops_at_three() {
        let tags = normalize_tags(&["a", "b", "c", "d", "e"]);
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_normalize_tags_skips_empty() {
        let tags = normalize_tags(&["", "   ", "rust"]);
        assert_eq!(tags, vec!["rust", "topic", "topic-2"]);
    }

    #[test]
    fn test_normalize_tags_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(normalize_tags(&empty), vec!["topic", "topic-2", "topic-3"]);
    }

    #[test]
    fn test_filler_skips_existing_values() {
        let tags = normalize_tags(&["topic-2", "Topic"]);
        assert_eq!(tags, vec!["topic-2", "topic", "topic-3"]);
    }

    #[test]
    fn test_synonyms_collapse_to_one_entry() {
        let tags = normalize_tags(&["llms", "LLMs", "large-language-models", "mlops", "ml ops"]);
        assert_eq!(tags, vec!["large-language-models", "mlops", "topic"]);
    }

    #[test]
    fn test_normalize_tags_idempotent() {
        let inputs: Vec<Vec<&str>> = vec![
            vec!["LLMs", "LLMs", "data science"],
            vec![],
            vec!["placeholder-tag", "placeholder-tag", "placeholder-tag"],
            vec!["topic-3", "x"],
            vec!["Deep Learning", "DATASCIENCE", "datcloud", "ml ops"],
            vec!["  ", "A B C", "a-b-c"],
        ];

        for input in inputs {
            let once = normalize_tags(&input);
            let twice = normalize_tags(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
            assert_tags_well_formed(&once);
        }
    }

    #[test]
    fn test_pad_with_placeholders() {
        assert_eq!(
            pad_with_placeholders(Some(vec!["a".to_string()])),
            vec!["a", "placeholder-tag", "placeholder-tag"]
        );
        assert_eq!(
            pad_with_placeholders(None),
            vec!["placeholder-tag", "placeholder-tag", "placeholder-tag"]
        );
        assert_eq!(
            pad_with_placeholders(Some(
                ["a", "b", "c", "d"].iter().map(ToString::to_string).collect()
            )),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_placeholders_normalize_without_duplicates() {
        let tags = normalize_tags(&pad_with_placeholders(None));
        assert_eq!(tags, vec!["placeholder-tag", "topic", "topic-2"]);
    }
}
