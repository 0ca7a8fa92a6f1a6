//! Summary word cap.

/// Maximum number of words a final summary may hold.
pub const SUMMARY_WORD_LIMIT: usize = 25;

/// Keeps the first `limit` whitespace-delimited words of `text`, joined by
/// single spaces.
#[must_use]
pub fn cap_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caps `text` at [`SUMMARY_WORD_LIMIT`] words.
///
/// Truncation counts tokens, not characters, so a sentence may be cut in the
/// middle.
#[must_use]
pub fn cap_25w(text: &str) -> String {
    cap_words(text, SUMMARY_WORD_LIMIT)
}

/// Counts whitespace-delimited words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("w{i}")).collect()
    }

    #[test]
    fn test_cap_truncates_thirty_words() {
        let text = words(30).join(" ");
        let capped = cap_25w(&text);

        assert_eq!(capped, words(25).join(" "));
        assert_eq!(word_count(&capped), 25);
    }

    #[test]
    fn test_cap_keeps_short_text() {
        let text = "Deep learning meets the data cloud.";
        assert_eq!(cap_25w(text), text);

        let exact = words(25).join(" ");
        assert_eq!(cap_25w(&exact), exact);
    }

    #[test]
    fn test_cap_collapses_whitespace() {
        assert_eq!(cap_words("  a \n b\t\tc  ", 2), "a b");
    }

    #[test]
    fn test_cap_empty() {
        assert_eq!(cap_25w(""), "");
        assert_eq!(cap_25w("   "), "");
    }
}
