//! Assertions for stage outputs and publish packages.

use std::collections::HashSet;

use crate::stages::{PublishPackage, StageKind};
use crate::text::{word_count, TAG_COUNT};

/// Asserts that `tags` holds exactly three unique, lowercase, hyphenated
/// entries.
pub fn assert_tags_well_formed(tags: &[String]) {
    assert_eq!(
        tags.len(),
        TAG_COUNT,
        "Expected {TAG_COUNT} tags, got {tags:?}"
    );

    let unique: HashSet<&String> = tags.iter().collect();
    assert_eq!(unique.len(), tags.len(), "Duplicate tags in {tags:?}");

    for tag in tags {
        assert!(!tag.is_empty(), "Empty tag in {tags:?}");
        assert_eq!(*tag, tag.to_lowercase(), "Tag '{tag}' is not lowercase");
        assert!(!tag.contains(' '), "Tag '{tag}' contains a space");
    }
}

/// Asserts that `text` has at most `limit` whitespace-delimited words.
pub fn assert_word_count_at_most(text: &str, limit: usize) {
    let count = word_count(text);
    assert!(
        count <= limit,
        "Expected at most {limit} words, got {count}: {text:?}"
    );
}

/// Asserts the structural invariants of a publish package.
pub fn assert_package_well_formed(package: &PublishPackage) {
    let roles: Vec<&str> = package.agents.iter().map(|a| a.role.as_str()).collect();
    assert_eq!(
        roles,
        vec![StageKind::Planner.role(), StageKind::Reviewer.role()],
        "Unexpected agent roles"
    );
    assert_tags_well_formed(&package.final_data.tags);
    assert_word_count_at_most(&package.final_data.summary, crate::text::SUMMARY_WORD_LIMIT);
    assert!(
        package.submission_date.ends_with('Z'),
        "Submission date '{}' is not UTC",
        package.submission_date
    );
}
