// src/domain/policy.rs
//!
//! Pure per-candidate decision functions. Check order is contractual:
//! first match wins, and failure classification always runs before skip
//! classification. Both functions are idempotent and hold no state.

use url::Url;

use crate::domain::candidate::Candidate;
use crate::domain::import::{FailReason, ImportOptions, SkipReason};

/// Syntactic/scheme validity: the URL must parse and be http(s).
fn is_valid_bookmark_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Decide whether this candidate must fail the import.
///
/// The URL check is unconditional; the tag checks are gated by the
/// corresponding `fail_*` option flags.
pub fn classify_for_failure(
    candidate: &Candidate,
    options: &ImportOptions,
    max_tags: usize,
) -> Option<FailReason> {
    if !is_valid_bookmark_url(&candidate.url) {
        return Some(FailReason::InvalidUrl);
    }
    if options.fail_if_any_invalid_tag && candidate.tags.has_invalid() {
        return Some(FailReason::InvalidTag);
    }
    if options.fail_on_merge_overflow
        && candidate
            .tags
            .will_overflow_when_merged_with(&options.user_tags, max_tags)
    {
        return Some(FailReason::MergeOverflow);
    }
    if options.fail_if_too_many_tags && candidate.tags.valid_only().count() > max_tags {
        return Some(FailReason::TooManyTags);
    }
    None
}

/// Decide whether this candidate is skipped. Only consulted when
/// `classify_for_failure` returned `None`.
pub fn classify_for_skip(
    candidate: &Candidate,
    options: &ImportOptions,
    max_tags: usize,
) -> Option<SkipReason> {
    if options.skip_if_any_invalid_tag && candidate.tags.has_invalid() {
        return Some(SkipReason::InvalidTag);
    }
    if options.skip_on_merge_overflow
        && candidate
            .tags
            .valid_only()
            .merged_with(&options.user_tags)
            .count()
            > max_tags
    {
        return Some(SkipReason::TagMergeOverflow);
    }
    if options.skip_if_too_many_tags && candidate.tags.valid_only().count() > max_tags {
        return Some(SkipReason::TagsTooLarge);
    }
    None
}

/// True iff a failure classification latches the engine into its halted
/// state for the remainder of the run.
pub fn should_halt_processing(options: &ImportOptions) -> bool {
    options.fail_if_any_invalid_tag
        || options.fail_on_merge_overflow
        || options.fail_if_too_many_tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::ImportOptionsBuilder;
    use crate::domain::tag::TagSet;

    const CAP: usize = 4;

    fn candidate(url: &str, tags: &[&str]) -> Candidate {
        Candidate::new(url, TagSet::new(tags.iter().copied()), 1)
    }

    #[test]
    fn given_invalid_url_when_classify_then_fails_unconditionally() {
        // No fail flags set at all; the URL check is not gated.
        let options = ImportOptions::default();
        let cand = candidate("not a url", &["fine"]);
        assert_eq!(
            classify_for_failure(&cand, &options, CAP),
            Some(FailReason::InvalidUrl)
        );

        let cand = candidate("ftp://example.com/file", &[]);
        assert_eq!(
            classify_for_failure(&cand, &options, CAP),
            Some(FailReason::InvalidUrl)
        );
    }

    #[test]
    fn given_invalid_tag_when_fail_flag_set_then_fails() {
        let options = ImportOptionsBuilder::default()
            .fail_if_any_invalid_tag(true)
            .build()
            .unwrap();
        let cand = candidate("https://example.com", &["bad tag"]);
        assert_eq!(
            classify_for_failure(&cand, &options, CAP),
            Some(FailReason::InvalidTag)
        );

        // Same candidate without the flag passes failure classification.
        let options = ImportOptions::default();
        assert_eq!(classify_for_failure(&cand, &options, CAP), None);
    }

    #[test]
    fn given_merge_overflow_when_fail_flag_set_then_fails_on_raw_merge() {
        let options = ImportOptionsBuilder::default()
            .fail_on_merge_overflow(true)
            .user_tags(TagSet::new(["u1", "u2"]))
            .build()
            .unwrap();
        // 3 candidate tags (one invalid) + 2 user tags = 5 > 4: the raw
        // list counts, invalid member included.
        let cand = candidate("https://example.com", &["a", "b", "bad tag"]);
        assert_eq!(
            classify_for_failure(&cand, &options, CAP),
            Some(FailReason::MergeOverflow)
        );
    }

    #[test]
    fn given_too_many_valid_tags_when_fail_flag_set_then_fails() {
        let options = ImportOptionsBuilder::default()
            .fail_if_too_many_tags(true)
            .build()
            .unwrap();
        let cand = candidate("https://example.com", &["a", "b", "c", "d", "e"]);
        assert_eq!(
            classify_for_failure(&cand, &options, CAP),
            Some(FailReason::TooManyTags)
        );
    }

    #[test]
    fn given_invalid_tag_and_overflow_when_both_fail_flags_then_tag_check_wins() {
        let options = ImportOptionsBuilder::default()
            .fail_if_any_invalid_tag(true)
            .fail_on_merge_overflow(true)
            .user_tags(TagSet::new(["u1", "u2", "u3", "u4"]))
            .build()
            .unwrap();
        let cand = candidate("https://example.com", &["bad tag", "a", "b"]);
        assert_eq!(
            classify_for_failure(&cand, &options, CAP),
            Some(FailReason::InvalidTag)
        );
    }

    #[test]
    fn given_skip_flags_when_classify_for_skip_then_check_order_holds() {
        let options = ImportOptionsBuilder::default()
            .skip_if_any_invalid_tag(true)
            .skip_on_merge_overflow(true)
            .skip_if_too_many_tags(true)
            .user_tags(TagSet::new(["u1", "u2", "u3", "u4"]))
            .build()
            .unwrap();

        // Invalid tag wins over the overflow checks.
        let cand = candidate("https://example.com", &["bad tag", "a"]);
        assert_eq!(
            classify_for_skip(&cand, &options, CAP),
            Some(SkipReason::InvalidTag)
        );

        // Merge overflow before too-large: one valid tag + four user tags.
        let cand = candidate("https://example.com", &["a"]);
        assert_eq!(
            classify_for_skip(&cand, &options, CAP),
            Some(SkipReason::TagMergeOverflow)
        );
    }

    #[test]
    fn given_too_many_valid_tags_when_only_too_large_flag_then_tags_too_large() {
        let options = ImportOptionsBuilder::default()
            .skip_if_too_many_tags(true)
            .build()
            .unwrap();
        let cand = candidate("https://example.com", &["a", "b", "c", "d", "e"]);
        assert_eq!(
            classify_for_skip(&cand, &options, CAP),
            Some(SkipReason::TagsTooLarge)
        );
    }

    #[test]
    fn given_clean_candidate_when_classified_then_proceeds() {
        let options = ImportOptionsBuilder::default()
            .skip_if_any_invalid_tag(true)
            .skip_on_merge_overflow(true)
            .skip_if_too_many_tags(true)
            .fail_if_any_invalid_tag(true)
            .build()
            .unwrap();
        let cand = candidate("https://example.com/page", &["a", "b"]);
        assert_eq!(classify_for_failure(&cand, &options, CAP), None);
        assert_eq!(classify_for_skip(&cand, &options, CAP), None);
    }

    #[test]
    fn given_same_candidate_when_classified_twice_then_same_result() {
        let options = ImportOptionsBuilder::default()
            .fail_if_any_invalid_tag(true)
            .build()
            .unwrap();
        let cand = candidate("https://example.com", &["bad tag"]);
        let first = classify_for_failure(&cand, &options, CAP);
        let second = classify_for_failure(&cand, &options, CAP);
        assert_eq!(first, second);
    }

    #[test]
    fn given_fail_flags_when_should_halt_then_true_for_any() {
        assert!(!should_halt_processing(&ImportOptions::default()));

        let invalid_tag = ImportOptionsBuilder::default()
            .fail_if_any_invalid_tag(true)
            .build()
            .unwrap();
        assert!(should_halt_processing(&invalid_tag));

        let merge_overflow = ImportOptionsBuilder::default()
            .fail_on_merge_overflow(true)
            .build()
            .unwrap();
        assert!(should_halt_processing(&merge_overflow));

        let too_many = ImportOptionsBuilder::default()
            .fail_if_too_many_tags(true)
            .build()
            .unwrap();
        assert!(should_halt_processing(&too_many));

        // Skip flags alone never halt.
        let skip_only = ImportOptionsBuilder::default()
            .skip_if_any_invalid_tag(true)
            .skip_on_merge_overflow(true)
            .skip_if_too_many_tags(true)
            .build()
            .unwrap();
        assert!(!should_halt_processing(&skip_only));
    }
}
