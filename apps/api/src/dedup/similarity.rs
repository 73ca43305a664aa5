//! Per-field similarity measures.
//!
//! Every function returns a value in [0.0, 1.0] and applies the same absent-field rule:
//! both empty → 1.0, exactly one empty → 0.0, otherwise compare normalized values.
//!
//! - title, description: token-set ratio (word order and subset/superset tolerant)
//! - company, location: plain edit-distance ratio (stricter)

use std::collections::BTreeSet;

use strsim::levenshtein;

use crate::dedup::normalize::{normalize_location, normalize_text};

/// Descriptions are compared on their leading characters only.
pub const DESCRIPTION_PREFIX_CHARS: usize = 500;

/// `(len_a + len_b - levenshtein(a, b)) / (len_a + len_b)` over character counts.
/// Two empty strings are identical.
pub fn edit_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (total - distance) as f64 / total as f64
}

/// Token-set ratio over whitespace-delimited tokens.
///
/// Builds the sorted intersection `I`, and `I + sorted(A \ B)`, `I + sorted(B \ A)`,
/// then returns the best `edit_ratio` among the three pairings.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join_tokens(tokens_a.intersection(&tokens_b));
    let only_a = join_tokens(tokens_a.difference(&tokens_b));
    let only_b = join_tokens(tokens_b.difference(&tokens_a));

    let combined_a = concat_nonempty(&intersection, &only_a);
    let combined_b = concat_nonempty(&intersection, &only_b);

    [
        edit_ratio(&intersection, &combined_a),
        edit_ratio(&intersection, &combined_b),
        edit_ratio(&combined_a, &combined_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

pub fn title_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    compare_normalized(normalize_text(a), normalize_text(b), token_set_ratio)
}

pub fn company_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    compare_normalized(normalize_text(a), normalize_text(b), edit_ratio)
}

/// Truncation to `DESCRIPTION_PREFIX_CHARS` happens before normalization.
pub fn description_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let a = a.map(truncate_chars);
    let b = b.map(truncate_chars);
    compare_normalized(
        normalize_text(a.as_deref()),
        normalize_text(b.as_deref()),
        token_set_ratio,
    )
}

pub fn location_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    compare_normalized(normalize_location(a), normalize_location(b), edit_ratio)
}

fn compare_normalized(a: String, b: String, measure: fn(&str, &str) -> f64) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => measure(&a, &b),
    }
}

fn truncate_chars(text: &str) -> String {
    text.chars().take(DESCRIPTION_PREFIX_CHARS).collect()
}

fn join_tokens<'s, 'a: 's>(tokens: impl Iterator<Item = &'s &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn concat_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (_, true) => head.to_string(),
        (true, false) => tail.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET_DESCRIPTION: &str = "Python developer with Django and AWS, 5+ years backend";
    const CANDIDATE_DESCRIPTION: &str =
        "Python developer needed with Django and AWS experience, 5+ years of backend development";

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_edit_ratio_classic_levenshtein() {
        // kitten → sitting: distance 3, 13 chars total
        assert_close(edit_ratio("kitten", "sitting"), 10.0 / 13.0);
    }

    #[test]
    fn test_edit_ratio_empty_strings() {
        assert_close(edit_ratio("", ""), 1.0);
        assert_close(edit_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_edit_ratio_counts_chars_not_bytes() {
        // one substitution, 12 characters total
        assert_close(edit_ratio("zürich", "zurich"), 11.0 / 12.0);
    }

    #[test]
    fn test_token_set_ratio_word_order_invariant() {
        assert_close(
            token_set_ratio("senior python developer", "python developer senior"),
            1.0,
        );
    }

    #[test]
    fn test_token_set_ratio_subset_scores_full() {
        assert_close(
            token_set_ratio("python developer", "senior python developer"),
            1.0,
        );
    }

    #[test]
    fn test_token_set_ratio_disjoint_is_low() {
        let score = token_set_ratio("marketing manager", "senior python developer");
        assert!(score < 0.6, "score was {score}");
    }

    #[test]
    fn test_title_reordered_scores_high() {
        let score = title_similarity(
            Some("Senior Python Developer"),
            Some("Python Developer Senior"),
        );
        assert!(score >= 0.90, "score was {score}");
    }

    #[test]
    fn test_description_reworded_scores_above_0_7() {
        let score = description_similarity(Some(TARGET_DESCRIPTION), Some(CANDIDATE_DESCRIPTION));
        assert!(score >= 0.70, "score was {score}");
    }

    #[test]
    fn test_location_comma_insensitive() {
        let score = location_similarity(Some("Sydney, NSW"), Some("Sydney NSW"));
        assert!(score >= 0.90, "score was {score}");
    }

    #[test]
    fn test_company_stricter_than_title_matching() {
        let company = company_similarity(Some("Acme Inc"), Some("Acme Incorporated"));
        let as_title = title_similarity(Some("Acme Inc"), Some("Acme Incorporated"));
        assert!(company < as_title, "company {company} vs title-style {as_title}");
        assert_close(company, 0.64);
    }

    #[test]
    fn test_absent_field_rules() {
        type Measure = fn(Option<&str>, Option<&str>) -> f64;
        let measures: [Measure; 4] = [
            title_similarity,
            company_similarity,
            description_similarity,
            location_similarity,
        ];
        for measure in measures {
            assert_close(measure(None, None), 1.0);
            assert_close(measure(Some(""), None), 1.0);
            assert_close(measure(Some("   "), Some("")), 1.0);
            assert_close(measure(Some("Sydney"), None), 0.0);
            assert_close(measure(None, Some("Sydney")), 0.0);
        }
    }

    #[test]
    fn test_all_measures_symmetric() {
        let pairs = [
            ("Senior Python Developer", "Python Engineer"),
            ("Acme Inc", "Acme Incorporated"),
            ("Sydney, NSW", "North Sydney NSW 2060"),
            (TARGET_DESCRIPTION, CANDIDATE_DESCRIPTION),
        ];
        for (a, b) in pairs {
            assert_close(title_similarity(Some(a), Some(b)), title_similarity(Some(b), Some(a)));
            assert_close(
                company_similarity(Some(a), Some(b)),
                company_similarity(Some(b), Some(a)),
            );
            assert_close(
                description_similarity(Some(a), Some(b)),
                description_similarity(Some(b), Some(a)),
            );
            assert_close(
                location_similarity(Some(a), Some(b)),
                location_similarity(Some(b), Some(a)),
            );
        }
    }

    #[test]
    fn test_identical_values_score_one() {
        assert_close(company_similarity(Some("TechCorp"), Some("techcorp ")), 1.0);
        assert_close(description_similarity(Some(TARGET_DESCRIPTION), Some(TARGET_DESCRIPTION)), 1.0);
    }

    #[test]
    fn test_description_compares_leading_chars_only() {
        let shared = "x".repeat(DESCRIPTION_PREFIX_CHARS);
        let a = format!("{shared} python django");
        let b = format!("{shared} marketing retail");
        assert_close(description_similarity(Some(&a), Some(&b)), 1.0);
    }
}
