//! Relevance scoring for search hits. Pure, deterministic, no LLM call.
//!
//! Algorithm (0–100):
//! 1. base = 35 + platform boost
//! 2. each query word longer than 3 chars: + min(5 × occurrences in content, 20)
//! 3. content length: +10 above 200 chars, +5 more above 500
//! 4. +3 per frustration word present
//! 5. +5 when the content mentions engagement (upvotes / likes / comments)
//! 6. clamp to 0..=100

use crate::search::platforms::score_boost;

const BASE_SCORE: u32 = 35;
const PER_OCCURRENCE: u32 = 5;
const MAX_PER_WORD: u32 = 20;
const FRUSTRATION_BONUS: u32 = 3;
const ENGAGEMENT_BONUS: u32 = 5;

/// Hits scoring below this are dropped by the pipeline.
pub const MIN_RELEVANCE_SCORE: u32 = 45;

const FRUSTRATION_WORDS: &[&str] = &[
    "frustrated",
    "annoying",
    "difficult",
    "problem",
    "issue",
    "struggle",
    "hard",
    "impossible",
    "hate",
    "terrible",
];

/// Matched against the original (not lowercased) content.
const ENGAGEMENT_MARKERS: &[&str] = &["upvotes", "likes", "comments"];

pub fn calculate_advanced_score(content: &str, original_query: &str, platform: &str) -> u32 {
    let mut score = BASE_SCORE + score_boost(platform);

    let content_lower = content.to_lowercase();
    let query_lower = original_query.to_lowercase();

    for word in query_lower.split(' ').filter(|w| w.chars().count() > 3) {
        let occurrences = content_lower.matches(word).count() as u32;
        score += (occurrences * PER_OCCURRENCE).min(MAX_PER_WORD);
    }

    let length = content.chars().count();
    if length > 200 {
        score += 10;
    }
    if length > 500 {
        score += 5;
    }

    score += FRUSTRATION_WORDS
        .iter()
        .filter(|w| content_lower.contains(*w))
        .count() as u32
        * FRUSTRATION_BONUS;

    if ENGAGEMENT_MARKERS.iter().any(|m| content.contains(m)) {
        score += ENGAGEMENT_BONUS;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_scores_base_plus_boost() {
        assert_eq!(calculate_advanced_score("", "", "reddit.com"), 60);
        assert_eq!(calculate_advanced_score("", "", "linkedin.com"), 65);
        assert_eq!(calculate_advanced_score("", "", "github.com"), 50);
    }

    #[test]
    fn test_short_query_words_are_ignored() {
        // "how", "to", "fix" are all ≤ 3 chars
        let score = calculate_advanced_score("how to fix how to fix", "how to fix", "medium.com");
        assert_eq!(score, 50);
    }

    #[test]
    fn test_keyword_occurrences_capped_at_20_per_word() {
        let content = "invoice invoice invoice invoice invoice invoice";
        // 6 occurrences × 5 = 30, capped at 20
        assert_eq!(calculate_advanced_score(content, "Invoice", "medium.com"), 50 + 20);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let score = calculate_advanced_score("Chasing INVOICES again", "invoices", "medium.com");
        assert_eq!(score, 50 + 5);
    }

    #[test]
    fn test_length_bonuses() {
        let medium = "x".repeat(201);
        let long = "x".repeat(501);
        assert_eq!(calculate_advanced_score(&medium, "", "medium.com"), 60);
        assert_eq!(calculate_advanced_score(&long, "", "medium.com"), 65);
    }

    #[test]
    fn test_frustration_words_add_three_each() {
        let score = calculate_advanced_score(
            "So frustrated, this is a terrible problem",
            "",
            "medium.com",
        );
        assert_eq!(score, 50 + 9);
    }

    #[test]
    fn test_engagement_marker_is_case_sensitive() {
        assert_eq!(calculate_advanced_score("120 likes", "", "medium.com"), 55);
        assert_eq!(calculate_advanced_score("120 LIKES", "", "medium.com"), 50);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let content = format!(
            "{} frustrated annoying difficult problem issue struggle hard impossible hate terrible upvotes",
            "billing billing billing billing reconciliation reconciliation reconciliation reconciliation ".repeat(8)
        );
        let score = calculate_advanced_score(&content, "billing reconciliation", "linkedin.com");
        assert_eq!(score, 100);
    }

    #[test]
    fn test_regex_metacharacters_in_query_are_literal() {
        let score = calculate_advanced_score("what is c++ (really)?", "c++ (really)?", "medium.com");
        // "(really)?" is the only word longer than 3 chars, matched literally once
        assert_eq!(score, 55);
    }
}
