//! Article reliability assessment
//!
//! Scores live in 0.0..=1.0. Each flag raised against an article shaves
//! 0.1 off its effective score; three or more flags put it under review
//! until an analyst override (`adjusted_score`) lands. An override always
//! wins over the computed score.

use crate::models::Article;
use serde::{Deserialize, Serialize};

/// Flags at or above this count put an article under review.
pub const REVIEW_FLAG_THRESHOLD: u32 = 3;

/// Effective-score penalty per raised flag.
pub const FLAG_PENALTY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityBand {
    Low,
    Moderate,
    High,
}

impl ReliabilityBand {
    /// Band cut-offs: below 0.70 is Low, below 0.85 Moderate, else High.
    pub fn from_score(score: f64) -> Self {
        if score < 0.70 {
            ReliabilityBand::Low
        } else if score < 0.85 {
            ReliabilityBand::Moderate
        } else {
            ReliabilityBand::High
        }
    }
}

/// The score a consumer should trust: the analyst override when present,
/// otherwise the flag-penalized baseline.
pub fn effective_score(article: &Article) -> f64 {
    if let Some(adjusted) = article.adjusted_score {
        return adjusted.clamp(0.0, 1.0);
    }
    (article.reliability - f64::from(article.flags) * FLAG_PENALTY).clamp(0.0, 1.0)
}

pub fn band(article: &Article) -> ReliabilityBand {
    ReliabilityBand::from_score(effective_score(article))
}

/// Record one analyst flag. Review state is recomputed; an existing
/// analyst override is discarded since the evidence changed.
pub fn register_flag(article: &mut Article) {
    article.flags += 1;
    article.adjusted_score = None;
    article.under_review = article.flags >= REVIEW_FLAG_THRESHOLD;
}

/// Apply an analyst override and close the review.
pub fn apply_adjustment(article: &mut Article, score: f64) {
    article.adjusted_score = Some(score.clamp(0.0, 1.0));
    article.under_review = false;
}

/// Rounded integer percentage for display layers.
pub fn percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleKind;

    fn article(reliability: f64) -> Article {
        let mut a = Article::new("News 1", "https://news.example.com/article-1", ArticleKind::NewsUrl);
        a.reliability = reliability;
        a
    }

    // ========================================================================
    // TEST 1: band cut-offs at 0.70 and 0.85
    // ========================================================================
    #[test]
    fn test_band_cutoffs() {
        assert_eq!(ReliabilityBand::from_score(0.69), ReliabilityBand::Low);
        assert_eq!(ReliabilityBand::from_score(0.70), ReliabilityBand::Moderate);
        assert_eq!(ReliabilityBand::from_score(0.84), ReliabilityBand::Moderate);
        assert_eq!(ReliabilityBand::from_score(0.85), ReliabilityBand::High);
        assert_eq!(ReliabilityBand::from_score(1.0), ReliabilityBand::High);
    }

    // ========================================================================
    // TEST 2: flags penalize the effective score, floored at zero
    // ========================================================================
    #[test]
    fn test_flag_penalty() {
        let mut a = article(0.9);
        register_flag(&mut a);
        assert!((effective_score(&a) - 0.8).abs() < 1e-9);

        a.flags = 20;
        assert_eq!(effective_score(&a), 0.0);
    }

    // ========================================================================
    // TEST 3: three flags trigger review
    // ========================================================================
    #[test]
    fn test_review_threshold() {
        let mut a = article(0.9);
        register_flag(&mut a);
        register_flag(&mut a);
        assert!(!a.under_review);
        register_flag(&mut a);
        assert!(a.under_review);
    }

    // ========================================================================
    // TEST 4: analyst override wins and closes review
    // ========================================================================
    #[test]
    fn test_adjustment_overrides() {
        let mut a = article(0.4);
        a.flags = 5;
        a.under_review = true;

        apply_adjustment(&mut a, 0.75);
        assert!(!a.under_review);
        assert!((effective_score(&a) - 0.75).abs() < 1e-9);
        assert_eq!(band(&a), ReliabilityBand::Moderate);
    }

    // ========================================================================
    // TEST 5: a new flag discards a stale override
    // ========================================================================
    #[test]
    fn test_flag_discards_override() {
        let mut a = article(0.9);
        apply_adjustment(&mut a, 0.95);
        register_flag(&mut a);
        assert!(a.adjusted_score.is_none());
        assert!((effective_score(&a) - 0.8).abs() < 1e-9);
    }

    // ========================================================================
    // TEST 6: percent rounds and clamps
    // ========================================================================
    #[test]
    fn test_percent() {
        assert_eq!(percent(0.847), 85);
        assert_eq!(percent(1.7), 100);
        assert_eq!(percent(-0.2), 0);
    }
}
