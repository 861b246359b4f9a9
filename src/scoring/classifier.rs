use tracing::debug;

use crate::models::{Classification, IngredientMatch, MatchKind, RiskTier};
use crate::scoring::keywords::{matches_any, KeywordTable};

/// Keyword-based cholesterol risk classifier.
///
/// Each ingredient adds 4 points when it contains a high-risk keyword,
/// otherwise loses 1 point when it contains a low-risk keyword. A total of
/// 4 or more is [`RiskTier::High`], 1 or less is [`RiskTier::Low`], anything
/// in between is [`RiskTier::Medium`]. A high-risk ingredient on its own is
/// High, but each lean ingredient takes a point back: one or two bring it to
/// Medium, three or more to Low.
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    keywords: KeywordTable,
}

impl RiskClassifier {
    pub fn new(keywords: KeywordTable) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Classify an ingredient list into a tier and its canonical reason.
    pub fn classify<S: AsRef<str>>(&self, ingredients: &[S]) -> (RiskTier, &'static str) {
        let tier = self.assess(ingredients).tier;
        (tier, tier.reason())
    }

    /// Score every ingredient and keep the per-ingredient breakdown.
    ///
    /// Entries that are blank after trimming are ignored. An empty list scores
    /// 0 and lands in [`RiskTier::Low`].
    pub fn assess<S: AsRef<str>>(&self, ingredients: &[S]) -> Classification {
        let matches: Vec<IngredientMatch> = ingredients
            .iter()
            .map(|i| i.as_ref().trim())
            .filter(|i| !i.is_empty())
            .map(|i| IngredientMatch {
                ingredient: i.to_string(),
                kind: self.match_kind(i),
            })
            .collect();

        let score: i32 = matches.iter().map(|m| m.kind.points()).sum();
        let tier = tier_for_score(score);
        debug!(score, %tier, ingredients = matches.len(), "scored ingredient list");

        Classification {
            tier,
            reason: tier.reason().to_string(),
            score,
            matches,
        }
    }

    /// High-risk keywords take priority when an ingredient matches both sets.
    fn match_kind(&self, ingredient: &str) -> MatchKind {
        if matches_any(&self.keywords.high, ingredient) {
            MatchKind::High
        } else if matches_any(&self.keywords.low, ingredient) {
            MatchKind::Low
        } else {
            MatchKind::Neutral
        }
    }
}

pub fn tier_for_score(score: i32) -> RiskTier {
    if score >= 4 {
        RiskTier::High
    } else if score <= 1 {
        RiskTier::Low
    } else {
        RiskTier::Medium
    }
}

/// Classify with the built-in keyword tables.
pub fn classify<S: AsRef<str>>(ingredients: &[S]) -> (RiskTier, &'static str) {
    RiskClassifier::default().classify(ingredients)
}
