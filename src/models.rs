use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// The fixed explanation paired with each tier.
    pub fn reason(&self) -> &'static str {
        match self {
            RiskTier::High => "contains high saturated-fat ingredients",
            RiskTier::Medium => "mixed nutritional profile",
            RiskTier::Low => "mostly lean/plant-based ingredients",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            RiskTier::High => "🔴",
            RiskTier::Medium => "🟡",
            RiskTier::Low => "🟢",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Which keyword category an ingredient fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    High,
    Low,
    Neutral,
}

impl MatchKind {
    pub fn points(&self) -> i32 {
        match self {
            MatchKind::High => 4,
            MatchKind::Low => -1,
            MatchKind::Neutral => 0,
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::High => write!(f, "high-risk"),
            MatchKind::Low => write!(f, "low-risk"),
            MatchKind::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientMatch {
    pub ingredient: String,
    pub kind: MatchKind,
}

/// Result of scoring one ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: RiskTier,
    pub reason: String,
    pub score: i32,
    pub matches: Vec<IngredientMatch>,
}

/// Where the ingredient list of a dish came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSource {
    Extractor,
    User,
}

impl std::fmt::Display for IngredientSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngredientSource::Extractor => write!(f, "extractor"),
            IngredientSource::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishAssessment {
    pub dish: String,
    pub source: IngredientSource,
    pub ingredients: Vec<String>,
    pub classification: Classification,
}

/// Outcome for one dish of a batch; extraction failures are kept per dish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DishOutcome {
    Assessed(DishAssessment),
    Failed { dish: String, error: String },
}

impl DishOutcome {
    pub fn dish(&self) -> &str {
        match self {
            DishOutcome::Assessed(a) => &a.dish,
            DishOutcome::Failed { dish, .. } => dish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::High);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskTier::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&RiskTier::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_failed_outcome_shape() {
        let outcome = DishOutcome::Failed {
            dish: "ramen".to_string(),
            error: "timeout".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["dish"], "ramen");
        assert_eq!(outcome.dish(), "ramen");
    }
}
