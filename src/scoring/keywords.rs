use std::collections::BTreeSet;

/// Substrings that point at saturated fat or dietary cholesterol.
pub const DEFAULT_HIGH_RISK: &[&str] = &[
    "butter",
    "cream",
    "heavy cream",
    "ghee",
    "egg yolk",
    "cheese",
    "parmesan",
    "cheddar",
    "whole milk",
    "lamb",
    "beef",
    "bacon",
    "sausage",
];

/// Substrings that point at lean or plant-based food and preparation.
pub const DEFAULT_LOW_RISK: &[&str] = &[
    "tofu",
    "lentil",
    "steamed",
    "grilled",
    "chickpea",
    "bean",
    "broccoli",
    "spinach",
    "quinoa",
];

/// An immutable set of lowercase keywords matched as substrings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordSet {
    keywords: BTreeSet<String>,
}

impl KeywordSet {
    /// Build a set, trimming and lower-casing every entry. Blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Case-insensitive substring test of `text` against every keyword in `set`.
pub fn matches_any(set: &KeywordSet, text: &str) -> bool {
    let lower = text.to_lowercase();
    set.iter().any(|keyword| lower.contains(keyword))
}

/// The high-risk and low-risk keyword sets used by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    pub high: KeywordSet,
    pub low: KeywordSet,
}

impl KeywordTable {
    pub fn new(high: KeywordSet, low: KeywordSet) -> Self {
        Self { high, low }
    }

    /// Keywords present in both sets. The classifier still works when this is
    /// non-empty (high risk wins), but the result then depends on the tie-break.
    pub fn overlap(&self) -> Vec<String> {
        self.high
            .keywords
            .intersection(&self.low.keywords)
            .cloned()
            .collect()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            high: KeywordSet::new(DEFAULT_HIGH_RISK),
            low: KeywordSet::new(DEFAULT_LOW_RISK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_substring() {
        let set = KeywordSet::new(["grilled", "tofu"]);
        assert!(matches_any(&set, "grilled chicken"));
        assert!(matches_any(&set, "Smoked TOFU"));
        assert!(!matches_any(&set, "rice"));
    }

    #[test]
    fn test_matches_any_empty_set() {
        assert!(!matches_any(&KeywordSet::default(), "butter"));
    }

    #[test]
    fn test_keyword_set_normalizes_entries() {
        let set = KeywordSet::new(["  Butter ", "", "GHEE", "   "]);
        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["butter", "ghee"]);
    }

    #[test]
    fn test_default_tables_are_disjoint() {
        let table = KeywordTable::default();
        assert!(table.overlap().is_empty());
        assert_eq!(table.high.len(), DEFAULT_HIGH_RISK.len());
        assert_eq!(table.low.len(), DEFAULT_LOW_RISK.len());
    }

    #[test]
    fn test_overlap_detected() {
        let table = KeywordTable::new(
            KeywordSet::new(["butter", "bean"]),
            KeywordSet::new(["Bean", "tofu"]),
        );
        assert_eq!(table.overlap(), vec!["bean".to_string()]);
    }
}
