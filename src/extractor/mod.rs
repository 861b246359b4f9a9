//! Ingredient extraction from free-text dish descriptions.
//!
//! The extraction itself is delegated to a text-generation service; this module
//! defines the [`IngredientExtractor`] seam, the [`openai`] backend, and the
//! parsers that turn a comma-separated reply into an ingredient or dish list.

pub mod openai;

use std::future::Future;

use anyhow::Result;

pub trait IngredientExtractor: Send + Sync {
    /// Return the likely ingredients of `dish`, in the order the service lists them.
    /// An empty list is a valid answer.
    fn extract(&self, dish: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Return the names of the dishes mentioned in recognized menu text,
    /// skipping headings, descriptions, prices and contact details.
    fn identify_dishes(&self, text: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Parse a comma-separated ingredient list such as `"Ingredients: butter, rice"`.
///
/// The text is lower-cased; when it carries an `ingredients:` label only the
/// segment after the first label is kept. Blank entries are dropped.
pub fn parse_ingredient_list(text: &str) -> Vec<String> {
    let line = text.trim().to_lowercase();
    let list = match line.split("ingredients:").nth(1) {
        Some(after_label) => after_label,
        None => line.as_str(),
    };

    list.split(',')
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a dish list such as `"Dishes: Pad Thai, Caesar Salad"`.
///
/// Entries may be separated by commas or lines and keep their original case.
/// Leading bullets are removed and repeated dishes (ignoring case) are dropped.
pub fn parse_dish_list(text: &str) -> Vec<String> {
    let text = text.trim();
    // ASCII lower-casing keeps byte offsets valid for slicing `text`
    let list = match text.to_ascii_lowercase().find("dishes:") {
        Some(pos) => &text[pos + "dishes:".len()..],
        None => text,
    };

    let mut seen = std::collections::HashSet::new();
    list.split([',', '\n'])
        .map(|d| d.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_list_keeps_case() {
        assert_eq!(
            parse_dish_list("Dishes: Pad Thai, Caesar Salad"),
            vec!["Pad Thai", "Caesar Salad"]
        );
    }

    #[test]
    fn test_dish_list_lines_bullets_and_duplicates() {
        assert_eq!(
            parse_dish_list("- Chicken 65\n- Garlic Naan\n* chicken 65\n\n"),
            vec!["Chicken 65", "Garlic Naan"]
        );
        assert!(parse_dish_list("  ").is_empty());
    }

    #[test]
    fn test_plain_list() {
        assert_eq!(
            parse_ingredient_list("Pasta, Heavy Cream , parmesan"),
            vec!["pasta", "heavy cream", "parmesan"]
        );
    }

    #[test]
    fn test_label_is_stripped() {
        assert_eq!(
            parse_ingredient_list("Here you go. Ingredients: butter, garlic, shrimp"),
            vec!["butter", "garlic", "shrimp"]
        );
    }

    #[test]
    fn test_empty_entries_dropped() {
        assert_eq!(parse_ingredient_list("tofu,, ,rice,"), vec!["tofu", "rice"]);
        assert!(parse_ingredient_list("   ").is_empty());
        assert!(parse_ingredient_list("Ingredients:").is_empty());
    }

    #[test]
    fn test_multiline_reply_kept_as_one_list() {
        assert_eq!(
            parse_ingredient_list("beef,\nonion"),
            vec!["beef", "onion"]
        );
    }
}
