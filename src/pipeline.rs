use std::sync::OnceLock;

use anyhow::Result;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{info, warn};

use crate::extractor::IngredientExtractor;
use crate::models::{DishAssessment, DishOutcome, IngredientSource};
use crate::scoring::classifier::RiskClassifier;

/// Dish analysis: ingredient extraction followed by risk classification.
pub struct Pipeline<'a, E> {
    classifier: &'a RiskClassifier,
    extractor: &'a E,
    max_concurrent: usize,
}

impl<'a, E: IngredientExtractor> Pipeline<'a, E> {
    pub fn new(classifier: &'a RiskClassifier, extractor: &'a E, max_concurrent: usize) -> Self {
        Self {
            classifier,
            extractor,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub async fn analyze_dish(&self, dish: &str) -> Result<DishAssessment> {
        let dish = dish.trim();
        let ingredients = self.extractor.extract(dish).await?;
        info!(dish, count = ingredients.len(), "ingredients extracted");
        Ok(assess(self.classifier, dish, ingredients, IngredientSource::Extractor))
    }

    /// Analyze every dish found in recognized menu text.
    ///
    /// The extractor picks the dishes out of the text; when it fails or finds
    /// none, [`dish_candidates`] splits the text line by line instead.
    /// Extraction failures are reported per dish and never abort the batch.
    pub async fn analyze_text(&self, text: &str, show_progress: bool) -> Vec<DishOutcome> {
        let dishes = self.identify_dishes(text).await;
        info!(dishes = dishes.len(), "dishes found in text");

        let pb = if show_progress && !dishes.is_empty() {
            let pb = ProgressBar::new(dishes.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut outcomes = Vec::with_capacity(dishes.len());
        for batch in dishes.chunks(self.max_concurrent) {
            let futures: Vec<_> = batch.iter().map(|dish| self.analyze_dish(dish)).collect();
            let results = join_all(futures).await;

            for (dish, result) in batch.iter().zip(results) {
                let outcome = match result {
                    Ok(assessment) => DishOutcome::Assessed(assessment),
                    Err(e) => {
                        warn!(dish = %dish, error = %e, "dish analysis failed");
                        DishOutcome::Failed {
                            dish: dish.clone(),
                            error: format!("{:#}", e),
                        }
                    }
                };
                outcomes.push(outcome);
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("Done");
        }

        outcomes
    }

    async fn identify_dishes(&self, text: &str) -> Vec<String> {
        match self.extractor.identify_dishes(text).await {
            Ok(dishes) if !dishes.is_empty() => dishes,
            Ok(_) => {
                info!("no dishes identified, splitting text by line");
                dish_candidates(text)
            }
            Err(e) => {
                warn!(error = %e, "dish identification failed, splitting text by line");
                dish_candidates(text)
            }
        }
    }
}

/// Classify an ingredient list supplied directly by the user.
pub fn analyze_ingredients(
    classifier: &RiskClassifier,
    label: &str,
    ingredients: Vec<String>,
) -> DishAssessment {
    assess(classifier, label, ingredients, IngredientSource::User)
}

fn assess(
    classifier: &RiskClassifier,
    dish: &str,
    ingredients: Vec<String>,
    source: IngredientSource,
) -> DishAssessment {
    let classification = classifier.assess(&ingredients);
    DishAssessment {
        dish: dish.to_string(),
        source,
        ingredients,
        classification,
    }
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:[-*•·]+|\d{1,3}[.)])\s*").expect("valid regex"))
}

/// A trailing price needs a currency or a decimal part, so "Chicken 65" keeps its number.
fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)[\s.:…-]*(?:[$€£¥]\s*\d+(?:[.,]\d{1,2})?|\d+[.,]\d{1,2}(?:\s*(?:[$€£¥]|usd|eur|gbp))?|\d+\s*(?:[$€£¥]|usd|eur|gbp))\s*$",
        )
        .expect("valid regex")
    })
}

fn contact_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:tel|phone|fax|call)\b|www\.|https?://|@").expect("valid regex")
    })
}

/// Split recognized menu text into dish names, one candidate per line.
///
/// Leading bullets/numbering and trailing prices are removed. Lines without
/// letters, all-caps section headings, description lines starting in lower
/// case and contact details are dropped. Duplicates (ignoring case) keep their
/// first position.
pub fn dish_candidates(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut dishes = Vec::new();

    for line in text.lines() {
        let without_bullet = bullet_re().replace(line, "");
        let name = price_re().replace(&without_bullet, "");
        let name = name.trim();

        let mut letters = name.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            continue;
        };
        let heading = first.is_uppercase() && letters.all(|c| !c.is_lowercase());
        if heading || first.is_lowercase() || contact_re().is_match(name) {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            dishes.push(name.to_string());
        }
    }

    dishes
}
