use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{DishAssessment, DishOutcome, MatchKind, RiskTier};

/// Render a colored terminal report.
pub fn render(outcomes: &[DishOutcome], verbose: bool, quiet: bool) -> Result<()> {
    if quiet {
        for outcome in outcomes {
            println!("{}", summary_line(outcome));
        }
        return Ok(());
    }

    println!("\n {} v{}\n", "lowchol".bold(), env!("CARGO_PKG_VERSION"));

    let assessed: Vec<&DishAssessment> = outcomes
        .iter()
        .filter_map(|o| match o {
            DishOutcome::Assessed(a) => Some(a),
            DishOutcome::Failed { .. } => None,
        })
        .collect();
    let failed = outcomes.len() - assessed.len();

    if outcomes.len() > 1 {
        let count = |tier: RiskTier| {
            assessed
                .iter()
                .filter(|a| a.classification.tier == tier)
                .count()
        };
        println!(" ┌────────────────────────────────────────────────────┐");
        println!(" │  {:<48} │", "SUMMARY".bold());
        println!(" │  {:<48} │", format!("Dishes analyzed : {}", outcomes.len()));
        println!(
            " │  {:<48} │",
            format!("{}  High         : {:>4}", "●".red(), count(RiskTier::High))
        );
        println!(
            " │  {:<48} │",
            format!("{}  Medium       : {:>4}", "●".yellow(), count(RiskTier::Medium))
        );
        println!(
            " │  {:<48} │",
            format!("{}  Low          : {:>4}", "●".green(), count(RiskTier::Low))
        );
        println!(
            " │  {:<48} │",
            format!("{}  Failed       : {:>4}", "✗".red(), failed)
        );
        println!(" └────────────────────────────────────────────────────┘\n");
    }

    if !assessed.is_empty() {
        render_table(&assessed);
        println!();
    }

    if verbose {
        for assessment in &assessed {
            println!(" {} {}\n", "[BREAKDOWN]".cyan().bold(), assessment.dish);
            render_breakdown(assessment);
            println!();
        }
    }

    if failed > 0 {
        println!(" {} Dishes that could not be analyzed:\n", "[ERROR]".red().bold());
        for outcome in outcomes {
            if let DishOutcome::Failed { dish, error } = outcome {
                println!("   {} {}: {}", "✗".red(), dish.bold(), error);
            }
        }
        println!();
    }

    Ok(())
}

fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::High => Color::Red,
        RiskTier::Medium => Color::Yellow,
        RiskTier::Low => Color::Green,
    }
}

fn render_table(assessed: &[&DishAssessment]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Dish").add_attribute(Attribute::Bold),
            Cell::new("Risk").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Reason").add_attribute(Attribute::Bold),
            Cell::new("Ingredients").add_attribute(Attribute::Bold),
        ]);

    for a in assessed {
        let tier = a.classification.tier;
        let ingredients = if a.ingredients.is_empty() {
            "-".to_string()
        } else {
            a.ingredients.join(", ")
        };

        table.add_row(vec![
            Cell::new(&a.dish),
            Cell::new(format!("{} {}", tier.badge(), tier)).fg(tier_color(tier)),
            Cell::new(a.classification.score).set_alignment(CellAlignment::Right),
            Cell::new(&a.classification.reason),
            Cell::new(ingredients),
        ]);
    }

    println!("{}", table);
}

fn render_breakdown(assessment: &DishAssessment) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Ingredient").add_attribute(Attribute::Bold),
            Cell::new("Match").add_attribute(Attribute::Bold),
            Cell::new("Points").add_attribute(Attribute::Bold),
        ]);

    for m in &assessment.classification.matches {
        let color = match m.kind {
            MatchKind::High => Color::Red,
            MatchKind::Low => Color::Green,
            MatchKind::Neutral => Color::DarkGrey,
        };
        table.add_row(vec![
            Cell::new(&m.ingredient),
            Cell::new(m.kind.to_string()).fg(color),
            Cell::new(format!("{:+}", m.kind.points())).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

/// One-line form used by `--quiet`, e.g. `🔴 High – contains high saturated-fat ingredients (Alfredo)`.
fn summary_line(outcome: &DishOutcome) -> String {
    match outcome {
        DishOutcome::Assessed(a) => {
            let tier = a.classification.tier;
            let label = format!("{} {}", tier.badge(), tier);
            let label = match tier {
                RiskTier::High => label.red(),
                RiskTier::Medium => label.yellow(),
                RiskTier::Low => label.green(),
            };
            format!("{} – {} ({})", label, a.classification.reason, a.dish)
        }
        DishOutcome::Failed { dish, error } => {
            format!("{} – {} ({})", "✗ Error".red(), error, dish)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientSource;
    use crate::scoring::classifier::RiskClassifier;

    #[test]
    fn test_summary_line() {
        colored::control::set_override(false);
        let ingredients = vec!["butter".to_string()];
        let outcome = DishOutcome::Assessed(DishAssessment {
            dish: "Garlic Bread".to_string(),
            source: IngredientSource::User,
            classification: RiskClassifier::default().assess(&ingredients),
            ingredients,
        });
        assert_eq!(
            summary_line(&outcome),
            "🔴 High – contains high saturated-fat ingredients (Garlic Bread)"
        );

        let failed = DishOutcome::Failed {
            dish: "Ramen".to_string(),
            error: "timeout".to_string(),
        };
        assert_eq!(summary_line(&failed), "✗ Error – timeout (Ramen)");
    }
}
