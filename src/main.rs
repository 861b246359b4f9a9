use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use lowchol::cli::{Cli, ReportFormat};
use lowchol::config::{load_config, Config};
use lowchol::extractor::openai::ChatCompletionsExtractor;
use lowchol::extractor::parse_ingredient_list;
use lowchol::models::DishOutcome;
use lowchol::pipeline::{analyze_ingredients, Pipeline};
use lowchol::recognizer::tesseract::TesseractRecognizer;
use lowchol::recognizer::{decode_base64_image, read_image, TextRecognizer};
use lowchol::report;
use lowchol::scoring::classifier::RiskClassifier;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let classifier = RiskClassifier::new(config.keywords.to_table());
    debug!(
        high = classifier.keywords().high.len(),
        low = classifier.keywords().low.len(),
        "keyword tables loaded"
    );

    let outcomes = if let Some(list) = &cli.ingredients {
        let label = cli.label.as_deref().unwrap_or("custom dish");
        vec![DishOutcome::Assessed(analyze_ingredients(
            &classifier,
            label,
            parse_ingredient_list(list),
        ))]
    } else if let Some(dish) = &cli.dish {
        let extractor = ChatCompletionsExtractor::from_config(&config.extractor)?;
        let pipeline = Pipeline::new(&classifier, &extractor, config.extractor.max_concurrent);
        vec![DishOutcome::Assessed(pipeline.analyze_dish(dish).await?)]
    } else {
        let text = recognize_image(&cli, &config).await?;
        if !cli.quiet {
            eprintln!(" {} Text extracted from image:", "→".cyan());
            for line in text.lines() {
                eprintln!("   {}", line.dimmed());
            }
        }

        let extractor = ChatCompletionsExtractor::from_config(&config.extractor)?;
        let pipeline = Pipeline::new(&classifier, &extractor, config.extractor.max_concurrent);
        let outcomes = pipeline.analyze_text(&text, !cli.quiet).await;
        if outcomes.is_empty() {
            bail!("no dishes found in the extracted text");
        }
        outcomes
    };

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&outcomes, cli.verbose, cli.quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
    }

    // Exit code: 1 if any dish could not be analyzed
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| matches!(o, DishOutcome::Failed { .. }))
        .map(DishOutcome::dish)
        .collect();
    if !failed.is_empty() {
        warn!(dishes = ?failed, "some dishes could not be analyzed");
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,lowchol=info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run OCR on the `--ocr` / `--ocr-base64` input, off the async runtime.
async fn recognize_image(cli: &Cli, config: &Config) -> Result<String> {
    let recognizer = TesseractRecognizer::new(&config.ocr);

    let image = if let Some(path) = &cli.ocr {
        read_image(path)?
    } else if let Some(path) = &cli.ocr_base64 {
        decode_base64_image(&read_base64_file(path)?).context("failed to decode base64 image")?
    } else {
        bail!("no image given");
    };

    tokio::task::spawn_blocking(move || recognizer.recognize_text(&image))
        .await?
        .context("failed to process image")
}

fn read_base64_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read base64 image {}", path.display()))
}
