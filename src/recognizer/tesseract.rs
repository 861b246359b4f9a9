use std::process::Command;

use anyhow::{bail, Context, Result};
use image::ImageFormat;
use tracing::{debug, info};

use super::TextRecognizer;
use crate::config::OcrConfig;

/// Runs the `tesseract` command-line engine on a normalized PNG copy of the image.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn try_recognize(&self, image: &[u8]) -> Result<String> {
        let decoded = image::load_from_memory(image).context("unsupported or corrupt image")?;
        info!(
            width = decoded.width(),
            height = decoded.height(),
            "running OCR"
        );

        let file = tempfile::Builder::new()
            .prefix("lowchol-")
            .suffix(".png")
            .tempfile()?;
        decoded.save_with_format(file.path(), ImageFormat::Png)?;

        let output = Command::new(&self.command)
            .arg(file.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .with_context(|| format!("failed to run `{}`", self.command))?;

        if !output.status.success() {
            bail!(
                "`{}` exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(collect_lines(&text))
    }
}

/// Keep the non-blank recognized lines, trimmed, one per line.
fn collect_lines(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    for line in &lines {
        debug!(text = %line, "detected text");
    }
    lines.join("\n")
}
