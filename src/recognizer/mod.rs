//! Image text recognition.
//!
//! Backends implement the fallible [`TextRecognizer::try_recognize`]; callers
//! that want a displayable answer use [`TextRecognizer::recognize`], which
//! turns every failure into a descriptive message instead of an error.

pub mod tesseract;

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};

pub const NO_TEXT_FOUND: &str = "No text found in image";

pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in an encoded image (PNG, JPEG, ...).
    fn try_recognize(&self, image: &[u8]) -> Result<String>;

    /// Recognized text, failing with [`NO_TEXT_FOUND`] when it is blank.
    fn recognize_text(&self, image: &[u8]) -> Result<String> {
        let text = self.try_recognize(image)?;
        if text.trim().is_empty() {
            bail!(NO_TEXT_FOUND);
        }
        Ok(text)
    }

    /// Recognized text, or a message describing why there is none.
    fn recognize(&self, image: &[u8]) -> String {
        match self.try_recognize(image) {
            Ok(text) if text.trim().is_empty() => NO_TEXT_FOUND.to_string(),
            Ok(text) => text,
            Err(e) => format!("Error processing image: {:#}", e),
        }
    }

    fn recognize_path(&self, path: &Path) -> String {
        if !path.exists() {
            return format!("Error: Image file not found: {}", path.display());
        }
        match std::fs::read(path) {
            Ok(bytes) => self.recognize(&bytes),
            Err(e) => format!("Error processing image: {}", e),
        }
    }

    fn recognize_base64(&self, encoded: &str) -> String {
        match decode_base64_image(encoded) {
            Ok(bytes) => self.recognize(&bytes),
            Err(e) => format!("Error processing base64 image: {}", e),
        }
    }
}

/// Read an image file, reporting a missing file by name.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        bail!("Image file not found: {}", path.display());
    }
    std::fs::read(path).with_context(|| format!("failed to read image {}", path.display()))
}

/// Decode base64 image data, tolerating a `data:image/...;base64,` prefix and line breaks.
pub fn decode_base64_image(encoded: &str) -> Result<Vec<u8>> {
    let payload = match encoded.trim().split_once(";base64,") {
        Some((_, data)) => data,
        None => encoded.trim(),
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(general_purpose::STANDARD.decode(compact)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRecognizer(Option<&'static str>);

    impl TextRecognizer for FixedRecognizer {
        fn try_recognize(&self, _image: &[u8]) -> Result<String> {
            match self.0 {
                Some(text) => Ok(text.to_string()),
                None => bail!("engine crashed"),
            }
        }
    }

    #[test]
    fn test_text_passthrough() {
        let r = FixedRecognizer(Some("Pad Thai\nCaesar Salad"));
        assert_eq!(r.recognize(b"img"), "Pad Thai\nCaesar Salad");
    }

    #[test]
    fn test_blank_text_message() {
        let r = FixedRecognizer(Some("  \n "));
        assert_eq!(r.recognize(b"img"), NO_TEXT_FOUND);
    }

    #[test]
    fn test_failure_is_message() {
        let r = FixedRecognizer(None);
        assert_eq!(r.recognize(b"img"), "Error processing image: engine crashed");
    }

    #[test]
    fn test_text_starting_with_error_is_text() {
        let r = FixedRecognizer(Some("Error: Burger\nFries"));
        assert_eq!(r.recognize_text(b"img").unwrap(), "Error: Burger\nFries");
    }

    #[test]
    fn test_recognize_text_failures() {
        let blank = FixedRecognizer(Some(" \n"));
        assert_eq!(blank.recognize_text(b"img").unwrap_err().to_string(), NO_TEXT_FOUND);

        let broken = FixedRecognizer(None);
        assert_eq!(broken.recognize_text(b"img").unwrap_err().to_string(), "engine crashed");
    }

    #[test]
    fn test_read_image_missing_file() {
        let err = read_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert_eq!(err.to_string(), "Image file not found: /definitely/not/here.png");
    }

    #[test]
    fn test_missing_file_message() {
        let r = FixedRecognizer(Some("text"));
        let msg = r.recognize_path(Path::new("/definitely/not/here.png"));
        assert_eq!(msg, "Error: Image file not found: /definitely/not/here.png");
    }

    #[test]
    fn test_existing_file_is_read() {
        let r = FixedRecognizer(Some("Menu"));
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"bytes").unwrap();
        assert_eq!(r.recognize_path(file.path()), "Menu");
    }

    #[test]
    fn test_base64_decoding() {
        assert_eq!(decode_base64_image("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_base64_image("data:image/png;base64,aGVs\nbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_bad_base64_message() {
        let r = FixedRecognizer(Some("text"));
        assert!(r
            .recognize_base64("!!not base64!!")
            .starts_with("Error processing base64 image:"));
    }
}
