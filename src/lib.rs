//! `lowchol` — estimate the cholesterol risk of dishes from their likely ingredients.
//!
//! # Flow
//! 1. Load config ([`config::load_config`]) and build the keyword tables.
//! 2. Obtain ingredients: from the user, from a language model
//!    ([`extractor`]), or from the dishes on a menu image ([`recognizer`]).
//! 3. Score them with the [`scoring::classifier::RiskClassifier`].
//! 4. Render the result ([`report`] or JSON).
//!
//! ```
//! use lowchol::models::RiskTier;
//! use lowchol::scoring::classifier::classify;
//!
//! let (tier, reason) = classify(&["cheese", "broccoli", "rice"]);
//! assert_eq!(tier, RiskTier::Medium);
//! assert_eq!(reason, "mixed nutritional profile");
//! ```

pub mod cli;
pub mod config;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod recognizer;
pub mod report;
pub mod scoring;
