//! Ingredient keyword tables and cholesterol risk classification.
//!
//! - [`keywords`] — high/low-risk keyword sets and the shared substring matcher.
//! - [`classifier`] — scores an ingredient list into a [`RiskTier`](crate::models::RiskTier).

pub mod classifier;
pub mod keywords;
