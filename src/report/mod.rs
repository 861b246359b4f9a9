//! Report renderers for dish assessments.
//!
//! - [`terminal`] — colored table with per-tier summary; respects `--verbose` / `--quiet`.
//! - JSON output is a plain `serde_json` dump of the outcomes and lives in `main`.

pub mod terminal;
