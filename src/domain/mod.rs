//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed label sets (`ActivityCategory`, `Branch`)
//! - input/enriched article rows (`ArticleRecord`, `EnrichedRecord`)
//! - report outputs (`ReportBundle`, `BranchMatrix`, `YearMonth`)
//! - run configuration (`AnalyzeConfig`, `DateWindow`)

pub mod types;

pub use types::*;
