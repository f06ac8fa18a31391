//! `wechat-analyzer` library crate.
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - classification and aggregation are testable without spawning processes
//! - the pipeline can be driven from in-memory tables as well as CSV files

pub mod app;
pub mod classify;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod telemetry;
