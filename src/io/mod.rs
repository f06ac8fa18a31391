//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - XLSX report writer (`export`)
//! - JSON summary export (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
