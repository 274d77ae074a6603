//! Input/output helpers.
//!
//! - poll table ingest + value normalization (`ingest`)
//! - trend JSON read/write (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
