//! Trend assembly.
//!
//! Responsibilities:
//!
//! - resolve the candidate set once, up front
//! - date, filter and sort the records
//! - smooth each candidate's series (parallel across candidates)

pub mod assemble;
pub mod candidates;

pub use assemble::*;
pub use candidates::*;
