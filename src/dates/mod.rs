//! Fieldwork date parsing.
//!
//! Turns loose date-range text into one representative calendar day per poll.

pub mod parser;

pub use parser::*;
