#![deny(unsafe_code)]

//! Parsers for unstructured assistant responses.
//!
//! Two wire shapes are supported: line-oriented lists of arrow mappings
//! (multi-account suggestions) and labeled blocks (single-account
//! lookups). Both parsers are total: malformed input produces fewer
//! suggestions, never an error.

mod block;
mod line;

pub use block::parse_block_response;
pub use line::{DEFAULT_CONFIDENCE, parse_response};
