#![deny(unsafe_code)]

//! Match classification: resolving parsed suggestions against the
//! current record set and banding their confidence into match types.

mod bands;
mod classify;

pub use bands::ConfidenceBands;
pub use classify::{SUGGESTED_DESCRIPTION, classify_suggestions};
