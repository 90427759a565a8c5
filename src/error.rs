//! Operational failures for the atomspace and attention bank.
//!
//! The semantic pipeline's typed diagnoses (parser-miss, grounding-vacuum, …)
//! are not errors — they are ordinary `Report` fields (see `pipeline::diagnose`).
//! `CoreError` covers the narrower set of ways a direct atomspace/bank call
//! can fail to do what was asked; lookups that simply find nothing return
//! `Option`, not an error (spec §4.1's blank Errors column), and `Link`'s
//! sum type already makes an arity mismatch a compile error, so this stays
//! a single variant until a second fallible path needs one.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid name: {0:?}")]
    InvalidArgument(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
