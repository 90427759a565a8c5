//! Coggy core: a typed hypergraph atomspace, an economic attention bank,
//! and the semantic-contract pipeline that grounds and commits observations
//! extracted from opaque text producers.
//!
//! The HTTP/agent surface, UIs, LLM client, persistence, and domain packs
//! are external collaborators and live outside this crate.

pub mod atom;
pub mod atomspace;
pub mod config;
pub mod ecan;
pub mod error;
pub mod ontology;
pub mod pipeline;

pub use atom::{Atom, AtomKind, AttentionValue, Link, LinkVariant, TruthValue};
pub use atomspace::AtomSpace;
pub use ecan::AttentionBank;
pub use error::{CoreError, CoreResult};
pub use pipeline::{Diagnosis, DiagnosisKind, Pipeline, Report};
