//! Shared shapes passed between pipeline stages.

use serde::{Deserialize, Serialize};

/// One relation edge as extracted, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relation {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub a: String,
    pub b: String,
}

/// A semantic block as extracted from producer text (spec §4.3.1), before
/// normalization. `intent` is kept as opaque JSON — the core never
/// interprets it, only forwards it in the `Report`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Semantic {
    pub concepts: Vec<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub intent: Option<serde_json::Value>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Semantic {
    pub fn fallback(concepts: Vec<String>, relations: Vec<Relation>) -> Self {
        Self {
            concepts,
            relations,
            intent: None,
            confidence: Some(0.35),
        }
    }
}

/// Recognized relation types map onto specific link variants (spec §6);
/// anything else becomes an `Evaluation` with a synthesized predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Inherits,
    Causes,
    Resembles,
    IsA,
    Other,
}

impl RelationKind {
    pub fn classify(rel_type: &str) -> Self {
        match rel_type {
            "inherits" => RelationKind::Inherits,
            "causes" => RelationKind::Causes,
            "resembles" => RelationKind::Resembles,
            "is-a" => RelationKind::IsA,
            _ => RelationKind::Other,
        }
    }
}
