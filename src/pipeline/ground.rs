//! Grounding: checking a normalized semantic block against the atomspace
//! (spec §4.3.3).

use serde::Serialize;

use crate::atom::AtomKind;
use crate::atomspace::AtomSpace;

use super::types::{Relation, Semantic};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConceptGrounding {
    pub grounded: Vec<String>,
    pub novel: Vec<String>,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RelationGrounding {
    pub grounded: Vec<Relation>,
    pub novel: Vec<Relation>,
    pub rate: f64,
}

pub fn ground_concepts(space: &AtomSpace, semantic: &Semantic) -> ConceptGrounding {
    let mut grounded = Vec::new();
    let mut novel = Vec::new();
    for c in &semantic.concepts {
        if space.get_concept(c).is_some() {
            grounded.push(c.clone());
        } else {
            novel.push(c.clone());
        }
    }
    let rate = if semantic.concepts.is_empty() {
        0.0
    } else {
        grounded.len() as f64 / semantic.concepts.len() as f64
    };
    ConceptGrounding {
        grounded,
        novel,
        rate,
    }
}

/// A relation grounds when both its endpoints are already present as
/// `Concept` atoms in the atomspace.
pub fn ground_relations(space: &AtomSpace, semantic: &Semantic) -> RelationGrounding {
    let mut grounded = Vec::new();
    let mut novel = Vec::new();
    for r in &semantic.relations {
        let both_present =
            space.get_atom(AtomKind::Concept, &r.a).is_some() && space.get_atom(AtomKind::Concept, &r.b).is_some();
        if both_present {
            grounded.push(r.clone());
        } else {
            novel.push(r.clone());
        }
    }
    let rate = if semantic.relations.is_empty() {
        0.0
    } else {
        grounded.len() as f64 / semantic.relations.len() as f64
    };
    RelationGrounding {
        grounded,
        novel,
        rate,
    }
}
