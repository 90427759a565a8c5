//! The six-clause diagnosis state machine (spec §4.3.5). Always returns a
//! tagged result — the fall-through clause is `Healthy`.

use serde::Serialize;

use crate::config::BUDGET_EXHAUSTED_THRESHOLD;

use super::ground::{ConceptGrounding, RelationGrounding};
use super::types::Semantic;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnosis {
    ParserMiss,
    GroundingVacuum,
    OntologyMiss,
    BudgetExhausted,
    ContradictionBlocked,
    Healthy {
        concept_rate: f64,
        relation_rate: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosisKind {
    ParserMiss,
    GroundingVacuum,
    OntologyMiss,
    BudgetExhausted,
    ContradictionBlocked,
    Healthy,
}

impl Diagnosis {
    pub fn kind(&self) -> DiagnosisKind {
        match self {
            Diagnosis::ParserMiss => DiagnosisKind::ParserMiss,
            Diagnosis::GroundingVacuum => DiagnosisKind::GroundingVacuum,
            Diagnosis::OntologyMiss => DiagnosisKind::OntologyMiss,
            Diagnosis::BudgetExhausted => DiagnosisKind::BudgetExhausted,
            Diagnosis::ContradictionBlocked => DiagnosisKind::ContradictionBlocked,
            Diagnosis::Healthy { .. } => DiagnosisKind::Healthy,
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Diagnosis::Healthy { .. })
    }
}

/// Evaluate the six clauses in order; the first match wins (spec §4.3.5).
pub fn diagnose(
    semantic: Option<&Semantic>,
    concept_grounding: &ConceptGrounding,
    relation_grounding: &RelationGrounding,
    sti_funds: f64,
) -> Diagnosis {
    let Some(semantic) = semantic else {
        return Diagnosis::ParserMiss;
    };
    if semantic.concepts.is_empty() {
        return Diagnosis::ParserMiss;
    }
    if concept_grounding.rate == 0.0 {
        return Diagnosis::GroundingVacuum;
    }
    if !semantic.relations.is_empty() && relation_grounding.rate == 0.0 {
        return Diagnosis::OntologyMiss;
    }
    if sti_funds < BUDGET_EXHAUSTED_THRESHOLD {
        return Diagnosis::BudgetExhausted;
    }
    if concept_grounding.rate > 0.5 {
        if let Some(confidence) = semantic.confidence {
            if confidence < 0.3 {
                return Diagnosis::ContradictionBlocked;
            }
        }
    }
    Diagnosis::Healthy {
        concept_rate: concept_grounding.rate,
        relation_rate: relation_grounding.rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semantic(concepts: Vec<&str>, relations_empty: bool, confidence: Option<f64>) -> Semantic {
        Semantic {
            concepts: concepts.into_iter().map(String::from).collect(),
            relations: if relations_empty {
                vec![]
            } else {
                vec![super::super::types::Relation {
                    rel_type: "inherits".into(),
                    a: "a".into(),
                    b: "b".into(),
                }]
            },
            intent: None,
            confidence,
        }
    }

    #[test]
    fn diagnosis_is_total() {
        let cg = ConceptGrounding::default();
        let rg = RelationGrounding::default();
        let d = diagnose(None, &cg, &rg, 100.0);
        assert_eq!(d.kind(), DiagnosisKind::ParserMiss);
    }

    #[test]
    fn empty_concepts_is_parser_miss() {
        let s = semantic(vec![], true, None);
        let cg = ConceptGrounding::default();
        let rg = RelationGrounding::default();
        assert_eq!(diagnose(Some(&s), &cg, &rg, 100.0).kind(), DiagnosisKind::ParserMiss);
    }

    #[test]
    fn zero_concept_grounding_is_vacuum() {
        let s = semantic(vec!["x"], true, None);
        let cg = ConceptGrounding {
            grounded: vec![],
            novel: vec!["x".into()],
            rate: 0.0,
        };
        let rg = RelationGrounding::default();
        assert_eq!(
            diagnose(Some(&s), &cg, &rg, 100.0).kind(),
            DiagnosisKind::GroundingVacuum
        );
    }

    #[test]
    fn empty_relations_does_not_trigger_ontology_miss() {
        let s = semantic(vec!["x"], true, None);
        let cg = ConceptGrounding {
            grounded: vec!["x".into()],
            novel: vec![],
            rate: 1.0,
        };
        let rg = RelationGrounding::default();
        assert!(diagnose(Some(&s), &cg, &rg, 100.0).is_healthy());
    }

    #[test]
    fn budget_exhausted_fires_below_threshold() {
        let s = semantic(vec!["x"], true, None);
        let cg = ConceptGrounding {
            grounded: vec!["x".into()],
            novel: vec![],
            rate: 1.0,
        };
        let rg = RelationGrounding::default();
        assert_eq!(
            diagnose(Some(&s), &cg, &rg, -150.0).kind(),
            DiagnosisKind::BudgetExhausted
        );
    }
}
