//! The semantic-contract pipeline: extract → normalize → ground → commit →
//! diagnose → rescue (spec §4.3). `Pipeline` is the owned context the
//! teacher's "global mutable registries" pattern gets replaced with (spec
//! §9): one instance per conceptual stream of observations, holding only
//! the rolling metrics, while the atomspace and bank are passed in.

pub mod commit;
pub mod diagnose;
pub mod extract;
pub mod ground;
pub mod metrics;
pub mod normalize;
pub mod rescue;
pub mod types;

use serde::Serialize;
use tracing::{info, instrument};

use crate::atomspace::AtomSpace;
use crate::ecan::AttentionBank;

pub use diagnose::{Diagnosis, DiagnosisKind};
pub use metrics::Metrics;
pub use rescue::{RescueKind, RescueOutcome};
pub use types::{Relation, RelationKind, Semantic};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub semantic: Option<Semantic>,
    pub concept_grounding: ground::ConceptGrounding,
    pub relation_grounding: ground::RelationGrounding,
    pub diagnosis: Diagnosis,
    pub rescue: Option<RescueOutcome>,
    pub turns: u64,
    pub should_add_suffix: bool,
}

/// One pipeline instance per atomspace+bank pair (spec §5): owns only the
/// rolling metrics, never the knowledge itself.
pub struct Pipeline {
    metrics: Metrics,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn should_add_suffix(&self) -> bool {
        self.metrics.should_add_suffix()
    }

    /// Run one turn of the pipeline over `text`, mutating `space` and `bank`
    /// in place and returning the structured `Report` (spec §4.3).
    #[instrument(skip_all, fields(turn = self.metrics.turns + 1))]
    pub fn process(&mut self, space: &mut AtomSpace, bank: &mut AttentionBank, text: &str) -> Report {
        let semantic = extract::extract(text);
        info!(found = semantic.is_some(), "extract");

        let normalized = semantic.as_ref().map(normalize::normalize_semantic);
        if let Some(n) = &normalized {
            info!(concepts = n.concepts.len(), relations = n.relations.len(), "normalize");
        }

        let concept_grounding = normalized
            .as_ref()
            .map(|s| ground::ground_concepts(space, s))
            .unwrap_or_default();
        let relation_grounding = normalized
            .as_ref()
            .map(|s| ground::ground_relations(space, s))
            .unwrap_or_default();
        info!(rate = concept_grounding.rate, "ground");

        if let Some(n) = &normalized {
            commit::commit(space, bank, n, &concept_grounding);
        }

        let diagnosis = diagnose::diagnose(
            normalized.as_ref(),
            &concept_grounding,
            &relation_grounding,
            bank.sti_funds(),
        );
        info!(?diagnosis, "diagnose");

        self.metrics.record_turn(
            semantic.is_some(),
            concept_grounding.rate,
            relation_grounding.rate,
            diagnosis.kind(),
        );

        let rescue = if !diagnosis.is_healthy() && self.metrics.rescue_should_trigger() {
            let kind = RescueKind::from_diagnosis(diagnosis.kind())
                .expect("non-healthy diagnosis always maps to a rescue kind");
            let outcome = rescue::dispatch(kind, space, bank, normalized.as_ref());
            self.metrics.record_rescue();
            info!(summary = %outcome.summary, "rescue");
            Some(outcome)
        } else {
            None
        };

        Report {
            semantic: normalized,
            concept_grounding,
            relation_grounding,
            diagnosis,
            rescue,
            turns: self.metrics.turns,
            should_add_suffix: self.metrics.should_add_suffix(),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
