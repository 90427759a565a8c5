//! The five rescue strategies and their dispatch table (spec §4.3.6).
//!
//! `RescueKind` deliberately excludes `Healthy` — only non-healthy
//! diagnoses are rescuable — so the match in `dispatch` is exhaustive over
//! exactly the five failure modes. Adding a sixth diagnosis kind without
//! adding its arm here fails to compile.

use serde::Serialize;

use crate::atom::{AtomKind, Link, LinkVariant, TruthValue};
use crate::atomspace::AtomSpace;
use crate::ecan::AttentionBank;

use super::diagnose::DiagnosisKind;
use super::types::Semantic;

const SEED_CONCEPTS: &[&str] = &[
    "thing", "idea", "action", "state", "relation", "cause", "effect", "agent", "object",
    "property",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescueKind {
    ParserMiss,
    GroundingVacuum,
    OntologyMiss,
    BudgetExhausted,
    ContradictionBlocked,
}

impl RescueKind {
    pub fn from_diagnosis(kind: DiagnosisKind) -> Option<Self> {
        match kind {
            DiagnosisKind::ParserMiss => Some(RescueKind::ParserMiss),
            DiagnosisKind::GroundingVacuum => Some(RescueKind::GroundingVacuum),
            DiagnosisKind::OntologyMiss => Some(RescueKind::OntologyMiss),
            DiagnosisKind::BudgetExhausted => Some(RescueKind::BudgetExhausted),
            DiagnosisKind::ContradictionBlocked => Some(RescueKind::ContradictionBlocked),
            DiagnosisKind::Healthy => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RescueOutcome {
    pub summary: String,
    pub action: Option<String>,
}

pub fn dispatch(
    kind: RescueKind,
    space: &mut AtomSpace,
    bank: &mut AttentionBank,
    semantic: Option<&Semantic>,
) -> RescueOutcome {
    match kind {
        RescueKind::GroundingVacuum => grounding_vacuum(space, bank),
        RescueKind::BudgetExhausted => budget_exhausted(bank),
        RescueKind::ParserMiss => parser_miss(),
        RescueKind::OntologyMiss => ontology_miss(space, bank),
        RescueKind::ContradictionBlocked => contradiction_blocked(space, bank, semantic),
    }
}

fn grounding_vacuum(space: &mut AtomSpace, bank: &mut AttentionBank) -> RescueOutcome {
    for name in SEED_CONCEPTS {
        let _ = space.add_atom(AtomKind::Concept, name, Some(TruthValue::new(0.5, 0.2)));
        bank.stimulate(&(AtomKind::Concept, name.to_string()), 3.0);
    }
    bank.update_focus();
    RescueOutcome {
        summary: format!("seeded {} broad concepts into an empty ontology", SEED_CONCEPTS.len()),
        action: None,
    }
}

fn budget_exhausted(bank: &mut AttentionBank) -> RescueOutcome {
    bank.decay(0.9);
    bank.update_focus();
    RescueOutcome {
        summary: "reclaimed STI funds with an aggressive 0.9 decay".to_string(),
        action: None,
    }
}

fn parser_miss() -> RescueOutcome {
    RescueOutcome {
        summary: "no semantic block found; flagged next prompt for a reminder suffix".to_string(),
        action: Some(suffix_reminder()),
    }
}

/// Text snippet a producer should append to its next prompt (spec §6's
/// "semantic-suffix reminder"). The exact wording is an implementation
/// artifact; the contract is an example block, the four relation types, and
/// an instruction never to emit an empty structure.
pub fn suffix_reminder() -> String {
    concat!(
        "Remember to close your answer with a semantic block, e.g.:\n",
        "```semantic\n",
        "{:concepts [\"concept-one\" \"concept-two\"]\n",
        " :relations [{:type :inherits :a \"concept-one\" :b \"concept-two\"}]\n",
        " :intent {:type :statement}\n",
        " :confidence 0.7}\n",
        "```\n",
        "Recognized relation types: inherits, causes, resembles, is-a ",
        "(anything else becomes a synthesized evaluation predicate).\n",
        "Never emit an empty `{:concepts [] :relations []}` structure.",
    )
    .to_string()
}

fn ontology_miss(space: &mut AtomSpace, bank: &mut AttentionBank) -> RescueOutcome {
    let focus: Vec<_> = bank.focus_atoms().into_iter().map(|(k, _)| k).collect();
    if focus.is_empty() {
        return RescueOutcome {
            summary: "no focused atoms to relate".to_string(),
            action: None,
        };
    }

    let inheritance = space.links_by_variant(LinkVariant::Inheritance);

    let mut parents = Vec::new();
    for f in &focus {
        for link in &inheritance {
            if let Link::Inheritance { source, target, .. } = link {
                if source == f && !parents.contains(target) {
                    parents.push(target.clone());
                }
            }
        }
    }

    let mut pairs_added = 0;
    if parents.is_empty() {
        // No parents found: link focus atoms to each other.
        for i in 0..focus.len() {
            for j in (i + 1)..focus.len() {
                if pairs_added >= 4 {
                    break;
                }
                space.add_link(
                    Link::Similarity {
                        first: focus[i].clone(),
                        second: focus[j].clone(),
                        tv: TruthValue::new(0.4, 0.2),
                    },
                    None,
                );
                pairs_added += 1;
            }
        }
    } else {
        let mut siblings = Vec::new();
        for parent in &parents {
            for link in &inheritance {
                if let Link::Inheritance { source, target, .. } = link {
                    if target == parent && !focus.contains(source) && !siblings.contains(source) {
                        siblings.push(source.clone());
                    }
                }
            }
        }
        'outer: for f in &focus {
            for sibling in &siblings {
                if pairs_added >= 4 {
                    break 'outer;
                }
                space.add_link(
                    Link::Similarity {
                        first: f.clone(),
                        second: sibling.clone(),
                        tv: TruthValue::new(0.5, 0.3),
                    },
                    None,
                );
                bank.stimulate(sibling, 4.0);
                pairs_added += 1;
            }
        }
    }
    bank.update_focus();

    RescueOutcome {
        summary: format!("linked {pairs_added} focus/sibling pairs to repair a grounded-but-isolated ontology"),
        action: None,
    }
}

fn contradiction_blocked(
    space: &mut AtomSpace,
    bank: &mut AttentionBank,
    semantic: Option<&Semantic>,
) -> RescueOutcome {
    let Some(confidence) = semantic.and_then(|s| s.confidence) else {
        return RescueOutcome {
            summary: "no confidence value to revise toward".to_string(),
            action: None,
        };
    };
    let target = TruthValue::new(confidence, 0.4);
    let focus: Vec<_> = bank.focus_atoms().into_iter().map(|(k, _)| k).collect();
    let mut revised = 0;
    for (kind, name) in &focus {
        if *kind == AtomKind::Concept || *kind == AtomKind::Predicate {
            let _ = space.add_atom(*kind, name, Some(target));
            revised += 1;
        }
    }
    bank.decay(0.15);
    RescueOutcome {
        summary: format!("revised {revised} focused atoms toward confidence {confidence:.2}"),
        action: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BankConfig;

    #[test]
    fn grounding_vacuum_seeds_at_least_ten_atoms() {
        let mut space = AtomSpace::new();
        let mut bank = AttentionBank::new(BankConfig::default());
        grounding_vacuum(&mut space, &mut bank);
        assert!(space.atom_count() >= 10);
    }
}
