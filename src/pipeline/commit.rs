//! Materializing a grounded semantic block into the atomspace and attention
//! bank (spec §4.3.4).

use std::collections::HashSet;

use crate::atom::{AtomKind, Link, TruthValue};
use crate::atomspace::AtomSpace;
use crate::config::{commit_decay_rate, fund_scale};
use crate::ecan::AttentionBank;

use super::ground::ConceptGrounding;
use super::types::{RelationKind, Semantic};


#[derive(Debug, Clone, Default)]
pub struct CommitOutcome {
    pub added_concepts: Vec<String>,
    pub stimulated: Vec<(String, f64)>,
    pub links_added: usize,
    pub decay_rate: f64,
}

/// Commit a normalized, grounded semantic block. No-op (returns the default
/// outcome) when the block has zero concepts.
pub fn commit(
    space: &mut AtomSpace,
    bank: &mut AttentionBank,
    semantic: &Semantic,
    grounding: &ConceptGrounding,
) -> CommitOutcome {
    if semantic.concepts.is_empty() {
        return CommitOutcome::default();
    }

    // Step 1: add every novel concept.
    let mut added_concepts = Vec::new();
    for c in &grounding.novel {
        if space
            .add_atom(AtomKind::Concept, c, Some(TruthValue::new(0.6, 0.3)))
            .is_ok()
        {
            added_concepts.push(c.clone());
        }
    }

    // Step 2: stimulate every mentioned concept, scaled by the fund state.
    let novel_set: HashSet<&String> = grounding.novel.iter().collect();
    let mut stimulated = Vec::new();
    for c in &semantic.concepts {
        let base = if novel_set.contains(c) { 12.0 } else { 8.0 };
        let amount = base * fund_scale(bank.sti_funds());
        let key = (AtomKind::Concept, c.clone());
        let new_sti = bank.stimulate(&key, amount);
        stimulated.push((c.clone(), new_sti));
    }

    // Step 3 + 4: add each relation's link, then spread through every link
    // touching its source endpoint (spread_activation itself determines,
    // per variant, whether `a` is actually a spreadable endpoint of a given
    // link — see ecan::spread_targets — so we gather broadly here).
    let mut links_added = 0;
    for rel in &semantic.relations {
        let a_key = (AtomKind::Concept, rel.a.clone());
        let b_key = (AtomKind::Concept, rel.b.clone());

        let link = match RelationKind::classify(&rel.rel_type) {
            RelationKind::Inherits | RelationKind::IsA => Link::Inheritance {
                source: a_key.clone(),
                target: b_key.clone(),
                tv: TruthValue::default_tv(),
            },
            RelationKind::Causes => Link::Implication {
                antecedent: a_key.clone(),
                consequent: b_key.clone(),
                tv: TruthValue::default_tv(),
            },
            RelationKind::Resembles => Link::Similarity {
                first: a_key.clone(),
                second: b_key.clone(),
                tv: TruthValue::default_tv(),
            },
            RelationKind::Other => {
                let pred_name = format!("rel-{}", rel.rel_type);
                let _ = space.add_atom(AtomKind::Predicate, &pred_name, Some(TruthValue::default_tv()));
                Link::Evaluation {
                    predicate: (AtomKind::Predicate, pred_name),
                    args: vec![a_key.clone(), b_key.clone()],
                    tv: TruthValue::default_tv(),
                }
            }
        };
        space.add_link(link, None);
        links_added += 1;

        let touching: Vec<Link> = space
            .query_links(|l| l.endpoints().contains(&a_key))
            .into_iter()
            .cloned()
            .collect();
        bank.spread_activation(&touching, &a_key, 0.3);
    }

    // Step 5 + 6.
    let decay_rate = commit_decay_rate(bank.sti_funds());
    bank.decay(decay_rate);
    bank.update_focus();

    CommitOutcome {
        added_concepts,
        stimulated,
        links_added,
        decay_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BankConfig;
    use crate::pipeline::ground::ground_concepts;
    use crate::pipeline::types::Relation;

    #[test]
    fn commit_adds_novel_concepts_and_relation_link() {
        let mut space = AtomSpace::new();
        let mut bank = AttentionBank::new(BankConfig::default());
        let semantic = Semantic {
            concepts: vec!["coggy".into(), "reasoning".into()],
            relations: vec![Relation {
                rel_type: "inherits".into(),
                a: "coggy".into(),
                b: "reasoning".into(),
            }],
            intent: None,
            confidence: Some(0.8),
        };
        let grounding = ground_concepts(&space, &semantic);
        let outcome = commit(&mut space, &mut bank, &semantic, &grounding);
        assert_eq!(outcome.added_concepts.len(), 2);
        assert_eq!(outcome.links_added, 1);
        assert_eq!(space.atom_count(), 2);
        assert_eq!(space.link_count(), 1);
    }

    #[test]
    fn commit_is_noop_for_empty_concepts() {
        let mut space = AtomSpace::new();
        let mut bank = AttentionBank::new(BankConfig::default());
        let semantic = Semantic {
            concepts: vec![],
            relations: vec![],
            intent: None,
            confidence: None,
        };
        let grounding = ground_concepts(&space, &semantic);
        let outcome = commit(&mut space, &mut bank, &semantic, &grounding);
        assert_eq!(outcome.links_added, 0);
        assert_eq!(space.atom_count(), 0);
    }
}
