//! ECAN — the economic attention bank.
//! Per-atom STI/LTI ledger, a bounded fund pool, and one-hop spread
//! activation through the atomspace's link structure (spec §4.2).

use std::collections::HashMap;

use crate::atom::{AtomKey, AttentionValue, Link};
use crate::config::{BankConfig, STI_FLOOR, STI_MAX};

/// Per-atom attention ledger with a shared fund pool (spec §3, §4.2).
pub struct AttentionBank {
    attention: HashMap<AtomKey, AttentionValue>,
    sti_funds: f64,
    af_size: usize,
    focus: Vec<AtomKey>,
}

impl AttentionBank {
    pub fn new(config: BankConfig) -> Self {
        Self {
            attention: HashMap::new(),
            sti_funds: config.sti_funds_initial,
            af_size: config.af_size,
            focus: Vec::new(),
        }
    }

    pub fn sti_funds(&self) -> f64 {
        self.sti_funds
    }

    pub fn af_size(&self) -> usize {
        self.af_size
    }

    pub fn attention_of(&self, atom: &AtomKey) -> AttentionValue {
        self.attention.get(atom).copied().unwrap_or_default()
    }

    /// Stimulate an atom: raises its STI (clamped) and draws down the fund
    /// pool by `amount`, regardless of clamping (spec §4.2). Returns the new
    /// STI.
    pub fn stimulate(&mut self, atom: &AtomKey, amount: f64) -> f64 {
        let entry = self.attention.entry(atom.clone()).or_default();
        entry.sti = (entry.sti + amount).clamp(-STI_FLOOR, STI_MAX);
        self.sti_funds -= amount;
        entry.sti
    }

    /// Decay every atom's STI by `rate`, reclaiming the lost mass into the
    /// fund pool.
    pub fn decay(&mut self, rate: f64) {
        let rate = rate.clamp(0.0, 1.0);
        let mut reclaimed = 0.0;
        for av in self.attention.values_mut() {
            let before = av.sti;
            av.sti *= 1.0 - rate;
            reclaimed += before - av.sti;
        }
        self.sti_funds += reclaimed;
    }

    /// Recompute the focus set: top `af_size` atoms by STI descending, ties
    /// broken by name ascending (spec invariant 4).
    pub fn update_focus(&mut self) {
        let mut ranked: Vec<(AtomKey, f64)> = self
            .attention
            .iter()
            .map(|(k, v)| (k.clone(), v.sti))
            .collect();
        ranked.sort_by(|(ka, sa), (kb, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ka.1.cmp(&kb.1))
        });
        ranked.truncate(self.af_size);
        self.focus = ranked.into_iter().map(|(k, _)| k).collect();
    }

    pub fn focus_atoms(&self) -> Vec<(AtomKey, f64)> {
        self.focus
            .iter()
            .map(|k| (k.clone(), self.attention_of(k).sti))
            .collect()
    }

    pub fn in_focus(&self, atom: &AtomKey) -> bool {
        self.focus.contains(atom)
    }

    /// One-hop spread of `source`'s STI through `links` (spec §4.2). Each
    /// link's target set is determined by its variant; self-stimulation is
    /// forbidden and links whose target set ends up empty contribute
    /// nothing. No recursion: this never follows a stimulated target's own
    /// outgoing links within the same call.
    pub fn spread_activation(
        &mut self,
        links: &[Link],
        source: &AtomKey,
        fraction: f64,
    ) -> Vec<(AtomKey, f64)> {
        let source_sti = self.attention_of(source).sti;
        let mut applied = Vec::new();

        for link in links {
            let targets = spread_targets(link, source);
            if targets.is_empty() {
                continue;
            }
            let amount = source_sti * fraction / targets.len() as f64;
            for target in targets {
                let new_sti = self.stimulate(&target, amount);
                applied.push((target, new_sti));
            }
        }

        applied
    }
}

/// Target atoms a link spreads `source`'s activation to, per spec §4.2.
/// `Context` links are not listed in the spec's spread rules and are
/// skipped.
fn spread_targets(link: &Link, source: &AtomKey) -> Vec<AtomKey> {
    match link {
        Link::Inheritance { source: s, target: t, .. } => pair_target(s, t, source),
        Link::Implication {
            antecedent,
            consequent,
            ..
        } => pair_target(antecedent, consequent, source),
        Link::Similarity { first, second, .. } => pair_target(first, second, source),
        Link::Evaluation { args, .. } => args
            .iter()
            .filter(|a| *a != source)
            .cloned()
            .collect(),
        Link::Context { .. } => Vec::new(),
    }
}

fn pair_target(a: &AtomKey, b: &AtomKey, source: &AtomKey) -> Vec<AtomKey> {
    if a == source {
        vec![b.clone()]
    } else if b == source {
        vec![a.clone()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{AtomKind, TruthValue};
    use crate::config::BankConfig;

    fn key(name: &str) -> AtomKey {
        (AtomKind::Concept, name.to_string())
    }

    #[test]
    fn focus_cardinality_respects_af_size() {
        let mut bank = AttentionBank::new(BankConfig {
            af_size: 2,
            ..Default::default()
        });
        for (i, n) in ["a", "b", "c", "d"].iter().enumerate() {
            bank.stimulate(&key(n), 10.0 * (i as f64 + 1.0));
        }
        bank.update_focus();
        assert!(bank.focus_atoms().len() <= 2);
    }

    #[test]
    fn spread_never_self_stimulates() {
        let mut bank = AttentionBank::new(BankConfig::default());
        let cat = key("cat");
        let mammal = key("mammal");
        bank.stimulate(&cat, 20.0);
        let before = bank.attention_of(&cat).sti;
        let link = Link::Inheritance {
            source: cat.clone(),
            target: mammal,
            tv: TruthValue::default_tv(),
        };
        bank.spread_activation(&[link], &cat, 0.3);
        assert_eq!(bank.attention_of(&cat).sti, before);
    }

    #[test]
    fn spread_skips_link_not_touching_source() {
        let mut bank = AttentionBank::new(BankConfig::default());
        let cat = key("cat");
        let dog = key("dog");
        let mammal = key("mammal");
        bank.stimulate(&cat, 20.0);
        let link = Link::Inheritance {
            source: dog,
            target: mammal.clone(),
            tv: TruthValue::default_tv(),
        };
        let applied = bank.spread_activation(&[link], &cat, 0.3);
        assert!(applied.is_empty());
        assert_eq!(bank.attention_of(&mammal).sti, 0.0);
    }

    #[test]
    fn evaluation_spread_skips_all_source_occurrences() {
        let mut bank = AttentionBank::new(BankConfig::default());
        let pred = key("likes");
        let cat = key("cat");
        let fish = key("fish");
        bank.stimulate(&pred, 30.0);
        let link = Link::Evaluation {
            predicate: pred.clone(),
            args: vec![cat.clone(), cat.clone(), fish.clone()],
            tv: TruthValue::default_tv(),
        };
        let applied = bank.spread_activation(&[link], &cat, 0.3);
        // cat appears twice in args; both skipped, only fish receives
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].0, fish);
    }
}
