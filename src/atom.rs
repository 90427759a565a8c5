//! Atoms, links, and truth values — the typed hypergraph's element types.

use std::fmt;

/// Kind of a named atom. `Variable` is reserved for the unification and
/// backward-chaining extensions the spec explicitly defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Concept,
    Predicate,
    Variable,
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomKind::Concept => write!(f, "Concept"),
            AtomKind::Predicate => write!(f, "Predicate"),
            AtomKind::Variable => write!(f, "Variable"),
        }
    }
}

/// Identity of an atom: `(kind, canonical name)`. Asserting the same
/// `(kind, name)` twice is one atom whose truth value is revised in place.
pub type AtomKey = (AtomKind, String);

/// `(strength, confidence) ∈ [0,1]²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthValue {
    pub strength: f64,
    pub confidence: f64,
}

impl TruthValue {
    pub fn new(strength: f64, confidence: f64) -> Self {
        Self {
            strength: strength.clamp(0.0, 1.0),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub const fn true_tv() -> Self {
        Self {
            strength: 1.0,
            confidence: 0.9,
        }
    }

    pub const fn false_tv() -> Self {
        Self {
            strength: 0.0,
            confidence: 0.9,
        }
    }

    pub const fn default_tv() -> Self {
        Self {
            strength: 0.5,
            confidence: 0.1,
        }
    }

    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.strength) && (0.0..=1.0).contains(&self.confidence)
    }

    /// PLN truth-value revision (spec §4.1): merge two independent
    /// observations of the same proposition. Confidence never decreases.
    pub fn revise(a: TruthValue, b: TruthValue) -> TruthValue {
        let c_sum = a.confidence + b.confidence;
        if c_sum <= 0.0 {
            return TruthValue::default_tv();
        }
        let strength = (a.strength * a.confidence + b.strength * b.confidence) / c_sum;
        let confidence = (c_sum - a.confidence * b.confidence).min(0.99);
        TruthValue::new(strength, confidence)
    }
}

impl Default for TruthValue {
    fn default() -> Self {
        Self::default_tv()
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stv {:.2}/{:.2}", self.strength, self.confidence)
    }
}

/// `(sti, lti)` per-atom attention ledger entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttentionValue {
    pub sti: f64,
    pub lti: f64,
}

impl AttentionValue {
    pub const fn zero() -> Self {
        Self { sti: 0.0, lti: 0.0 }
    }
}

impl Default for AttentionValue {
    fn default() -> Self {
        Self::zero()
    }
}

/// A named, typed, truth-valued node.
#[derive(Debug, Clone)]
pub struct Atom {
    pub kind: AtomKind,
    pub name: String,
    pub tv: TruthValue,
}

impl Atom {
    pub fn key(&self) -> AtomKey {
        (self.kind, self.name.clone())
    }
}

/// A typed n-ary connective over atoms. Variant and slot shapes from spec §3.
#[derive(Debug, Clone)]
pub enum Link {
    /// X is-a Y; ordered.
    Inheritance {
        source: AtomKey,
        target: AtomKey,
        tv: TruthValue,
    },
    /// if X then Y; ordered.
    Implication {
        antecedent: AtomKey,
        consequent: AtomKey,
        tv: TruthValue,
    },
    /// X resembles Y; unordered.
    Similarity {
        first: AtomKey,
        second: AtomKey,
        tv: TruthValue,
    },
    /// predicate applied to an argument sequence; ordered.
    Evaluation {
        predicate: AtomKey,
        args: Vec<AtomKey>,
        tv: TruthValue,
    },
    /// scoped assertion; ordered. Carries no truth value of its own.
    Context { context: AtomKey, inner: AtomKey },
}

/// Tag identifying a link's variant, independent of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVariant {
    Inheritance,
    Implication,
    Similarity,
    Evaluation,
    Context,
}

impl fmt::Display for LinkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkVariant::Inheritance => write!(f, "InheritanceLink"),
            LinkVariant::Implication => write!(f, "ImplicationLink"),
            LinkVariant::Similarity => write!(f, "SimilarityLink"),
            LinkVariant::Evaluation => write!(f, "EvaluationLink"),
            LinkVariant::Context => write!(f, "ContextLink"),
        }
    }
}

impl Link {
    pub fn variant(&self) -> LinkVariant {
        match self {
            Link::Inheritance { .. } => LinkVariant::Inheritance,
            Link::Implication { .. } => LinkVariant::Implication,
            Link::Similarity { .. } => LinkVariant::Similarity,
            Link::Evaluation { .. } => LinkVariant::Evaluation,
            Link::Context { .. } => LinkVariant::Context,
        }
    }

    /// Truth value carried by this link, if any (`Context` carries none).
    pub fn tv(&self) -> Option<TruthValue> {
        match self {
            Link::Inheritance { tv, .. }
            | Link::Implication { tv, .. }
            | Link::Similarity { tv, .. }
            | Link::Evaluation { tv, .. } => Some(*tv),
            Link::Context { .. } => None,
        }
    }

    fn set_tv(&mut self, new_tv: TruthValue) {
        match self {
            Link::Inheritance { tv, .. }
            | Link::Implication { tv, .. }
            | Link::Similarity { tv, .. }
            | Link::Evaluation { tv, .. } => *tv = new_tv,
            Link::Context { .. } => {}
        }
    }

    /// Revise this link's truth value in place with an incoming observation
    /// (spec §4.1: present on both sides → revise, else keep existing).
    pub fn revise_tv(&mut self, incoming: TruthValue) {
        if let Some(existing) = self.tv() {
            self.set_tv(TruthValue::revise(existing, incoming));
        }
    }

    /// Ordered endpoint list in source order (used for spread activation and
    /// grounding — NOT content identity; see `atomspace::link_key`, which
    /// sorts `Similarity`'s endpoints before hashing).
    pub fn endpoints(&self) -> Vec<AtomKey> {
        match self {
            Link::Inheritance { source, target, .. } => vec![source.clone(), target.clone()],
            Link::Implication {
                antecedent,
                consequent,
                ..
            } => vec![antecedent.clone(), consequent.clone()],
            Link::Similarity { first, second, .. } => vec![first.clone(), second.clone()],
            Link::Evaluation { predicate, args, .. } => {
                let mut v = vec![predicate.clone()];
                v.extend(args.iter().cloned());
                v
            }
            Link::Context { context, inner } => vec![context.clone(), inner.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revise_confidence_never_decreases() {
        let a = TruthValue::new(0.9, 0.2);
        let b = TruthValue::new(0.1, 0.8);
        let r = TruthValue::revise(a, b);
        assert!(r.confidence >= a.confidence.max(b.confidence));
        assert!(r.confidence <= 0.99);
    }

    #[test]
    fn revise_pulls_toward_higher_confidence() {
        let a = TruthValue::new(0.2, 0.1);
        let b = TruthValue::new(0.8, 0.9);
        let r = TruthValue::revise(a, b);
        assert!(r.strength > a.strength && r.strength < b.strength);
        // closer to b
        assert!((r.strength - b.strength).abs() < (r.strength - a.strength).abs());
    }

    #[test]
    fn revise_zero_confidence_yields_default() {
        let a = TruthValue::new(0.9, 0.0);
        let b = TruthValue::new(0.1, 0.0);
        let r = TruthValue::revise(a, b);
        assert_eq!(r, TruthValue::default_tv());
    }
}
