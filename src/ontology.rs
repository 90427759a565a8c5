//! A small bundled example ontology (biological taxonomy) used by the REPL
//! and by tests that want a pre-grounded space. The boot-ritual seed data
//! and per-topic domain packs are external collaborators (spec §1); this is
//! just the teacher's original seed set, kept as a convenience fixture.

use crate::atom::{AtomKind, Link, TruthValue};
use crate::atomspace::AtomSpace;

pub fn load_base_ontology(space: &mut AtomSpace) -> usize {
    let initial = space.atom_count();

    let concepts: &[(&str, f64, f64)] = &[
        ("thing", 0.99, 0.99),
        ("living-thing", 0.95, 0.95),
        ("non-living", 0.95, 0.95),
        ("animal", 0.95, 0.90),
        ("plant", 0.95, 0.90),
        ("mammal", 0.95, 0.90),
        ("fish", 0.95, 0.90),
        ("bird", 0.95, 0.90),
        ("vegetable", 0.95, 0.90),
        ("cat", 0.90, 0.85),
        ("dog", 0.90, 0.85),
        ("eagle", 0.90, 0.85),
        ("salmon", 0.90, 0.85),
        ("tree", 0.90, 0.85),
        ("flower", 0.90, 0.85),
        ("cucumber", 0.90, 0.85),
    ];
    for &(name, s, c) in concepts {
        space.add_atom(AtomKind::Concept, name, Some(TruthValue::new(s, c))).unwrap();
    }

    let predicates: &[(&str, f64, f64)] = &[("afraid-of", 0.80, 0.70)];
    for &(name, s, c) in predicates {
        space.add_atom(AtomKind::Predicate, name, Some(TruthValue::new(s, c))).unwrap();
    }

    let links: &[(&str, &str, f64, f64)] = &[
        ("living-thing", "thing", 0.99, 0.95),
        ("non-living", "thing", 0.99, 0.95),
        ("animal", "living-thing", 0.99, 0.95),
        ("plant", "living-thing", 0.99, 0.95),
        ("mammal", "animal", 0.95, 0.90),
        ("fish", "animal", 0.95, 0.90),
        ("bird", "animal", 0.95, 0.90),
        ("vegetable", "plant", 0.95, 0.90),
        ("cat", "mammal", 0.95, 0.90),
        ("dog", "mammal", 0.95, 0.90),
        ("eagle", "bird", 0.95, 0.90),
        ("salmon", "fish", 0.95, 0.90),
        ("tree", "plant", 0.95, 0.90),
        ("flower", "plant", 0.95, 0.90),
        ("cucumber", "vegetable", 0.90, 0.85),
    ];
    for &(src, tgt, s, c) in links {
        space.add_link(
            Link::Inheritance {
                source: (AtomKind::Concept, src.to_string()),
                target: (AtomKind::Concept, tgt.to_string()),
                tv: TruthValue::new(s, c),
            },
            None,
        );
    }

    space.atom_count() - initial
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_nonempty_ontology() {
        let mut space = AtomSpace::new();
        let loaded = load_base_ontology(&mut space);
        assert!(loaded > 10);
        assert!(space.get_concept("cat").is_some());
    }
}
