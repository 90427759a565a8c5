//! Name canonicalization: the fixed sequence of trim/fold, singularize,
//! typo-repair, and alias steps every concept and relation endpoint goes
//! through (spec §4.3.2).

use super::types::{Relation, Semantic};

/// Protocol words the pipeline uses internally for its own phase names;
/// never allowed to surface as concepts (spec §4.3.2).
const PROTOCOL_WORDS: &[&str] = &["parse", "ground", "attend", "infer", "reflect", "coggy-trace"];

/// Plural-looking terms that must NOT be singularized by the naive
/// trailing-`s` strip (spec §6).
const NO_STRIP_S: &[&str] = &[
    "bus", "analysis", "glass", "basis", "process", "focus", "status", "consensus", "atlas",
    "alias", "bias", "chaos", "cosmos", "ethos", "logos", "pathos", "thesis", "crisis",
    "diagnosis", "hypothesis", "emphasis", "synthesis", "corpus", "apparatus", "nexus",
];

/// `{synonym → canonical}`. Fixed configuration (spec §4.3.2).
const ALIASES: &[(&str, &str)] = &[
    ("inference", "reasoning"),
    ("simulator", "phantasm"),
    ("atomspace", "ontology"),
];

/// Canonicalize one concept name: fold, singularize, repair known typos,
/// apply the alias map. Idempotent: `normalize_name(normalize_name(x)) ==
/// normalize_name(x)` for every `x` (spec testable property 7) — singularize
/// and typo-repair are a matched pair that converge to a fixed point, and
/// the alias targets are never themselves alias sources.
pub fn normalize_name(raw: &str) -> String {
    let folded = fold(raw);
    let singular = singularize(&folded);
    let repaired = repair_typos(&singular);
    alias(&repaired)
}

fn fold(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

fn singularize(word: &str) -> String {
    if NO_STRIP_S.contains(&word) {
        return word.to_string();
    }
    if let Some(stripped) = word.strip_suffix('s') {
        if !stripped.is_empty() {
            return stripped.to_string();
        }
    }
    word.to_string()
}

fn repair_typos(word: &str) -> String {
    let mut out = word.to_string();
    if out.contains("-locu") && !out.contains("-locus") {
        out = out.replace("-locu", "-locus");
    }
    if out.contains("harnes") && !out.contains("harness") {
        out = out.replace("harnes", "harness");
    }
    out
}

fn alias(word: &str) -> String {
    ALIASES
        .iter()
        .find(|(syn, _)| *syn == word)
        .map(|(_, canon)| canon.to_string())
        .unwrap_or_else(|| word.to_string())
}

/// Normalize a relation's endpoints with the same function as concepts.
/// Returns `None` if the relation becomes a self-loop after normalization.
fn normalize_relation(rel: &Relation) -> Option<Relation> {
    let a = normalize_name(&rel.a);
    let b = normalize_name(&rel.b);
    if a == b {
        return None;
    }
    Some(Relation {
        rel_type: rel.rel_type.trim().to_lowercase(),
        a,
        b,
    })
}

/// Full semantic-block normalization (spec §4.3.2): concepts deduped,
/// protocol words removed, truncated to 7; relations normalized, self-loops
/// dropped, deduped, truncated to 5.
pub fn normalize_semantic(semantic: &Semantic) -> Semantic {
    let mut concepts = Vec::new();
    for c in &semantic.concepts {
        let n = normalize_name(c);
        if n.is_empty() || PROTOCOL_WORDS.contains(&n.as_str()) {
            continue;
        }
        if !concepts.contains(&n) {
            concepts.push(n);
        }
    }
    concepts.truncate(7);

    let mut relations = Vec::new();
    for r in &semantic.relations {
        if let Some(n) = normalize_relation(r) {
            if !relations.contains(&n) {
                relations.push(n);
            }
        }
    }
    relations.truncate(5);

    Semantic {
        concepts,
        relations,
        intent: semantic.intent.clone(),
        confidence: semantic.confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for word in [
            "cats",
            "analysis",
            "reasoning-harnes",
            "something-locu",
            "inference",
            "Cat-Person!",
        ] {
            let once = normalize_name(word);
            let twice = normalize_name(&once);
            assert_eq!(once, twice, "not idempotent for {word:?}");
        }
    }

    #[test]
    fn guarded_terms_keep_trailing_s() {
        assert_eq!(normalize_name("analysis"), "analysis");
        assert_eq!(normalize_name("focus"), "focus");
    }

    #[test]
    fn typo_repair_undoes_naive_oversingularization() {
        assert_eq!(normalize_name("harness"), "harness");
        assert_eq!(normalize_name("reasoning-locus"), "reasoning-locus");
    }

    #[test]
    fn alias_map_applies() {
        assert_eq!(normalize_name("inference"), "reasoning");
        assert_eq!(normalize_name("atomspace"), "ontology");
    }

    #[test]
    fn self_loop_relations_are_dropped() {
        let semantic = Semantic {
            concepts: vec!["alpha".into(), "alpha".into(), "Alphas".into()],
            relations: vec![Relation {
                rel_type: "inherits".into(),
                a: "alpha".into(),
                b: "alpha".into(),
            }],
            intent: None,
            confidence: None,
        };
        let n = normalize_semantic(&semantic);
        assert_eq!(n.concepts, vec!["alpha"]);
        assert!(n.relations.is_empty());
    }
}
