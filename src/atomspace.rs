//! The atomspace: a typed hypergraph with content-addressed link identity
//! and PLN truth-value revision on re-assertion (spec §3–§4.1).

use std::collections::HashMap;

use crate::atom::{Atom, AtomKey, AtomKind, Link, LinkVariant, TruthValue};
use crate::error::{CoreError, CoreResult};

/// Deterministic FNV-1a hash over bytes. Spelled out explicitly (rather than
/// leaning on `std::collections::hash_map::DefaultHasher`, whose output is
/// not part of any stability contract) so the link-key function is a fixed,
/// language-independent recipe: variant tag, then canonical endpoint names,
/// with `Similarity`'s pair sorted first.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn canon(key: &AtomKey) -> String {
    format!("{}:{}", key.0, key.1)
}

/// Content identity of a link (spec §3 "Link key"): a hash of the variant
/// tag and the canonical names of its endpoints, unordered variants sorted
/// before hashing.
pub fn link_key(link: &Link) -> u64 {
    let mut parts = vec![link.variant().to_string()];
    match link {
        Link::Similarity { first, second, .. } => {
            let mut pair = [canon(first), canon(second)];
            pair.sort();
            parts.extend(pair);
        }
        Link::Inheritance { source, target, .. } => {
            parts.push(canon(source));
            parts.push(canon(target));
        }
        Link::Implication {
            antecedent,
            consequent,
            ..
        } => {
            parts.push(canon(antecedent));
            parts.push(canon(consequent));
        }
        Link::Evaluation { predicate, args, .. } => {
            parts.push(canon(predicate));
            parts.extend(args.iter().map(canon));
        }
        Link::Context { context, inner } => {
            parts.push(canon(context));
            parts.push(canon(inner));
        }
    }
    fnv1a(parts.join("\u{1}").as_bytes())
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub atom_counts: HashMap<AtomKind, usize>,
    pub link_counts: HashMap<LinkVariant, usize>,
    pub mutation_counter: u64,
}

#[derive(Debug, Clone)]
pub struct InvariantReport {
    pub checks: Vec<(&'static str, bool, Option<String>)>,
}

impl InvariantReport {
    pub fn all_healthy(&self) -> bool {
        self.checks.iter().all(|(_, ok, _)| *ok)
    }
}

/// The typed hypergraph. Atoms keyed by `(kind, name)`, links keyed by their
/// content hash; both indexed by insertion order for deterministic queries.
pub struct AtomSpace {
    atoms: HashMap<AtomKey, Atom>,
    kind_index: HashMap<AtomKind, Vec<String>>,
    links: HashMap<u64, Link>,
    variant_index: HashMap<LinkVariant, Vec<u64>>,
    mutation_counter: u64,
}

impl AtomSpace {
    pub fn new() -> Self {
        Self {
            atoms: HashMap::new(),
            kind_index: HashMap::new(),
            links: HashMap::new(),
            variant_index: HashMap::new(),
            mutation_counter: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.atoms.len() + self.links.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn mutation_counter(&self) -> u64 {
        self.mutation_counter
    }

    /// Assert an atom. Re-asserting the same `(kind, name)` revises the
    /// stored truth value rather than creating a duplicate (spec §4.1).
    pub fn add_atom(
        &mut self,
        kind: AtomKind,
        name: &str,
        tv: Option<TruthValue>,
    ) -> CoreResult<Atom> {
        if !valid_name(name) {
            return Err(CoreError::InvalidArgument(name.to_string()));
        }
        let key = (kind, name.to_string());
        if let Some(existing) = self.atoms.get_mut(&key) {
            if let Some(incoming) = tv {
                existing.tv = TruthValue::revise(existing.tv, incoming);
            }
            self.mutation_counter += 1;
            return Ok(existing.clone());
        }
        let atom = Atom {
            kind,
            name: name.to_string(),
            tv: tv.unwrap_or_else(TruthValue::default_tv),
        };
        self.atoms.insert(key, atom.clone());
        self.kind_index.entry(kind).or_default().push(atom.name.clone());
        self.mutation_counter += 1;
        Ok(atom)
    }

    /// Assert a link. Re-asserting a link sharing an existing link-key
    /// revises its truth value (spec §4.1); endpoints need not already
    /// exist as atoms (permissive per spec §9 open question).
    pub fn add_link(&mut self, link: Link, tv: Option<TruthValue>) -> Link {
        let key = link_key(&link);
        let variant = link.variant();
        if let Some(existing) = self.links.get_mut(&key) {
            if let Some(incoming) = tv {
                existing.revise_tv(incoming);
            }
            self.mutation_counter += 1;
            return existing.clone();
        }
        let mut stored = link;
        if let Some(incoming) = tv {
            stored.revise_tv(incoming);
        }
        self.links.insert(key, stored.clone());
        self.variant_index.entry(variant).or_default().push(key);
        self.mutation_counter += 1;
        stored
    }

    pub fn get_atom(&self, kind: AtomKind, name: &str) -> Option<&Atom> {
        self.atoms.get(&(kind, name.to_string()))
    }

    pub fn get_concept(&self, name: &str) -> Option<&Atom> {
        self.get_atom(AtomKind::Concept, name)
    }

    pub fn get_atoms_by_kind(&self, kind: AtomKind) -> Vec<&Atom> {
        self.kind_index
            .get(&kind)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|n| self.atoms.get(&(kind, n.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_links<P>(&self, predicate: P) -> Vec<&Link>
    where
        P: Fn(&Link) -> bool,
    {
        self.links.values().filter(|l| predicate(l)).collect()
    }

    pub fn links_by_variant(&self, variant: LinkVariant) -> Vec<&Link> {
        self.variant_index
            .get(&variant)
            .map(|keys| keys.iter().filter_map(|k| self.links.get(k)).collect())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> Stats {
        let mut atom_counts = HashMap::new();
        for atom in self.atoms.values() {
            *atom_counts.entry(atom.kind).or_insert(0) += 1;
        }
        let mut link_counts = HashMap::new();
        for link in self.links.values() {
            *link_counts.entry(link.variant()).or_insert(0) += 1;
        }
        Stats {
            atom_counts,
            link_counts,
            mutation_counter: self.mutation_counter,
        }
    }

    /// Structural sanity checks over the invariants of spec §3. Generalizes
    /// the teacher's self-repair diagnostics into a reusable assertion the
    /// test suite and the rescue machinery can both call.
    pub fn invariant_report(&self) -> InvariantReport {
        let mut checks = Vec::new();

        let invalid_atom_tvs = self.atoms.values().filter(|a| !a.tv.is_valid()).count();
        checks.push((
            "atom-tvs-valid",
            invalid_atom_tvs == 0,
            (invalid_atom_tvs > 0).then(|| format!("{invalid_atom_tvs} invalid")),
        ));

        let invalid_link_tvs = self
            .links
            .values()
            .filter(|l| l.tv().is_some_and(|tv| !tv.is_valid()))
            .count();
        checks.push((
            "link-tvs-valid",
            invalid_link_tvs == 0,
            (invalid_link_tvs > 0).then(|| format!("{invalid_link_tvs} invalid")),
        ));

        let dup_keys = self.links.len() != {
            let mut keys: Vec<u64> = self.links.keys().copied().collect();
            keys.sort_unstable();
            keys.dedup();
            keys.len()
        };
        checks.push(("link-keys-unique", !dup_keys, None));

        InvariantReport { checks }
    }
}

impl Default for AtomSpace {
    fn default() -> Self {
        Self::new()
    }
}
