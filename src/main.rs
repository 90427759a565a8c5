use std::io::{self, BufRead, Write};

use coggy::atom::{AtomKind, LinkVariant};
use coggy::config::BankConfig;
use coggy::{AttentionBank, AtomSpace, Pipeline};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut space = AtomSpace::new();
    let mut bank = AttentionBank::new(BankConfig::default());
    let mut pipeline = Pipeline::new();

    let loaded = coggy::ontology::load_base_ontology(&mut space);

    println!("\u{25c8} COGGY \u{2014} inspectable reasoning harness");
    println!("  {} atoms loaded from base ontology.", loaded);
    println!("  AtomSpace: {} atoms, {} links", space.atom_count(), space.link_count());
    println!();
    println!("Commands:");
    println!("  <text>        \u{2014} run one pipeline turn on input");
    println!("  :atoms        \u{2014} show all atoms");
    println!("  :focus        \u{2014} show attention focus (top STI)");
    println!("  :types        \u{2014} show atom/link type counts");
    println!("  :help         \u{2014} show this help");
    println!("  :quit         \u{2014} exit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("coggy [{}]> ", pipeline.metrics().turns);
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" | ":exit" => break,
            ":help" | ":h" => print_help(),
            ":atoms" | ":a" => print_atoms(&space),
            ":focus" | ":f" => print_focus(&space, &bank),
            ":types" | ":t" => print_types(&space),
            input => {
                let report = pipeline.process(&mut space, &mut bank, input);
                print_report(&report);
            }
        }
    }

    println!(
        "Coggy shutting down. {} atoms, {} links after {} turns.",
        space.atom_count(),
        space.link_count(),
        pipeline.metrics().turns
    );
}

fn print_report(report: &coggy::Report) {
    println!("\u{2500}\u{2500} COGGY REPORT \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}");
    match &report.semantic {
        Some(s) => println!(
            "\u{2502} concepts: {:?}  relations: {}",
            s.concepts,
            s.relations.len()
        ),
        None => println!("\u{2502} no semantic block extracted"),
    }
    println!(
        "\u{2502} grounding: concepts {:.2}  relations {:.2}",
        report.concept_grounding.rate, report.relation_grounding.rate
    );
    println!("\u{2502} diagnosis: {:?}", report.diagnosis.kind());
    if let Some(rescue) = &report.rescue {
        println!("\u{2502} rescue: {}", rescue.summary);
    }
    if report.should_add_suffix {
        println!("\u{2502} (next prompt should carry the semantic-suffix reminder)");
    }
    println!("\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}");
}

fn print_atoms(space: &AtomSpace) {
    println!("\u{2295} ATOMS ({} total)", space.atom_count());
    for kind in [AtomKind::Concept, AtomKind::Predicate, AtomKind::Variable] {
        for atom in space.get_atoms_by_kind(kind) {
            println!("  {:?}:{} {}", atom.kind, atom.name, atom.tv);
        }
    }
}

fn print_focus(space: &AtomSpace, bank: &AttentionBank) {
    println!("\u{2605} FOCUS (top STI atoms)");
    let focus = bank.focus_atoms();
    if focus.is_empty() {
        println!("  (no atoms with STI > 0)");
        return;
    }
    for (key, sti) in focus {
        let tv = space
            .get_atom(key.0, &key.1)
            .map(|a| a.tv.to_string())
            .unwrap_or_default();
        println!("  \u{2605} {}:{} STI={:.1} ({})", key.0, key.1, sti, tv);
    }
}

fn print_types(space: &AtomSpace) {
    println!("Atom kinds:");
    let stats = space.stats();
    for (kind, count) in &stats.atom_counts {
        println!("  {kind:?}: {count}");
    }
    println!("Link variants:");
    for variant in [
        LinkVariant::Inheritance,
        LinkVariant::Implication,
        LinkVariant::Similarity,
        LinkVariant::Evaluation,
        LinkVariant::Context,
    ] {
        let count = space.links_by_variant(variant).len();
        if count > 0 {
            println!("  {variant}: {count}");
        }
    }
}

fn print_help() {
    println!("\u{25c8} Coggy \u{2014} inspectable reasoning harness");
    println!();
    println!("Feed it text; if it carries a fenced `semantic` block (or bare");
    println!("brace expression), the pipeline extracts, normalizes, grounds,");
    println!("and commits it, then reports a diagnosis and, if one fired, a");
    println!("rescue summary.");
    println!();
    println!("Commands:");
    println!("  :atoms   \u{2014} show all atoms");
    println!("  :focus   \u{2014} show attention focus (top STI)");
    println!("  :types   \u{2014} show kind/variant counts");
    println!("  :quit    \u{2014} exit");
}
