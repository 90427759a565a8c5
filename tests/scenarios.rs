//! Integration-style scenario tests (spec §8 S1–S6), run against the crate's
//! public surface the way a producer embedding Coggy actually would.

use pretty_assertions::assert_eq;

use coggy::atom::{AtomKind, Link, TruthValue};
use coggy::config::BankConfig;
use coggy::{AtomSpace, AttentionBank, DiagnosisKind, Pipeline};

fn fresh() -> (AtomSpace, AttentionBank, Pipeline) {
    (
        AtomSpace::new(),
        AttentionBank::new(BankConfig::default()),
        Pipeline::new(),
    )
}

/// Scenario S1: a fresh space grounds nothing on the first turn, and with
/// only one observation on the rolling window, no rescue fires yet.
#[test]
fn s1_fresh_space_grounding_vacuum_no_rescue_yet() {
    let (mut space, mut bank, mut pipeline) = fresh();
    let text = "here is my answer\n```semantic\n{concepts: [\"coggy\", \"reasoning\"], relations: [{type: inherits, a: \"coggy\", b: \"reasoning\"}], confidence: 0.8}\n```";
    let report = pipeline.process(&mut space, &mut bank, text);
    assert_eq!(report.concept_grounding.rate, 0.0);
    assert_eq!(report.diagnosis.kind(), DiagnosisKind::GroundingVacuum);
    assert!(report.rescue.is_none());
}

/// Scenario S2: a second turn whose concepts are still ungrounded pushes the
/// rolling grounding-rate window to two zeros, which triggers the rescue.
/// Reusing S1's own concepts would not do this: `commit` (spec §4.3.4 step 1)
/// asserts `coggy`/`reasoning` into the space on turn 1, so a repeat of the
/// same text would already find them grounded on turn 2. The scenario needs
/// a turn whose concepts stay novel, not a literal repeat.
#[test]
fn s2_second_ungrounded_turn_triggers_grounding_vacuum_rescue() {
    let (mut space, mut bank, mut pipeline) = fresh();
    let turn1 = "here is my answer\n```semantic\n{concepts: [\"coggy\", \"reasoning\"], relations: [{type: inherits, a: \"coggy\", b: \"reasoning\"}], confidence: 0.8}\n```";
    let turn2 = "and another thought\n```semantic\n{concepts: [\"alpha\", \"beta\"], relations: [{type: inherits, a: \"alpha\", b: \"beta\"}], confidence: 0.8}\n```";
    pipeline.process(&mut space, &mut bank, turn1);
    let report = pipeline.process(&mut space, &mut bank, turn2);
    assert_eq!(report.concept_grounding.rate, 0.0);
    assert_eq!(report.diagnosis.kind(), DiagnosisKind::GroundingVacuum);
    assert!(report.rescue.is_some());
    assert_eq!(pipeline.metrics().vacuum_triggers, 1);
    assert!(space.atom_count() >= 10);
}

/// Scenario S3: pre-seeded space, empty relations, healthy diagnosis.
#[test]
fn s3_preseeded_space_is_healthy() {
    let (mut space, mut bank, mut pipeline) = fresh();
    space.add_atom(AtomKind::Concept, "dog", Some(TruthValue::new(0.9, 0.8))).unwrap();
    space.add_atom(AtomKind::Concept, "cat", Some(TruthValue::new(0.9, 0.8))).unwrap();
    space.add_atom(AtomKind::Concept, "animal", Some(TruthValue::new(0.9, 0.8))).unwrap();
    space.add_link(
        Link::Inheritance {
            source: (AtomKind::Concept, "dog".into()),
            target: (AtomKind::Concept, "animal".into()),
            tv: TruthValue::new(0.9, 0.8),
        },
        None,
    );
    space.add_link(
        Link::Inheritance {
            source: (AtomKind::Concept, "cat".into()),
            target: (AtomKind::Concept, "animal".into()),
            tv: TruthValue::new(0.9, 0.8),
        },
        None,
    );
    let text = "```semantic\n{concepts: [\"dog\", \"cat\"], relations: [], confidence: 0.7}\n```";
    let report = pipeline.process(&mut space, &mut bank, text);
    assert_eq!(report.concept_grounding.rate, 1.0);
    assert_eq!(report.diagnosis.kind(), DiagnosisKind::Healthy);
}

/// Scenario S4: plain prose with no semantic block uses the fallback.
#[test]
fn s4_plain_prose_uses_fallback() {
    let (mut space, mut bank, mut pipeline) = fresh();
    let report = pipeline.process(&mut space, &mut bank, "the quick brown fox jumps");
    assert!(report.semantic.is_some());
    assert!(matches!(
        report.diagnosis.kind(),
        DiagnosisKind::GroundingVacuum | DiagnosisKind::Healthy
    ));
}

/// Scenario S5: a drained fund pool surfaces budget-exhausted. `diagnose`
/// reads `bank.sti_funds()` after `commit`'s own decay has already run
/// (spec §4.3.4 step 5 precedes the diagnosis step), so the drain has to
/// survive that reclaim. Draining a single atom past the STI clamp
/// (`config::STI_MAX`) doesn't work: the clamped mass is gone and `decay`
/// can only reclaim what's actually sitting on an atom, so the fund pool
/// recovers past the threshold. Spreading the same total drain across many
/// atoms, each well under the clamp, keeps the mass reclaimable but still
/// leaves the pool deeply negative after the partial reclaim.
#[test]
fn s5_drained_funds_trigger_budget_exhausted() {
    let (mut space, mut bank, mut pipeline) = fresh();
    space.add_atom(AtomKind::Concept, "dog", Some(TruthValue::new(0.9, 0.8))).unwrap();
    for i in 0..20 {
        let filler = (AtomKind::Concept, format!("filler-{i}"));
        bank.stimulate(&filler, 50.0);
    }
    assert!(bank.sti_funds() < coggy::config::BUDGET_EXHAUSTED_THRESHOLD);

    let text = "```semantic\n{concepts: [\"dog\"], relations: [], confidence: 0.7}\n```";
    let report = pipeline.process(&mut space, &mut bank, text);
    assert!(bank.sti_funds() < coggy::config::BUDGET_EXHAUSTED_THRESHOLD);
    assert_eq!(report.diagnosis.kind(), DiagnosisKind::BudgetExhausted);
}

/// Scenario S6: dedup + self-loop dropping during normalization.
#[test]
fn s6_dedup_and_self_loop_drop() {
    let (mut space, mut bank, mut pipeline) = fresh();
    let text = "```semantic\n{concepts: [\"alpha\", \"alpha\", \"Alphas\"], relations: [{type: inherits, a: \"alpha\", b: \"alpha\"}]}\n```";
    let report = pipeline.process(&mut space, &mut bank, text);
    let semantic = report.semantic.unwrap();
    assert_eq!(semantic.concepts, vec!["alpha"]);
    assert!(semantic.relations.is_empty());
    assert_eq!(space.atom_count(), 1);
    assert_eq!(space.link_count(), 0);
}
