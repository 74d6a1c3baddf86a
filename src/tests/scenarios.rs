use crate::vote::ExistenceOutcome;
use crate::{
    CapabilityRegistry, ClusterOutcome, CombineError, Document, FinalMention, MentionBatch,
    MentionCombiner, RawMention,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn filler(len: usize) -> Document {
    Document::new("x".repeat(len), "en")
}

fn supporters(mention: &FinalMention) -> Vec<&str> {
    mention.supporters.iter().map(|id| id.as_str()).collect()
}

fn combine(registry: &CapabilityRegistry, doc: &Document, batch: &MentionBatch) -> Vec<FinalMention> {
    init_tracing();
    MentionCombiner::new(registry).combine(doc, batch).unwrap()
}

// ============ Single recognizer ============

#[test]
fn single_capable_recognizer() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["PERSON"], &["en"])
        .build()
        .unwrap();
    let doc = Document::new("Alice", "en");
    let batch = MentionBatch::new().with(RawMention::new("R1", "PERSON", 0, 5, "Alice"));

    let mentions = combine(&registry, &doc, &batch);
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].entity_type.as_str(), "PERSON");
    assert_eq!(mentions[0].span(), (0, 5));
    assert_eq!(supporters(&mentions[0]), vec!["R1"]);
}

#[test]
fn zero_electors_presence_stands() {
    // nobody declares PERSON, so no existence vote can be held
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["DATE"], &["en"])
        .recognizer("R2", &["DATE"], &["en"])
        .build()
        .unwrap();
    let doc = Document::new("Alice", "en");
    let batch = MentionBatch::new().with(RawMention::new("R1", "PERSON", 0, 5, "Alice"));

    let (mentions, report) = MentionCombiner::new(&registry)
        .combine_with_report(&doc, &batch)
        .unwrap();
    assert_eq!(report.clusters[0].existence, ExistenceOutcome::Unopposed);
    assert_eq!(mentions.len(), 1);
    assert_eq!(supporters(&mentions[0]), vec!["R1"]);
}

// ============ Type vote ============

#[test]
fn three_recognizer_type_vote() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["LOCATION"], &["en"])
        .recognizer("R2", &["LOCATION"], &["en"])
        .recognizer("R3", &["ORGANIZATION"], &["en"])
        .build()
        .unwrap();
    let doc = filler(30);
    let batch = MentionBatch::new()
        .with(RawMention::new("R1", "LOCATION", 10, 20, ""))
        .with(RawMention::new("R2", "LOCATION", 10, 20, ""))
        .with(RawMention::new("R3", "ORGANIZATION", 10, 20, ""));

    let mentions = combine(&registry, &doc, &batch);
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].entity_type.as_str(), "LOCATION");
    assert_eq!(mentions[0].span(), (10, 20));
    assert_eq!(supporters(&mentions[0]), vec!["R1", "R2"]);
}

// ============ Position vote ============

#[test]
fn position_tie_prefers_inclusive_end() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["LOCATION"], &["en"])
        .recognizer("R2", &["LOCATION"], &["en"])
        .build()
        .unwrap();
    let doc = filler(30);
    let batch = MentionBatch::new()
        .with(RawMention::new("R1", "LOCATION", 10, 20, ""))
        .with(RawMention::new("R2", "LOCATION", 10, 22, ""));

    let mentions = combine(&registry, &doc, &batch);
    assert_eq!(mentions[0].span(), (10, 22));
    assert_eq!(mentions[0].text.chars().count(), 12);
}

// ============ Existence vote ============

#[test]
fn lone_date_rejected() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["DATE"], &["en"])
        .recognizer("R2", &["DATE"], &["en"])
        .recognizer("R3", &["DATE"], &["en"])
        .recognizer("R4", &["DATE"], &["en"])
        .build()
        .unwrap();
    let doc = filler(20);
    let mut batch = MentionBatch::new().with(RawMention::new("R1", "DATE", 5, 9, ""));
    for id in ["R2", "R3", "R4"] {
        batch.insert(id, Vec::new());
    }

    let (mentions, report) = MentionCombiner::new(&registry)
        .combine_with_report(&doc, &batch)
        .unwrap();
    assert!(mentions.is_empty());
    assert_eq!(
        report.clusters[0].outcome,
        ClusterOutcome::Rejected { yes: 1, eligible: 4 }
    );
}

#[test]
fn wrong_language_recognizers_do_not_vote() {
    let registry = CapabilityRegistry::builder()
        .recognizer("pt-dates", &["DATE"], &["pt"])
        .recognizer("en-dates-1", &["DATE"], &["en"])
        .recognizer("en-dates-2", &["DATE"], &["en"])
        .recognizer("en-dates-3", &["DATE"], &["en"])
        .build()
        .unwrap();
    let doc = Document::new("em 5 de maio", "pt");
    let batch = MentionBatch::new().with(RawMention::new("pt-dates", "DATE", 3, 12, "5 de maio"));

    let mentions = combine(&registry, &doc, &batch);
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].text, "5 de maio");
}

// ============ Whole documents ============

pub(super) fn newsroom_registry() -> CapabilityRegistry {
    CapabilityRegistry::builder()
        .recognizer("stat-ner", &["PERSON", "LOCATION", "ORGANIZATION"], &["en"])
        .recognizer("gazetteer", &["LOCATION"], &["en"])
        .recognizer("date-tagger", &["DATE"], &["en"])
        .recognizer("rule-ner", &["PERSON", "DATE"], &["en"])
        .build()
        .unwrap()
}

pub(super) fn newsroom_input() -> (Document, MentionBatch) {
    let doc = Document::new("Alice met Bob at Lisbon Harbour on 2024-05-01.", "en");
    let mut batch = MentionBatch::new();
    batch.insert(
        "stat-ner",
        vec![
            RawMention::new("stat-ner", "PERSON", 0, 5, "Alice"),
            RawMention::new("stat-ner", "PERSON", 10, 13, "Bob"),
            RawMention::new("stat-ner", "ORGANIZATION", 17, 31, "Lisbon Harbour"),
        ],
    );
    batch.insert(
        "gazetteer",
        vec![RawMention::new("gazetteer", "LOCATION", 17, 23, "Lisbon")],
    );
    batch.insert(
        "rule-ner",
        vec![
            RawMention::new("rule-ner", "PERSON", 0, 5, "Alice"),
            RawMention::new("rule-ner", "DATE", 35, 45, "2024-05-01"),
        ],
    );
    batch.insert(
        "date-tagger",
        vec![RawMention::new("date-tagger", "DATE", 35, 45, "2024-05-01")],
    );
    (doc, batch)
}

#[test]
fn newsroom_document() {
    let registry = newsroom_registry();
    let (doc, batch) = newsroom_input();

    let (mentions, report) = MentionCombiner::new(&registry)
        .combine_with_report(&doc, &batch)
        .unwrap();

    let summary: Vec<(&str, &str, Vec<&str>)> = mentions
        .iter()
        .map(|m| (m.entity_type.as_str(), m.text.as_str(), supporters(m)))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("PERSON", "Alice", vec!["rule-ner", "stat-ner"]),
            // 1-1 type tie goes to LOCATION, declared before ORGANIZATION
            ("LOCATION", "Lisbon", vec!["gazetteer"]),
            ("DATE", "2024-05-01", vec!["date-tagger", "rule-ner"]),
        ]
    );

    assert_eq!(report.clusters.len(), 4);
    assert_eq!(report.rejected(), 1);
    assert_eq!(report.clusters[1].span, (10, 13));
    assert!(report.degenerate.is_empty());
}

#[test]
fn bridging_mention_yields_one_entity() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["PERSON"], &["en"])
        .recognizer("R2", &["PERSON"], &["en"])
        .build()
        .unwrap();
    let doc = Document::new("Mary Ann Smith", "en");
    let batch = MentionBatch::new()
        .with(RawMention::new("R1", "PERSON", 0, 4, "Mary"))
        .with(RawMention::new("R1", "PERSON", 9, 14, "Smith"))
        .with(RawMention::new("R2", "PERSON", 0, 14, "Mary Ann Smith"));

    let (mentions, report) = MentionCombiner::new(&registry)
        .combine_with_report(&doc, &batch)
        .unwrap();
    assert_eq!(report.clusters.len(), 1);
    assert_eq!(mentions.len(), 1);
    // start 0 has two ballots, end 14 has two ballots
    assert_eq!(mentions[0].text, "Mary Ann Smith");
    assert_eq!(supporters(&mentions[0]), vec!["R1", "R2"]);
}

#[test]
fn bridge_over_disjoint_mentions_elects_middle_offsets() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["PERSON"], &["en"])
        .recognizer("R2", &["PERSON"], &["en"])
        .build()
        .unwrap();
    let doc = Document::new("Mary Ann Smith", "en");
    let batch = MentionBatch::new()
        .with(RawMention::new("R1", "PERSON", 0, 4, "Mary"))
        .with(RawMention::new("R1", "PERSON", 9, 14, "Smith"))
        .with(RawMention::new("R2", "PERSON", 2, 11, "ry Ann Sm"));

    let mentions = combine(&registry, &doc, &batch);
    assert_eq!(mentions.len(), 1);
    // every offset has one ballot; least total deviation picks 2 and 11,
    // so the elected span cuts through both names
    assert_eq!(mentions[0].span(), (2, 11));
    assert_eq!(mentions[0].text, "ry Ann Sm");
    assert_eq!(supporters(&mentions[0]), vec!["R1", "R2"]);
}

#[test]
fn mention_under_foreign_key_is_checked() {
    let registry = CapabilityRegistry::builder()
        .recognizer("R1", &["PERSON"], &["en"])
        .build()
        .unwrap();
    let doc = filler(10);
    let mut batch = MentionBatch::new();
    batch.insert("R1", vec![RawMention::new("R9", "PERSON", 0, 3, "")]);

    let err = MentionCombiner::new(&registry).combine(&doc, &batch).unwrap_err();
    assert_eq!(err, CombineError::UnknownRecognizer { id: "R9".into() });
}

#[test]
fn sequential_matches_parallel() {
    let registry = newsroom_registry();
    let (doc, batch) = newsroom_input();

    let parallel = MentionCombiner::new(&registry).parallel().combine_with_report(&doc, &batch);
    let sequential = MentionCombiner::new(&registry).sequential().combine_with_report(&doc, &batch);
    assert_eq!(parallel, sequential);
}
