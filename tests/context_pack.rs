//! End-to-end context pack assembly over a seeded graph.

use helios_atlas::{Atlas, AtlasError, Edge, GraphSeed, Node, NodeId, PackQuery, Summary};

const CORPUS_SEED: &str = r#"
name: helios-core
nodes:
  - id: atom:email-format-validator
    node_type: atom
    attributes:
      language: rust
    summary:
      macro: Email validator used in authentication
      meso: Parses RFC 5322 strings into {valid, error}
      micro: "fn validate_email(email: &str) -> Verdict"
      invariants: [deterministic, null_safety]
  - id: atom:intent-spec-checker
    node_type: atom
    summary:
      macro: Key-presence validator for intent spec files
      invariants: [deterministic]
  - id: test:property/email_unicode_fuzz
    node_type: test
    summary:
      macro: Property-based fuzz for unicode emails
      micro: cargo test email_unicode_fuzz
  - id: test:golden/spec_fixtures
    node_type: test
edges:
  - source: test:property/email_unicode_fuzz
    target: atom:email-format-validator
    edge_type: validates
  - source: test:golden/spec_fixtures
    target: atom:intent-spec-checker
    edge_type: validates
  - source: atom:intent-spec-checker
    target: atom:email-format-validator
    edge_type: refines
"#;

fn corpus() -> Atlas {
    let seed: GraphSeed = serde_yaml::from_str(CORPUS_SEED).expect("corpus seed parses");
    seed.build().expect("corpus seed builds")
}

#[test]
fn pack_over_seeded_corpus() {
    let atlas = corpus();
    let pack = PackQuery::new(["atom:email-format-validator", "atom:intent-spec-checker"])
        .with_target_tokens(4096)
        .with_capsule("corpus-run")
        .assemble(&atlas)
        .expect("pack assembles");

    // Parallel lists in focus order
    let focus: Vec<&str> = pack
        .contents
        .macro_outline
        .iter()
        .map(|e| e.node.as_str())
        .collect();
    assert_eq!(focus, vec!["atom:email-format-validator", "atom:intent-spec-checker"]);

    // One validator each, in focus order
    let tests: Vec<&str> = pack
        .contents
        .related_tests
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(
        tests,
        vec!["test:property/email_unicode_fuzz", "test:golden/spec_fixtures"]
    );

    // The checker's neighbor types: validator atom only (outgoing edge)
    assert_eq!(pack.contents.meso_details[1].neighbors, vec!["atom"]);
    // The validator has no outgoing edges
    assert!(pack.contents.meso_details[0].neighbors.is_empty());

    // Invariant union, deduplicated across both atoms, sorted
    assert_eq!(pack.contents.invariants, vec!["deterministic", "null_safety"]);
}

#[test]
fn refines_edges_do_not_count_as_tests() {
    let atlas = corpus();
    // intent-spec-checker refines the validator, but only "validates" edges
    // feed related_tests
    let pack = PackQuery::new(["atom:email-format-validator"])
        .assemble(&atlas)
        .unwrap();

    let tests: Vec<&str> = pack
        .contents
        .related_tests
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(tests, vec!["test:property/email_unicode_fuzz"]);
}

#[test]
fn edge_overwrite_is_visible_to_packs() {
    let mut atlas = corpus();
    // Re-typing the validates edge removes the node from related_tests
    atlas
        .add_edge(Edge::new(
            "test:golden/spec_fixtures",
            "atom:intent-spec-checker",
            "observes",
        ))
        .unwrap();

    let pack = PackQuery::new(["atom:intent-spec-checker"])
        .assemble(&atlas)
        .unwrap();
    assert!(pack.contents.related_tests.is_empty());
    // Still exactly one edge for the pair
    assert_eq!(
        atlas
            .edge_between(
                &NodeId::from("test:golden/spec_fixtures"),
                &NodeId::from("atom:intent-spec-checker"),
            )
            .map(|e| e.edge_type.as_str()),
        Some("observes")
    );
}

#[test]
fn failed_pack_leaves_no_trace() {
    let atlas = corpus();
    let before = serde_json::to_value(
        PackQuery::new(["atom:email-format-validator"])
            .assemble(&atlas)
            .unwrap(),
    )
    .unwrap();

    let err = PackQuery::new(["atom:email-format-validator", "atom:missing"])
        .assemble(&atlas)
        .unwrap_err();
    assert!(matches!(err, AtlasError::NodeNotFound(_)));

    // The failed call changed nothing observable
    let after = serde_json::to_value(
        PackQuery::new(["atom:email-format-validator"])
            .assemble(&atlas)
            .unwrap(),
    )
    .unwrap();
    assert_eq!(before, after);
}

#[test]
fn incremental_growth_is_reflected() {
    let mut atlas = corpus();
    atlas
        .add_node(
            Node::new("test:bench/email_throughput", "test")
                .with_summary(Summary::new().with_macro("Throughput benchmark")),
        )
        .unwrap();
    atlas
        .add_edge(Edge::new(
            "test:bench/email_throughput",
            "atom:email-format-validator",
            "validates",
        ))
        .unwrap();

    let pack = PackQuery::new(["atom:email-format-validator"])
        .assemble(&atlas)
        .unwrap();
    let tests: Vec<&str> = pack
        .contents
        .related_tests
        .iter()
        .map(|id| id.as_str())
        .collect();
    // Edge scan order: insertion order
    assert_eq!(
        tests,
        vec!["test:property/email_unicode_fuzz", "test:bench/email_throughput"]
    );
}
