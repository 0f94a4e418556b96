//! Integration tests for the documentation checker.
//!
//! These tests run the checker against the declaration dumps in testdata/
//! and validate the emitted diagnostics.

use std::path::PathBuf;

use doccheck::diagnostics::Severity;
use doccheck::{
    run_doc_check, DeclTree, Diagnostic, DiagnosticEngine, DiagnosticKind, DocCheckMode,
    MarkupDocProvider,
};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn load(name: &str) -> DeclTree {
    DeclTree::load(&testdata_path().join(name)).expect("should load dump")
}

/// Run the checker over a fixture and return the rendered diagnostics.
fn run(name: &str, mode: DocCheckMode) -> Vec<Diagnostic> {
    let tree = load(name);
    let mut engine = DiagnosticEngine::new();
    run_doc_check(&tree, mode, &MarkupDocProvider::new(), &mut engine);
    engine.into_diagnostics()
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message()).collect()
}

#[test]
fn test_presence_reports_public_api_in_order() {
    let diagnostics = run("presence.json", DocCheckMode::PresenceOnly);

    assert_eq!(
        messages(&diagnostics),
        vec![
            "class 'C' does not have a documentation comment",
            "class method 'foo()' does not have a documentation comment",
            "struct 'S' does not have a documentation comment",
            "instance method 'foo()' does not have a documentation comment",
            "static method 'bar()' does not have a documentation comment",
            "subscript 'subscript(_:)' does not have a documentation comment",
            "enum 'E' does not have a documentation comment",
            "enum case 'one' does not have a documentation comment",
            "enum element 'one' does not have a documentation comment",
            "protocol 'P' does not have a documentation comment",
            "associated type 'Ty' does not have a documentation comment",
            "global function 'foo()' does not have a documentation comment",
            "type alias 'IInntt' does not have a documentation comment",
            "instance method 'inExt()' does not have a documentation comment",
            "global function 'spiFunc()' does not have a documentation comment",
        ]
    );

    assert!(diagnostics
        .iter()
        .all(|d| d.kind == DiagnosticKind::MissingDocComment && d.severity == Severity::Warning));
}

#[test]
fn test_presence_locations_point_at_declarations() {
    let diagnostics = run("presence.json", DocCheckMode::PresenceOnly);

    let first = &diagnostics[0];
    assert_eq!(first.loc.file, "presence.swift");
    assert_eq!((first.loc.line, first.loc.column), (10, 14));

    let lines: Vec<u32> = diagnostics.iter().map(|d| d.loc.line).collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted, "pre-order walk should follow source order");
}

#[test]
fn test_presence_skips_internal_and_underscored() {
    let diagnostics = run("presence.json", DocCheckMode::PresenceOnly);
    let rendered = messages(&diagnostics).join("\n");

    for hidden in [
        "InternalC",
        "InternalS",
        "InternalE",
        "InternalP",
        "internalFoo",
        "InternalInt",
        "_C",
        "_P",
        "_foo",
        "Inner",
        "fooWithUnderscoredParam",
        "deinit",
    ] {
        assert!(
            !rendered.contains(&format!("'{}", hidden)),
            "{} should not be diagnosed:\n{}",
            hidden,
            rendered
        );
    }
}

#[test]
fn test_consistency_on_presence_fixture_matches_presence() {
    // Nothing in the presence fixture is documented
    let presence = run("presence.json", DocCheckMode::PresenceOnly);
    let consistency = run("presence.json", DocCheckMode::Consistency);
    assert_eq!(presence, consistency);
}

#[test]
fn test_consistency_reports_undocumented_fields() {
    let diagnostics = run("consistency.json", DocCheckMode::Consistency);

    assert_eq!(
        messages(&diagnostics),
        vec![
            "global function 'f(x:y:)' does not have a description for parameter 'y'",
            "global function 'f(x:y:)' does not have a '- Returns:' description",
            "global function 'f(x:y:)' does not have a '- Throws:' description",
            "global function 'sum(_:_:_:)' does not have a description for parameter 'a'",
            "global function 'sum(_:_:_:)' does not have a description for parameter 'b'",
            "global function 'sum(_:_:_:)' does not have a description for parameter 'c'",
            "global function 'sum(_:_:_:)' does not have a '- Returns:' description",
            "initializer 'init(capacity:)' does not have a '- Throws:' description",
        ]
    );
}

#[test]
fn test_consistency_diagnostic_kinds() {
    let diagnostics = run("consistency.json", DocCheckMode::Consistency);
    let kinds: Vec<DiagnosticKind> = diagnostics.iter().take(3).map(|d| d.kind).collect();

    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::MissingParamDescription,
            DiagnosticKind::MissingReturnDescription,
            DiagnosticKind::MissingThrowsDescription,
        ]
    );
    assert!(diagnostics
        .iter()
        .all(|d| d.kind != DiagnosticKind::MissingDocComment));
}

#[test]
fn test_presence_ignores_field_gaps() {
    let diagnostics = run("consistency.json", DocCheckMode::PresenceOnly);
    assert!(diagnostics.is_empty(), "{:?}", messages(&diagnostics));
}

#[test]
fn test_disabled_mode_is_silent() {
    let tree = load("presence.json");
    let mut engine = DiagnosticEngine::new();
    let stats = run_doc_check(
        &tree,
        DocCheckMode::Disabled,
        &MarkupDocProvider::new(),
        &mut engine,
    );

    assert!(engine.is_empty());
    assert_eq!(stats.visited, 0);
    assert_eq!(stats.checked, 0);
}

#[test]
fn test_warnings_promoted_to_errors() {
    let tree = load("consistency.json");
    let mut engine = DiagnosticEngine::new().with_warnings_as_errors(true);
    run_doc_check(
        &tree,
        DocCheckMode::Consistency,
        &MarkupDocProvider::new(),
        &mut engine,
    );

    assert_eq!(engine.len(), 8);
    assert!(engine.has_errors());
    assert!(engine
        .diagnostics()
        .iter()
        .all(|d| d.severity == Severity::Error));
}

#[test]
fn test_rerun_is_deterministic() {
    let first = run("consistency.json", DocCheckMode::Consistency);
    let second = run("consistency.json", DocCheckMode::Consistency);
    assert_eq!(first, second);
}
