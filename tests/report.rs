//! End-to-end render tests: load a record from a store directory, render
//! it and inspect the produced PDF bytes. Text drawn from ASCII-only
//! strings appears literally in the uncompressed content streams, which is
//! enough to check presence and document order.

use std::fs;
use std::path::Path;

use council_report::error::ReportError;
use council_report::generate_report;
use council_report::layout::ReportConfig;

fn write_record(dir: &Path, id: &str, json: serde_json::Value) {
    fs::write(dir.join(format!("{id}.json")), json.to_string()).expect("write record");
}

fn find(haystack: &[u8], needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[test]
fn q3_scenario_produces_an_ordered_document() {
    let store = tempfile::tempdir().expect("store dir");
    let out = tempfile::tempdir().expect("out dir");
    write_record(
        store.path(),
        "abc123",
        serde_json::json!({
            "id": "abc123",
            "title": "Q3 Strategy",
            "created_at": "2024-05-14T09:30:00",
            "messages": [
                {"role": "user", "content": "What should we do?"},
                {"role": "assistant",
                 "stage1": [
                    {"model": "acme/gpt-x", "response": "Option A"},
                    {"model": "beta/gpt-y", "response": "Option B"},
                 ],
                 "stage3": {"model": "acme/gpt-x", "response": "Final: do Option A"}},
            ]
        }),
    );

    let path = generate_report(
        "abc123",
        store.path(),
        out.path(),
        ReportConfig::default(),
    )
    .expect("render succeeds");

    assert_eq!(path, out.path().join("abc123.pdf"));
    let bytes = fs::read(&path).expect("read report");
    assert!(bytes.starts_with(b"%PDF-"));

    let order = [
        "Q3 Strategy",
        "ID: abc123",
        "What should we do?",
        "Option A",
        "Option B",
        "Final: do Option A",
    ];
    let mut last = 0;
    for text in order {
        let at = find(&bytes[last..], text)
            .unwrap_or_else(|| panic!("'{text}' missing or out of order"));
        last += at + text.len();
    }
}

#[test]
fn unknown_id_reports_not_found_and_writes_nothing() {
    let store = tempfile::tempdir().expect("store dir");
    let out = tempfile::tempdir().expect("out dir");

    let result = generate_report("missing", store.path(), out.path(), ReportConfig::default());
    match result {
        Err(ReportError::InputNotFound { id, .. }) => assert_eq!(id, "missing"),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
    assert!(!out.path().join("missing.pdf").exists());
}

#[test]
fn malformed_record_reports_and_writes_nothing() {
    let store = tempfile::tempdir().expect("store dir");
    let out = tempfile::tempdir().expect("out dir");
    fs::write(store.path().join("bad.json"), "{not json").expect("write");

    let result = generate_report("bad", store.path(), out.path(), ReportConfig::default());
    assert!(matches!(result, Err(ReportError::InputMalformed(_))));
    assert!(!out.path().join("bad.pdf").exists());
}

#[test]
fn bare_string_final_resolution_renders() {
    let store = tempfile::tempdir().expect("store dir");
    let out = tempfile::tempdir().expect("out dir");
    write_record(
        store.path(),
        "freeform",
        serde_json::json!({
            "id": "freeform",
            "title": "Sin consenso",
            "messages": [
                {"role": "user", "content": "Decidan algo"},
                {"role": "assistant", "stage3": "No consensus reached"},
            ]
        }),
    );

    let path = generate_report(
        "freeform",
        store.path(),
        out.path(),
        ReportConfig::default(),
    )
    .expect("render succeeds");
    let bytes = fs::read(path).expect("read report");
    assert!(find(&bytes, "No consensus reached").is_some());
}

#[test]
fn conversation_without_assistants_still_renders() {
    let store = tempfile::tempdir().expect("store dir");
    let out = tempfile::tempdir().expect("out dir");
    write_record(
        store.path(),
        "solo",
        serde_json::json!({
            "id": "solo",
            "title": "Solo consulta",
            "messages": [
                {"role": "user", "content": "Hay alguien?"},
            ]
        }),
    );

    let path = generate_report("solo", store.path(), out.path(), ReportConfig::default())
        .expect("render succeeds");
    let bytes = fs::read(path).expect("read report");
    assert!(find(&bytes, "Consulta Inicial").is_some());
    assert!(find(&bytes, "Respuestas de los Miembros").is_none());
}
