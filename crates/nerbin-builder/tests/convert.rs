use std::fs;

use nerbin_builder::{EntitySpec, Example, builtin_dataset, convert, export_iob, load_dataset};
use nerbin_core::{DocBin, NerbinError, Span};

fn example(text: &str, entities: &[(usize, usize, &str)]) -> Example {
    Example::new(
        text,
        entities
            .iter()
            .map(|(s, e, l)| EntitySpec::new(*s, *e, *l))
            .collect(),
    )
}

#[test]
fn test_convert_writes_readable_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.nerbin");

    let examples = vec![
        example("what is the price of polo?", &[(21, 25, "PrdName")]),
        example("My favourite website is youtube", &[(23, 30, "WEBSITE")]),
    ];
    let report = convert("en", &examples, &path).unwrap();
    assert_eq!(report.aligned_count(), 1);
    assert_eq!(report.skipped_count(), 1);

    let docbin = DocBin::from_disk(&path).unwrap();
    assert_eq!(docbin.len(), 2);

    let polo = &docbin.docs()[0];
    assert_eq!(polo.text(), "what is the price of polo?");
    assert_eq!(polo.ents(), &[Span::new(5, 6, "PrdName")]);

    let youtube = &docbin.docs()[1];
    assert_eq!(youtube.text(), "My favourite website is youtube");
    assert!(youtube.ents().is_empty());
}

#[test]
fn test_convert_is_idempotent_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.nerbin");
    fs::write(&path, b"stale contents").unwrap();

    let examples = builtin_dataset().unwrap();
    convert("en", &examples, &path).unwrap();
    let first = fs::read(&path).unwrap();
    convert("en", &examples, &path).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(DocBin::from_bytes(&first).is_ok());
}

#[test]
fn test_missing_parent_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("train.nerbin");

    let err = convert("en", &builtin_dataset().unwrap(), &path).unwrap_err();
    assert!(matches!(err, NerbinError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn test_builtin_dataset_aligns_fully() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.nerbin");

    let report = convert("en", &builtin_dataset().unwrap(), &path).unwrap();
    assert_eq!(report.docbin.len(), 25);
    assert_eq!(report.aligned_count(), 25);
    assert_eq!(report.skipped_count(), 0);

    let docbin = DocBin::from_disk(&path).unwrap();
    let labels: Vec<_> = docbin
        .docs()
        .iter()
        .map(|d| d.ents()[0].label.as_str())
        .collect();
    assert_eq!(labels.iter().filter(|l| **l == "WEBSITE").count(), 5);
}

#[test]
fn test_load_jsonl_dataset_and_export_iob() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("train.jsonl");
    fs::write(
        &data,
        "[\"what is the price of jeans?\", {\"entities\": [[21, 26, \"PrdName\"]]}]\n\
         {\"text\": \"My favourite website is github\", \"entities\": [[24, 30, \"WEBSITE\"]]}\n",
    )
    .unwrap();

    let examples = load_dataset(&data).unwrap();
    let store = dir.path().join("train.nerbin");
    convert("en", &examples, &store).unwrap();

    let mut out = Vec::new();
    let written = export_iob(&DocBin::from_disk(&store).unwrap(), &mut out).unwrap();
    assert_eq!(written, 2);

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[0]["ner_tags"][5], "B-PrdName");
    assert_eq!(lines[1]["tokens"][4], "github");
    assert_eq!(lines[1]["ner_tags"][4], "B-WEBSITE");
}

#[test]
fn test_unknown_language_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.nerbin");

    let err = convert("klingon", &[], &path).unwrap_err();
    assert!(matches!(err, NerbinError::UnsupportedLanguage(_)));
    assert!(!path.exists());
}
