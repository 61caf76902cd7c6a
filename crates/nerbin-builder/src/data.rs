//! Data loading for character-offset NER examples.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nerbin_core::error::{NerbinError, Result};
use serde::{Deserialize, Serialize};

/// Dataset bundled with the crate: product-price questions and favourite websites.
const BUILTIN_DATASET: &str = include_str!("../data/train.json");

/// A requested entity: characters `[start, end)` of the example text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize, String)", into = "(usize, usize, String)")]
pub struct EntitySpec {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl EntitySpec {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

impl From<(usize, usize, String)> for EntitySpec {
    fn from((start, end, label): (usize, usize, String)) -> Self {
        Self { start, end, label }
    }
}

impl From<EntitySpec> for (usize, usize, String) {
    fn from(spec: EntitySpec) -> Self {
        (spec.start, spec.end, spec.label)
    }
}

impl fmt::Display for EntitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.start, self.end, self.label)
    }
}

/// A single training example: raw text and the entities requested on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub text: String,
    pub entities: Vec<EntitySpec>,
}

impl Example {
    pub fn new(text: impl Into<String>, entities: Vec<EntitySpec>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }
}

#[derive(Deserialize)]
struct Annotations {
    #[serde(default)]
    entities: Vec<EntitySpec>,
}

/// Accepted record shapes:
/// `["text", {"entities": [[s, e, "L"]]}]` or `{"text": "...", "entities": [[s, e, "L"]]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Record {
    Pair(String, Annotations),
    Object {
        text: String,
        #[serde(default)]
        entities: Vec<EntitySpec>,
    },
}

impl From<Record> for Example {
    fn from(record: Record) -> Self {
        match record {
            Record::Pair(text, annotations) => Example::new(text, annotations.entities),
            Record::Object { text, entities } => Example::new(text, entities),
        }
    }
}

/// On-disk dataset layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A single JSON array of records.
    Json,
    /// One JSON record per line; blank lines and `#` comments are skipped.
    JsonLines,
}

impl DatasetFormat {
    /// Picks the format from the file extension (`.jsonl` / `.ndjson` → lines).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl" | "ndjson") => DatasetFormat::JsonLines,
            _ => DatasetFormat::Json,
        }
    }
}

/// Load a dataset file, choosing the format from its extension.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Example>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_dataset(BufReader::new(file), DatasetFormat::from_path(path))
}

/// Read a dataset from any buffered reader.
pub fn read_dataset<R: BufRead>(reader: R, format: DatasetFormat) -> Result<Vec<Example>> {
    match format {
        DatasetFormat::Json => {
            let records: Vec<Record> = serde_json::from_reader(reader)
                .map_err(|e| NerbinError::Dataset(e.to_string()))?;
            Ok(records.into_iter().map(Example::from).collect())
        }
        DatasetFormat::JsonLines => {
            let mut examples = Vec::new();
            for (n, line) in reader.lines().enumerate() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let record: Record = serde_json::from_str(line)
                    .map_err(|e| NerbinError::Dataset(format!("line {}: {e}", n + 1)))?;
                examples.push(record.into());
            }
            Ok(examples)
        }
    }
}

/// Parse a dataset held in memory.
pub fn parse_dataset(input: &str, format: DatasetFormat) -> Result<Vec<Example>> {
    read_dataset(input.as_bytes(), format)
}

/// The bundled example dataset.
pub fn builtin_dataset() -> Result<Vec<Example>> {
    parse_dataset(BUILTIN_DATASET, DatasetFormat::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_records() {
        let input = r#"[["what is the price of polo?", {"entities": [[21, 25, "PrdName"]]}]]"#;
        let examples = parse_dataset(input, DatasetFormat::Json).unwrap();

        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].text, "what is the price of polo?");
        assert_eq!(examples[0].entities, vec![EntitySpec::new(21, 25, "PrdName")]);
    }

    #[test]
    fn test_parse_object_records_and_missing_entities() {
        let input = r#"[
            {"text": "My favourite website is github", "entities": [[24, 30, "WEBSITE"]]},
            {"text": "no entities here"},
            ["also none", {}]
        ]"#;
        let examples = parse_dataset(input, DatasetFormat::Json).unwrap();

        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0].entities[0].label, "WEBSITE");
        assert!(examples[1].entities.is_empty());
        assert!(examples[2].entities.is_empty());
    }

    #[test]
    fn test_parse_json_lines() {
        let input = "# comment\n[\"a b\", {\"entities\": [[0, 1, \"X\"]]}]\n\n{\"text\": \"c\"}\n";
        let examples = parse_dataset(input, DatasetFormat::JsonLines).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].text, "c");
    }

    #[test]
    fn test_json_lines_error_reports_line() {
        let input = "{\"text\": \"ok\"}\n{not json}\n";
        let err = parse_dataset(input, DatasetFormat::JsonLines).unwrap_err();
        assert!(matches!(err, NerbinError::Dataset(ref msg) if msg.starts_with("line 2")));
    }

    #[test]
    fn test_malformed_list_is_rejected() {
        // Adjacent records without a separating comma.
        let input = r#"[["a", {"entities": []}] ["b", {"entities": []}]]"#;
        assert!(parse_dataset(input, DatasetFormat::Json).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DatasetFormat::from_path(Path::new("x.jsonl")), DatasetFormat::JsonLines);
        assert_eq!(DatasetFormat::from_path(Path::new("x.json")), DatasetFormat::Json);
        assert_eq!(DatasetFormat::from_path(Path::new("x")), DatasetFormat::Json);
    }

    #[test]
    fn test_builtin_dataset() {
        let examples = builtin_dataset().unwrap();
        assert_eq!(examples.len(), 25);
        for example in &examples {
            let entity = &example.entities[0];
            assert!(entity.start < entity.end);
            assert!(entity.end <= example.text.chars().count());
        }
        assert_eq!(examples[0].entities[0], EntitySpec::new(21, 25, "PrdName"));
    }

    #[test]
    fn test_entity_spec_serializes_as_triple() {
        let json = serde_json::to_string(&EntitySpec::new(21, 25, "PrdName")).unwrap();
        assert_eq!(json, r#"[21,25,"PrdName"]"#);
        assert_eq!(EntitySpec::new(1, 2, "X").to_string(), "[1, 2, X]");
    }
}
