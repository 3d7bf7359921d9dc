//! Loading raw records from disk and seeding a catalog.
//!
//! A corpus is a directory of `*.json` files. Each file holds one record, a
//! JSON array of records, or newline-delimited records. Loading stops at the
//! first unreadable or syntactically broken file; content defects inside
//! well-formed JSON are left to the validator so they can be reported in
//! full.

use crate::catalog::Catalog;
use crate::validation::{RecordValidator, ViolationList};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CORPUS_DIR: &str = "QUESTIONBANK_CORPUS";
pub const DEFAULT_CORPUS_DIR: &str = "corpus";

/// One raw record and the file it came from.
#[derive(Clone, Debug)]
pub struct RawRecord {
    pub source: PathBuf,
    pub value: Value,
}

/// Explicit path, then `QUESTIONBANK_CORPUS`, then `./corpus`.
pub fn resolve_corpus_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env::var(ENV_CORPUS_DIR) {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw),
        _ => PathBuf::from(DEFAULT_CORPUS_DIR),
    }
}

/// Parse a JSON array, a single object, or NDJSON into raw values.
pub fn parse_record_stream(input: &str) -> Result<Vec<Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("no records in input");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => Ok(items),
            Value::Object(_) => Ok(vec![value]),
            _ => bail!("unsupported JSON input; expected object or array"),
        };
    }

    let mut records = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("unable to parse record from line {}", idx + 1))?;
        records.push(value);
    }

    if records.is_empty() {
        bail!("no records found in input stream");
    }
    Ok(records)
}

pub fn load_records_from_path(path: &Path) -> Result<Vec<RawRecord>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let values =
        parse_record_stream(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(values
        .into_iter()
        .map(|value| RawRecord {
            source: path.to_path_buf(),
            value,
        })
        .collect())
}

/// Every `*.json` file directly under `dir`, sorted by file name.
pub fn corpus_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("listing {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn load_corpus_dir(dir: &Path) -> Result<Vec<RawRecord>> {
    let files = corpus_files(dir)?;
    if files.is_empty() {
        bail!("no *.json record files under {}", dir.display());
    }
    let mut records = Vec::new();
    for file in files {
        let loaded = load_records_from_path(&file)?;
        tracing::debug!(file = %file.display(), records = loaded.len(), "loaded corpus file");
        records.extend(loaded);
    }
    tracing::info!(dir = %dir.display(), records = records.len(), "loaded corpus");
    Ok(records)
}

/// A rejected input: where it came from and everything wrong with it.
#[derive(Debug)]
pub struct Rejection {
    pub index: usize,
    pub source: PathBuf,
    pub violations: ViolationList,
}

/// Validate `raws` as one batch and insert every accepted record.
pub fn build_catalog(
    validator: &RecordValidator,
    raws: &[RawRecord],
) -> Result<(Catalog, Vec<Rejection>)> {
    let values: Vec<Value> = raws.iter().map(|raw| raw.value.clone()).collect();
    let outcome = validator.validate_batch(&values);
    let catalog = Catalog::from_records(outcome.accepted)
        .context("seeding catalog from validated records")?;
    let rejections = outcome
        .rejected
        .into_iter()
        .map(|(index, violations)| Rejection {
            index,
            source: raws[index].source.clone(),
            violations,
        })
        .collect();
    Ok((catalog, rejections))
}
