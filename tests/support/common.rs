#![allow(dead_code)]

use anyhow::{Context, Result};
use questionbank::{
    Catalog, QuestionId, RawRecord, RecordValidator, build_catalog, load_corpus_dir,
};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixture ids in file-name (and therefore insertion) order.
pub const FIXTURE_IDS: [&str; 4] = ["facebook-newsfeed", "netflix", "telegram", "whatsapp"];

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/questions")
}

pub fn fixture_raw(id: &str) -> Result<Value> {
    let path = fixtures_dir().join(format!("{id}.json"));
    let data = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

pub fn fixture_raws() -> Result<Vec<RawRecord>> {
    load_corpus_dir(&fixtures_dir())
}

/// Catalog seeded from every fixture; fails if any fixture is rejected.
pub fn fixture_catalog() -> Result<Catalog> {
    let validator = RecordValidator::new()?;
    let (catalog, rejections) = build_catalog(&validator, &fixture_raws()?)?;
    anyhow::ensure!(rejections.is_empty(), "fixtures rejected: {rejections:?}");
    Ok(catalog)
}

pub fn qid(raw: &str) -> QuestionId {
    QuestionId::new(raw)
}

/// Smallest record the validator accepts.
pub fn minimal_raw(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Design {id}"),
        "companies": ["Acme"],
        "difficulty": "Medium",
        "category": "Infrastructure & Tools",
        "description": format!("Notes on {id}"),
        "requirements": {
            "functional": ["Do the thing"],
            "nonFunctional": ["Do it quickly"]
        },
        "talkingPoints": {"introduction": "Begin."},
        "architecture": {"components": []},
        "apiDesign": "GET /thing",
        "tradeoffs": [],
        "resources": {}
    })
}

/// Temporary corpus directory holding one file per `(file name, contents)`.
pub struct TempCorpus {
    dir: TempDir,
}

impl TempCorpus {
    pub fn new(files: &[(&str, Value)]) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        for (name, value) in files {
            let path = dir.path().join(name);
            fs::write(&path, serde_json::to_vec_pretty(value)?)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Ok(Self { dir })
    }

    pub fn write_raw(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
