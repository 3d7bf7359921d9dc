//! Validate question record files and report every defect.
//!
//! Usage:
//!   question-validate                       # every *.json under the corpus dir
//!   question-validate --corpus data/questions
//!   question-validate twitter.json whatsapp.json --json
//!
//! Records are validated as one batch in file-name order, so a repeated id is
//! reported on every occurrence after the first. Exits non-zero when any
//! record is rejected.

use anyhow::{Result, bail};
use clap::Parser;
use questionbank::{
    RawRecord, RecordValidator, init_logging, load_corpus_dir, load_records_from_path,
    resolve_corpus_dir,
};
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "question-validate")]
#[command(about = "Validate system design question records")]
struct Cli {
    /// Corpus directory; defaults to $QUESTIONBANK_CORPUS, then ./corpus.
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Emit one JSON object per rejected record instead of text.
    #[arg(long)]
    json: bool,
    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
    /// Record files to check instead of the corpus directory.
    files: Vec<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let raws = load_inputs(&cli)?;
    let validator = RecordValidator::new()?;
    let values: Vec<Value> = raws.iter().map(|raw| raw.value.clone()).collect();
    let outcome = validator.validate_batch(&values);

    for (index, violations) in &outcome.rejected {
        let source = raws[*index].source.display().to_string();
        let id = raws[*index].value.get("id").cloned().unwrap_or(Value::Null);
        if cli.json {
            println!(
                "{}",
                json!({
                    "index": index,
                    "source": source,
                    "id": id,
                    "violations": violations,
                })
            );
        } else {
            println!("{source} [record {index}, id {id}]");
            for violation in violations.iter() {
                println!("  {violation}");
            }
        }
    }

    if outcome.is_clean() {
        if !cli.json {
            println!("{} record(s) valid", outcome.accepted.len());
        }
        Ok(())
    } else {
        bail!(
            "{} of {} record(s) rejected",
            outcome.rejected.len(),
            raws.len()
        )
    }
}

fn load_inputs(cli: &Cli) -> Result<Vec<RawRecord>> {
    if cli.files.is_empty() {
        let dir = resolve_corpus_dir(cli.corpus.as_deref());
        return load_corpus_dir(&dir);
    }
    let mut raws = Vec::new();
    for file in &cli.files {
        raws.extend(load_records_from_path(file)?);
    }
    Ok(raws)
}
