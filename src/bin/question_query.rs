//! Query the question corpus from the command line.
//!
//! Loads the corpus directory, validates it, and prints ranked results as
//! JSON lines (one summary per hit, or full records with `--full`). Records
//! that fail validation are skipped with a warning.
//!
//! Examples:
//!   question-query --difficulty Hard --company "Meta (Facebook)"
//!   question-query --text "group messaging" --limit 5
//!   question-query --show telegram,whatsapp
//!   question-query --facets

use anyhow::{Context, Result, bail};
use clap::Parser;
use questionbank::{
    Catalog, DifficultySort, QueryFilter, QuestionId, RecordValidator, build_catalog,
    init_logging, load_corpus_dir, resolve_corpus_dir, split_list,
};
use serde_json::to_string;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "question-query")]
#[command(about = "Filter and rank system design questions")]
struct Cli {
    /// Corpus directory; defaults to $QUESTIONBANK_CORPUS, then ./corpus.
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Easy, Medium or Hard.
    #[arg(long)]
    difficulty: Option<String>,
    /// Exact company name.
    #[arg(long)]
    company: Option<String>,
    /// Exact category label.
    #[arg(long)]
    category: Option<String>,
    /// Free-text query; every term must match.
    #[arg(long)]
    text: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<i64>,
    /// Explicit difficulty ordering on top of the ranking.
    #[arg(long, default_value = "none", value_parser = ["none", "asc", "desc"])]
    sort: String,
    /// Print full records instead of summaries.
    #[arg(long)]
    full: bool,
    /// Print the records with these ids (comma separated) and exit.
    #[arg(long)]
    show: Option<String>,
    /// Print distinct difficulties, categories and companies and exit.
    #[arg(long)]
    facets: bool,
    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
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

    let catalog = load_catalog(&cli)?;

    if let Some(raw_ids) = &cli.show {
        return show(&catalog, &split_list(raw_ids));
    }
    if cli.facets {
        println!("{}", to_string(&catalog.facets())?);
        return Ok(());
    }

    let filter = QueryFilter {
        difficulty: cli.difficulty.clone(),
        company: cli.company.clone(),
        category: cli.category.clone(),
        text: cli.text.clone(),
        limit: cli.limit,
        offset: cli.offset,
        sort: cli.sort.parse::<DifficultySort>()?,
    };
    let page = catalog.query(&filter)?;
    tracing::debug!(total = page.total, returned = page.len(), "query finished");

    for hit in &page.hits {
        let line = if cli.full {
            to_string(&hit.record)?
        } else {
            to_string(&hit.record.summary())?
        };
        println!("{line}");
    }
    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    let dir = resolve_corpus_dir(cli.corpus.as_deref());
    let raws = load_corpus_dir(&dir)?;
    let validator = RecordValidator::new()?;
    let (catalog, rejections) = build_catalog(&validator, &raws)
        .with_context(|| format!("building catalog from {}", dir.display()))?;
    for rejection in &rejections {
        tracing::warn!(
            source = %rejection.source.display(),
            index = rejection.index,
            violations = rejection.violations.len(),
            "skipping invalid record; run question-validate for details"
        );
    }
    Ok(catalog)
}

fn show(catalog: &Catalog, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        bail!("--show needs at least one id");
    }
    for raw in ids {
        let id = QuestionId::new(raw.as_str());
        let record = catalog
            .get(&id)
            .with_context(|| format!("question '{id}' not found"))?;
        println!("{}", to_string(record)?);
    }
    Ok(())
}
