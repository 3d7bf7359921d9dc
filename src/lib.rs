//! Content model and retrieval layer for a corpus of system design study
//! questions.
//!
//! - **`record`**: the `QuestionRecord` model and its identifier types.
//! - **`validation`**: schema plus content rules; turns untyped JSON into a
//!   record or a complete list of violations.
//! - **`catalog`**: the in-memory store, its indices and the query engine.
//! - **`corpus`**: reading record files from disk and seeding a catalog.
//!
//! Raw records flow validator → catalog → query. The question text itself is
//! opaque payload and is never interpreted.

pub mod catalog;
pub mod corpus;
pub mod logging;
pub mod record;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{
    Catalog, CatalogError, DifficultySort, FacetCount, Facets, QueryFilter, QueryHit, QueryPage,
    SharedCatalog,
};
pub use corpus::{
    ENV_CORPUS_DIR, RawRecord, Rejection, build_catalog, load_corpus_dir, load_records_from_path,
    parse_record_stream, resolve_corpus_dir,
};
pub use logging::init_logging;
pub use record::{Category, Difficulty, QuestionId, QuestionRecord, QuestionSummary};
pub use validation::{BatchOutcome, RecordValidator, Violation, ViolationKind, ViolationList};

/// Split a comma- or whitespace-separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_commas_and_spaces() {
        assert_eq!(
            split_list("telegram, whatsapp  netflix,,"),
            vec!["telegram", "whatsapp", "netflix"]
        );
        assert!(split_list(" , ").is_empty());
    }
}
