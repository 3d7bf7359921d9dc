//! In-memory question catalog and query engine.
//!
//! `Catalog` owns the validated records plus indices by difficulty, company,
//! category and free-text token. Indices are maintained on every mutation and
//! every id set is kept in insertion order, which makes query results
//! reproducible for identical inputs. `SharedCatalog` adds the
//! single-writer/multi-reader wrapper an embedding service would hold.

pub mod error;
pub mod index;
pub mod query;
pub mod shared;
pub mod store;
pub mod tokenizer;

pub use error::CatalogError;
pub use index::{AttributeIndex, IdSet};
pub use query::{DifficultySort, QueryFilter, QueryHit, QueryPage};
pub use shared::SharedCatalog;
pub use store::{Catalog, FacetCount, Facets};
pub use tokenizer::{tokenize_query, tokenize_text};
