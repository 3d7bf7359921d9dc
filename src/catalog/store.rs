//! Authoritative record store plus derived indices.
//!
//! Every mutation updates the store and all four indices together; debug
//! builds re-check that they agree afterwards. Records are immutable once
//! stored: `replace` removes the old record and inserts the new one at the
//! end of insertion order.

use crate::catalog::CatalogError;
use crate::catalog::index::{AttributeIndex, IdSet, intersect};
use crate::catalog::query::{DifficultySort, QueryFilter, QueryHit, QueryPage, ResolvedFilter};
use crate::catalog::tokenizer::tokenize_text;
use crate::record::{Category, Difficulty, QuestionId, QuestionRecord, QuestionSummary};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
struct Entry {
    seq: u64,
    record: QuestionRecord,
    tokens: BTreeSet<String>,
    title_tokens: BTreeSet<String>,
}

impl Entry {
    fn new(seq: u64, record: QuestionRecord) -> Self {
        let mut tokens = tokenize_text(&record.title);
        let title_tokens = tokens.clone();
        tokens.extend(tokenize_text(&record.description));
        tokens.extend(tokenize_text(record.category.as_str()));
        Self {
            seq,
            record,
            tokens,
            title_tokens,
        }
    }

    fn title_matches(&self, terms: &[String]) -> usize {
        terms
            .iter()
            .filter(|term| self.title_tokens.iter().any(|token| token.contains(term.as_str())))
            .count()
    }
}

/// Records reach the catalog only through `RecordValidator`.
fn debug_assert_validated(record: &QuestionRecord) {
    debug_assert!(
        record.content_defects().is_empty(),
        "question '{}' was not validated: bad {:?}",
        record.id,
        record.content_defects()
    );
}

/// Distinct filter values with the number of records carrying each.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub difficulties: Vec<FacetCount>,
    pub categories: Vec<FacetCount>,
    pub companies: Vec<FacetCount>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<QuestionId, Entry>,
    order: BTreeMap<u64, QuestionId>,
    next_seq: u64,
    by_difficulty: AttributeIndex<Difficulty>,
    by_company: AttributeIndex<String>,
    by_category: AttributeIndex<Category>,
    by_token: AttributeIndex<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already validated records, failing on the first
    /// duplicate id.
    pub fn from_records(
        records: impl IntoIterator<Item = QuestionRecord>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&mut self, record: QuestionRecord) -> Result<(), CatalogError> {
        if self.entries.contains_key(&record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        debug_assert_validated(&record);
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(id = %record.id, seq, "inserting question");
        self.index(Entry::new(seq, record));
        self.debug_check();
        Ok(())
    }

    /// Remove the record with the same id, then insert `record` as a new
    /// arrival; it moves to the end of insertion order.
    pub fn replace(&mut self, record: QuestionRecord) -> Result<(), CatalogError> {
        debug_assert_validated(&record);
        let Some(previous) = self.unindex(&record.id) else {
            return Err(CatalogError::NotFound(record.id));
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(id = %record.id, old_seq = previous.seq, seq, "replacing question");
        self.index(Entry::new(seq, record));
        self.debug_check();
        Ok(())
    }

    pub fn remove(&mut self, id: &QuestionId) -> Result<QuestionRecord, CatalogError> {
        let Some(previous) = self.unindex(id) else {
            return Err(CatalogError::NotFound(id.clone()));
        };
        tracing::debug!(id = %id, seq = previous.seq, "removed question");
        self.debug_check();
        Ok(previous.record)
    }

    pub fn get(&self, id: &QuestionId) -> Option<&QuestionRecord> {
        self.entries.get(id).map(|entry| &entry.record)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.order.values()
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.order
            .values()
            .filter_map(|id| self.entries.get(id).map(|entry| &entry.record))
    }

    pub fn summaries(&self) -> Vec<QuestionSummary> {
        self.records().map(QuestionRecord::summary).collect()
    }

    pub fn facets(&self) -> Facets {
        let count = |value: String, count: usize| FacetCount { value, count };
        Facets {
            difficulties: self
                .by_difficulty
                .counts()
                .map(|(difficulty, n)| count(difficulty.to_string(), n))
                .collect(),
            categories: self
                .by_category
                .counts()
                .map(|(category, n)| count(category.to_string(), n))
                .collect(),
            companies: self
                .by_company
                .counts()
                .map(|(company, n)| count(company.clone(), n))
                .collect(),
        }
    }

    /// Evaluate `filter`: intersect the matching index sets, rank, then page.
    pub fn query(&self, filter: &QueryFilter) -> Result<QueryPage, CatalogError> {
        let filter = filter.resolve()?;
        let matched = self.candidates(&filter);

        let mut hits: Vec<(&Entry, usize)> = matched
            .iter()
            .filter_map(|seq| self.order.get(seq))
            .filter_map(|id| self.entries.get(id))
            .map(|entry| (entry, entry.title_matches(&filter.terms)))
            .collect();

        // Candidates arrive in insertion order and both sorts are stable, so
        // insertion order is the final tie-breaker.
        hits.sort_by(|a, b| b.1.cmp(&a.1));
        match filter.sort {
            DifficultySort::None => {}
            DifficultySort::Asc => hits.sort_by_key(|(entry, _)| entry.record.difficulty.rank()),
            DifficultySort::Desc => hits.sort_by(|(a, _), (b, _)| {
                b.record.difficulty.rank().cmp(&a.record.difficulty.rank())
            }),
        }

        let total = hits.len();
        let page = hits
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .map(|(entry, title_matches)| QueryHit {
                record: entry.record.clone(),
                title_matches,
            })
            .collect();

        Ok(QueryPage {
            total,
            offset: filter.offset,
            hits: page,
        })
    }

    fn candidates(&self, filter: &ResolvedFilter) -> IdSet {
        let empty = IdSet::new();
        let mut narrowed: Option<IdSet> = None;

        if let Some(difficulty) = &filter.difficulty {
            narrowed = Some(intersect(
                narrowed,
                self.by_difficulty.get(difficulty).unwrap_or(&empty),
            ));
        }
        if let Some(company) = &filter.company {
            narrowed = Some(intersect(
                narrowed,
                self.by_company.get(company).unwrap_or(&empty),
            ));
        }
        if let Some(category) = &filter.category {
            let matched = Category::new(category.as_str())
                .ok()
                .and_then(|category| self.by_category.get(&category));
            narrowed = Some(intersect(narrowed, matched.unwrap_or(&empty)));
        }
        for term in &filter.terms {
            narrowed = Some(intersect(narrowed, &self.term_matches(term)));
        }

        narrowed.unwrap_or_else(|| self.order.keys().copied().collect())
    }

    /// Records with at least one indexed token containing `term`.
    fn term_matches(&self, term: &str) -> IdSet {
        self.by_token
            .iter()
            .filter(|(token, _)| token.contains(term))
            .flat_map(|(_, set)| set.iter().copied())
            .collect()
    }

    fn index(&mut self, entry: Entry) {
        let seq = entry.seq;
        let record = &entry.record;
        self.by_difficulty.insert(record.difficulty, seq);
        for company in &record.companies {
            self.by_company.insert(company.clone(), seq);
        }
        self.by_category.insert(record.category.clone(), seq);
        for token in &entry.tokens {
            self.by_token.insert(token.clone(), seq);
        }
        self.order.insert(seq, record.id.clone());
        self.entries.insert(record.id.clone(), entry);
    }

    fn unindex(&mut self, id: &QuestionId) -> Option<Entry> {
        let entry = self.entries.remove(id)?;
        let seq = entry.seq;
        let record = &entry.record;
        self.by_difficulty.remove(&record.difficulty, seq);
        for company in &record.companies {
            self.by_company.remove(company, seq);
        }
        self.by_category.remove(&record.category, seq);
        for token in &entry.tokens {
            self.by_token.remove(token, seq);
        }
        self.order.remove(&seq);
        Some(entry)
    }

    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        self.check_invariants();
    }

    /// Panics if the store and any index disagree on membership.
    pub fn check_invariants(&self) {
        assert_eq!(
            self.entries.len(),
            self.order.len(),
            "store and insertion order disagree"
        );
        for (id, entry) in &self.entries {
            let seq = entry.seq;
            let record = &entry.record;
            assert_eq!(&record.id, id, "store key does not match record id");
            assert_eq!(self.order.get(&seq), Some(id), "{id} missing from order");
            assert!(
                self.by_difficulty.contains(&record.difficulty, seq),
                "{id} missing from difficulty index"
            );
            assert!(
                self.by_category.contains(&record.category, seq),
                "{id} missing from category index"
            );
            for company in &record.companies {
                assert!(
                    self.by_company.contains(company, seq),
                    "{id} missing from company index under {company}"
                );
            }
            for token in &entry.tokens {
                assert!(
                    self.by_token.contains(token, seq),
                    "{id} missing from token index under {token}"
                );
            }
        }
        let live: IdSet = self.order.keys().copied().collect();
        assert!(
            self.by_difficulty.within(&live),
            "difficulty index refers to a removed record"
        );
        assert!(
            self.by_company.within(&live),
            "company index refers to a removed record"
        );
        assert!(
            self.by_category.within(&live),
            "category index refers to a removed record"
        );
        assert!(
            self.by_token.within(&live),
            "token index refers to a removed record"
        );
    }
}
