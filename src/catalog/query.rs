//! Query filters and result pages.
//!
//! `QueryFilter` carries raw, caller-supplied values (a UI typically passes
//! strings and signed integers straight through). `resolve` checks them once
//! and produces the typed filter the catalog evaluates.

use crate::catalog::CatalogError;
use crate::catalog::tokenizer::tokenize_query;
use crate::record::{Difficulty, QuestionRecord};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Optional explicit ordering by difficulty. Ranking never looks at
/// difficulty unless one of these is requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultySort {
    #[default]
    None,
    Asc,
    Desc,
}

impl FromStr for DifficultySort {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Ok(DifficultySort::None),
            "asc" => Ok(DifficultySort::Asc),
            "desc" => Ok(DifficultySort::Desc),
            other => bail!("unknown sort order '{other}', expected none, asc or desc"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryFilter {
    pub difficulty: Option<String>,
    pub company: Option<String>,
    pub category: Option<String>,
    pub text: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: DifficultySort,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn difficulty(mut self, value: impl Into<String>) -> Self {
        self.difficulty = Some(value.into());
        self
    }

    pub fn company(mut self, value: impl Into<String>) -> Self {
        self.company = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    pub fn limit(mut self, value: i64) -> Self {
        self.limit = Some(value);
        self
    }

    pub fn offset(mut self, value: i64) -> Self {
        self.offset = Some(value);
        self
    }

    pub fn sort(mut self, value: DifficultySort) -> Self {
        self.sort = value;
        self
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedFilter, CatalogError> {
        let difficulty = match self.difficulty.as_deref() {
            None => None,
            Some(raw) => Some(
                raw.parse::<Difficulty>()
                    .map_err(|err| CatalogError::invalid_filter("difficulty", err.to_string()))?,
            ),
        };
        let offset = match self.offset {
            None => 0,
            Some(raw) if raw < 0 => {
                return Err(CatalogError::invalid_filter(
                    "offset",
                    format!("offset must be non-negative, got {raw}"),
                ));
            }
            Some(raw) => usize::try_from(raw)
                .map_err(|err| CatalogError::invalid_filter("offset", err.to_string()))?,
        };
        let limit = match self.limit {
            None => None,
            Some(raw) if raw <= 0 => {
                return Err(CatalogError::invalid_filter(
                    "limit",
                    format!("limit must be positive, got {raw}"),
                ));
            }
            Some(raw) => Some(
                usize::try_from(raw)
                    .map_err(|err| CatalogError::invalid_filter("limit", err.to_string()))?,
            ),
        };
        let terms = self
            .text
            .as_deref()
            .map(tokenize_query)
            .unwrap_or_default();

        Ok(ResolvedFilter {
            difficulty,
            company: self.company.clone(),
            category: self.category.clone(),
            terms,
            limit,
            offset,
            sort: self.sort,
        })
    }
}

#[derive(Debug)]
pub(crate) struct ResolvedFilter {
    pub difficulty: Option<Difficulty>,
    pub company: Option<String>,
    pub category: Option<String>,
    pub terms: Vec<String>,
    pub limit: Option<usize>,
    pub offset: usize,
    pub sort: DifficultySort,
}

/// One ranked result. `title_matches` is the number of query terms found in
/// the record's title; zero for queries without text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHit {
    pub record: QuestionRecord,
    pub title_matches: usize,
}

/// A page of ranked results. `total` counts every match before pagination.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QueryPage {
    pub total: usize,
    pub offset: usize,
    pub hits: Vec<QueryHit>,
}

impl QueryPage {
    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|hit| hit.record.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
