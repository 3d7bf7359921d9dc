//! Record validation.
//!
//! `RecordValidator` turns an untyped JSON value into a `QuestionRecord` or a
//! complete `ViolationList`. Malformed input is an ordinary outcome: nothing
//! here panics or returns an error for bad content. Every check runs on every
//! record so an author gets the whole fix-list in one pass.
//!
//! Batches are validated left to right. The only cross-record rule is id
//! uniqueness: the first accepted record claims an id and later records with
//! the same id are rejected with `id: Duplicate`. A record rejected for other
//! reasons never claims its id.

pub mod rules;
pub mod schema;
pub mod violation;

pub use schema::RecordSchema;
pub use violation::{FIELD_ORDER, Violation, ViolationKind, ViolationList};

use crate::record::QuestionRecord;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashSet;

/// Result of validating a batch: accepted records in input order and the
/// violations of every rejected input keyed by its position.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub accepted: Vec<QuestionRecord>,
    pub rejected: Vec<(usize, ViolationList)>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct RecordValidator {
    schema: RecordSchema,
}

impl RecordValidator {
    /// Build a validator around the embedded record schema.
    pub fn new() -> Result<Self> {
        Ok(Self {
            schema: RecordSchema::embedded()?,
        })
    }

    pub fn with_schema(schema: RecordSchema) -> Self {
        Self { schema }
    }

    /// Validate one record in isolation.
    pub fn validate(&self, raw: &Value) -> Result<QuestionRecord, ViolationList> {
        self.validate_against(raw, &HashSet::new())
    }

    /// Validate one record, treating every id in `seen_ids` as taken.
    pub fn validate_against(
        &self,
        raw: &Value,
        seen_ids: &HashSet<String>,
    ) -> Result<QuestionRecord, ViolationList> {
        let mut violations = ViolationList::default();
        violations.extend(self.schema.violations(raw));
        violations.extend(rules::content_violations(raw, seen_ids));
        let violations = violations.finish();
        if !violations.is_empty() {
            return Err(violations);
        }

        serde_json::from_value::<QuestionRecord>(raw.clone()).map_err(|err| {
            let mut list = ViolationList::default();
            list.push(Violation::new(
                "record",
                ViolationKind::MissingOrWrongType,
                format!("record does not match the question model: {err}"),
            ));
            list
        })
    }

    pub fn validate_batch(&self, raws: &[Value]) -> BatchOutcome {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut outcome = BatchOutcome::default();
        for (index, raw) in raws.iter().enumerate() {
            match self.validate_against(raw, &seen_ids) {
                Ok(record) => {
                    seen_ids.insert(record.id.as_str().to_string());
                    outcome.accepted.push(record);
                }
                Err(violations) => {
                    tracing::debug!(
                        index,
                        count = violations.len(),
                        "rejected question record"
                    );
                    outcome.rejected.push((index, violations));
                }
            }
        }
        tracing::info!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            "validated question batch"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_raw;

    #[test]
    fn accepts_well_formed_record() {
        let validator = RecordValidator::new().unwrap();
        let record = validator.validate(&sample_raw("url-shortener")).unwrap();
        assert_eq!(record.id.as_str(), "url-shortener");
        assert_eq!(record.resources.videos[0].youtube_id, "abc123");
        assert_eq!(
            record.database_schema.and_then(|schema| schema.sql).as_deref(),
            Some("CREATE TABLE urls (...)")
        );
    }

    #[test]
    fn reports_every_defect_not_just_the_first() {
        let validator = RecordValidator::new().unwrap();
        let mut raw = sample_raw("Bad Id");
        raw["difficulty"] = "Brutal".into();
        raw["companies"] = serde_json::json!([]);
        raw["requirements"]["nonFunctional"] = serde_json::json!([]);
        raw.as_object_mut().unwrap().remove("apiDesign");

        let violations = validator.validate(&raw).unwrap_err();
        assert!(violations.has("id", ViolationKind::InvalidFormat));
        assert!(violations.has("companies", ViolationKind::EmptyCollection));
        assert!(violations.has("difficulty", ViolationKind::InvalidEnum));
        assert!(violations.has("requirements.nonFunctional", ViolationKind::EmptyCollection));
        assert!(violations.has("apiDesign", ViolationKind::MissingOrWrongType));

        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "id",
                "companies",
                "difficulty",
                "requirements.nonFunctional",
                "apiDesign"
            ]
        );
    }

    #[test]
    fn unknown_top_level_fields_are_ignored() {
        let validator = RecordValidator::new().unwrap();
        let mut raw = sample_raw("twitter");
        raw["editorNotes"] = "draft".into();
        assert!(validator.validate(&raw).is_ok());
    }

    #[test]
    fn non_object_input_is_a_violation_not_a_panic() {
        let validator = RecordValidator::new().unwrap();
        let violations = validator.validate(&serde_json::json!("twitter")).unwrap_err();
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| v.kind == ViolationKind::MissingOrWrongType));
    }
}
