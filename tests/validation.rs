// Validator contract: complete violation lists, batch id uniqueness, and
// acceptance of the shipped fixtures.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use questionbank::{QuestionRecord, RecordValidator, ViolationKind};
use serde_json::json;

use common::{FIXTURE_IDS, fixture_raw, minimal_raw};

#[test]
fn every_fixture_is_accepted() -> Result<()> {
    let validator = RecordValidator::new()?;
    for id in FIXTURE_IDS {
        let record = validator
            .validate(&fixture_raw(id)?)
            .map_err(|violations| anyhow::anyhow!("{id}: {violations}"))?;
        assert_eq!(record.id.as_str(), id);
    }
    Ok(())
}

#[test]
fn accepted_record_serializes_back_to_its_input() -> Result<()> {
    let validator = RecordValidator::new()?;
    for id in FIXTURE_IDS {
        let raw = fixture_raw(id)?;
        let record: QuestionRecord = validator.validate(&raw).expect("fixture is valid");
        assert_eq!(serde_json::to_value(&record)?, raw, "{id} changed in transit");
    }
    Ok(())
}

#[test]
fn missing_required_field_is_named() -> Result<()> {
    let validator = RecordValidator::new()?;
    for field in ["title", "companies", "difficulty", "talkingPoints", "resources"] {
        let mut raw = minimal_raw("missing-field");
        raw.as_object_mut().expect("object").remove(field);
        let violations = validator.validate(&raw).expect_err("must be rejected");
        assert!(
            violations.has(field, ViolationKind::MissingOrWrongType),
            "{field} not reported: {violations}"
        );
    }
    Ok(())
}

#[test]
fn batch_never_accepts_a_record_missing_a_required_field() -> Result<()> {
    let validator = RecordValidator::new()?;
    let required = [
        "id",
        "title",
        "companies",
        "difficulty",
        "category",
        "description",
        "requirements",
        "talkingPoints",
        "architecture",
        "apiDesign",
        "tradeoffs",
        "resources",
    ];
    for field in required {
        let id = format!("missing-{}", field.to_lowercase());
        let mut incomplete = minimal_raw(&id);
        incomplete.as_object_mut().expect("object").remove(field);
        let batch = vec![minimal_raw("before"), incomplete, minimal_raw("after")];

        let outcome = validator.validate_batch(&batch);
        let rejected: Vec<usize> = outcome.rejected.iter().map(|(index, _)| *index).collect();
        assert_eq!(rejected, vec![1], "{field}");
        assert!(
            outcome.rejected[0].1.has(field, ViolationKind::MissingOrWrongType),
            "{field} not named: {}",
            outcome.rejected[0].1
        );
        assert!(
            outcome.accepted.iter().all(|record| record.id.as_str() != id),
            "{field}: incomplete record was accepted"
        );
        assert_eq!(outcome.accepted.len(), 2, "{field}");
    }
    Ok(())
}

#[test]
fn wrong_type_is_reported_once_per_field() -> Result<()> {
    let validator = RecordValidator::new()?;
    let mut raw = minimal_raw("wrong-type");
    raw["title"] = json!(42);
    let violations = validator.validate(&raw).expect_err("must be rejected");
    let title_violations: Vec<_> = violations.iter().filter(|v| v.field == "title").collect();
    assert_eq!(title_violations.len(), 1);
    assert_eq!(title_violations[0].kind, ViolationKind::MissingOrWrongType);
    Ok(())
}

#[test]
fn blank_text_and_bad_entries_are_reported_with_positions() -> Result<()> {
    let validator = RecordValidator::new()?;
    let mut raw = minimal_raw("positions");
    raw["description"] = json!("   ");
    raw["companies"] = json!(["Acme", "", "Acme"]);
    raw["difficulty"] = json!("hard");
    raw["tradeoffs"] = json!([
        {"decision": "Cache", "analysis": "yes"},
        {"decision": "Cache", "analysis": "again"}
    ]);

    let violations = validator.validate(&raw).expect_err("must be rejected");
    assert!(violations.has("description", ViolationKind::EmptyText));
    assert!(violations.has("difficulty", ViolationKind::InvalidEnum));
    assert!(violations.has("tradeoffs.decision", ViolationKind::Duplicate));

    let companies: Vec<_> = violations
        .iter()
        .filter(|v| v.field == "companies")
        .map(|v| (v.kind, v.index))
        .collect();
    assert!(companies.contains(&(ViolationKind::EmptyText, Some(1))));
    assert!(companies.contains(&(ViolationKind::Duplicate, Some(2))));
    Ok(())
}

#[test]
fn talking_points_need_a_recognized_section() -> Result<()> {
    let validator = RecordValidator::new()?;
    let mut raw = minimal_raw("no-talking-points");
    raw["talkingPoints"] = json!({"speakerNotes": "only an unknown key"});
    let violations = validator.validate(&raw).expect_err("must be rejected");
    assert!(violations.has("talkingPoints", ViolationKind::EmptyCollection));

    raw["talkingPoints"] = json!({"scaling": "Shard by user.", "speakerNotes": "kept"});
    let record = validator.validate(&raw).expect("one recognized key is enough");
    assert!(record.talking_points.extra.contains_key("speakerNotes"));
    Ok(())
}

#[test]
fn unknown_resource_kind_is_unexpected() -> Result<()> {
    let validator = RecordValidator::new()?;
    let mut raw = minimal_raw("podcasts");
    raw["resources"] = json!({"podcasts": [{"title": "Episode 1"}]});
    let violations = validator.validate(&raw).expect_err("must be rejected");
    assert!(violations.has("resources", ViolationKind::UnexpectedKey));
    Ok(())
}

#[test]
fn batch_rejects_later_duplicates_only() -> Result<()> {
    let validator = RecordValidator::new()?;
    let batch = vec![
        minimal_raw("twitter"),
        minimal_raw("whatsapp"),
        minimal_raw("twitter"),
        minimal_raw("twitter"),
    ];
    let outcome = validator.validate_batch(&batch);

    let accepted: Vec<&str> = outcome.accepted.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(accepted, vec!["twitter", "whatsapp"]);
    let rejected: Vec<usize> = outcome.rejected.iter().map(|(index, _)| *index).collect();
    assert_eq!(rejected, vec![2, 3]);
    for (_, violations) in &outcome.rejected {
        assert!(violations.has("id", ViolationKind::Duplicate));
    }
    Ok(())
}

#[test]
fn rejected_record_does_not_claim_its_id() -> Result<()> {
    let validator = RecordValidator::new()?;
    let mut broken = minimal_raw("uber");
    broken["difficulty"] = json!("Impossible");
    let outcome = validator.validate_batch(&[broken, minimal_raw("uber")]);

    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].0, 0);
    assert!(!outcome.rejected[0].1.has("id", ViolationKind::Duplicate));
    Ok(())
}

#[test]
fn violations_serialize_for_tooling() -> Result<()> {
    let validator = RecordValidator::new()?;
    let mut raw = minimal_raw("Not Valid");
    raw["companies"] = json!([]);
    let violations = validator.validate(&raw).expect_err("must be rejected");
    let value = serde_json::to_value(&violations)?;
    let items = value.as_array().expect("violations serialize as a list");
    assert_eq!(items[0]["field"], "id");
    assert_eq!(items[0]["kind"], "InvalidFormat");
    assert_eq!(items[1]["field"], "companies");
    assert_eq!(items[1]["kind"], "EmptyCollection");
    Ok(())
}
