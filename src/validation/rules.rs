//! Content rules the JSON schema cannot express: blank text, id format,
//! in-record uniqueness and the talking-points minimum.
//!
//! Every rule reads the raw value and skips silently when the shape is wrong;
//! the schema pass already reports type problems for those fields.

use crate::record::{QuestionId, TALKING_POINT_KEYS};
use crate::validation::{Violation, ViolationKind};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

const REQUIRED_TEXT: [&str; 4] = ["title", "category", "description", "apiDesign"];

pub(crate) fn content_violations(raw: &Value, seen_ids: &HashSet<String>) -> Vec<Violation> {
    let mut found = Vec::new();
    id_rules(raw, seen_ids, &mut found);
    for field in REQUIRED_TEXT {
        if let Some(text) = raw.get(field).and_then(Value::as_str) {
            if text.trim().is_empty() {
                found.push(Violation::new(
                    field,
                    ViolationKind::EmptyText,
                    format!("{field} must not be blank"),
                ));
            }
        }
    }
    company_rules(raw, &mut found);
    talking_point_rules(raw, &mut found);
    unique_names(
        raw.pointer("/architecture/components"),
        "name",
        "architecture.components.name",
        &mut found,
    );
    unique_names(raw.get("tradeoffs"), "decision", "tradeoffs.decision", &mut found);
    found
}

fn id_rules(raw: &Value, seen_ids: &HashSet<String>, found: &mut Vec<Violation>) {
    let Some(id) = raw.get("id").and_then(Value::as_str) else {
        return;
    };
    if id.trim().is_empty() {
        found.push(Violation::new("id", ViolationKind::EmptyText, "id must not be blank"));
        return;
    }
    if !QuestionId::is_well_formed(id) {
        found.push(Violation::new(
            "id",
            ViolationKind::InvalidFormat,
            format!("id '{id}' must match ^[a-z0-9]+(-[a-z0-9]+)*$"),
        ));
    }
    if seen_ids.contains(id) {
        found.push(Violation::new(
            "id",
            ViolationKind::Duplicate,
            format!("id '{id}' is already taken by an earlier record"),
        ));
    }
}

fn company_rules(raw: &Value, found: &mut Vec<Violation>) {
    let Some(companies) = raw.get("companies").and_then(Value::as_array) else {
        return;
    };
    let mut seen = BTreeSet::new();
    for (index, company) in companies.iter().enumerate() {
        let Some(name) = company.as_str() else {
            continue;
        };
        if name.trim().is_empty() {
            found.push(
                Violation::new("companies", ViolationKind::EmptyText, "company must not be blank")
                    .at(index),
            );
        } else if !seen.insert(name) {
            found.push(
                Violation::new(
                    "companies",
                    ViolationKind::Duplicate,
                    format!("company '{name}' listed more than once"),
                )
                .at(index),
            );
        }
    }
}

fn talking_point_rules(raw: &Value, found: &mut Vec<Violation>) {
    let Some(points) = raw.get("talkingPoints").and_then(Value::as_object) else {
        return;
    };
    let usable = TALKING_POINT_KEYS.iter().any(|key| {
        points
            .get(*key)
            .and_then(Value::as_str)
            .is_some_and(|text| !text.trim().is_empty())
    });
    if !usable {
        found.push(Violation::new(
            "talkingPoints",
            ViolationKind::EmptyCollection,
            format!(
                "talkingPoints needs at least one non-blank section among {}",
                TALKING_POINT_KEYS.join(", ")
            ),
        ));
    }
}

fn unique_names(items: Option<&Value>, key: &str, field: &str, found: &mut Vec<Violation>) {
    let Some(items) = items.and_then(Value::as_array) else {
        return;
    };
    let mut seen = BTreeSet::new();
    for (index, item) in items.iter().enumerate() {
        let Some(name) = item.get(key).and_then(Value::as_str) else {
            continue;
        };
        if !seen.insert(name) {
            found.push(
                Violation::new(
                    field,
                    ViolationKind::Duplicate,
                    format!("{key} '{name}' appears more than once"),
                )
                .at(index),
            );
        }
    }
}
