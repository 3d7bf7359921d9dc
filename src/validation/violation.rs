use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Top-level record fields in the order violations are reported.
pub const FIELD_ORDER: [&str; 13] = [
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
    "databaseSchema",
    "tradeoffs",
    "resources",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViolationKind {
    MissingOrWrongType,
    Duplicate,
    InvalidEnum,
    EmptyCollection,
    EmptyText,
    InvalidFormat,
    UnexpectedKey,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingOrWrongType => "MissingOrWrongType",
            ViolationKind::Duplicate => "Duplicate",
            ViolationKind::InvalidEnum => "InvalidEnum",
            ViolationKind::EmptyCollection => "EmptyCollection",
            ViolationKind::EmptyText => "EmptyText",
            ViolationKind::InvalidFormat => "InvalidFormat",
            ViolationKind::UnexpectedKey => "UnexpectedKey",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single defect found in a candidate record.
///
/// `field` is a dotted path with array positions stripped
/// (`architecture.components.name`); the position of the offending element,
/// when there is one, lives in `index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            index: None,
            message: message.into(),
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    fn order_key(&self) -> (usize, Option<usize>) {
        let top = self.field.split('.').next().unwrap_or_default();
        let rank = FIELD_ORDER
            .iter()
            .position(|name| *name == top)
            .unwrap_or(FIELD_ORDER.len());
        (rank, self.index)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "{}[{}]: {} ({})",
                self.field, index, self.kind, self.message
            ),
            None => write!(f, "{}: {} ({})", self.field, self.kind, self.message),
        }
    }
}

/// Every violation found for one record. Never empty when returned by the
/// validator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// True when some violation names `field` (exact dotted path).
    pub fn names_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.0.iter().any(|v| v.field == field && v.kind == kind)
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub(crate) fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.0.extend(violations);
    }

    /// Drops repeats, hides follow-on findings for a field that already has
    /// a type error, then orders by record field order and element index.
    /// The sort is stable so discovery order breaks remaining ties.
    pub(crate) fn finish(mut self) -> Self {
        let typed: BTreeSet<(String, Option<usize>)> = self
            .0
            .iter()
            .filter(|v| v.kind == ViolationKind::MissingOrWrongType)
            .map(|v| (v.field.clone(), v.index))
            .collect();
        let mut seen = BTreeSet::new();
        self.0.retain(|v| {
            if v.kind != ViolationKind::MissingOrWrongType
                && typed.contains(&(v.field.clone(), v.index))
            {
                return false;
            }
            seen.insert((v.field.clone(), v.kind, v.index))
        });
        self.0.sort_by_key(Violation::order_key);
        self
    }
}

impl IntoIterator for ViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}
