use crate::record::{Category, Difficulty, QuestionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// One validated catalog entry. Field names serialize in camelCase to match
/// the authored content files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub title: String,
    pub companies: Vec<String>,
    pub difficulty: Difficulty,
    pub category: Category,
    pub description: String,
    pub requirements: Requirements,
    pub talking_points: TalkingPoints,
    pub architecture: Architecture,
    pub api_design: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_schema: Option<DatabaseSchema>,
    pub tradeoffs: Vec<Tradeoff>,
    pub resources: Resources,
}

impl QuestionRecord {
    pub fn summary(&self) -> QuestionSummary {
        QuestionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            companies: self.companies.clone(),
            difficulty: self.difficulty,
            category: self.category.clone(),
        }
    }

    /// Fields that break the content rules the validator enforces. Empty for
    /// every record produced by `RecordValidator`.
    pub fn content_defects(&self) -> Vec<&'static str> {
        let mut defects = Vec::new();
        if !QuestionId::is_well_formed(self.id.as_str()) {
            defects.push("id");
        }
        if self.title.trim().is_empty() {
            defects.push("title");
        }
        let mut companies = BTreeSet::new();
        if self.companies.is_empty()
            || self
                .companies
                .iter()
                .any(|c| c.trim().is_empty() || !companies.insert(c.as_str()))
        {
            defects.push("companies");
        }
        if self.description.trim().is_empty() {
            defects.push("description");
        }
        if self.requirements.functional.is_empty() || self.requirements.non_functional.is_empty()
        {
            defects.push("requirements");
        }
        if self
            .talking_points
            .sections()
            .iter()
            .all(|(_, text)| text.trim().is_empty())
        {
            defects.push("talkingPoints");
        }
        let mut names = BTreeSet::new();
        if !self
            .architecture
            .components
            .iter()
            .all(|c| names.insert(c.name.as_str()))
        {
            defects.push("architecture");
        }
        if self.api_design.trim().is_empty() {
            defects.push("apiDesign");
        }
        let mut decisions = BTreeSet::new();
        if !self
            .tradeoffs
            .iter()
            .all(|t| decisions.insert(t.decision.as_str()))
        {
            defects.push("tradeoffs");
        }
        defects
    }
}

/// Listing shape used by menus and result tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub title: String,
    pub companies: Vec<String>,
    pub difficulty: Difficulty,
    pub category: Category,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
}

/// Narrative sections. Keys outside the recognized set are carried in
/// `extra` untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkingPoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_estimation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_level_design: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_design: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottlenecks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Recognized `talkingPoints` keys, in presentation order.
pub const TALKING_POINT_KEYS: [&str; 7] = [
    "introduction",
    "capacityEstimation",
    "highLevelDesign",
    "detailedDesign",
    "dataFlow",
    "bottlenecks",
    "scaling",
];

impl TalkingPoints {
    /// Recognized sections that are present, paired with their key.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        let slots = [
            &self.introduction,
            &self.capacity_estimation,
            &self.high_level_design,
            &self.detailed_design,
            &self.data_flow,
            &self.bottlenecks,
            &self.scaling,
        ];
        TALKING_POINT_KEYS
            .iter()
            .zip(slots)
            .filter_map(|(key, slot)| slot.as_deref().map(|text| (*key, text)))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_path: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nosql: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub decision: String,
    pub analysis: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoResource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<ArticleResource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<BookResource>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub title: String,
    pub youtube_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleResource {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResource {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
}
