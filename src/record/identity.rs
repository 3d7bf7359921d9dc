//! Identifier and classification types shared by records, the validator and
//! the catalog indices.
//!
//! `Difficulty` is a closed set and parses strictly. `Category` stays an open
//! string so new topic tags never need a schema change; it only guarantees the
//! value is not blank.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable record identifier (`^[a-z0-9]+(-[a-z0-9]+)*$`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` is a lowercase-hyphen token.
    pub fn is_well_formed(raw: &str) -> bool {
        !raw.is_empty()
            && raw.split('-').all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Ordinal used only by the explicit difficulty sort; never by ranking.
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => bail!("unknown difficulty '{other}', expected one of Easy, Medium, Hard"),
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

/// Open topic tag such as "Messaging & Communication".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            bail!("category must not be blank");
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Category::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_format() {
        assert!(QuestionId::is_well_formed("facebook-newsfeed"));
        assert!(QuestionId::is_well_formed("web3-crawler"));
        assert!(!QuestionId::is_well_formed(""));
        assert!(!QuestionId::is_well_formed("Facebook"));
        assert!(!QuestionId::is_well_formed("news--feed"));
        assert!(!QuestionId::is_well_formed("-feed"));
        assert!(!QuestionId::is_well_formed("feed_v2"));
    }

    #[test]
    fn difficulty_parses_strictly() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("hard".parse::<Difficulty>().is_err());
        assert!(Difficulty::try_from("Extreme").is_err());
        assert!(Difficulty::Easy.rank() < Difficulty::Hard.rank());
    }

    #[test]
    fn category_rejects_blank() {
        assert!(Category::new("  ").is_err());
        let parsed: Result<Category, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let ok: Category = serde_json::from_str("\"Video & Streaming\"").unwrap();
        assert_eq!(ok.as_str(), "Video & Streaming");
    }
}
