//! Question record model.
//!
//! Types here mirror the authored content files one to one. Narrative fields
//! (`talkingPoints`, `apiDesign`, `databaseSchema`) are opaque text: code
//! samples embedded in them are stored and returned verbatim, never parsed.
//! Records only become `QuestionRecord` values by passing through
//! `validation::RecordValidator`.

pub mod identity;
pub mod model;

pub use identity::{Category, Difficulty, QuestionId};
pub use model::{
    Architecture, ArticleResource, BookResource, Component, DatabaseSchema, QuestionRecord,
    QuestionSummary, Requirements, Resources, TALKING_POINT_KEYS, TalkingPoints, Tradeoff,
    VideoResource,
};
