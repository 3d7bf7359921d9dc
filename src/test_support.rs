//! Record builders for unit tests.

use crate::record::{
    Architecture, Category, Component, QuestionId, QuestionRecord, Requirements, Resources,
    TalkingPoints, Tradeoff,
};
use serde_json::{Value, json};

pub(crate) fn sample_record(id: &str, difficulty: &str) -> QuestionRecord {
    QuestionRecord {
        id: QuestionId::new(id),
        title: format!("Design {id}"),
        companies: vec!["Acme".to_string()],
        difficulty: difficulty.parse().unwrap(),
        category: Category::new("Infrastructure & Tools").unwrap(),
        description: format!("Study notes for {id}"),
        requirements: Requirements {
            functional: vec!["Serve requests".to_string()],
            non_functional: vec!["99.9% availability".to_string()],
        },
        talking_points: TalkingPoints {
            introduction: Some("Start with the API.".to_string()),
            ..TalkingPoints::default()
        },
        architecture: Architecture {
            svg_path: None,
            components: vec![Component {
                name: "Gateway".to_string(),
                description: "Routes traffic".to_string(),
            }],
        },
        api_design: "GET /items".to_string(),
        database_schema: None,
        tradeoffs: vec![Tradeoff {
            decision: "SQL vs NoSQL".to_string(),
            analysis: "Pick SQL".to_string(),
        }],
        resources: Resources::default(),
    }
}

pub(crate) fn sample_raw(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Design {id}"),
        "companies": ["Acme", "Globex"],
        "difficulty": "Easy",
        "category": "Infrastructure & Tools",
        "description": format!("Study notes for {id}"),
        "requirements": {
            "functional": ["Shorten URLs"],
            "nonFunctional": ["Low latency"]
        },
        "talkingPoints": {"introduction": "Start here."},
        "architecture": {
            "svgPath": "/diagrams/sample.svg",
            "components": [{"name": "Gateway", "description": "Routes traffic"}]
        },
        "apiDesign": "POST /urls",
        "databaseSchema": {"sql": "CREATE TABLE urls (...)"},
        "tradeoffs": [{"decision": "Hashing vs counter", "analysis": "Counter"}],
        "resources": {
            "videos": [{"title": "Talk", "youtubeId": "abc123", "duration": "10:00"}],
            "articles": [{"title": "Post", "url": "https://example.com/post"}],
            "books": [{"title": "Book", "author": "Someone"}]
        }
    })
}
