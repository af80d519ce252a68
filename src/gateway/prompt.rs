//! Prompt text and the declared roadmap response schema.

use serde_json::json;

use crate::model::Document;

/// Summary prompt: category, title, and the full content verbatim.
pub fn summary_prompt(doc: &Document) -> String {
    format!(
        "Please provide a concise, professional summary for the following {} document titled \"{}\":\n\n{}",
        doc.category, doc.title, doc.content
    )
}

/// One `"{title}: {summary}"` line per document, in input order.
///
/// Content is left out; titles and summaries are enough context for planning.
pub fn roadmap_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| format!("{}: {}", d.title, d.summary))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn roadmap_prompt(topic: &str, documents: &[Document]) -> String {
    format!(
        "Based on the following document summaries, create a structured Training Roadmap for the topic: \"{topic}\".\n\nContext:\n{}",
        roadmap_context(documents)
    )
}

/// Response schema for [`TrainingRoadmap`](crate::model::TrainingRoadmap), in the
/// endpoint's OpenAPI-subset dialect.
pub fn roadmap_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "objective": { "type": "STRING" },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "duration": { "type": "STRING" },
                        "resources": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["title", "description", "duration"]
                }
            }
        },
        "required": ["title", "objective", "steps"]
    })
}
