// src/tools/definitions.rs
//! Tool definitions exposed to the reasoning service for function calling.

use serde::Serialize;
use serde_json::json;

/// One tool in OpenAI function-calling shape:
/// `{"type": "function", "function": {name, description, parameters}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub spec_type: String,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

fn tool(name: &str, description: &str, parameters: serde_json::Value) -> ToolSpec {
    ToolSpec {
        spec_type: "function".into(),
        function: FunctionSpec {
            name: name.into(),
            description: description.into(),
            parameters,
        },
    }
}

/// All five analyst tools. Built once at startup and shared read-only across
/// every exchange.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        tool(
            "get_sentiment_summary",
            "Get average stance scores grouped by date for a specific bank. Use this to see how a bank's sentiment has evolved over time.",
            json!({
                "type": "object",
                "properties": {
                    "bank": {
                        "type": "string",
                        "description": "Bank name: 'Fed' or 'BoC'"
                    },
                    "start_date": {
                        "type": "string",
                        "description": "Start date in YYYY-MM-DD format (optional)"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "End date in YYYY-MM-DD format (optional)"
                    }
                },
                "required": ["bank"]
            }),
        ),
        tool(
            "get_transcripts",
            "List transcripts with their aggregate sentiment score. Use to find specific releases or see what transcripts exist in a date range.",
            json!({
                "type": "object",
                "properties": {
                    "bank": {
                        "type": "string",
                        "description": "Filter by bank: 'Fed' or 'BoC' (optional)"
                    },
                    "start_date": {
                        "type": "string",
                        "description": "Start date YYYY-MM-DD (optional)"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "End date YYYY-MM-DD (optional)"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Max results to return (default 10)"
                    }
                },
                "required": []
            }),
        ),
        tool(
            "get_transcript_sentences",
            "Get the full sentence-level breakdown for a specific transcript. Use this to drill into WHY a transcript scored the way it did.",
            json!({
                "type": "object",
                "properties": {
                    "transcript_id": {
                        "type": "integer",
                        "description": "The transcript ID to retrieve sentences for"
                    }
                },
                "required": ["transcript_id"]
            }),
        ),
        tool(
            "search_sentences",
            "Search sentence text for a keyword, with optional bank and topic filters. Use to find what central banks said about specific subjects.",
            json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "Text to search for (case-insensitive partial match)"
                    },
                    "bank": {
                        "type": "string",
                        "description": "Filter by bank: 'Fed' or 'BoC' (optional)"
                    },
                    "topic": {
                        "type": "string",
                        "description": "Filter by topic: Inflation, Growth, Employment, Guidance, Boilerplate (optional)"
                    }
                },
                "required": ["keyword"]
            }),
        ),
        tool(
            "get_divergence",
            "Get the Fed-vs-BoC sentiment divergence over time. Returns each date's Fed score, BoC score, and divergence (Fed - BoC).",
            json!({
                "type": "object",
                "properties": {
                    "start_date": {
                        "type": "string",
                        "description": "Start date YYYY-MM-DD (optional)"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "End date YYYY-MM-DD (optional)"
                    }
                },
                "required": []
            }),
        ),
    ]
}
