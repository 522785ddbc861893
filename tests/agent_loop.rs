// tests/agent_loop.rs
// Agent loop behavior with a scripted provider: termination, tool dispatch,
// iteration bounding, and failure handling.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;

use finsent::agent::{
    AgentContext, AgentError, ConversationMessage, FunctionCall, HistoryMessage, Role,
    ToolCallRequest, MAX_ITERATIONS,
};
use finsent::llm::{AssistantTurn, Provider};
use finsent::store::{migrations, SentimentStore};
use finsent::tools::ToolSpec;

// ============================================================================
// Scripted Provider
// ============================================================================

/// Plays back a fixed sequence of assistant turns and records every request
/// it sees: the transcript snapshot and how many tools were advertised.
struct ScriptedProvider {
    script: Mutex<VecDeque<AssistantTurn>>,
    requests: Mutex<Vec<(Vec<ConversationMessage>, usize)>>,
}

impl ScriptedProvider {
    fn new(turns: Vec<AssistantTurn>) -> Self {
        Self {
            script: Mutex::new(turns.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(Vec<ConversationMessage>, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSpec],
    ) -> Result<AssistantTurn> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), tools.len()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn text_turn(content: &str) -> AssistantTurn {
    AssistantTurn {
        content: content.to_string(),
        tool_calls: Vec::new(),
    }
}

fn tool_turn(calls: &[(&str, &str, &str)]) -> AssistantTurn {
    AssistantTurn {
        content: String::new(),
        tool_calls: calls
            .iter()
            .map(|(id, name, arguments)| ToolCallRequest {
                id: id.to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            })
            .collect(),
    }
}

// ============================================================================
// Store Setup
// ============================================================================

async fn empty_store() -> SentimentStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrations::run_migrations(&pool).await.unwrap();
    SentimentStore::new(pool)
}

async fn seeded_store() -> SentimentStore {
    let store = empty_store().await;
    let id = sqlx::query("INSERT INTO transcripts (bank_name, publish_date) VALUES ('Fed', '2024-01-15')")
        .execute(store.pool())
        .await
        .unwrap()
        .last_insert_rowid();
    sqlx::query(
        "INSERT INTO transcript_sentences \
         (transcript_id, sentence_text, topic, stance_score, impact_weight) \
         VALUES (?, 'Inflation remains too high.', 'Inflation', 0.5, 1.0)",
    )
    .bind(id)
    .execute(store.pool())
    .await
    .unwrap();
    store
}

fn agent_with(provider: &Arc<ScriptedProvider>, store: SentimentStore) -> AgentContext {
    AgentContext::new(provider.clone(), store)
}

// ============================================================================
// Loop Behavior
// ============================================================================

#[tokio::test]
async fn direct_answer_makes_one_request_and_no_tool_calls() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("Hello!")]));
    let agent = agent_with(&provider, empty_store().await);

    let reply = agent.run_agent("hi", &[]).await.unwrap();
    assert_eq!(reply.response, "Hello!");
    assert!(reply.tool_calls_made.is_empty());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);

    let (messages, tool_count) = &requests[0];
    assert_eq!(*tool_count, 5, "every tool round advertises the registry");
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0].content.contains("FinSENT Policy Analyst"));
    assert_eq!(messages.last().unwrap().role, Role::User);
    assert_eq!(messages.last().unwrap().content, "hi");
}

#[tokio::test]
async fn history_sits_between_system_prompt_and_new_message() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("ok")]));
    let agent = agent_with(&provider, empty_store().await);

    let history = vec![
        HistoryMessage {
            role: Role::User,
            content: "How hawkish was the Fed in January?".to_string(),
        },
        HistoryMessage {
            role: Role::Assistant,
            content: "The Fed averaged +0.210 in January.".to_string(),
        },
    ];
    agent.run_agent("And the BoC?", &history).await.unwrap();

    let requests = provider.requests();
    let roles: Vec<Role> = requests[0].0.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::System, Role::User, Role::Assistant, Role::User]);
    assert_eq!(requests[0].0[2].content, "The Fed averaged +0.210 in January.");
    assert_eq!(requests[0].0[3].content, "And the BoC?");
}

#[tokio::test]
async fn tool_round_trip_feeds_results_back_to_the_model() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(&[("call_1", "get_sentiment_summary", r#"{"bank": "Fed"}"#)]),
        text_turn("The Fed averaged +0.500 on 2024-01-15."),
    ]));
    let agent = agent_with(&provider, seeded_store().await);

    let reply = agent.run_agent("How hawkish is the Fed?", &[]).await.unwrap();
    assert_eq!(reply.response, "The Fed averaged +0.500 on 2024-01-15.");
    assert_eq!(reply.tool_calls_made.len(), 1);
    assert_eq!(reply.tool_calls_made[0].tool, "get_sentiment_summary");
    assert_eq!(reply.tool_calls_made[0].args, json!({"bank": "Fed"}));

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].1, 5, "tools stay on until the model stops calling them");

    // Second request transcript: ..., assistant(tool_calls), tool(result)
    let messages = &requests[1].0;
    let assistant = &messages[messages.len() - 2];
    assert_eq!(assistant.role, Role::Assistant);
    assert_eq!(assistant.tool_calls[0].id, "call_1");
    assert_eq!(assistant.tool_calls[0].function.arguments, r#"{"bank": "Fed"}"#);

    let tool_msg = messages.last().unwrap();
    assert_eq!(tool_msg.role, Role::Tool);
    assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_1"));
    let payload: Value = serde_json::from_str(&tool_msg.content).unwrap();
    assert_eq!(payload[0]["date"], "2024-01-15");
    assert_eq!(payload[0]["avg_sentiment"], 0.5);
    assert_eq!(payload[0]["sentence_count"], 1);
}

#[tokio::test]
async fn several_calls_in_one_turn_run_in_order() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(&[
            ("call_1", "get_divergence", "{}"),
            ("call_2", "get_sentiment_summary", r#"{"bank": "BoC"}"#),
            ("call_3", "search_sentences", r#"{"keyword": "inflation"}"#),
        ]),
        text_turn("done"),
    ]));
    let agent = agent_with(&provider, seeded_store().await);

    let reply = agent.run_agent("compare", &[]).await.unwrap();
    let tools: Vec<&str> = reply
        .tool_calls_made
        .iter()
        .map(|t| t.tool.as_str())
        .collect();
    assert_eq!(tools, ["get_divergence", "get_sentiment_summary", "search_sentences"]);

    // One tool message per call, in dispatch order, keyed by call id
    let messages = &provider.requests()[1].0;
    let tool_ids: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.tool_call_id.as_deref())
        .collect();
    assert_eq!(tool_ids, ["call_1", "call_2", "call_3"]);
}

#[tokio::test]
async fn unknown_tool_is_an_answerable_error_not_a_fault() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(&[("call_1", "get_weather", "{}")]),
        text_turn("I don't have a weather tool."),
    ]));
    let agent = agent_with(&provider, empty_store().await);

    let reply = agent.run_agent("weather?", &[]).await.unwrap();
    assert_eq!(reply.response, "I don't have a weather tool.");
    assert_eq!(reply.tool_calls_made[0].tool, "get_weather");

    let messages = &provider.requests()[1].0;
    let tool_msg = messages.last().unwrap();
    let payload: Value = serde_json::from_str(&tool_msg.content).unwrap();
    assert_eq!(payload["error"], "Unknown tool: get_weather");
}

#[tokio::test]
async fn malformed_arguments_end_the_exchange() {
    let provider = Arc::new(ScriptedProvider::new(vec![tool_turn(&[(
        "call_1",
        "get_divergence",
        "{not json",
    )])]));
    let agent = agent_with(&provider, empty_store().await);

    let err = agent.run_agent("divergence?", &[]).await.unwrap_err();
    match err {
        AgentError::BadToolArguments { name, .. } => assert_eq!(name, "get_divergence"),
        other => panic!("wrong error: {other}"),
    }
}

#[tokio::test]
async fn iteration_budget_forces_a_final_answer_without_tools() {
    let mut script: Vec<AssistantTurn> = (0..MAX_ITERATIONS)
        .map(|i| {
            tool_turn(&[(
                format!("call_{i}").as_str(),
                "get_divergence",
                "{}",
            )])
        })
        .collect();
    script.push(text_turn("Here is what I found."));

    let provider = Arc::new(ScriptedProvider::new(script));
    let agent = agent_with(&provider, empty_store().await);

    let reply = agent.run_agent("keep digging", &[]).await.unwrap();
    assert_eq!(reply.response, "Here is what I found.");
    assert_eq!(reply.tool_calls_made.len(), MAX_ITERATIONS);

    let requests = provider.requests();
    assert_eq!(requests.len(), MAX_ITERATIONS + 1);
    for (_, tool_count) in &requests[..MAX_ITERATIONS] {
        assert_eq!(*tool_count, 5);
    }
    assert_eq!(
        requests[MAX_ITERATIONS].1, 0,
        "the forced final completion must not offer tools"
    );
}

#[tokio::test]
async fn provider_failure_surfaces_as_reasoning_error() {
    let provider = Arc::new(ScriptedProvider::new(Vec::new()));
    let agent = agent_with(&provider, empty_store().await);

    let err = agent.run_agent("hi", &[]).await.unwrap_err();
    assert!(matches!(err, AgentError::Reasoning(_)));
}
