#![allow(dead_code)]

use httpmock::MockServer;
use serde_json::{json, Value};
use shared::Config;

/// Point both providers at the same mock server.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        openai_api_key: "sk-test".to_string(),
        hf_api_token: None,
        openai_base_url: server.base_url(),
        hf_base_url: server.base_url(),
    }
}

pub fn chat_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub fn quiz_item(question: &str, answer_index: Value) -> Value {
    json!({
        "question": question,
        "options": ["alpha", "beta", "gamma", "delta"],
        "answer_index": answer_index,
    })
}

pub const ARTICLE: &str = "The Rhine flows through six countries. \
It empties into the North Sea near Rotterdam. \
Barges carry coal and grain along its length.";
