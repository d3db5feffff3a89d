use anyhow::Result;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::AppError;
use crate::openai::ChatClient;

const SYSTEM_PROMPT: &str = "You are an assistant that extracts concise, descriptive keywords (1-3 words) \
that best characterize the given text. Return ONLY a JSON array of strings.";

const TEMPERATURE: f32 = 0.3;

/// Placeholder used when padding an empty list
pub const PLACEHOLDER: &str = "keyword";

/// How a raw model reply was turned into keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordParse {
    /// The reply was a JSON array.
    StructuredList(Vec<String>),
    /// The reply was not a JSON array and was split on commas instead.
    FreeformSplit(Vec<String>),
}

impl KeywordParse {
    pub fn into_keywords(self) -> Vec<String> {
        match self {
            KeywordParse::StructuredList(keywords) | KeywordParse::FreeformSplit(keywords) => {
                keywords
            }
        }
    }
}

pub struct OpenAIKeywords {
    chat: ChatClient,
    model: String,
}

impl OpenAIKeywords {
    pub fn new(config: &Config, model: &str) -> Result<Self> {
        Ok(Self {
            chat: ChatClient::new(config)?,
            model: model.to_string(),
        })
    }

    /// Extract exactly `num_keywords` short phrases from `text`.
    ///
    /// Only the remote call can fail; a malformed reply degrades to a comma
    /// split and the result is always padded or truncated to the requested count.
    #[instrument(level = "info", skip(self, text), fields(model = %self.model))]
    pub async fn generate(&self, text: &str, num_keywords: usize) -> Result<Vec<String>, AppError> {
        if num_keywords == 0 {
            return Err(AppError::validation(
                "num_keywords must be a positive integer",
            ));
        }
        if text.trim().is_empty() {
            return Err(AppError::validation("Input text is empty."));
        }

        let user = format!(
            "Text:\n{}\n\nReturn exactly {} keywords as a JSON array of strings.",
            text, num_keywords
        );

        let content = self
            .chat
            .complete(&self.model, SYSTEM_PROMPT, &user, TEMPERATURE)
            .await
            .map_err(|e| AppError::inference_from("OpenAI keyword generation failed", e))?;

        let parsed = parse_keywords(&content);
        if let KeywordParse::FreeformSplit(ref keywords) = parsed {
            debug!(count = keywords.len(), "Keyword reply was not a JSON array, split on commas");
        }

        Ok(enforce_count(parsed.into_keywords(), num_keywords))
    }
}

/// Strict JSON array first, comma split second.
pub fn parse_keywords(raw: &str) -> KeywordParse {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => KeywordParse::StructuredList(
            items
                .iter()
                .map(value_to_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => KeywordParse::FreeformSplit(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}

/// Truncate to `count`, or pad by repeating the last entry.
pub fn enforce_count(mut keywords: Vec<String>, count: usize) -> Vec<String> {
    keywords.truncate(count);
    let last = keywords
        .last()
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    keywords.resize(count, last);
    keywords
}

/// Text form of a JSON value: strings as-is, `null` as empty, anything else
/// as compact JSON.
///
/// `null` is never spelled out as a word, and booleans keep JSON spelling
/// (`true`, not `True`).
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
