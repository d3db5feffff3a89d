use anyhow::Result;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::AppError;
use crate::keywords::value_to_text;
use crate::models::QuizItem;
use crate::openai::ChatClient;

const SYSTEM_PROMPT: &str = "You generate factual multiple-choice quiz questions from the given text. \
Return STRICT JSON ONLY: a list of {question, options, answer_index}. \
Each 'options' must be an array of exactly 4 strings. 'answer_index' is 0..3.";

const TEMPERATURE: f32 = 0.4;

pub struct OpenAIQuiz {
    chat: ChatClient,
    model: String,
}

impl OpenAIQuiz {
    pub fn new(config: &Config, model: &str) -> Result<Self> {
        Ok(Self {
            chat: ChatClient::new(config)?,
            model: model.to_string(),
        })
    }

    /// Generate up to `num_questions` well-formed quiz items.
    ///
    /// A reply that is not a JSON list is an error. Individual malformed
    /// items are dropped, and the result is never padded.
    #[instrument(level = "info", skip(self, text), fields(model = %self.model))]
    pub async fn generate(&self, text: &str, num_questions: usize) -> Result<Vec<QuizItem>, AppError> {
        if num_questions == 0 {
            return Err(AppError::validation(
                "num_questions must be a positive integer",
            ));
        }
        if text.trim().is_empty() {
            return Err(AppError::validation("Input text is empty."));
        }

        let user = format!(
            "Text:\n{}\n\nReturn exactly {} items as JSON. Do not include any explanations.",
            text, num_questions
        );

        let content = self
            .chat
            .complete(&self.model, SYSTEM_PROMPT, &user, TEMPERATURE)
            .await
            .map_err(|e| AppError::inference_from("OpenAI quiz generation failed", e))?;

        parse_quiz(&content, num_questions)
    }
}

/// Parse a raw reply into at most `limit` quiz items.
pub fn parse_quiz(raw: &str, limit: usize) -> Result<Vec<QuizItem>, AppError> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => return Err(invalid_json("Response is not a list", raw)),
        Err(e) => return Err(invalid_json(&e.to_string(), raw)),
    };

    let total = items.len();
    let accepted: Vec<QuizItem> = items
        .iter()
        .filter_map(normalize_item)
        .take(limit)
        .collect();

    debug!(total, accepted = accepted.len(), "Quiz items normalized");
    Ok(accepted)
}

fn invalid_json(reason: &str, raw: &str) -> AppError {
    AppError::inference(format!(
        "Invalid JSON returned for quiz: {}\nRaw: {}",
        reason, raw
    ))
}

/// Accept an item only if it has a question, exactly four options and an
/// answer index in `0..=3`.
pub fn normalize_item(item: &Value) -> Option<QuizItem> {
    let object = item.as_object()?;

    let question = object
        .get("question")
        .map(value_to_text)
        .unwrap_or_default()
        .trim()
        .to_string();
    if question.is_empty() {
        return None;
    }

    let options = object.get("options")?.as_array()?;
    let options: [String; 4] = options
        .iter()
        .map(|o| value_to_text(o).trim().to_string())
        .collect::<Vec<_>>()
        .try_into()
        .ok()?;

    let answer_index = object.get("answer_index").and_then(coerce_index)?;
    if answer_index > 3 {
        return None;
    }

    Some(QuizItem {
        question,
        options,
        answer_index: answer_index as usize,
    })
}

/// Integers as-is, finite floats truncated toward zero, numeric strings parsed.
fn coerce_index(value: &Value) -> Option<i64> {
    let index = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    index.filter(|i| *i >= 0)
}
