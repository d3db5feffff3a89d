use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::AppError;

const MAX_NEW_TOKENS: u32 = 256;
const TEMPERATURE: f32 = 0.3;
const REPETITION_PENALTY: f32 = 1.1;

/// Result of asking the model's dedicated summarization task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedicatedOutcome {
    Summary(String),
    /// The task is not served for this model, or its reply had no summary.
    Unavailable(String),
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
    repetition_penalty: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The generation endpoint answers with a list, a single object, or a bare string
/// depending on the backend serving the model.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
    Plain(String),
}

impl GenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::Many(items) => items.into_iter().next().map(|g| g.generated_text),
            GenerationResponse::One(g) => Some(g.generated_text),
            GenerationResponse::Plain(text) => Some(text),
        }
    }
}

pub struct HuggingFaceSummarizer {
    client: Client,
    token: Option<String>,
    endpoint: String,
    model: String,
}

impl HuggingFaceSummarizer {
    pub fn new(config: &Config, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            token: config.hf_api_token.clone(),
            endpoint: format!("{}/models/{}", config.hf_base_url, model),
            model: model.to_string(),
        })
    }

    /// Summarize `text`, preferring the model's summarization task and
    /// falling back to instruction-prompted generation.
    ///
    /// `max_words` is only a hint in the prompt; the reply is not cut to fit.
    #[instrument(level = "info", skip(self, text), fields(model = %self.model))]
    pub async fn summarize(&self, text: &str, max_words: usize) -> Result<String, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Input text is empty."));
        }

        match self.try_dedicated(text).await {
            DedicatedOutcome::Summary(summary) => return Ok(summary),
            DedicatedOutcome::Unavailable(reason) => {
                warn!(%reason, "Summarization task unavailable, falling back to text generation");
            }
        }

        let prompt = build_prompt(text, max_words);
        self.generate(&prompt)
            .await
            .map_err(|e| AppError::inference_from("Hugging Face summarization failed", e))
    }

    async fn try_dedicated(&self, text: &str) -> DedicatedOutcome {
        let request = self
            .authorized(self.client.post(&self.endpoint))
            .json(&SummarizationRequest { inputs: text });

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return DedicatedOutcome::Unavailable(format!("request failed: {}", e)),
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return DedicatedOutcome::Unavailable(format!("HTTP {}: {}", status, error_text.trim()));
        }

        match response.json::<Value>().await {
            Ok(body) => match extract_summary_text(&body) {
                Some(summary) => {
                    debug!(summary_len = summary.len(), "Summarization task succeeded");
                    DedicatedOutcome::Summary(summary)
                }
                None => DedicatedOutcome::Unavailable("reply had no summary_text".to_string()),
            },
            Err(e) => DedicatedOutcome::Unavailable(format!("undecodable reply: {}", e)),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                do_sample: true,
                repetition_penalty: REPETITION_PENALTY,
                return_full_text: false,
            },
        };

        let response = self
            .authorized(self.client.post(&self.endpoint))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Hugging Face Inference API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Hugging Face API error ({}): {}", status, error_text.trim());
        }

        let generated = response
            .json::<GenerationResponse>()
            .await
            .context("Failed to parse Hugging Face API response")?
            .into_text()
            .context("Hugging Face API returned no generated text")?;

        info!(summary_len = generated.len(), "Summary generated by fallback");
        Ok(generated.trim().to_string())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

pub fn build_prompt(text: &str, max_words: usize) -> String {
    format!(
        "Summarize the following text in at most {} words. Be concise and preserve key facts.\n\n{}\n\nSummary:",
        max_words, text
    )
}

/// Pull `summary_text` out of either `{...}` or `[{...}, ...]`.
fn extract_summary_text(body: &Value) -> Option<String> {
    let object = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let summary = object.get("summary_text")?;
    let text = match summary {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(text.trim().to_string())
}
