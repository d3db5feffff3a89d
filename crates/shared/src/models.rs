use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Text loaded from the input file. Never empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl AsRef<str>) -> Result<Self, AppError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(AppError::validation("Input file is empty"));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: [String; 4],
    /// Always in `0..=3`.
    pub answer_index: usize,
}

/// Everything the console prints for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub summary: String,
    pub keywords: Vec<String>,
    pub quiz: Vec<QuizItem>,
}
