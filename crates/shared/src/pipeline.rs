use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::io::read_text_file;
use crate::keywords::OpenAIKeywords;
use crate::models::Report;
use crate::quiz::OpenAIQuiz;
use crate::summarizer::HuggingFaceSummarizer;

pub const DEFAULT_HF_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SUMMARY_WORDS: usize = 150;

/// Per-run settings taken from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_file: PathBuf,
    pub keywords: usize,
    pub questions: usize,
    pub hf_model: String,
    pub openai_model: String,
    pub max_summary_words: usize,
}

impl RunOptions {
    pub fn new(input_file: impl Into<PathBuf>, keywords: usize, questions: usize) -> Self {
        Self {
            input_file: input_file.into(),
            keywords,
            questions,
            hf_model: DEFAULT_HF_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            max_summary_words: DEFAULT_SUMMARY_WORDS,
        }
    }
}

/// Convert a signed CLI count into a positive one.
pub fn positive_count(name: &str, value: i64) -> Result<usize, AppError> {
    usize::try_from(value)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::validation(format!("{} must be a positive integer", name)))
}

/// Read the input, then summarize, extract keywords and build the quiz, one
/// remote call at a time.
pub async fn run(options: &RunOptions, config: &Config) -> Result<Report> {
    info!(path = %options.input_file.display(), "Reading input file");
    let document = read_text_file(&options.input_file)?;
    let text = document.text();

    info!(model = %options.hf_model, "Summarizing");
    let summarizer = HuggingFaceSummarizer::new(config, &options.hf_model)?;
    let summary = summarizer
        .summarize(text, options.max_summary_words)
        .await?;

    info!(model = %options.openai_model, count = options.keywords, "Extracting keywords");
    let keyword_client = OpenAIKeywords::new(config, &options.openai_model)?;
    let keywords = keyword_client.generate(text, options.keywords).await?;

    info!(model = %options.openai_model, count = options.questions, "Generating quiz");
    let quiz_client = OpenAIQuiz::new(config, &options.openai_model)?;
    let quiz = quiz_client.generate(text, options.questions).await?;

    info!(
        keywords = keywords.len(),
        questions = quiz.len(),
        "Digest complete"
    );

    Ok(Report {
        summary,
        keywords,
        quiz,
    })
}
