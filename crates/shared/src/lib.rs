// Public modules
pub mod config;
pub mod error;
pub mod io;
pub mod keywords;
pub mod models;
pub mod openai;
pub mod pipeline;
pub mod quiz;
pub mod report;
pub mod summarizer;
pub mod telemetry;

// Re-export commonly used types
pub use config::{load_environment, Config};
pub use error::AppError;
pub use io::read_text_file;
pub use keywords::{KeywordParse, OpenAIKeywords};
pub use models::{Document, QuizItem, Report};
pub use pipeline::{run, RunOptions};
pub use quiz::OpenAIQuiz;
pub use summarizer::{DedicatedOutcome, HuggingFaceSummarizer};
