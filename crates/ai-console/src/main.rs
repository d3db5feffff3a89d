use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use shared::pipeline::{self, positive_count, RunOptions, DEFAULT_HF_MODEL, DEFAULT_OPENAI_MODEL};
use shared::{config, report, telemetry, Config};

#[derive(Parser)]
#[command(name = "ai-console")]
#[command(
    about = "Summarize a text file using Hugging Face, extract keywords and generate a quiz using OpenAI"
)]
struct Args {
    /// Path to input .txt file
    #[arg(long)]
    input_file: PathBuf,

    /// Number of keywords to generate
    #[arg(long, default_value = "5", allow_negative_numbers = true)]
    keywords: i64,

    /// Number of quiz questions to generate
    #[arg(long, default_value = "3", allow_negative_numbers = true)]
    questions: i64,

    /// Hugging Face model for summarization
    #[arg(long, default_value = DEFAULT_HF_MODEL)]
    hf_model: String,

    /// OpenAI model for generation
    #[arg(long, default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    /// Optional path to a .env file
    #[arg(long)]
    dotenv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::init_tracing();

    if let Err(err) = run_cli(args).await {
        tracing::debug!(error = ?err, "Run failed");
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run_cli(args: Args) -> Result<()> {
    config::load_environment(args.dotenv.as_deref());
    let config = Config::from_env()?;

    let options = RunOptions {
        input_file: args.input_file,
        keywords: positive_count("num_keywords", args.keywords)?,
        questions: positive_count("num_questions", args.questions)?,
        hf_model: args.hf_model,
        openai_model: args.openai_model,
        max_summary_words: pipeline::DEFAULT_SUMMARY_WORDS,
    };

    let digest = pipeline::run(&options, &config).await?;
    print!("{}", report::render(&digest));

    Ok(())
}
