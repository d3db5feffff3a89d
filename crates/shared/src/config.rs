use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use url::Url;

use crate::error::AppError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const HF_API_TOKEN: &str = "HUGGINGFACEHUB_API_TOKEN";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const HF_BASE_URL: &str = "HF_INFERENCE_BASE_URL";

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Settings shared by every provider client. Built once at startup, then
/// handed to each client constructor by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub hf_api_token: Option<String>,
    pub openai_base_url: String,
    pub hf_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let openai_api_key = require(OPENAI_API_KEY)?;
        let hf_api_token = optional(HF_API_TOKEN);

        let openai_base_url = base_url(OPENAI_BASE_URL, DEFAULT_OPENAI_BASE_URL)?;
        let hf_base_url = base_url(HF_BASE_URL, DEFAULT_HF_BASE_URL)?;

        debug!(
            hf_token = hf_api_token.is_some(),
            %openai_base_url,
            %hf_base_url,
            "Configuration loaded"
        );

        Ok(Self {
            openai_api_key,
            hf_api_token,
            openai_base_url,
            hf_base_url,
        })
    }
}

/// Merge variables from an env file into the process environment.
/// Variables that are already set are never overridden.
pub fn load_environment(path: Option<&Path>) {
    match path {
        Some(path) => {
            match dotenvy::from_path(path) {
                Ok(()) => debug!(path = %path.display(), "Loaded env file"),
                Err(e) => warn!(path = %path.display(), error = %e, "Could not load env file"),
            }
        }
        None => try_load_dotenv(),
    }
}

fn try_load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded env file");
            return;
        }
        Err(e) => debug!(error = %e, "No .env in working directory"),
    }

    let candidates = [
        dirs::config_dir().map(|dir| dir.join("ai-console").join(".env")),
        dirs::home_dir().map(|dir| dir.join(".env")),
    ];
    if load_first_env_file(candidates.into_iter().flatten()).is_none() {
        debug!("No env file found, using the process environment only");
    }
}

/// Load the first candidate that exists and parses. Returns the file used.
fn load_first_env_file(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    for path in candidates.into_iter().filter(|path| path.is_file()) {
        match dotenvy::from_path(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Loaded env file");
                return Some(path);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Could not load env file"),
        }
    }
    None
}

/// Trimmed value of `name`, or a configuration error if it is unset or blank.
pub fn require(name: &str) -> Result<String, AppError> {
    optional(name).ok_or_else(|| {
        AppError::configuration(format!("Missing required environment variable: {}", name))
    })
}

/// Trimmed value of `name`. Blank counts as unset.
pub fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn base_url(name: &str, default: &str) -> Result<String, AppError> {
    let raw = optional(name).unwrap_or_else(|| default.to_string());
    Url::parse(&raw)
        .map_err(|e| AppError::configuration(format!("Invalid URL in {}: {} ({})", name, raw, e)))?;
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared
    // between test threads.

    #[test]
    fn require_trims_value() {
        env::set_var("AI_CONSOLE_TEST_REQUIRE_TRIM", "  secret \n");
        assert_eq!(require("AI_CONSOLE_TEST_REQUIRE_TRIM").unwrap(), "secret");
    }

    #[test]
    fn require_rejects_blank() {
        env::set_var("AI_CONSOLE_TEST_REQUIRE_BLANK", "   ");
        let err = require("AI_CONSOLE_TEST_REQUIRE_BLANK").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: AI_CONSOLE_TEST_REQUIRE_BLANK"
        );
    }

    #[test]
    fn require_rejects_missing() {
        let err = require("AI_CONSOLE_TEST_NEVER_SET").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn optional_never_fails() {
        assert_eq!(optional("AI_CONSOLE_TEST_OPTIONAL_MISSING"), None);
        env::set_var("AI_CONSOLE_TEST_OPTIONAL_SET", " token ");
        assert_eq!(
            optional("AI_CONSOLE_TEST_OPTIONAL_SET").as_deref(),
            Some("token")
        );
    }

    #[test]
    fn base_url_strips_trailing_slash_and_validates() {
        env::set_var("AI_CONSOLE_TEST_BASE_URL", "http://127.0.0.1:9000/v1/");
        assert_eq!(
            base_url("AI_CONSOLE_TEST_BASE_URL", DEFAULT_OPENAI_BASE_URL).unwrap(),
            "http://127.0.0.1:9000/v1"
        );

        env::set_var("AI_CONSOLE_TEST_BAD_URL", "not a url");
        let err = base_url("AI_CONSOLE_TEST_BAD_URL", DEFAULT_OPENAI_BASE_URL).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        assert_eq!(
            base_url("AI_CONSOLE_TEST_BASE_URL_UNSET", DEFAULT_HF_BASE_URL).unwrap(),
            DEFAULT_HF_BASE_URL
        );
    }

    #[test]
    fn load_environment_does_not_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "AI_CONSOLE_TEST_DOTENV_NEW=from-file\nAI_CONSOLE_TEST_DOTENV_KEEP=from-file\n",
        )
        .unwrap();
        env::set_var("AI_CONSOLE_TEST_DOTENV_KEEP", "from-process");

        load_environment(Some(&path));

        assert_eq!(env::var("AI_CONSOLE_TEST_DOTENV_NEW").unwrap(), "from-file");
        assert_eq!(
            env::var("AI_CONSOLE_TEST_DOTENV_KEEP").unwrap(),
            "from-process"
        );
    }

    #[test]
    fn first_loadable_env_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.env");
        let first = dir.path().join("first.env");
        let second = dir.path().join("second.env");
        std::fs::write(&first, "AI_CONSOLE_TEST_SEARCH_ORDER=first\n").unwrap();
        std::fs::write(&second, "AI_CONSOLE_TEST_SEARCH_ORDER=second\n").unwrap();

        let loaded = load_first_env_file([missing, first.clone(), second]);

        assert_eq!(loaded, Some(first));
        assert_eq!(env::var("AI_CONSOLE_TEST_SEARCH_ORDER").unwrap(), "first");
    }

    #[test]
    fn no_env_file_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_first_env_file([dir.path().join("absent.env")]), None);
    }

    #[test]
    fn load_environment_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        load_environment(Some(&dir.path().join("missing.env")));
    }
}
